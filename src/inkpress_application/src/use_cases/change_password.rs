use secrecy::{ExposeSecret, Secret};

use inkpress_core::{Password, UserStore, UserStoreError, Username};

/// Error types for the change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Incorrect password.")]
    PasswordIncorrect,
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Change password use case - rotates a user's credential
pub struct ChangePasswordUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// The confirmation is compared first, then the old password is verified
    /// against the stored hash before the replacement is written.
    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all, fields(username = %username))]
    pub async fn execute(
        &self,
        username: &Username,
        old_password: Secret<String>,
        new_password: Password,
        new_password_confirm: Secret<String>,
    ) -> Result<(), ChangePasswordError> {
        if new_password.as_ref().expose_secret() != new_password_confirm.expose_secret() {
            return Err(ChangePasswordError::PasswordMismatch);
        }

        let old_password = Password::try_from(old_password)
            .map_err(|_| ChangePasswordError::PasswordIncorrect)?;
        match self.user_store.authenticate(username, &old_password).await {
            Ok(_) => {}
            Err(UserStoreError::IncorrectPassword) => {
                return Err(ChangePasswordError::PasswordIncorrect);
            }
            Err(e) => return Err(e.into()),
        }

        self.user_store.set_password(username, new_password).await?;

        Ok(())
    }
}
