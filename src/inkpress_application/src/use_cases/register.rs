use secrecy::{ExposeSecret, Secret};

use inkpress_core::{NewUser, User, UserStore, UserStoreError};

/// Error types for the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Register use case - creates a new user account
pub struct RegisterUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> RegisterUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Execute the register use case.
    ///
    /// Uniqueness of username and email is checked before the password
    /// confirmation, matching the order a client observes the failures in.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, new_user, password_confirm), fields(username = %new_user.username))]
    pub async fn execute(
        &self,
        new_user: NewUser,
        password_confirm: Secret<String>,
    ) -> Result<User, RegisterError> {
        match self.user_store.get_by_username(&new_user.username).await {
            Ok(_) => return Err(UserStoreError::UsernameTaken.into()),
            Err(UserStoreError::UserNotFound) => {}
            Err(e) => return Err(e.into()),
        }
        match self.user_store.get_by_email(&new_user.email).await {
            Ok(_) => return Err(UserStoreError::EmailTaken.into()),
            Err(UserStoreError::UserNotFound) => {}
            Err(e) => return Err(e.into()),
        }
        if new_user.password.as_ref().expose_secret() != password_confirm.expose_secret() {
            return Err(RegisterError::PasswordMismatch);
        }

        Ok(self.user_store.add_user(new_user).await?)
    }
}
