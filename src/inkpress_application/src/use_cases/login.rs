use inkpress_core::{Password, User, UserStore, UserStoreError, Username};

/// Error types for the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown user and wrong password collapse into the same error so the
    /// response does not reveal which usernames exist.
    #[error("Could not validate credentials.")]
    CredentialsInvalid,
    #[error("Inactive user.")]
    AccountInactive,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Login use case - verifies a credential pair
///
/// Token issuance happens at the edge; this only decides whether the caller
/// is who they claim to be and still allowed in.
pub struct LoginUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> LoginUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, username: &str, password: &Password) -> Result<User, LoginError> {
        let username = Username::try_from(username.to_string())
            .map_err(|_| LoginError::CredentialsInvalid)?;

        let user = match self.user_store.authenticate(&username, password).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) | Err(UserStoreError::IncorrectPassword) => {
                return Err(LoginError::CredentialsInvalid);
            }
            Err(e) => return Err(LoginError::Unexpected(e.to_string())),
        };

        if !user.is_active {
            return Err(LoginError::AccountInactive);
        }

        Ok(user)
    }
}
