use inkpress_core::{User, UserStore, UserStoreError, Username};

/// Error types for the authorize use case
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AuthorizeError {
    #[error("Could not validate credentials.")]
    CredentialsInvalid,
    #[error("Inactive user.")]
    AccountInactive,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Authorize use case - resolves a verified token subject to an identity
///
/// This is the single chokepoint every protected route passes through: the
/// edge verifies the token signature/expiry first, then hands the subject
/// here to be resolved and screened. A subject whose user has vanished is
/// treated the same as a bad token.
pub struct AuthorizeUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> AuthorizeUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "AuthorizeUseCase::execute", skip(self))]
    pub async fn execute(&self, subject: &str) -> Result<User, AuthorizeError> {
        let username = Username::try_from(subject.to_string())
            .map_err(|_| AuthorizeError::CredentialsInvalid)?;

        let user = match self.user_store.get_by_username(&username).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => return Err(AuthorizeError::CredentialsInvalid),
            Err(e) => return Err(AuthorizeError::Unexpected(e.to_string())),
        };

        if !user.is_active {
            return Err(AuthorizeError::AccountInactive);
        }

        Ok(user)
    }
}
