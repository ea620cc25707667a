use inkpress_core::{User, UserStore, UserStoreError, UserUpdate, Username};

/// Error types for the update profile use case
#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Update profile use case - applies only the supplied fields
pub struct UpdateProfileUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// The identity was resolved by the guard moments ago, but it may have
    /// vanished since; the store surfaces that as `UserNotFound`.
    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self, update))]
    pub async fn execute(
        &self,
        username: &Username,
        update: UserUpdate,
    ) -> Result<User, UpdateProfileError> {
        Ok(self.user_store.update_user(username, update).await?)
    }
}
