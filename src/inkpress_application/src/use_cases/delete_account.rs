use inkpress_core::{PostStore, PostStoreError, User, UserStore, UserStoreError};

/// Error types for the delete account use case
#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("At least one post belongs to this user.")]
    HasPosts,
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("{0}")]
    PostStoreError(#[from] PostStoreError),
}

/// Delete account use case - removes the caller's user row
///
/// Deletion is refused while the user still owns posts, so no post is ever
/// left pointing at a missing owner.
pub struct DeleteAccountUseCase<U, P>
where
    U: UserStore,
    P: PostStore,
{
    user_store: U,
    post_store: P,
}

impl<U, P> DeleteAccountUseCase<U, P>
where
    U: UserStore,
    P: PostStore,
{
    pub fn new(user_store: U, post_store: P) -> Self {
        Self {
            user_store,
            post_store,
        }
    }

    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip_all, fields(username = %user.username))]
    pub async fn execute(&self, user: &User) -> Result<(), DeleteAccountError> {
        if self.post_store.count_by_owner(user.id).await? > 0 {
            return Err(DeleteAccountError::HasPosts);
        }

        self.user_store.delete_user(&user.username).await?;

        Ok(())
    }
}
