use inkpress_core::{PostId, PostStore, PostStoreError, UserId};

/// Error types for the delete post use case
#[derive(Debug, thiserror::Error)]
pub enum DeletePostError {
    #[error("{0}")]
    PostStoreError(#[from] PostStoreError),
}

/// Delete post use case - removes an owned post and its images
pub struct DeletePostUseCase<P>
where
    P: PostStore,
{
    post_store: P,
}

impl<P> DeletePostUseCase<P>
where
    P: PostStore,
{
    pub fn new(post_store: P) -> Self {
        Self { post_store }
    }

    #[tracing::instrument(name = "DeletePostUseCase::execute", skip(self))]
    pub async fn execute(&self, id: PostId, owner: UserId) -> Result<(), DeletePostError> {
        self.post_store.delete_post(id, owner).await?;
        Ok(())
    }
}
