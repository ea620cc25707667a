use inkpress_core::{Post, PostId, PostPatch, PostStore, PostStoreError, UserId};

/// Error types for the update post use case
#[derive(Debug, thiserror::Error)]
pub enum UpdatePostError {
    #[error("{0}")]
    PostStoreError(#[from] PostStoreError),
}

/// Update post use case - partial update scoped to the owner
pub struct UpdatePostUseCase<P>
where
    P: PostStore,
{
    post_store: P,
}

impl<P> UpdatePostUseCase<P>
where
    P: PostStore,
{
    pub fn new(post_store: P) -> Self {
        Self { post_store }
    }

    /// A post owned by someone else is indistinguishable from a missing one.
    #[tracing::instrument(name = "UpdatePostUseCase::execute", skip(self, patch))]
    pub async fn execute(
        &self,
        id: PostId,
        owner: UserId,
        patch: PostPatch,
    ) -> Result<Post, UpdatePostError> {
        Ok(self.post_store.update_post(id, owner, patch).await?)
    }
}
