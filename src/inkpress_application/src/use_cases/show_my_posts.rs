use inkpress_core::{Post, PostFilter, PostStore, PostStoreError, UserId};

/// Error types for the show-my-posts use case
#[derive(Debug, thiserror::Error)]
pub enum ShowMyPostsError {
    #[error("You do not have any post.")]
    NoPosts,
    #[error("{0}")]
    PostStoreError(#[from] PostStoreError),
}

/// Show-my-posts use case - the caller's posts with filter/sort applied
pub struct ShowMyPostsUseCase<P>
where
    P: PostStore,
{
    post_store: P,
}

impl<P> ShowMyPostsUseCase<P>
where
    P: PostStore,
{
    pub fn new(post_store: P) -> Self {
        Self { post_store }
    }

    /// An empty result (whether from filtering or from owning nothing) is an
    /// error, not an empty list.
    #[tracing::instrument(name = "ShowMyPostsUseCase::execute", skip(self, filter))]
    pub async fn execute(
        &self,
        owner: UserId,
        filter: &PostFilter,
    ) -> Result<Vec<Post>, ShowMyPostsError> {
        let posts = self.post_store.posts_by_owner(owner, filter).await?;
        if posts.is_empty() {
            return Err(ShowMyPostsError::NoPosts);
        }
        Ok(posts)
    }
}
