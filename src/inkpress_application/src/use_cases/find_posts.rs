use inkpress_core::{Post, PostFilter, PostStore, PostStoreError};

/// Error types for the find posts use case
#[derive(Debug, thiserror::Error)]
pub enum FindPostsError {
    #[error("Expected post was not found.")]
    NotFound,
    #[error("{0}")]
    PostStoreError(#[from] PostStoreError),
}

/// Find posts use case - unscoped search across all posts
pub struct FindPostsUseCase<P>
where
    P: PostStore,
{
    post_store: P,
}

impl<P> FindPostsUseCase<P>
where
    P: PostStore,
{
    pub fn new(post_store: P) -> Self {
        Self { post_store }
    }

    #[tracing::instrument(name = "FindPostsUseCase::execute", skip_all)]
    pub async fn execute(&self, filter: &PostFilter) -> Result<Vec<Post>, FindPostsError> {
        let posts = self.post_store.find_posts(filter).await?;
        if posts.is_empty() {
            return Err(FindPostsError::NotFound);
        }
        Ok(posts)
    }
}
