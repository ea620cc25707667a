use inkpress_core::{
    FileUpload, ImageMeta, MediaStore, MediaStoreError, NewPost, Post, PostAuthor, PostStore,
    PostStoreError, User,
};

/// Error types for the create post use case
#[derive(Debug, thiserror::Error)]
pub enum CreatePostError {
    #[error("{0}")]
    PostStoreError(#[from] PostStoreError),
    #[error("{0}")]
    MediaStoreError(#[from] MediaStoreError),
}

/// Create post use case - the one two-resource write in the system
///
/// The post row and its files live in different resources (database and
/// filesystem), so this runs as a small saga: insert the post, then store
/// and index the files, and on any failure after the insert delete the post
/// again and unlink whatever was written, surfacing the original error. From
/// the caller's perspective creation is all-or-nothing.
pub struct CreatePostUseCase<P, M>
where
    P: PostStore,
    M: MediaStore,
{
    post_store: P,
    media_store: M,
}

impl<P, M> CreatePostUseCase<P, M>
where
    P: PostStore,
    M: MediaStore,
{
    pub fn new(post_store: P, media_store: M) -> Self {
        Self {
            post_store,
            media_store,
        }
    }

    #[tracing::instrument(
        name = "CreatePostUseCase::execute",
        skip_all,
        fields(username = %owner.username, title = %title, files = uploads.len())
    )]
    pub async fn execute(
        &self,
        owner: &User,
        title: String,
        content: String,
        uploads: Vec<FileUpload>,
    ) -> Result<Post, CreatePostError> {
        let post = self
            .post_store
            .add_post(NewPost {
                title,
                content,
                created_by: owner.id,
                author: PostAuthor::from(owner),
            })
            .await?;

        if uploads.is_empty() {
            return Ok(post);
        }

        let stored = match self.media_store.store_files(&uploads).await {
            Ok(stored) => stored,
            Err(e) => {
                self.compensate(&post, owner, &[]).await;
                return Err(e.into());
            }
        };

        if let Err(e) = self.post_store.add_images(post.id, &stored).await {
            self.compensate(&post, owner, &stored).await;
            return Err(e.into());
        }

        // Re-read so the response carries the indexed descriptors.
        Ok(self.post_store.get_own(post.id, owner.id).await?)
    }

    /// Undo the insert (and any stored files) after a failed attach.
    async fn compensate(&self, post: &Post, owner: &User, stored: &[ImageMeta]) {
        if !stored.is_empty() {
            self.media_store.remove_files(stored).await;
        }
        if let Err(e) = self.post_store.delete_post(post.id, owner.id).await {
            tracing::error!(post_id = %post.id, error = %e, "failed to roll back post after attach failure");
        }
    }
}
