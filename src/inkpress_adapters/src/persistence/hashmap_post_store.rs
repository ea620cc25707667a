use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use inkpress_core::{
    ImageMeta, NewPost, Post, PostFilter, PostId, PostPatch, PostStore, PostStoreError, UserId,
};

/// In-memory post store, shared via internal `Arc<RwLock<..>>`.
///
/// Filter/sort semantics are delegated to [`PostFilter::apply`], the same
/// reference implementation the SQL composition is tested against.
#[derive(Default, Clone)]
pub struct HashMapPostStore {
    posts: Arc<RwLock<Vec<Post>>>,
    next_id: Arc<AtomicI64>,
}

impl HashMapPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PostStore for HashMapPostStore {
    async fn add_post(&self, new_post: NewPost) -> Result<Post, PostStoreError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.title == new_post.title) {
            return Err(PostStoreError::TitleTaken);
        }
        let post = Post {
            id: PostId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            title: new_post.title,
            content: new_post.content,
            published: false,
            created_at: Utc::now(),
            created_by: new_post.created_by,
            author: new_post.author,
            images: Vec::new(),
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn get_own(&self, id: PostId, owner: UserId) -> Result<Post, PostStoreError> {
        self.posts
            .read()
            .await
            .iter()
            .find(|p| p.id == id && p.created_by == owner)
            .cloned()
            .ok_or(PostStoreError::PostNotFound)
    }

    async fn update_post(
        &self,
        id: PostId,
        owner: UserId,
        patch: PostPatch,
    ) -> Result<Post, PostStoreError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id && p.created_by == owner)
            .ok_or(PostStoreError::PostNotFound)?;
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(published) = patch.published {
            post.published = published;
        }
        Ok(post.clone())
    }

    async fn delete_post(&self, id: PostId, owner: UserId) -> Result<(), PostStoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| !(p.id == id && p.created_by == owner));
        if posts.len() == before {
            return Err(PostStoreError::PostNotFound);
        }
        Ok(())
    }

    async fn posts_by_owner(
        &self,
        owner: UserId,
        filter: &PostFilter,
    ) -> Result<Vec<Post>, PostStoreError> {
        let posts: Vec<Post> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.created_by == owner)
            .cloned()
            .collect();
        Ok(filter.apply(posts))
    }

    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, PostStoreError> {
        let posts: Vec<Post> = self.posts.read().await.clone();
        Ok(filter.apply(posts))
    }

    async fn count_by_owner(&self, owner: UserId) -> Result<i64, PostStoreError> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.created_by == owner)
            .count() as i64)
    }

    async fn add_images(&self, post: PostId, images: &[ImageMeta]) -> Result<(), PostStoreError> {
        for image in images {
            image
                .validate()
                .map_err(PostStoreError::ImagePersistFailed)?;
        }
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post)
            .ok_or(PostStoreError::PostNotFound)?;
        post.images.extend_from_slice(images);
        Ok(())
    }
}
