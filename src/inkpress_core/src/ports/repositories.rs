use async_trait::async_trait;
use thiserror::Error;

use crate::domain::email::Email;
use crate::domain::filter::PostFilter;
use crate::domain::image::ImageMeta;
use crate::domain::password::Password;
use crate::domain::post::{NewPost, Post, PostId, PostPatch};
use crate::domain::user::{NewUser, User, UserId, UserUpdate};
use crate::domain::username::Username;

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User with this username already exists.")]
    UsernameTaken,
    #[error("User with this email already exists.")]
    EmailTaken,
    #[error("User not found.")]
    UserNotFound,
    #[error("Incorrect password.")]
    IncorrectPassword,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UsernameTaken, Self::UsernameTaken) => true,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user with a hashed credential. Uniqueness of username
    /// and email is enforced here.
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;
    async fn get_by_username(&self, username: &Username) -> Result<User, UserStoreError>;
    async fn get_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    /// Verify a credential pair and return the matching user.
    async fn authenticate(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<User, UserStoreError>;
    /// Apply only the supplied profile fields.
    async fn update_user(
        &self,
        username: &Username,
        update: UserUpdate,
    ) -> Result<User, UserStoreError>;
    async fn set_password(
        &self,
        username: &Username,
        new_password: Password,
    ) -> Result<(), UserStoreError>;
    async fn delete_user(&self, username: &Username) -> Result<(), UserStoreError>;
}

// PostStore port trait and errors
#[derive(Debug, Error)]
pub enum PostStoreError {
    #[error("Post of this title already exists.")]
    TitleTaken,
    #[error("Post does not exists or is not yours.")]
    PostNotFound,
    #[error("Failed to index uploaded file: {0}")]
    ImagePersistFailed(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for PostStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TitleTaken, Self::TitleTaken) => true,
            (Self::PostNotFound, Self::PostNotFound) => true,
            (Self::ImagePersistFailed(_), Self::ImagePersistFailed(_)) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post owned by `new_post.created_by`. Titles are globally
    /// unique; `published` starts out false and `created_at` is assigned by
    /// the store.
    async fn add_post(&self, new_post: NewPost) -> Result<Post, PostStoreError>;
    /// Fetch a post scoped to its owner; anyone else observes `PostNotFound`.
    async fn get_own(&self, id: PostId, owner: UserId) -> Result<Post, PostStoreError>;
    async fn update_post(
        &self,
        id: PostId,
        owner: UserId,
        patch: PostPatch,
    ) -> Result<Post, PostStoreError>;
    /// Delete an owned post together with its image rows.
    async fn delete_post(&self, id: PostId, owner: UserId) -> Result<(), PostStoreError>;
    async fn posts_by_owner(
        &self,
        owner: UserId,
        filter: &PostFilter,
    ) -> Result<Vec<Post>, PostStoreError>;
    /// Unscoped search across all posts, joined with the owner for filtering
    /// by owner attributes.
    async fn find_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, PostStoreError>;
    async fn count_by_owner(&self, owner: UserId) -> Result<i64, PostStoreError>;
    /// Index one image row per descriptor under the given post.
    async fn add_images(
        &self,
        post: PostId,
        images: &[ImageMeta],
    ) -> Result<(), PostStoreError>;
}
