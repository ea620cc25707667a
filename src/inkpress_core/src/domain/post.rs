use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::image::ImageMeta;
use super::user::{User, UserId};
use super::username::Username;

/// Database identity of a post row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The owner attributes embedded in a post view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostAuthor {
    pub username: Username,
    pub email: Email,
}

impl From<&User> for PostAuthor {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// A blog post with its owner and attached images.
///
/// Ownership (`created_by`) is immutable after creation and is kept out of
/// the serialized view; clients see the author via the nested `users` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub created_by: UserId,
    #[serde(rename = "users")]
    pub author: PostAuthor,
    pub images: Vec<ImageMeta>,
}

/// Input for post creation. `published` always starts out false.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub created_by: UserId,
    pub author: PostAuthor,
}

/// Partial post update: only supplied fields are applied. The title and the
/// owner are not updatable.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.published.is_none()
    }
}
