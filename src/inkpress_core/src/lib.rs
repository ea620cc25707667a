pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    filter::{FilterError, PostFilter, PostSortKey, SortField},
    image::{FileUpload, ImageMeta},
    password::Password,
    post::{NewPost, Post, PostAuthor, PostId, PostPatch},
    token::TokenKind,
    user::{NewUser, User, UserId, UserUpdate},
    username::Username,
    ValidationError,
};

pub use ports::{
    media::{MediaStore, MediaStoreError},
    repositories::{PostStore, PostStoreError, UserStore, UserStoreError},
};
