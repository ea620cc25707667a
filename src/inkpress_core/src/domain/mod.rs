pub mod email;
pub mod filter;
pub mod image;
pub mod password;
pub mod post;
pub mod token;
pub mod user;
pub mod username;

use thiserror::Error;

/// Rejections raised while parsing raw input into domain value objects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Invalid password: {0}")]
    InvalidPassword(String),
}
