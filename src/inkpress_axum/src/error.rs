use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use inkpress_application::{
    AuthorizeError, ChangePasswordError, CreatePostError, DeleteAccountError, DeletePostError,
    FindPostsError, LoginError, RegisterError, ShowMyPostsError, UpdatePostError,
    UpdateProfileError,
};
use inkpress_adapters::TokenError;
use inkpress_core::{
    FilterError, MediaStoreError, PostStoreError, UserStoreError, ValidationError,
};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Error surface of the whole API.
///
/// Every domain error is resolved into one of these at the edge; no raw
/// storage or I/O error reaches a caller unfiltered.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Could not validate credentials.")]
    CredentialsInvalid,

    #[error("Token has expired.")]
    TokenExpired,

    #[error("Inactive user.")]
    AccountInactive,

    #[error("{0}")]
    NotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, detail) = match &self {
            ApiError::BadRequest(_) | ApiError::InvalidInput(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            ApiError::CredentialsInvalid | ApiError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            ApiError::AccountInactive => (StatusCode::FORBIDDEN, self.to_string()),

            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            ApiError::Unexpected(inner) => {
                tracing::error!(error = %inner, "unexpected error reached the edge");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { detail });

        if status_code == StatusCode::UNAUTHORIZED {
            (status_code, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status_code, body).into_response()
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<FilterError> for ApiError {
    fn from(error: FilterError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired => ApiError::TokenExpired,
            TokenError::Invalid => ApiError::CredentialsInvalid,
            TokenError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UsernameTaken
            | UserStoreError::EmailTaken
            | UserStoreError::IncorrectPassword => ApiError::BadRequest(error.to_string()),
            UserStoreError::UserNotFound => ApiError::NotFound(error.to_string()),
            UserStoreError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<PostStoreError> for ApiError {
    fn from(error: PostStoreError) -> Self {
        match error {
            PostStoreError::TitleTaken => ApiError::BadRequest(error.to_string()),
            PostStoreError::PostNotFound => ApiError::NotFound(error.to_string()),
            PostStoreError::ImagePersistFailed(e) => ApiError::Unexpected(e),
            PostStoreError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<MediaStoreError> for ApiError {
    fn from(error: MediaStoreError) -> Self {
        match error {
            MediaStoreError::FileTooLarge { .. } => ApiError::BadRequest(error.to_string()),
            MediaStoreError::UploadFailed(e) => ApiError::Unexpected(e),
            MediaStoreError::FileNotFound => ApiError::NotFound(error.to_string()),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::PasswordMismatch => ApiError::BadRequest(error.to_string()),
            RegisterError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::CredentialsInvalid => ApiError::CredentialsInvalid,
            LoginError::AccountInactive => ApiError::AccountInactive,
            LoginError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<AuthorizeError> for ApiError {
    fn from(error: AuthorizeError) -> Self {
        match error {
            AuthorizeError::CredentialsInvalid => ApiError::CredentialsInvalid,
            AuthorizeError::AccountInactive => ApiError::AccountInactive,
            AuthorizeError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<UpdateProfileError> for ApiError {
    fn from(error: UpdateProfileError) -> Self {
        match error {
            UpdateProfileError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::PasswordMismatch | ChangePasswordError::PasswordIncorrect => {
                ApiError::BadRequest(error.to_string())
            }
            ChangePasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteAccountError> for ApiError {
    fn from(error: DeleteAccountError) -> Self {
        match error {
            DeleteAccountError::HasPosts => ApiError::BadRequest(error.to_string()),
            DeleteAccountError::UserStoreError(e) => e.into(),
            DeleteAccountError::PostStoreError(e) => e.into(),
        }
    }
}

impl From<CreatePostError> for ApiError {
    fn from(error: CreatePostError) -> Self {
        match error {
            CreatePostError::PostStoreError(e) => e.into(),
            CreatePostError::MediaStoreError(e) => e.into(),
        }
    }
}

impl From<UpdatePostError> for ApiError {
    fn from(error: UpdatePostError) -> Self {
        match error {
            UpdatePostError::PostStoreError(e) => e.into(),
        }
    }
}

impl From<DeletePostError> for ApiError {
    fn from(error: DeletePostError) -> Self {
        match error {
            DeletePostError::PostStoreError(e) => e.into(),
        }
    }
}

impl From<ShowMyPostsError> for ApiError {
    fn from(error: ShowMyPostsError) -> Self {
        match error {
            ShowMyPostsError::NoPosts => ApiError::NotFound(error.to_string()),
            ShowMyPostsError::PostStoreError(e) => e.into(),
        }
    }
}

impl From<FindPostsError> for ApiError {
    fn from(error: FindPostsError) -> Self {
        match error {
            FindPostsError::NotFound => ApiError::NotFound(error.to_string()),
            FindPostsError::PostStoreError(e) => e.into(),
        }
    }
}
