use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::Serialize;

use inkpress_adapters::TokenIssuer;
use inkpress_core::TokenKind;

use crate::error::ApiError;
use crate::extract::CurrentUser;

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Mint a fresh access token for a caller holding a valid refresh token.
///
/// The refresh token itself is not rotated; it stays valid until its own
/// expiry.
#[tracing::instrument(name = "Refresh", skip_all, fields(username = %user.username))]
pub async fn refresh(
    State(tokens): State<TokenIssuer>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = tokens.issue(user.username.as_str(), TokenKind::Access)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
