use axum::{Form, Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use inkpress_adapters::TokenIssuer;
use inkpress_application::LoginUseCase;
use inkpress_core::{Password, TokenKind, UserStore};

use crate::error::ApiError;

/// OAuth2-style password form, as the original API consumes it.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

#[tracing::instrument(name = "Login", skip_all, fields(username = %form.username))]
pub async fn login<U>(
    State((user_store, tokens)): State<(U, TokenIssuer)>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    // A password that fails domain validation can never match a stored
    // credential, so it reads as bad credentials, not bad input.
    let password =
        Password::try_from(form.password).map_err(|_| ApiError::CredentialsInvalid)?;

    let use_case = LoginUseCase::new(user_store);
    let user = use_case.execute(&form.username, &password).await?;

    let access_token = tokens.issue(user.username.as_str(), TokenKind::Access)?;
    let refresh_token = tokens.issue(user.username.as_str(), TokenKind::Refresh)?;

    Ok(Json(TokenPairResponse {
        access_token,
        refresh_token,
        token_type: "bearer",
    }))
}
