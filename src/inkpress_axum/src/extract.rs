//! Bearer-token auth guard, layered onto every protected route.
//!
//! The guard is the single authorization chokepoint: it verifies the token
//! for the expected kind, resolves the subject to a live identity and stows
//! it in request extensions. No handler reaches a store without having
//! passed through here.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use inkpress_adapters::TokenIssuer;
use inkpress_application::AuthorizeUseCase;
use inkpress_core::{TokenKind, User, UserStore};

use crate::error::ApiError;

/// The resolved caller identity, inserted by the guard middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::CredentialsInvalid)
}

/// Guard for routes that require a valid access token.
pub async fn require_access<U>(
    State((user_store, tokens)): State<(U, TokenIssuer)>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let request = authorize(user_store, &tokens, TokenKind::Access, request).await?;
    Ok(next.run(request).await)
}

/// Guard for the refresh endpoint: identical, but the credential must be a
/// refresh token.
pub async fn require_refresh<U>(
    State((user_store, tokens)): State<(U, TokenIssuer)>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let request = authorize(user_store, &tokens, TokenKind::Refresh, request).await?;
    Ok(next.run(request).await)
}

async fn authorize<U>(
    user_store: U,
    tokens: &TokenIssuer,
    kind: TokenKind,
    mut request: Request,
) -> Result<Request, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let token = bearer_token(request.headers())?;
    let claims = tokens.verify(token, kind)?;

    let user = AuthorizeUseCase::new(user_store)
        .execute(&claims.sub)
        .await?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(request)
}
