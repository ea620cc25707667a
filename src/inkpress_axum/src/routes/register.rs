use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use inkpress_application::RegisterUseCase;
use inkpress_core::{Email, NewUser, Password, UserStore, Username};

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: Secret<String>,
    pub password_confirm: Secret<String>,
}

#[tracing::instrument(name = "Register", skip_all, fields(username = %request.username))]
pub async fn register<U>(
    State(user_store): State<U>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let new_user = NewUser {
        username: Username::try_from(request.username)?,
        full_name: request.full_name,
        email: Email::try_from(request.email)?,
        password: Password::try_from(request.password)?,
    };

    let use_case = RegisterUseCase::new(user_store);
    let user = use_case.execute(new_user, request.password_confirm).await?;

    Ok((StatusCode::CREATED, Json(user)))
}
