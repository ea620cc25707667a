use axum::{Extension, Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use inkpress_application::ChangePasswordUseCase;
use inkpress_core::{Password, UserStore};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::routes::MessageResponse;

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: Secret<String>,
    pub new_password: Secret<String>,
    pub new_password_confirm: Secret<String>,
}

#[tracing::instrument(name = "Change password", skip_all, fields(username = %user.username))]
pub async fn change_password<U>(
    State(user_store): State<U>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let new_password = Password::try_from(request.new_password)?;

    let use_case = ChangePasswordUseCase::new(user_store);
    use_case
        .execute(
            &user.username,
            request.old_password,
            new_password,
            request.new_password_confirm,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully.")))
}
