use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::Deserialize;

use inkpress_application::UpdateProfileUseCase;
use inkpress_core::{Email, UserStore, UserUpdate};

use crate::error::ApiError;
use crate::extract::CurrentUser;

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

#[tracing::instrument(name = "Update profile", skip_all, fields(username = %user.username))]
pub async fn update_profile<U>(
    State(user_store): State<U>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let update = UserUpdate {
        full_name: request.full_name,
        email: request.email.map(Email::try_from).transpose()?,
        is_active: request.is_active,
    };

    let use_case = UpdateProfileUseCase::new(user_store);
    let updated = use_case.execute(&user.username, update).await?;

    Ok(Json(updated))
}
