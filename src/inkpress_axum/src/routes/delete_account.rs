use axum::{Extension, Json, extract::State, response::IntoResponse};

use inkpress_application::DeleteAccountUseCase;
use inkpress_core::{PostStore, UserStore};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::routes::MessageResponse;

#[tracing::instrument(name = "Delete account", skip_all, fields(username = %user.username))]
pub async fn delete_account<U, P>(
    State((user_store, post_store)): State<(U, P)>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    P: PostStore + Clone + 'static,
{
    let use_case = DeleteAccountUseCase::new(user_store, post_store);
    use_case.execute(&user).await?;

    Ok(Json(MessageResponse::new("User deleted successfully.")))
}
