use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use inkpress_application::DeletePostUseCase;
use inkpress_core::{PostId, PostStore};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::routes::MessageResponse;

#[tracing::instrument(name = "Delete post", skip_all, fields(username = %user.username, post_id))]
pub async fn delete_post<P>(
    State(post_store): State<P>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
    P: PostStore + Clone + 'static,
{
    let use_case = DeletePostUseCase::new(post_store);
    use_case.execute(PostId(post_id), user.id).await?;

    Ok(Json(MessageResponse::new("Post deleted successfully.")))
}
