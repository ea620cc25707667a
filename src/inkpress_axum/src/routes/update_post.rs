use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use inkpress_application::UpdatePostUseCase;
use inkpress_core::{PostId, PostPatch, PostStore};

use crate::error::ApiError;
use crate::extract::CurrentUser;

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub published: Option<bool>,
}

#[tracing::instrument(name = "Update post", skip_all, fields(username = %user.username, post_id))]
pub async fn update_post<P>(
    State(post_store): State<P>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    P: PostStore + Clone + 'static,
{
    let patch = PostPatch {
        content: request.content,
        published: request.published,
    };

    let use_case = UpdatePostUseCase::new(post_store);
    let post = use_case.execute(PostId(post_id), user.id, patch).await?;

    Ok(Json(post))
}
