use axum::{
    Extension, Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};

use inkpress_application::CreatePostUseCase;
use inkpress_core::{MediaStore, PostStore};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::multipart::{UploadLimit, read_post_upload};

/// Create a post from a multipart form (`title`, `content`, repeated
/// `image` file parts). The size cap is enforced while the stream is read;
/// attach failures after the insert roll the post back in the use case.
#[tracing::instrument(name = "Create post", skip_all, fields(username = %user.username))]
pub async fn create_post<P, M>(
    State((post_store, media_store, limit)): State<(P, M, UploadLimit)>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
    P: PostStore + Clone + 'static,
    M: MediaStore + Clone + 'static,
{
    let form = read_post_upload(multipart, limit).await?;

    let use_case = CreatePostUseCase::new(post_store, media_store);
    let post = use_case
        .execute(&user, form.title, form.content, form.files)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}
