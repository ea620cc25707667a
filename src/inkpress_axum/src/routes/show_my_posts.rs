use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};

use inkpress_application::ShowMyPostsUseCase;
use inkpress_core::{PostFilter, PostStore};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::query::PostFilterQuery;

#[tracing::instrument(name = "Show my posts", skip_all, fields(username = %user.username))]
pub async fn show_my_posts<P>(
    State(post_store): State<P>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<PostFilterQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    P: PostStore + Clone + 'static,
{
    let filter = PostFilter::try_from(query)?;

    let use_case = ShowMyPostsUseCase::new(post_store);
    let posts = use_case.execute(user.id, &filter).await?;

    Ok(Json(posts))
}
