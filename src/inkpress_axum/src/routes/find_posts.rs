use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use inkpress_application::FindPostsUseCase;
use inkpress_core::{PostFilter, PostStore};

use crate::error::ApiError;
use crate::query::PostFilterQuery;

/// Unscoped search across all posts; the owner join makes filtering by the
/// owning user's username possible.
#[tracing::instrument(name = "Find posts", skip_all)]
pub async fn find_posts<P>(
    State(post_store): State<P>,
    Query(query): Query<PostFilterQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    P: PostStore + Clone + 'static,
{
    let filter = PostFilter::try_from(query)?;

    let use_case = FindPostsUseCase::new(post_store);
    let posts = use_case.execute(&filter).await?;

    Ok(Json(posts))
}
