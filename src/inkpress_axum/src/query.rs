//! Query-string shape of the post filter.

use serde::Deserialize;

use inkpress_core::PostFilter;

use crate::error::ApiError;

/// Raw filter/sort parameters as they appear on the query string, e.g.
/// `?title__like=rust&published=true&order_by=-created_at,title`.
#[derive(Debug, Default, Deserialize)]
pub struct PostFilterQuery {
    #[serde(rename = "title__like")]
    pub title_like: Option<String>,
    pub published: Option<bool>,
    pub search: Option<String>,
    pub username: Option<String>,
    pub order_by: Option<String>,
}

impl TryFrom<PostFilterQuery> for PostFilter {
    type Error = ApiError;

    fn try_from(query: PostFilterQuery) -> Result<Self, Self::Error> {
        let order_by = match query.order_by.as_deref() {
            Some(raw) => PostFilter::parse_order_by(raw)?,
            None => Vec::new(),
        };
        Ok(PostFilter {
            title_like: query.title_like,
            published: query.published,
            search: query.search,
            username: query.username,
            order_by,
        })
    }
}
