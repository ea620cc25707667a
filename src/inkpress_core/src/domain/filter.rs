use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use super::post::Post;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// The whitelist of sortable post fields. Anything outside this set is
/// rejected instead of silently matching everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortKey {
    Id,
    Title,
    Published,
    CreatedAt,
}

impl PostSortKey {
    /// The column this key maps to in SQL composition.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Published => "published",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for PostSortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "published" => Ok(Self::Published),
            "created_at" => Ok(Self::CreatedAt),
            other => Err(FilterError::UnknownSortKey(other.to_string())),
        }
    }
}

/// One sort criterion, parsed from a field name with an optional `-` prefix
/// for descending order (`+` is tolerated for explicit ascending).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub key: PostSortKey,
    pub descending: bool,
}

impl FromStr for SortField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        Ok(Self {
            key: name.parse()?,
            descending,
        })
    }
}

/// Composable filter/sort criteria over post collections.
///
/// An empty filter leaves the collection exactly as stored.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Substring match on the title.
    pub title_like: Option<String>,
    /// Exact match on the published flag.
    pub published: Option<bool>,
    /// Substring search over the content.
    pub search: Option<String>,
    /// Exact match on the owner's username (only meaningful for unscoped
    /// searches).
    pub username: Option<String>,
    /// Sort criteria applied left to right.
    pub order_by: Vec<SortField>,
}

impl PostFilter {
    /// Parse a comma-separated `order_by` expression such as
    /// `-created_at,title`.
    pub fn parse_order_by(raw: &str) -> Result<Vec<SortField>, FilterError> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(SortField::from_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.title_like.is_none()
            && self.published.is_none()
            && self.search.is_none()
            && self.username.is_none()
            && self.order_by.is_empty()
    }

    /// Whether a single post satisfies every present criterion.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(fragment) = &self.title_like {
            if !contains_ignore_case(&post.title, fragment) {
                return false;
            }
        }
        if let Some(published) = self.published {
            if post.published != published {
                return false;
            }
        }
        if let Some(fragment) = &self.search {
            if !contains_ignore_case(&post.content, fragment) {
                return false;
            }
        }
        if let Some(username) = &self.username {
            if post.author.username.as_str() != username {
                return false;
            }
        }
        true
    }

    /// Filter and sort an in-memory collection; the reference semantics the
    /// SQL composition has to agree with.
    pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
        let mut posts: Vec<Post> = posts.into_iter().filter(|p| self.matches(p)).collect();
        if !self.order_by.is_empty() {
            posts.sort_by(|a, b| self.compare(a, b));
        }
        posts
    }

    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        for field in &self.order_by {
            let ordering = match field.key {
                PostSortKey::Id => a.id.0.cmp(&b.id.0),
                PostSortKey::Title => a.title.cmp(&b.title),
                PostSortKey::Published => a.published.cmp(&b.published),
                PostSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            let ordering = if field.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
