//! Axum edge for the Inkpress blogging backend.
//!
//! This crate holds everything HTTP-shaped: one route module per endpoint,
//! the shared [`error::ApiError`] that turns every domain error into its
//! status + `{detail}` body, the bearer-token auth guard middleware, and the
//! streaming multipart reader for post uploads. The actual behavior lives in
//! `inkpress_application`; handlers only extract, delegate and render.

pub mod error;
pub mod extract;
pub mod multipart;
pub mod query;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use extract::{CurrentUser, require_access, require_refresh};
pub use multipart::UploadLimit;
