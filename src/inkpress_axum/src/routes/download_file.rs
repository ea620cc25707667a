use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tokio_util::io::ReaderStream;

use inkpress_core::{MediaStore, MediaStoreError};

use crate::error::ApiError;

/// Stream a stored file back as an attachment.
#[tracing::instrument(name = "Download file", skip_all, fields(file_name = %file_name))]
pub async fn download_file<M>(
    State(media_store): State<M>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    M: MediaStore + Clone + 'static,
{
    let path = media_store.resolve(&file_name).await?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|_| MediaStoreError::FileNotFound)?;
    let body = Body::from_stream(ReaderStream::new(file));

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={file_name}"),
        ),
    ];

    Ok((headers, body))
}
