//! Streaming reader for the create-post multipart form.

use axum::extract::Multipart;

use inkpress_core::{FileUpload, MediaStoreError};

use crate::error::ApiError;

/// Maximum accepted size of a single uploaded file, in bytes.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit(pub u64);

/// The decoded create-post form: two text fields plus any number of
/// repeated `image` file parts.
pub struct PostUploadForm {
    pub title: String,
    pub content: String,
    pub files: Vec<FileUpload>,
}

/// Walk the multipart stream, collecting fields and enforcing the size cap
/// chunk by chunk: an oversized file aborts the moment its cumulative bytes
/// pass the limit, without the rest of it ever being read.
pub async fn read_post_upload(
    mut multipart: Multipart,
    limit: UploadLimit,
) -> Result<PostUploadForm, ApiError> {
    let mut title = None;
    let mut content = None;
    let mut files = Vec::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => {
                title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::InvalidInput(e.to_string()))?,
                );
            }
            Some("content") => {
                content = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::InvalidInput(e.to_string()))?,
                );
            }
            Some("image") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let mut data = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| ApiError::InvalidInput(e.to_string()))?
                {
                    if (data.len() + chunk.len()) as u64 > limit.0 {
                        return Err(MediaStoreError::FileTooLarge { limit: limit.0 }.into());
                    }
                    data.extend_from_slice(&chunk);
                }

                files.push(FileUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            // Unknown fields are drained and ignored.
            _ => {}
        }
    }

    let title = title.ok_or_else(|| ApiError::InvalidInput("field 'title' is required".into()))?;
    let content =
        content.ok_or_else(|| ApiError::InvalidInput("field 'content' is required".into()))?;

    Ok(PostUploadForm {
        title,
        content,
        files,
    })
}
