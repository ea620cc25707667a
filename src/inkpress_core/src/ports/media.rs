use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::image::{FileUpload, ImageMeta};

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("File exceeds the maximum allowed size of {limit} bytes.")]
    FileTooLarge { limit: u64 },
    #[error("Failed to store uploaded file: {0}")]
    UploadFailed(String),
    #[error("File was not found.")]
    FileNotFound,
}

impl PartialEq for MediaStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::FileTooLarge { .. }, Self::FileTooLarge { .. }) => true,
            (Self::UploadFailed(_), Self::UploadFailed(_)) => true,
            (Self::FileNotFound, Self::FileNotFound) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write every upload under a fresh collision-resistant name and return
    /// one descriptor per file. Either all files are stored or none: on
    /// failure partway through, files written so far are unlinked before the
    /// error surfaces.
    async fn store_files(&self, uploads: &[FileUpload]) -> Result<Vec<ImageMeta>, MediaStoreError>;
    /// Best-effort removal of previously stored files (saga compensation).
    async fn remove_files(&self, stored: &[ImageMeta]);
    /// Resolve a stored file name to its path under the media root.
    async fn resolve(&self, file_name: &str) -> Result<PathBuf, MediaStoreError>;
}
