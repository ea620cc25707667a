use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use inkpress_core::{FileUpload, ImageMeta, MediaStore, MediaStoreError};

/// Filesystem-backed media store.
///
/// Files are written under `root` with collision-resistant random names that
/// preserve the original extension; `location` in the returned descriptors is
/// the file's public URL under `public_url`.
#[derive(Clone)]
pub struct FsMediaStore {
    root: PathBuf,
    public_url: String,
}

impl FsMediaStore {
    /// Open the store, creating the media root if it does not exist yet.
    pub async fn create(
        root: impl Into<PathBuf>,
        public_url: impl Into<String>,
    ) -> Result<Self, MediaStoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            root,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn generate_name(original: &str) -> String {
        let stem = Uuid::new_v4().simple().to_string();
        match Path::new(original).extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => format!("{stem}.{ext}"),
            _ => stem,
        }
    }

    /// Stored names are single flat path segments; anything that could step
    /// out of the media root is treated as absent.
    fn is_safe_name(name: &str) -> bool {
        !name.is_empty()
            && !name.contains('/')
            && !name.contains('\\')
            && !name.contains("..")
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    #[tracing::instrument(name = "Storing uploaded files", skip_all, fields(count = uploads.len()))]
    async fn store_files(&self, uploads: &[FileUpload]) -> Result<Vec<ImageMeta>, MediaStoreError> {
        let mut stored: Vec<ImageMeta> = Vec::with_capacity(uploads.len());

        for upload in uploads {
            let name = Self::generate_name(&upload.filename);
            let path = self.root.join(&name);
            if let Err(e) = tokio::fs::write(&path, &upload.data).await {
                // No partial batches: unlink what this call already wrote.
                self.remove_files(&stored).await;
                return Err(MediaStoreError::UploadFailed(e.to_string()));
            }
            stored.push(ImageMeta {
                location: format!("{}/{name}", self.public_url),
                filename: name,
                size: upload.data.len() as i64,
                content_type: upload.content_type.clone(),
            });
        }

        Ok(stored)
    }

    #[tracing::instrument(name = "Removing stored files", skip_all, fields(count = stored.len()))]
    async fn remove_files(&self, stored: &[ImageMeta]) {
        for meta in stored {
            if !Self::is_safe_name(&meta.filename) {
                continue;
            }
            let path = self.root.join(&meta.filename);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!(file = %meta.filename, error = %e, "failed to unlink stored file");
            }
        }
    }

    async fn resolve(&self, file_name: &str) -> Result<PathBuf, MediaStoreError> {
        if !Self::is_safe_name(file_name) {
            return Err(MediaStoreError::FileNotFound);
        }
        let path = self.root.join(file_name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(MediaStoreError::FileNotFound),
        }
    }
}
