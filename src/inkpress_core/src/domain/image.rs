use serde::{Deserialize, Serialize};

/// Descriptor of one stored file, as indexed next to its post.
///
/// `location` is the public URL of the file, `filename` the generated name
/// under the media root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub location: String,
    pub filename: String,
    pub size: i64,
    pub content_type: String,
}

impl ImageMeta {
    /// Shape check applied before a descriptor is indexed.
    pub fn validate(&self) -> Result<(), String> {
        if self.location.is_empty() {
            return Err("descriptor has an empty location".to_string());
        }
        if self.filename.is_empty() {
            return Err("descriptor has an empty filename".to_string());
        }
        if self.size < 0 {
            return Err(format!("descriptor has a negative size: {}", self.size));
        }
        if self.content_type.is_empty() {
            return Err("descriptor has an empty content type".to_string());
        }
        Ok(())
    }
}

/// An uploaded file, fully read from the request (the size cap was already
/// enforced while the stream was consumed).
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}
