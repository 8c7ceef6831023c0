//! Media Upload Gateway
//!
//! Binary assets live at an external host; the application only keeps the
//! URL and the deletion handle it returns.

use crate::error::PostResult;

/// Accepted image extensions (lower case)
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// File received from the client
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    /// Lower-cased extension of the file name
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn has_allowed_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// Asset stored at the media host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub secure_url: String,
    pub public_id: String,
}

#[trait_variant::make(MediaGateway: Send)]
pub trait LocalMediaGateway {
    async fn upload(&self, upload: MediaUpload) -> PostResult<UploadedMedia>;

    /// Release an asset. An asset that is already gone counts as released.
    async fn destroy(&self, public_id: &str) -> PostResult<()>;
}
