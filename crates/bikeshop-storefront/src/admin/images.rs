//! Images attached to an admin draft: URLs already on the server plus new
//! uploads waiting to be sent.

use std::path::Path;

use bikeshop_client::FileUpload;
use uuid::Uuid;

use crate::error::FormError;

pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

#[must_use]
pub fn is_accepted_image(mime: &str) -> bool {
    ACCEPTED_IMAGE_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(mime.trim()))
}

/// Media type guessed from a file extension, for uploads picked from disk.
#[must_use]
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// A new upload and the local URL its preview is shown under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub upload: FileUpload,
    pub preview_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    existing: Vec<String>,
    pending: Vec<PendingImage>,
}

impl ImageSet {
    #[must_use]
    pub fn with_existing(urls: Vec<String>) -> Self {
        Self {
            existing: urls,
            pending: Vec::new(),
        }
    }

    /// Queues uploads. If any file is not a JPEG, PNG, or WebP image, none
    /// of them are added.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnsupportedImage`] naming the first rejected file.
    pub fn add(&mut self, uploads: Vec<FileUpload>) -> Result<usize, FormError> {
        if let Some(bad) = uploads.iter().find(|u| !is_accepted_image(&u.mime)) {
            return Err(FormError::UnsupportedImage {
                file_name: bad.file_name.clone(),
            });
        }
        let added = uploads.len();
        self.pending
            .extend(uploads.into_iter().map(|upload| PendingImage {
                preview_url: format!("blob:bikeshop/{}", Uuid::new_v4()),
                upload,
            }));
        Ok(added)
    }

    pub fn remove_pending(&mut self, index: usize) -> Option<PendingImage> {
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    pub fn remove_existing(&mut self, index: usize) -> Option<String> {
        (index < self.existing.len()).then(|| self.existing.remove(index))
    }

    /// Stops keeping a server image; `false` if it was not attached.
    pub fn drop_existing(&mut self, url: &str) -> bool {
        let before = self.existing.len();
        self.existing.retain(|u| u != url);
        self.existing.len() != before
    }

    #[must_use]
    pub fn existing(&self) -> &[String] {
        &self.existing
    }

    #[must_use]
    pub fn pending(&self) -> &[PendingImage] {
        &self.pending
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.existing.len() + self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
