//! Selected-file abstraction and upload validation.

use crate::constants::IMAGE_MEDIA_PREFIX;
use crate::error::UiError;

/// A file picked by the user, as the platform reports it.
pub trait SelectedFile {
    /// File name without any directory part
    fn name(&self) -> String;
    /// Declared media type (may be empty when the platform cannot tell)
    fn media_type(&self) -> String;
    /// Size in bytes
    fn size(&self) -> u64;
}

/// A set of files from a drop payload or a file input.
pub trait FileBatch {
    type File: SelectedFile;

    /// Number of files in the batch
    fn count(&self) -> u32;

    /// First file, which is the only one the upload form uses
    fn first(&self) -> Option<Self::File>;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Check whether a declared media type denotes an image.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with(IMAGE_MEDIA_PREFIX)
}

/// Validate a file before it is read for preview.
pub fn validate_upload<F: SelectedFile>(file: &F, max_bytes: Option<u64>) -> Result<(), UiError> {
    let media_type = file.media_type();
    if !is_image_media_type(&media_type) {
        return Err(UiError::NotAnImage { media_type });
    }

    if let Some(limit) = max_bytes {
        let size = file.size();
        if size > limit {
            return Err(UiError::FileTooLarge { size, limit });
        }
    }

    Ok(())
}

/// Check that a string is a `data:` URL with a media type and a payload.
pub fn is_data_url(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("data:") else {
        return false;
    };
    match rest.split_once(',') {
        Some((header, _payload)) => header.contains('/'),
        None => false,
    }
}
