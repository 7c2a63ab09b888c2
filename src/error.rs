//! Error types for the upload and swatch UI.

use thiserror::Error;

/// Errors that can occur while handling a UI event.
///
/// None of these are fatal: file rejections become a user alert, clipboard
/// failures trigger the legacy copy path, and DOM failures are logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Selected file does not declare an `image/*` media type
    #[error("Not an image file (media type '{media_type}')")]
    NotAnImage {
        /// Media type the platform reported for the file
        media_type: String,
    },

    /// Selected file exceeds the configured upload limit
    #[error("File is {size} bytes, limit is {limit} bytes")]
    FileTooLarge {
        /// Size of the selected file in bytes
        size: u64,
        /// Configured maximum in bytes
        limit: u64,
    },

    /// The asynchronous clipboard API is missing (insecure context, old browser)
    #[error("Clipboard API unavailable")]
    ClipboardUnavailable,

    /// The asynchronous clipboard API rejected the write
    #[error("Clipboard write rejected: {0}")]
    ClipboardRejected(String),

    /// A DOM call failed
    #[error("DOM error: {0}")]
    Dom(String),
}
