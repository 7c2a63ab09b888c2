//! Global constants for the upload and swatch UI

/// Element ids the page templates are expected to provide.
pub mod ids {
    /// Drop zone container. Its presence gates all upload wiring.
    pub const DROP_ZONE: &str = "dropZone";
    pub const FILE_INPUT: &str = "fileInput";
    pub const BROWSE_BUTTON: &str = "browseBtn";
    pub const PREVIEW_CONTAINER: &str = "previewContainer";
    pub const PREVIEW_IMAGE: &str = "previewImg";
    pub const ANALYZE_BUTTON: &str = "analyzeBtn";
    pub const UPLOAD_FORM: &str = "uploadForm";
    pub const LOADING: &str = "loading";
    pub const TOAST: &str = "toast";
    /// Optional `<script type="application/json">` holding a [`crate::config::UiConfig`].
    pub const CONFIG_SCRIPT: &str = "uploadUiConfig";
}

/// CSS class names toggled on page elements.
pub mod classes {
    /// Drop zone while a drag hovers over it
    pub const DRAG_ACTIVE: &str = "dragover";
    /// Preview container, loading indicator and toast when visible
    pub const VISIBLE: &str = "show";
    /// Swatch element right after its value was copied
    pub const COPIED: &str = "copied";
}

/// How long the toast stays visible, in milliseconds.
pub const TOAST_DURATION_MS: u32 = 2000;

/// How long a swatch keeps the copied highlight, in milliseconds.
pub const COPIED_HIGHLIGHT_MS: u32 = 1000;

/// Data attribute holding a swatch's color value (`data-color`).
pub const SWATCH_DATA_KEY: &str = "color";

/// Media type prefix every accepted upload must carry.
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

pub const NOT_AN_IMAGE_MESSAGE: &str = "Please select an image file";
pub const FILE_TOO_LARGE_MESSAGE: &str = "File is too large to upload";
pub const ANALYZING_CAPTION: &str = "Analyzing...";
pub const COPIED_TOAST_PREFIX: &str = "Copied: ";
