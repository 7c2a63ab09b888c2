//! Page-level configuration for the upload and swatch UI.
//!
//! Pages may embed a `<script type="application/json" id="uploadUiConfig">`
//! element to override element ids, class names, timings and messages.
//! Every field has a default, so an empty object (or no script at all)
//! yields the stock behavior.

use serde::{Deserialize, Serialize};

use crate::constants::{self, classes, ids};

/// Log level setting for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to a concrete log::Level (used by the console logger).
    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Element ids looked up on page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub drop_zone: String,
    pub file_input: String,
    pub browse_button: String,
    pub preview_container: String,
    pub preview_image: String,
    pub analyze_button: String,
    pub upload_form: String,
    pub loading: String,
    pub toast: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            drop_zone: ids::DROP_ZONE.to_string(),
            file_input: ids::FILE_INPUT.to_string(),
            browse_button: ids::BROWSE_BUTTON.to_string(),
            preview_container: ids::PREVIEW_CONTAINER.to_string(),
            preview_image: ids::PREVIEW_IMAGE.to_string(),
            analyze_button: ids::ANALYZE_BUTTON.to_string(),
            upload_form: ids::UPLOAD_FORM.to_string(),
            loading: ids::LOADING.to_string(),
            toast: ids::TOAST.to_string(),
        }
    }
}

/// CSS class names the accompanying stylesheet expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassNames {
    /// Added to the drop zone while a drag hovers over it
    pub drag_active: String,
    /// Added to preview container, loading indicator and toast to reveal them
    pub visible: String,
    /// Added to a swatch for a moment after its value was copied
    pub copied: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            drag_active: classes::DRAG_ACTIVE.to_string(),
            visible: classes::VISIBLE.to_string(),
            copied: classes::COPIED.to_string(),
        }
    }
}

/// Deferred-hide durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timings {
    pub toast_ms: u32,
    pub copied_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            toast_ms: constants::TOAST_DURATION_MS,
            copied_ms: constants::COPIED_HIGHLIGHT_MS,
        }
    }
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    /// Alert shown when the selected file is not an image
    pub not_an_image: String,
    /// Alert shown when the selected file exceeds `max_file_bytes`
    pub file_too_large: String,
    /// Submit button caption while the analysis request is in flight
    pub analyzing: String,
    /// Prefix of the toast shown after a copy
    pub copied_prefix: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            not_an_image: constants::NOT_AN_IMAGE_MESSAGE.to_string(),
            file_too_large: constants::FILE_TOO_LARGE_MESSAGE.to_string(),
            analyzing: constants::ANALYZING_CAPTION.to_string(),
            copied_prefix: constants::COPIED_TOAST_PREFIX.to_string(),
        }
    }
}

/// Complete UI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    /// Version of the configuration format
    pub version: u32,

    /// Log verbosity level
    pub log_level: LogLevel,

    pub element_ids: ElementIds,

    pub classes: ClassNames,

    pub timings: Timings,

    pub messages: Messages,

    /// Reject files larger than this many bytes before reading them.
    /// `None` accepts any size.
    pub max_file_bytes: Option<u64>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            element_ids: ElementIds::default(),
            classes: ClassNames::default(),
            timings: Timings::default(),
            messages: Messages::default(),
            max_file_bytes: None,
        }
    }
}

impl UiConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Parse an embedded config, falling back to defaults on any problem.
    ///
    /// `None` means the page carries no config element.
    pub fn from_embedded(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::debug!("No embedded UI config, using defaults");
            return Self::default();
        };

        if json.trim().is_empty() {
            return Self::default();
        }

        match Self::from_json(json) {
            Ok(config) => {
                log::debug!("Loaded embedded UI config");
                config
            }
            Err(e) => {
                log::warn!("Ignoring embedded UI config: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from the page's config script element (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_document(document: &web_sys::Document) -> Self {
        let json = document
            .get_element_by_id(ids::CONFIG_SCRIPT)
            .and_then(|el| el.text_content());
        Self::from_embedded(json.as_deref())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },
}
