//! Colorscope - browser UI for the color theme analyzer
//!
//! Wires the screenshot upload form (drag-and-drop, file picker, preview,
//! submit state) and the copy-to-clipboard swatches of the result page.
//! The UI logic is written against the [`page::Page`] trait; the browser
//! binding lives behind `target_arch = "wasm32"`.

pub mod clipboard;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod media;
pub mod page;
pub mod toast;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod testing;

pub use config::UiConfig;
pub use controller::UploadController;
pub use error::UiError;
pub use page::Page;

#[cfg(target_arch = "wasm32")]
pub mod web;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
