//! The seam between UI logic and the browser.
//!
//! Handlers in [`crate::controller`] and [`crate::clipboard`] only talk to a
//! [`Page`]. The browser implementation lives in `crate::web`; tests use an
//! in-memory page with a virtual clock.

use std::future::Future;

use crate::error::UiError;
use crate::media::{FileBatch, SelectedFile};

/// Deferred work scheduled with [`Page::set_timeout`].
pub type Task = Box<dyn FnOnce()>;

/// Continuation receiving the data URL of a finished file read.
pub type DataUrlCallback = Box<dyn FnOnce(String)>;

/// DOM operations the UI needs.
///
/// All methods take `&self`: the page is shared between event handlers and
/// deferred tasks on a single thread. Element operations never fail from the
/// caller's point of view; implementations log DOM errors and carry on.
pub trait Page: 'static {
    /// Handle to a DOM element. Equality is element identity.
    type Element: Clone + PartialEq + 'static;
    type File: SelectedFile + 'static;
    type Files: FileBatch<File = Self::File>;

    /// Look up an element by id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Replace the element's text content.
    fn set_text(&self, element: &Self::Element, text: &str);

    /// Set the disabled flag of a form control.
    fn set_disabled(&self, element: &Self::Element, disabled: bool);

    /// Set the `src` of an image element.
    fn set_image_source(&self, element: &Self::Element, source: &str);

    /// Read a `data-*` attribute (`key` without the `data-` prefix).
    fn data_attribute(&self, element: &Self::Element, key: &str) -> Option<String>;

    /// Ask the platform to open the native file dialog for a file input.
    fn open_file_dialog(&self, input: &Self::Element);

    /// Replace the selection of a file input.
    fn set_input_files(&self, input: &Self::Element, files: &Self::Files);

    /// Current selection of a file input.
    fn input_files(&self, input: &Self::Element) -> Option<Self::Files>;

    /// Show a blocking message to the user.
    fn alert(&self, message: &str);

    /// Run `task` after `delay_ms`. There is no cancellation.
    fn set_timeout(&self, delay_ms: u32, task: Task);

    /// Start reading `file` as a data URL; `on_load` runs when it completes.
    fn read_as_data_url(&self, file: &Self::File, on_load: DataUrlCallback)
    -> Result<(), UiError>;

    /// Write text through the asynchronous clipboard API.
    fn write_clipboard(&self, text: &str) -> impl Future<Output = Result<(), UiError>>;

    /// Copy text with a temporary offscreen text area and the synchronous
    /// copy command. Returns whether the platform reported success.
    fn legacy_copy(&self, text: &str) -> Result<bool, UiError>;
}
