//! Upload form controller.
//!
//! Owns the element references of the upload page and implements the
//! drag-and-drop, file preview and submit handlers. Event registration is
//! platform specific and lives in `crate::web`; the handlers here only see
//! a [`Page`].

use std::rc::Rc;

use crate::config::{ElementIds, UiConfig};
use crate::error::UiError;
use crate::media::{FileBatch, SelectedFile, validate_upload};
use crate::page::Page;


/// Elements of the upload page. Only the drop zone is required.
#[derive(Debug, Clone)]
pub struct PageElements<E> {
    pub drop_zone: E,
    pub file_input: Option<E>,
    pub browse_button: Option<E>,
    pub preview_container: Option<E>,
    pub preview_image: Option<E>,
    pub analyze_button: Option<E>,
    pub upload_form: Option<E>,
    pub loading: Option<E>,
}

impl<E> PageElements<E> {
    /// Look up every element. Returns `None` when the drop zone is missing,
    /// i.e. the page is not an upload page.
    pub fn lookup<P>(page: &P, ids: &ElementIds) -> Option<Self>
    where
        P: Page<Element = E>,
    {
        let drop_zone = page.element_by_id(&ids.drop_zone)?;

        let optional = |id: &str| {
            let element = page.element_by_id(id);
            if element.is_none() {
                log::warn!("Upload page has no #{} element", id);
            }
            element
        };

        Some(Self {
            drop_zone,
            file_input: optional(&ids.file_input),
            browse_button: optional(&ids.browse_button),
            preview_container: optional(&ids.preview_container),
            preview_image: optional(&ids.preview_image),
            analyze_button: optional(&ids.analyze_button),
            upload_form: optional(&ids.upload_form),
            loading: optional(&ids.loading),
        })
    }
}

/// Event handlers for the upload form.
pub struct UploadController<P: Page> {
    page: Rc<P>,
    config: Rc<UiConfig>,
    elements: PageElements<P::Element>,
}

impl<P: Page> UploadController<P> {
    /// Build the controller for the current page.
    ///
    /// Returns `None` without touching the page when there is no drop zone,
    /// so the same bundle can be loaded on pages without the upload form.
    pub fn attach(page: Rc<P>, config: Rc<UiConfig>) -> Option<Rc<Self>> {
        let Some(elements) = PageElements::lookup(page.as_ref(), &config.element_ids) else {
            log::debug!(
                "No #{} element, upload controls not wired",
                config.element_ids.drop_zone
            );
            return None;
        };

        log::info!("Upload controls attached");
        Some(Rc::new(Self {
            page,
            config,
            elements,
        }))
    }

    pub fn elements(&self) -> &PageElements<P::Element> {
        &self.elements
    }

    // ========================================================================
    // Drag and drop
    // ========================================================================

    pub fn on_drag_enter(&self) {
        self.set_drag_active(true);
    }

    pub fn on_drag_over(&self) {
        self.set_drag_active(true);
    }

    pub fn on_drag_leave(&self) {
        self.set_drag_active(false);
    }

    /// Handle a drop. The first dropped file becomes the selection and is
    /// mirrored into the file input so the form submits it.
    pub fn on_drop(&self, files: Option<P::Files>) {
        self.set_drag_active(false);

        let Some(files) = files.filter(|f| !f.is_empty()) else {
            log::debug!("Drop carried no files");
            return;
        };

        log::debug!("Dropped {} file(s)", files.count());
        if let Some(input) = &self.elements.file_input {
            self.page.set_input_files(input, &files);
        }
        if let Some(file) = files.first() {
            self.handle_file(&file);
        }
    }

    fn set_drag_active(&self, active: bool) {
        let zone = &self.elements.drop_zone;
        let class = &self.config.classes.drag_active;
        if active {
            self.page.add_class(zone, class);
        } else {
            self.page.remove_class(zone, class);
        }
    }

    // ========================================================================
    // File dialog
    // ========================================================================

    pub fn on_browse_click(&self) {
        self.open_file_dialog();
    }

    /// Click anywhere on the drop zone opens the dialog, except clicks that
    /// started on the browse button (already handled by its own listener)
    /// or on the file input (the dialog's own synthetic click bubbling up).
    pub fn on_drop_zone_click(&self, target: Option<&P::Element>) {
        if let Some(target) = target {
            let from_control = [&self.elements.browse_button, &self.elements.file_input]
                .into_iter()
                .flatten()
                .any(|control| self.page.contains(control, target));
            if from_control {
                return;
            }
        }
        self.open_file_dialog();
    }

    fn open_file_dialog(&self) {
        match &self.elements.file_input {
            Some(input) => self.page.open_file_dialog(input),
            None => log::warn!("Cannot open file dialog without a file input"),
        }
    }

    /// Adopt the first file of the input's new selection.
    pub fn on_file_input_change(&self) {
        let Some(input) = &self.elements.file_input else {
            return;
        };
        let Some(file) = self.page.input_files(input).and_then(|files| files.first()) else {
            log::debug!("File input changed to an empty selection");
            return;
        };
        self.handle_file(&file);
    }

    // ========================================================================
    // Preview
    // ========================================================================

    /// Validate `file` and start reading it for the preview.
    ///
    /// Rejected files produce an alert and leave the page untouched. Reads
    /// are not cancelled when another file is chosen; whichever read
    /// finishes last owns the preview.
    pub fn handle_file(&self, file: &P::File) {
        if let Err(e) = validate_upload(file, self.config.max_file_bytes) {
            log::warn!("Rejected {}: {}", file.name(), e);
            if let Some(message) = self.rejection_message(&e) {
                self.page.alert(message);
            }
            return;
        }

        log::info!("Reading {} ({} bytes) for preview", file.name(), file.size());

        let page = Rc::clone(&self.page);
        let image = self.elements.preview_image.clone();
        let container = self.elements.preview_container.clone();
        let analyze = self.elements.analyze_button.clone();
        let visible = self.config.classes.visible.clone();
        let name = file.name();

        let on_load = Box::new(move |data_url: String| {
            log::debug!("Preview ready for {}", name);
            if let Some(image) = &image {
                page.set_image_source(image, &data_url);
            }
            if let Some(container) = &container {
                page.add_class(container, &visible);
            }
            if let Some(analyze) = &analyze {
                page.set_disabled(analyze, false);
            }
        });

        if let Err(e) = self.page.read_as_data_url(file, on_load) {
            log::error!("Failed to start reading {}: {}", file.name(), e);
        }
    }

    /// Alert text for a refused file, `None` for errors that are not about the file.
    fn rejection_message(&self, error: &UiError) -> Option<&str> {
        match error {
            UiError::NotAnImage { .. } => Some(&self.config.messages.not_an_image),
            UiError::FileTooLarge { .. } => Some(&self.config.messages.file_too_large),
            UiError::ClipboardUnavailable | UiError::ClipboardRejected(_) | UiError::Dom(_) => None,
        }
    }

    // ========================================================================
    // Submit
    // ========================================================================

    /// Lock the form while the analysis request runs. Runs synchronously
    /// before the browser navigates and is never undone client-side.
    pub fn on_submit(&self) {
        if let Some(analyze) = &self.elements.analyze_button {
            self.page.set_disabled(analyze, true);
            self.page.set_text(analyze, &self.config.messages.analyzing);
        }
        if let Some(loading) = &self.elements.loading {
            self.page.add_class(loading, &self.config.classes.visible);
        }
        log::info!("Upload submitted, waiting for analysis");
    }
}
