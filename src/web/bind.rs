//! DOM event registration for the upload controller.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element, Event, EventTarget};

use super::WebPage;
use crate::controller::UploadController;
use crate::error::UiError;

const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

/// Add a listener that lives as long as the page.
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), UiError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| UiError::Dom(format!("Failed to listen for {}: {:?}", event, e)))?;
    closure.forget(); // Leak the closure to keep it alive
    Ok(())
}

/// Register the drag-and-drop, click, change and submit listeners.
pub fn bind_upload_controls(controller: &Rc<UploadController<WebPage>>) -> Result<(), UiError> {
    let elements = controller.elements();

    if let Some(browse) = &elements.browse_button {
        let ctl = Rc::clone(controller);
        listen(browse, "click", move |_| ctl.on_browse_click())?;
    }

    let ctl = Rc::clone(controller);
    listen(&elements.drop_zone, "click", move |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        ctl.on_drop_zone_click(target.as_ref());
    })?;

    for name in DRAG_EVENTS {
        let ctl = Rc::clone(controller);
        listen(&elements.drop_zone, name, move |event| {
            // keep the browser from opening the dropped file
            event.prevent_default();
            event.stop_propagation();

            match event.type_().as_str() {
                "dragenter" => ctl.on_drag_enter(),
                "dragover" => ctl.on_drag_over(),
                "dragleave" => ctl.on_drag_leave(),
                "drop" => {
                    let files = event
                        .dyn_ref::<DragEvent>()
                        .and_then(DragEvent::data_transfer)
                        .and_then(|transfer| transfer.files());
                    ctl.on_drop(files);
                }
                other => log::debug!("Ignoring {} on drop zone", other),
            }
        })?;
    }

    if let Some(input) = &elements.file_input {
        let ctl = Rc::clone(controller);
        listen(input, "change", move |_| ctl.on_file_input_change())?;
    }

    match &elements.upload_form {
        Some(form) => {
            let ctl = Rc::clone(controller);
            listen(form, "submit", move |_| ctl.on_submit())?;
        }
        None => log::warn!("No upload form, submit state will not change"),
    }

    log::debug!("Upload listeners registered");
    Ok(())
}
