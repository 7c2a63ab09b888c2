use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::clipboard::{copy_swatch_value, copy_text};
use crate::config::{LogLevel, UiConfig};
use crate::controller::UploadController;
use crate::web::{WebPage, bind_upload_controls};

thread_local! {
    /// Page and config shared by the exported copy functions.
    static SWATCH_CONTEXT: RefCell<Option<(Rc<WebPage>, Rc<UiConfig>)>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(LogLevel::Trace.to_level()).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::set_max_level(UiConfig::default().log_level.to_level_filter());

    match WebPage::new() {
        Ok(page) => initialize_when_ready(Rc::new(page)),
        Err(e) => log::error!("Upload UI unavailable: {}", e),
    }
}

/// Initialize now, or on `DOMContentLoaded` while the document is still loading.
pub(crate) fn initialize_when_ready(page: Rc<WebPage>) {
    if page.document().ready_state() == "loading" {
        let ready_page = Rc::clone(&page);
        let on_ready = Closure::once_into_js(move || initialize(ready_page));
        if let Err(e) = page
            .document()
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::error!("Failed to wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        initialize(page);
    }
}

fn initialize(page: Rc<WebPage>) {
    let config = Rc::new(UiConfig::load_from_document(page.document()));
    log::set_max_level(config.log_level.to_level_filter());

    if let Some(controller) = UploadController::attach(Rc::clone(&page), Rc::clone(&config)) {
        if let Err(e) = bind_upload_controls(&controller) {
            log::error!("Failed to wire upload controls: {}", e);
        }
    }

    install_globals(&page);
    SWATCH_CONTEXT.with(|ctx| *ctx.borrow_mut() = Some((page, config)));
}

/// Expose the copy functions on `window` for inline `onclick` handlers.
fn install_globals(page: &WebPage) {
    let window = page.window();
    let copy_color_fn = Closure::<dyn Fn(Element)>::new(copy_color).into_js_value();
    let copy_text_fn = Closure::<dyn Fn(JsValue)>::new(copy_text_value).into_js_value();

    for (name, function) in [("copyColor", copy_color_fn), ("copyText", copy_text_fn)] {
        if let Err(e) = js_sys::Reflect::set(window, &JsValue::from_str(name), &function) {
            log::error!("Failed to expose {}: {:?}", name, e);
        }
    }
}

fn swatch_context() -> Option<(Rc<WebPage>, Rc<UiConfig>)> {
    if let Some(ctx) = SWATCH_CONTEXT.with(|ctx| ctx.borrow().clone()) {
        return Some(ctx);
    }

    // Called before the document finished loading
    let page = match WebPage::new() {
        Ok(page) => Rc::new(page),
        Err(e) => {
            log::error!("Cannot copy: {}", e);
            return None;
        }
    };
    let config = Rc::new(UiConfig::load_from_document(page.document()));
    let ctx = (page, config);
    SWATCH_CONTEXT.with(|slot| *slot.borrow_mut() = Some(ctx.clone()));
    Some(ctx)
}

/// Copy a swatch's `data-color` value and show the confirmation toast.
#[wasm_bindgen(js_name = copyColor)]
pub fn copy_color(element: Element) {
    let Some((page, config)) = swatch_context() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(copy_swatch_value(&page, &config, &element));
}

/// Copy arbitrary text and show the confirmation toast.
#[wasm_bindgen(js_name = copyText)]
pub fn copy_text_value(text: JsValue) {
    let Some((page, config)) = swatch_context() else {
        return;
    };
    let text = text.as_string().unwrap_or_default();
    wasm_bindgen_futures::spawn_local(copy_text(page, config, text));
}
