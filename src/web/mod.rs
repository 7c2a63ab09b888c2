//! Browser implementation of [`Page`] on top of `web_sys` (WASM only).

mod bind;


pub use bind::bind_upload_controls;

use std::future::Future;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, Document, Element, File, FileList, FileReader, HtmlButtonElement, HtmlDocument, HtmlElement,
    HtmlImageElement, HtmlInputElement, HtmlTextAreaElement, ProgressEvent, Window,
};

use crate::error::UiError;
use crate::media::{FileBatch, SelectedFile};
use crate::page::{DataUrlCallback, Page, Task};

impl SelectedFile for File {
    fn name(&self) -> String {
        File::name(self)
    }

    fn media_type(&self) -> String {
        self.type_()
    }

    fn size(&self) -> u64 {
        Blob::size(self) as u64
    }
}

impl FileBatch for FileList {
    type File = File;

    fn count(&self) -> u32 {
        self.length()
    }

    fn first(&self) -> Option<File> {
        self.get(0)
    }
}

fn js_error(context: &str, error: JsValue) -> UiError {
    UiError::Dom(format!("{}: {:?}", context, error))
}

/// The current browser document.
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> Result<Self, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Dom("No window object".into()))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::Dom("No document object".into()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Call `navigator.clipboard.writeText`, returning its promise.
    ///
    /// Looked up through reflection because the API is missing outside
    /// secure contexts.
    fn start_clipboard_write(&self, text: &str) -> Result<Promise, UiError> {
        let navigator = self.window.navigator();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(|_| UiError::ClipboardUnavailable)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(UiError::ClipboardUnavailable);
        }

        let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or(UiError::ClipboardUnavailable)?;

        write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(|e| UiError::ClipboardRejected(format!("{:?}", e)))?
            .dyn_into::<Promise>()
            .map_err(|_| UiError::ClipboardRejected("writeText returned no promise".into()))
    }
}

impl Page for WebPage {
    type Element = Element;
    type File = File;
    type Files = FileList;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn add_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().add_1(class) {
            log::error!("Failed to add class {}: {:?}", class, e);
        }
    }

    fn remove_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().remove_1(class) {
            log::error!("Failed to remove class {}: {:?}", class, e);
        }
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            element.set_attribute("disabled", "").ok();
        } else {
            element.remove_attribute("disabled").ok();
        }
    }

    fn set_image_source(&self, element: &Element, source: &str) {
        match element.dyn_ref::<HtmlImageElement>() {
            Some(image) => image.set_src(source),
            None => {
                element.set_attribute("src", source).ok();
            }
        }
    }

    fn data_attribute(&self, element: &Element, key: &str) -> Option<String> {
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.dataset().get(key),
            None => element.get_attribute(&format!("data-{}", key)),
        }
    }

    fn open_file_dialog(&self, input: &Element) {
        match input.dyn_ref::<HtmlElement>() {
            Some(input) => input.click(),
            None => log::warn!("File input is not an HTML element"),
        }
    }

    fn set_input_files(&self, input: &Element, files: &FileList) {
        match input.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.set_files(Some(files)),
            None => log::warn!("File input is not an <input> element"),
        }
    }

    fn input_files(&self, input: &Element) -> Option<FileList> {
        input.dyn_ref::<HtmlInputElement>()?.files()
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("alert() failed: {:?}", e);
        }
    }

    fn set_timeout(&self, delay_ms: u32, task: Task) {
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            log::error!("setTimeout failed: {:?}", e);
        }
    }

    fn read_as_data_url(&self, file: &File, on_load: DataUrlCallback) -> Result<(), UiError> {
        let reader = FileReader::new().map_err(|e| js_error("Failed to create FileReader", e))?;

        let loaded = reader.clone();
        let onload = Closure::once_into_js(move |_event: ProgressEvent| match loaded.result() {
            Ok(result) => match result.as_string() {
                Some(url) => on_load(url),
                None => log::error!("FileReader produced no data URL"),
            },
            Err(e) => log::error!("FileReader result unavailable: {:?}", e),
        });
        reader.set_onload(Some(onload.unchecked_ref()));

        reader
            .read_as_data_url(file)
            .map_err(|e| js_error("Failed to start FileReader", e))
    }

    fn write_clipboard(&self, text: &str) -> impl Future<Output = Result<(), UiError>> {
        let started = self.start_clipboard_write(text);
        async move {
            JsFuture::from(started?)
                .await
                .map(|_| ())
                .map_err(|e| UiError::ClipboardRejected(format!("{:?}", e)))
        }
    }

    fn legacy_copy(&self, text: &str) -> Result<bool, UiError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| UiError::Dom("No document body".into()))?;

        let textarea: HtmlTextAreaElement = self
            .document
            .create_element("textarea")
            .map_err(|e| js_error("Failed to create textarea", e))?
            .dyn_into()
            .map_err(|_| UiError::Dom("Created element is not a textarea".into()))?;

        textarea.set_value(text);
        textarea.set_attribute("readonly", "").ok();
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "-9999px").ok();

        body.append_child(&textarea)
            .map_err(|e| js_error("Failed to attach textarea", e))?;
        textarea.select();

        let copied = match self.document.dyn_ref::<HtmlDocument>() {
            Some(html) => html
                .exec_command("copy")
                .map_err(|e| js_error("execCommand('copy') failed", e)),
            None => Err(UiError::Dom("Document is not an HTML document".into())),
        };

        textarea.remove();
        copied
    }
}
