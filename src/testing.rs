//! In-memory [`Page`] used by the unit tests.
//!
//! Deferred tasks run on a virtual clock advanced with [`FakePage::advance`];
//! file reads stay pending until a test completes them, in any order.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::constants::ids;
use crate::error::UiError;
use crate::media::{FileBatch, SelectedFile};
use crate::page::{DataUrlCallback, Page, Task};

/// Handle to an element of a [`FakePage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FakeElement(usize);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FakeFile {
    pub name: String,
    pub media_type: String,
    pub contents: Vec<u8>,
}

impl FakeFile {
    pub fn new(name: &str, media_type: &str, contents: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            media_type: media_type.to_string(),
            contents: contents.to_vec(),
        }
    }

    pub fn png(name: &str) -> Self {
        Self::new(name, "image/png", &[0x89, b'P', b'N', b'G', 0x0d, 0x0a])
    }

    pub fn text(name: &str) -> Self {
        Self::new(name, "text/plain", b"not an image")
    }
}

impl SelectedFile for FakeFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }

    fn size(&self) -> u64 {
        self.contents.len() as u64
    }
}

impl FileBatch for Vec<FakeFile> {
    type File = FakeFile;

    fn count(&self) -> u32 {
        self.len() as u32
    }

    fn first(&self) -> Option<FakeFile> {
        <[FakeFile]>::first(self).cloned()
    }
}

/// Outcome of clipboard writes on a [`FakePage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClipboardMode {
    /// Clipboard API writes succeed
    Works,
    /// Clipboard API rejects, copy command works
    Rejects,
    /// Clipboard API is missing, copy command works
    Unavailable,
    /// Both paths fail
    Broken,
}

#[derive(Debug, Default)]
struct ElementState {
    id: Option<String>,
    parent: Option<usize>,
    classes: BTreeSet<String>,
    text: String,
    disabled: bool,
    source: Option<String>,
    data: HashMap<String, String>,
    files: Option<Vec<FakeFile>>,
}

struct Timer {
    due: u64,
    seq: u64,
    task: Task,
}

struct PendingRead {
    file: FakeFile,
    on_load: DataUrlCallback,
}

pub(crate) struct FakePage {
    elements: RefCell<Vec<ElementState>>,
    now: Cell<u64>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    reads: RefCell<Vec<PendingRead>>,
    alerts: RefCell<Vec<String>>,
    dialog_opens: Cell<u32>,
    clipboard: RefCell<Option<String>>,
    clipboard_mode: Cell<ClipboardMode>,
    legacy_copy_calls: Cell<u32>,
    temporary_text_areas: Cell<u32>,
}

const UPLOAD_PAGE_IDS: &[&str] = &[
    ids::DROP_ZONE,
    ids::FILE_INPUT,
    ids::BROWSE_BUTTON,
    ids::PREVIEW_CONTAINER,
    ids::PREVIEW_IMAGE,
    ids::ANALYZE_BUTTON,
    ids::UPLOAD_FORM,
    ids::LOADING,
    ids::TOAST,
];

impl FakePage {
    fn empty() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            elements: RefCell::new(Vec::new()),
            now: Cell::new(0),
            next_seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            reads: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
            dialog_opens: Cell::new(0),
            clipboard: RefCell::new(None),
            clipboard_mode: Cell::new(ClipboardMode::Works),
            legacy_copy_calls: Cell::new(0),
            temporary_text_areas: Cell::new(0),
        }
    }

    /// Upload page with every known element. The browse button and file
    /// input sit inside the drop zone, as in the real template; the analyze
    /// button starts disabled.
    pub fn upload_page() -> Self {
        Self::without(&[])
    }

    /// Upload page minus the listed element ids.
    pub fn without(missing: &[&str]) -> Self {
        let page = Self::empty();
        for id in UPLOAD_PAGE_IDS.iter().filter(|id| !missing.contains(*id)) {
            page.push(ElementState {
                id: Some((*id).to_string()),
                ..Default::default()
            });
        }

        if let Some(zone) = page.find(ids::DROP_ZONE) {
            for child in [ids::BROWSE_BUTTON, ids::FILE_INPUT] {
                if let Some(el) = page.find(child) {
                    page.elements.borrow_mut()[el.0].parent = Some(zone.0);
                }
            }
        }
        if let Some(button) = page.find(ids::ANALYZE_BUTTON) {
            page.elements.borrow_mut()[button.0].disabled = true;
        }
        page
    }

    fn push(&self, state: ElementState) -> FakeElement {
        let mut elements = self.elements.borrow_mut();
        elements.push(state);
        FakeElement(elements.len() - 1)
    }

    fn find(&self, id: &str) -> Option<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
            .map(FakeElement)
    }

    fn with<R>(&self, element: &FakeElement, f: impl FnOnce(&mut ElementState) -> R) -> R {
        f(&mut self.elements.borrow_mut()[element.0])
    }

    /// Element by id; panics when it does not exist.
    pub fn element(&self, id: &str) -> FakeElement {
        self.find(id)
            .unwrap_or_else(|| panic!("no element with id {id}"))
    }

    /// Add a swatch element carrying an optional `data-color`.
    pub fn add_swatch(&self, color: Option<&str>) -> FakeElement {
        let mut state = ElementState::default();
        if let Some(color) = color {
            state.data.insert("color".to_string(), color.to_string());
        }
        self.push(state)
    }

    /// Add an anonymous element nested inside `parent`.
    pub fn add_child(&self, parent: &FakeElement) -> FakeElement {
        self.push(ElementState {
            parent: Some(parent.0),
            ..Default::default()
        })
    }

    pub fn text_of(&self, element: &FakeElement) -> String {
        self.with(element, |el| el.text.clone())
    }

    pub fn is_disabled(&self, element: &FakeElement) -> bool {
        self.with(element, |el| el.disabled)
    }

    pub fn image_source(&self, element: &FakeElement) -> Option<String> {
        self.with(element, |el| el.source.clone())
    }

    /// Simulate the user picking files in the native dialog.
    pub fn choose_files(&self, input: &FakeElement, files: Vec<FakeFile>) {
        self.with(input, |el| el.files = Some(files));
    }

    pub fn files_of(&self, input: &FakeElement) -> Option<Vec<FakeFile>> {
        self.with(input, |el| el.files.clone())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn dialog_opens(&self) -> u32 {
        self.dialog_opens.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Move the virtual clock forward, running due tasks in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                index.map(|i| timers.remove(i))
            };
            let Some(timer) = next else { break };
            self.now.set(timer.due);
            (timer.task)();
        }
        self.now.set(target);
    }

    pub fn pending_reads(&self) -> usize {
        self.reads.borrow().len()
    }

    /// Finish the pending read at `index` (0 = oldest).
    pub fn complete_read(&self, index: usize) {
        let read = self.reads.borrow_mut().remove(index);
        let url = format!(
            "data:{};base64,{}",
            read.file.media_type,
            STANDARD.encode(&read.file.contents)
        );
        (read.on_load)(url);
    }

    /// Finish every pending read, oldest first.
    pub fn complete_reads(&self) {
        while self.pending_reads() > 0 {
            self.complete_read(0);
        }
    }

    pub fn clipboard(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    pub fn set_clipboard_mode(&self, mode: ClipboardMode) {
        self.clipboard_mode.set(mode);
    }

    pub fn legacy_copy_calls(&self) -> u32 {
        self.legacy_copy_calls.get()
    }

    /// Text areas created by the copy fallback and not yet removed.
    pub fn temporary_text_areas(&self) -> u32 {
        self.temporary_text_areas.get()
    }
}

impl Page for FakePage {
    type Element = FakeElement;
    type File = FakeFile;
    type Files = Vec<FakeFile>;

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        self.find(id)
    }

    fn contains(&self, ancestor: &FakeElement, node: &FakeElement) -> bool {
        let elements = self.elements.borrow();
        let mut current = Some(node.0);
        while let Some(index) = current {
            if index == ancestor.0 {
                return true;
            }
            current = elements[index].parent;
        }
        false
    }

    fn add_class(&self, element: &FakeElement, class: &str) {
        self.with(element, |el| el.classes.insert(class.to_string()));
    }

    fn remove_class(&self, element: &FakeElement, class: &str) {
        self.with(element, |el| el.classes.remove(class));
    }

    fn has_class(&self, element: &FakeElement, class: &str) -> bool {
        self.with(element, |el| el.classes.contains(class))
    }

    fn set_text(&self, element: &FakeElement, text: &str) {
        self.with(element, |el| el.text = text.to_string());
    }

    fn set_disabled(&self, element: &FakeElement, disabled: bool) {
        self.with(element, |el| el.disabled = disabled);
    }

    fn set_image_source(&self, element: &FakeElement, source: &str) {
        self.with(element, |el| el.source = Some(source.to_string()));
    }

    fn data_attribute(&self, element: &FakeElement, key: &str) -> Option<String> {
        self.with(element, |el| el.data.get(key).cloned())
    }

    fn open_file_dialog(&self, _input: &FakeElement) {
        self.dialog_opens.set(self.dialog_opens.get() + 1);
    }

    fn set_input_files(&self, input: &FakeElement, files: &Vec<FakeFile>) {
        self.with(input, |el| el.files = Some(files.clone()));
    }

    fn input_files(&self, input: &FakeElement) -> Option<Vec<FakeFile>> {
        self.files_of(input)
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn set_timeout(&self, delay_ms: u32, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + u64::from(delay_ms),
            seq,
            task,
        });
    }

    fn read_as_data_url(&self, file: &FakeFile, on_load: DataUrlCallback) -> Result<(), UiError> {
        self.reads.borrow_mut().push(PendingRead {
            file: file.clone(),
            on_load,
        });
        Ok(())
    }

    fn write_clipboard(&self, text: &str) -> impl Future<Output = Result<(), UiError>> {
        let result = match self.clipboard_mode.get() {
            ClipboardMode::Works => {
                *self.clipboard.borrow_mut() = Some(text.to_string());
                Ok(())
            }
            ClipboardMode::Unavailable => Err(UiError::ClipboardUnavailable),
            ClipboardMode::Rejects | ClipboardMode::Broken => {
                Err(UiError::ClipboardRejected("NotAllowedError".to_string()))
            }
        };
        std::future::ready(result)
    }

    fn legacy_copy(&self, text: &str) -> Result<bool, UiError> {
        self.legacy_copy_calls.set(self.legacy_copy_calls.get() + 1);
        if self.clipboard_mode.get() == ClipboardMode::Broken {
            return Err(UiError::Dom("copy command unsupported".to_string()));
        }
        self.temporary_text_areas.set(self.temporary_text_areas.get() + 1);
        *self.clipboard.borrow_mut() = Some(text.to_string());
        self.temporary_text_areas.set(self.temporary_text_areas.get() - 1);
        Ok(true)
    }
}
