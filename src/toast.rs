//! Transient toast notification.
//!
//! There is a single toast element per page. A new message overwrites the
//! current one and schedules its own hide; earlier hide timers are not
//! cancelled, so an older timer can hide a newer message early.

use std::rc::Rc;

use crate::config::UiConfig;
use crate::page::Page;

/// Show `message` in the toast element for the configured duration.
///
/// Does nothing when the page has no toast element.
pub fn show_toast<P: Page>(page: &Rc<P>, config: &UiConfig, message: &str) {
    let Some(toast) = page.element_by_id(&config.element_ids.toast) else {
        log::debug!("No toast element, dropping message: {}", message);
        return;
    };

    page.set_text(&toast, message);
    page.add_class(&toast, &config.classes.visible);
    log::debug!("Toast shown: {}", message);

    let hide_page = Rc::clone(page);
    let class = config.classes.visible.clone();
    page.set_timeout(
        config.timings.toast_ms,
        Box::new(move || hide_page.remove_class(&toast, &class)),
    );
}
