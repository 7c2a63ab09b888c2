//! Copying swatch values to the system clipboard.
//!
//! The asynchronous clipboard API is tried first. When it is missing or
//! rejects the write, a temporary offscreen text area and the synchronous
//! copy command are used instead. Both paths end with the same toast.

use std::future::Future;
use std::rc::Rc;

use crate::config::UiConfig;
use crate::constants::SWATCH_DATA_KEY;
use crate::page::Page;
use crate::toast::show_toast;

/// Copy `text` and confirm with a toast.
///
/// The toast does not depend on whether either path actually reached the
/// clipboard.
pub async fn copy_text<P: Page>(page: Rc<P>, config: Rc<UiConfig>, text: String) {
    match page.write_clipboard(&text).await {
        Ok(()) => log::debug!("Copied {:?} with the clipboard API", text),
        Err(e) => {
            log::debug!("{}, falling back to copy command", e);
            match page.legacy_copy(&text) {
                Ok(true) => log::debug!("Copied {:?} with the copy command", text),
                Ok(false) => log::warn!("Copy command reported failure for {:?}", text),
                Err(e) => log::warn!("Copy command failed: {}", e),
            }
        }
    }

    let message = format!("{}{}", config.messages.copied_prefix, text);
    show_toast(&page, &config, &message);
}

/// Copy the color value of a swatch element.
///
/// The copied highlight is applied immediately and removed after the
/// configured delay. The returned future performs the clipboard write and
/// owns everything it needs, so it can be spawned on the event loop.
pub fn copy_swatch_value<P: Page>(
    page: &Rc<P>,
    config: &Rc<UiConfig>,
    swatch: &P::Element,
) -> impl Future<Output = ()> + use<P> {
    let color = page
        .data_attribute(swatch, SWATCH_DATA_KEY)
        .unwrap_or_else(|| {
            log::warn!("Swatch has no data-{} attribute", SWATCH_DATA_KEY);
            String::new()
        });

    highlight_copied(page, config, swatch);

    copy_text(Rc::clone(page), Rc::clone(config), color)
}

/// Mark a swatch as copied for `copied_ms`. Each swatch's timer only touches
/// that swatch.
fn highlight_copied<P: Page>(page: &Rc<P>, config: &UiConfig, swatch: &P::Element) {
    page.add_class(swatch, &config.classes.copied);

    let timer_page = Rc::clone(page);
    let element = swatch.clone();
    let class = config.classes.copied.clone();
    page.set_timeout(
        config.timings.copied_ms,
        Box::new(move || timer_page.remove_class(&element, &class)),
    );
}
