//! Flash-message auto-dismissal.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::ui::dom::{DocumentHandle, ElementId, Selector};

/// Class marking flash messages.
pub const FLASH_CLASS: &str = "flash-message";

pub const FADE_AFTER_MS: u64 = 5000;
pub const REMOVE_AFTER_MS: u64 = 300;

/// Delays of the two dismissal steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTiming {
    /// Time after load before the message fades out.
    pub fade_after: Duration,
    /// Time after the fade before the element is removed.
    pub remove_after: Duration,
}

impl Default for FlashTiming {
    fn default() -> Self {
        Self {
            fade_after: Duration::from_millis(FADE_AFTER_MS),
            remove_after: Duration::from_millis(REMOVE_AFTER_MS),
        }
    }
}

/// Fade and then remove every flash message present now.
///
/// Each element gets its own timer task. Must run inside a Tokio runtime.
pub fn schedule_dismissal(doc: &DocumentHandle, timing: FlashTiming) -> Vec<JoinHandle<()>> {
    let flashes = doc.with(|d| d.query_all(Selector::Class(FLASH_CLASS)));
    flashes
        .into_iter()
        .map(|el| tokio::spawn(dismiss(doc.clone(), el, timing)))
        .collect()
}

async fn dismiss(doc: DocumentHandle, el: ElementId, timing: FlashTiming) {
    tokio::time::sleep(timing.fade_after).await;
    doc.with(|d| d.set_style(el, "opacity", "0"));

    tokio::time::sleep(timing.remove_after).await;
    doc.with(|d| d.remove(el));
    debug!(name: "page.flash.removed", "Flash message removed");
}
