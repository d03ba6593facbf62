//! Page-wide utility behaviors.
//!
//! Each behavior binds to the matching elements present when
//! [`PageUtilities::attach`] runs; elements added afterwards are not covered.
//!
//! - [`flash`]: Fade out and remove flash messages
//! - [`forms`]: Block submissions with empty required fields
//! - [`numeric`]: Clamp number inputs into their bounds
//! - [`files`]: Reject oversized uploads and describe accepted ones

pub mod files;
pub mod flash;
pub mod forms;
pub mod numeric;

use tokio::task::JoinHandle;

use crate::config::PageConfig;
use crate::ui::dom::{DocumentHandle, Selector};
use crate::ui::event::{EventKind, EventRegistry};

use flash::FlashTiming;

/// The page utilities bound to one document.
#[derive(Debug, Clone)]
pub struct PageUtilities {
    doc: DocumentHandle,
    flash_timing: FlashTiming,
    max_upload_bytes: u64,
}

impl PageUtilities {
    pub fn new(doc: DocumentHandle, config: &PageConfig) -> Self {
        Self {
            doc,
            flash_timing: config.flash_timing(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Bind every behavior and start the flash timers.
    ///
    /// Must run inside a Tokio runtime.
    pub fn attach(&self, events: &mut EventRegistry) -> Vec<JoinHandle<()>> {
        let timers = flash::schedule_dismissal(&self.doc, self.flash_timing);

        let (form_els, numbers, uploads) = self.doc.with(|d| {
            (
                d.query_all(Selector::Tag("form")),
                d.query_all(Selector::InputType("number")),
                d.query_all(Selector::InputType("file")),
            )
        });

        for form in form_els {
            let doc = self.doc.clone();
            events.on(form, EventKind::Submit, move |ctx| {
                if !doc.with(|d| forms::validate_required(d, form)) {
                    ctx.prevent_default();
                }
            });
        }

        for input in numbers {
            let doc = self.doc.clone();
            events.on(input, EventKind::Input, move |_| {
                doc.with(|d| numeric::clamp_input(d, input));
            });
        }

        for input in uploads {
            let doc = self.doc.clone();
            let max_bytes = self.max_upload_bytes;
            events.on(input, EventKind::Change, move |_| {
                doc.with(|d| files::check_selection(d, input, max_bytes));
            });
        }

        timers
    }
}
