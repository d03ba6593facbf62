//! Page load: binds the chat widget and page utilities to one document.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::chat::transport::ChatTransport;
use crate::chat::widget::ChatWidget;
use crate::config::AppConfig;
use crate::ui::dom::{Document, DocumentHandle, ElementId, SelectedFile};
use crate::ui::event::{EventRegistry, UiEvent};
use crate::utilities::PageUtilities;

/// A loaded page.
///
/// Holds the document, the registered handlers and the components bound to
/// them. Dispatching an event runs its handlers to completion; any reply
/// still in flight is spawned onto the Tokio runtime.
#[derive(Debug)]
pub struct Page {
    doc: DocumentHandle,
    events: EventRegistry,
    chat: Option<ChatWidget>,
    flash_timers: Vec<JoinHandle<()>>,
}

/// What firing one event did.
#[derive(Debug)]
pub struct Fired {
    pub default_prevented: bool,
    pub tasks: Vec<JoinHandle<()>>,
}

impl Fired {
    /// Wait for every task the event started.
    pub async fn settle(self) {
        for task in self.tasks {
            let _ = task.await;
        }
    }
}

impl Page {
    /// Bind everything present in `doc`. Must run inside a Tokio runtime.
    ///
    /// A page without the chat markup still gets the utilities.
    pub fn load(doc: Document, transport: Arc<dyn ChatTransport>, config: &AppConfig) -> Self {
        let doc = DocumentHandle::from(doc);
        let mut events = EventRegistry::new();

        let chat = match ChatWidget::mount(doc.clone(), transport, config.chat.greeting.clone()) {
            Ok(widget) => {
                widget.bind(&mut events);
                Some(widget)
            }
            Err(err) => {
                info!(name: "chat.widget.unavailable", reason = %err, "Chat widget not mounted");
                None
            }
        };

        let flash_timers = PageUtilities::new(doc.clone(), &config.page).attach(&mut events);

        Self {
            doc,
            events,
            chat,
            flash_timers,
        }
    }

    pub fn document(&self) -> &DocumentHandle {
        &self.doc
    }

    pub fn chat(&self) -> Option<&ChatWidget> {
        self.chat.as_ref()
    }

    /// Wait until every flash message has been removed.
    pub async fn settle_flashes(&mut self) {
        for timer in self.flash_timers.drain(..) {
            let _ = timer.await;
        }
    }

    /// Run the handlers for `event` and spawn their async work.
    pub fn fire(&self, event: &UiEvent) -> Fired {
        let dispatch = self.events.dispatch(event);
        Fired {
            default_prevented: dispatch.default_prevented,
            tasks: dispatch.tasks.into_iter().map(tokio::spawn).collect(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Synthetic user actions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn click(&self, target: ElementId) -> Fired {
        self.fire(&UiEvent::click(target))
    }

    pub fn press_key(&self, target: ElementId, key: &str) -> Fired {
        self.fire(&UiEvent::key_press(target, key))
    }

    /// Replace the field's value, then signal an edit.
    pub fn type_into(&self, target: ElementId, text: &str) -> Fired {
        self.doc.with(|d| d.set_value(target, text));
        self.fire(&UiEvent::input(target))
    }

    /// Submit a form. Returns whether the submission went ahead.
    pub fn submit(&self, form: ElementId) -> bool {
        !self.fire(&UiEvent::submit(form)).default_prevented
    }

    /// Pick files in a file input, then signal the change.
    pub fn select_files(&self, input: ElementId, files: Vec<SelectedFile>) -> Fired {
        self.doc.with(|d| {
            d.set_value(input, files.first().map(|f| f.name.clone()).unwrap_or_default());
            d.set_files(input, files);
        });
        self.fire(&UiEvent::change(input))
    }
}
