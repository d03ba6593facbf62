//! The chat widget component.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::outcome::{ChatMessage, ChatOutcome};
use super::transport::ChatTransport;
use crate::error::Error;
use crate::ui::dom::{Document, DocumentHandle, ElementId};
use crate::ui::event::{EventContext, EventKind, EventRegistry};

/// Greeting shown the first time the widget opens.
pub const GREETING: &str = "Hello! I'm MJ, your AI assistant. How can I help you today?";

/// Class toggled on the window element while closed.
pub const HIDDEN_CLASS: &str = "hidden";

/// Class carried by every rendered message.
pub const MESSAGE_CLASS: &str = "chatbot-message";

/// Key that sends the message when pressed in the input.
pub const CONFIRM_KEY: &str = "Enter";

/// Stable identifiers of the widget's elements.
pub mod ids {
    pub const TOGGLE: &str = "chatbot-toggle";
    pub const WINDOW: &str = "chatbot-window";
    pub const CLOSE: &str = "chatbot-close";
    pub const INPUT: &str = "chatbot-input";
    pub const SEND: &str = "chatbot-send";
    pub const MESSAGES: &str = "chatbot-messages";
}

/// A bot reply running on the Tokio runtime.
///
/// The reply is appended whether or not the handle is awaited; awaiting it
/// resolves once the bot message is in the conversation.
pub type PendingReply = JoinHandle<ChatOutcome>;

/// The widget's elements, resolved once at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatElements {
    pub toggle: ElementId,
    pub window: ElementId,
    pub close: ElementId,
    pub input: ElementId,
    pub send: ElementId,
    pub messages: ElementId,
}

impl ChatElements {
    /// Look up every widget element by its identifier.
    pub fn locate(doc: &Document) -> crate::Result<Self> {
        let find = |id: &'static str| doc.get_element_by_id(id).ok_or(Error::MissingElement(id));
        Ok(Self {
            toggle: find(ids::TOGGLE)?,
            window: find(ids::WINDOW)?,
            close: find(ids::CLOSE)?,
            input: find(ids::INPUT)?,
            send: find(ids::SEND)?,
            messages: find(ids::MESSAGES)?,
        })
    }
}

#[derive(Debug, Default)]
struct ChatState {
    open: bool,
    messages: Vec<ChatMessage>,
}

#[derive(Debug)]
struct WidgetInner {
    doc: DocumentHandle,
    elements: ChatElements,
    transport: Arc<dyn ChatTransport>,
    greeting: String,
    state: Mutex<ChatState>,
}

/// Chat overlay: open/close state plus the send/receive message cycle.
///
/// Cloning yields another handle to the same widget.
#[derive(Debug)]
pub struct ChatWidget {
    inner: Arc<WidgetInner>,
}

impl Clone for ChatWidget {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ChatWidget {
    /// Mount the widget on `doc`. The window starts closed.
    pub fn mount(
        doc: DocumentHandle,
        transport: Arc<dyn ChatTransport>,
        greeting: impl Into<String>,
    ) -> crate::Result<Self> {
        let elements = doc.with(|d| {
            let elements = ChatElements::locate(d)?;
            d.add_class(elements.window, HIDDEN_CLASS);
            Ok::<_, Error>(elements)
        })?;

        info!(name: "chat.widget.mounted", "Chat widget mounted");

        Ok(Self {
            inner: Arc::new(WidgetInner {
                doc,
                elements,
                transport,
                greeting: greeting.into(),
                state: Mutex::new(ChatState::default()),
            }),
        })
    }

    /// Register the widget's click and keypress handlers.
    pub fn bind(&self, events: &mut EventRegistry) {
        let els = self.inner.elements;

        let widget = self.clone();
        events.on(els.toggle, EventKind::Click, move |_| widget.toggle_open());

        let widget = self.clone();
        events.on(els.close, EventKind::Click, move |_| widget.close());

        let widget = self.clone();
        events.on(els.send, EventKind::Click, move |ctx| {
            widget.send_from_input(ctx);
        });

        let widget = self.clone();
        events.on(els.input, EventKind::KeyPress, move |ctx| {
            if ctx.event().key.as_deref() == Some(CONFIRM_KEY) {
                widget.send_from_input(ctx);
            }
        });
    }

    pub fn elements(&self) -> ChatElements {
        self.inner.elements
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    /// Snapshot of the conversation view, in display order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state().messages.clone()
    }

    /// Flip visibility. Opening focuses the input and greets an empty conversation.
    pub fn toggle_open(&self) {
        let (open, greet) = {
            let mut state = self.state();
            state.open = !state.open;
            (state.open, state.open && state.messages.is_empty())
        };

        let els = self.inner.elements;
        self.inner.doc.with(|doc| {
            if open {
                doc.remove_class(els.window, HIDDEN_CLASS);
                doc.focus(els.input);
            } else {
                doc.add_class(els.window, HIDDEN_CLASS);
            }
        });

        if greet {
            self.append(ChatMessage::bot(self.inner.greeting.clone()));
        }
    }

    pub fn close(&self) {
        self.state().open = false;
        let window = self.inner.elements.window;
        self.inner.doc.with(|doc| doc.add_class(window, HIDDEN_CLASS));
    }

    /// Send `text` as the user.
    ///
    /// Blank text is ignored. Otherwise the user message is shown and the
    /// input cleared before this returns, and the exchange is spawned onto the
    /// Tokio runtime; it appends exactly one bot message, whatever the
    /// transport does. Must run inside a Tokio runtime.
    pub fn send(&self, text: &str) -> Option<PendingReply> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_string();

        self.append(ChatMessage::user(message.clone()));
        let input = self.inner.elements.input;
        self.inner.doc.with(|doc| doc.set_value(input, ""));

        debug!(name: "chat.message.sent", chars = message.chars().count(), "Chat message sent");

        let widget = self.clone();
        Some(tokio::spawn(async move {
            let result = widget.inner.transport.exchange(&message).await;
            if let Err(err) = &result {
                error!(name: "chat.transport.failed", error = %err, "Chatbot error");
            }
            let outcome = ChatOutcome::from(result);
            debug!(name: "chat.reply.received", ?outcome, "Chat reply received");
            widget.append(ChatMessage::bot(outcome.reply_text()));
            outcome
        }))
    }

    fn send_from_input(&self, ctx: &mut EventContext<'_>) {
        let input = self.inner.elements.input;
        let text = self.inner.doc.with(|doc| doc.value(input).to_string());
        if let Some(pending) = self.send(&text) {
            ctx.spawn(async move {
                let _ = pending.await;
            });
        }
    }

    /// Record and render a message, keeping the newest one in view.
    fn append(&self, message: ChatMessage) {
        let list = self.inner.elements.messages;
        self.inner.doc.with(|doc| {
            let el = doc.append_new(list, "div");
            doc.add_class(el, MESSAGE_CLASS);
            doc.add_class(el, message.role.as_str());
            doc.set_text(el, message.text.clone());
            doc.scroll_to_bottom(list);
        });
        self.state().messages.push(message);
    }

    fn state(&self) -> MutexGuard<'_, ChatState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
