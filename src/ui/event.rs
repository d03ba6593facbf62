//! Abstract UI-event source.
//!
//! Components register handlers per `(element, kind)` pair. Dispatch runs the
//! handlers synchronously, in registration order, and collects any
//! asynchronous work they started so the caller decides how to drive it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::dom::ElementId;

/// The kinds of UI events the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyPress,
    Submit,
    Input,
    Change,
}

/// A single UI event aimed at one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub target: ElementId,
    pub kind: EventKind,
    /// Key name for [`EventKind::KeyPress`] events.
    pub key: Option<String>,
}

impl UiEvent {
    pub fn click(target: ElementId) -> Self {
        Self::plain(target, EventKind::Click)
    }

    pub fn key_press(target: ElementId, key: impl Into<String>) -> Self {
        Self {
            target,
            kind: EventKind::KeyPress,
            key: Some(key.into()),
        }
    }

    pub fn submit(target: ElementId) -> Self {
        Self::plain(target, EventKind::Submit)
    }

    pub fn input(target: ElementId) -> Self {
        Self::plain(target, EventKind::Input)
    }

    pub fn change(target: ElementId) -> Self {
        Self::plain(target, EventKind::Change)
    }

    fn plain(target: ElementId, kind: EventKind) -> Self {
        Self {
            target,
            kind,
            key: None,
        }
    }
}

/// What a handler sees while it runs.
pub struct EventContext<'a> {
    event: &'a UiEvent,
    default_prevented: bool,
    tasks: Vec<BoxFuture<'static, ()>>,
}

impl fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("event", self.event)
            .field("default_prevented", &self.default_prevented)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl EventContext<'_> {
    pub fn event(&self) -> &UiEvent {
        self.event
    }

    /// Cancel the browser's default action (e.g. form submission).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Hand off asynchronous work started by this handler.
    pub fn spawn(&mut self, task: impl Future<Output = ()> + Send + 'static) {
        self.tasks.push(Box::pin(task));
    }
}

/// Result of dispatching one event.
pub struct Dispatch {
    pub default_prevented: bool,
    pub tasks: Vec<BoxFuture<'static, ()>>,
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("default_prevented", &self.default_prevented)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

/// An event handler.
pub type Handler = Arc<dyn Fn(&mut EventContext<'_>) + Send + Sync>;

/// Registry of event handlers keyed by target element and event kind.
#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<(ElementId, EventKind), Vec<Handler>>,
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events on `target`.
    pub fn on<F>(&mut self, target: ElementId, kind: EventKind, handler: F)
    where
        F: Fn(&mut EventContext<'_>) + Send + Sync + 'static,
    {
        self.listeners
            .entry((target, kind))
            .or_default()
            .push(Arc::new(handler));
    }

    pub fn listener_count(&self, target: ElementId, kind: EventKind) -> usize {
        self.listeners.get(&(target, kind)).map_or(0, Vec::len)
    }

    /// Run every handler registered for the event's target and kind.
    pub fn dispatch(&self, event: &UiEvent) -> Dispatch {
        let mut ctx = EventContext {
            event,
            default_prevented: false,
            tasks: Vec::new(),
        };
        if let Some(handlers) = self.listeners.get(&(event.target, event.kind)) {
            for handler in handlers {
                handler(&mut ctx);
            }
        }
        Dispatch {
            default_prevented: ctx.default_prevented,
            tasks: ctx.tasks,
        }
    }
}
