//! Standard markup for the page's interactive pieces.

use super::dom::{Document, ElementId};
use crate::chat::widget::{ChatElements, HIDDEN_CLASS, ids};

/// Build the chat widget under `parent` with its stable identifiers.
pub fn chat_widget(doc: &mut Document, parent: ElementId) -> ChatElements {
    let container = doc.append_new(parent, "div");
    doc.add_class(container, "chatbot-container");

    let toggle = doc.append_new(container, "button");
    doc.set_attribute(toggle, "id", ids::TOGGLE);

    let window = doc.append_new(container, "div");
    doc.set_attribute(window, "id", ids::WINDOW);
    doc.add_class(window, HIDDEN_CLASS);

    let header = doc.append_new(window, "div");
    doc.add_class(header, "chatbot-header");
    let title = doc.append_new(header, "h3");
    doc.set_text(title, "MJ - AI Assistant");
    let close = doc.append_new(header, "button");
    doc.set_attribute(close, "id", ids::CLOSE);

    let messages = doc.append_new(window, "div");
    doc.set_attribute(messages, "id", ids::MESSAGES);

    let input_row = doc.append_new(window, "div");
    let input = doc.append_new(input_row, "input");
    doc.set_attribute(input, "id", ids::INPUT);
    doc.set_attribute(input, "type", "text");
    doc.set_attribute(input, "placeholder", "Ask MJ anything...");
    let send = doc.append_new(input_row, "button");
    doc.set_attribute(send, "id", ids::SEND);

    ChatElements {
        toggle,
        window,
        close,
        input,
        send,
        messages,
    }
}

/// Append a flash message element.
pub fn flash_message(doc: &mut Document, parent: ElementId, text: &str) -> ElementId {
    let el = doc.append_new(parent, "div");
    doc.add_class(el, crate::utilities::flash::FLASH_CLASS);
    doc.set_text(el, text);
    el
}

/// Append an `<input type="...">`.
pub fn input(doc: &mut Document, parent: ElementId, kind: &str) -> ElementId {
    let el = doc.append_new(parent, "input");
    doc.set_attribute(el, "type", kind);
    el
}
