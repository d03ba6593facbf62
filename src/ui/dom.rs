//! Headless document model.
//!
//! A small element arena standing in for the browser DOM. Components hold
//! [`ElementId`]s resolved once at load time and mutate the tree through a
//! shared [`DocumentHandle`].

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identifier of an element inside the [`Document`] that created it.
///
/// Identifiers are only meaningful for the document that minted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A file picked through a file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the picker.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    value: String,
    text: String,
    files: Vec<SelectedFile>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    scroll_top: usize,
}

/// Simple element selectors, enough for the page behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `.class`
    Class(&'a str),
    /// `tag`
    Tag(&'a str),
    /// `[attr]`
    Attribute(&'a str),
    /// `input[type="..."]`
    InputType(&'a str),
}

/// The headless document.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    body: ElementId,
    focused: Option<ElementId>,
    alerts: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only a `body` element.
    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                tag: "body".to_string(),
                ..Element::default()
            }],
            body: ElementId(0),
            focused: None,
            alerts: Vec::new(),
        }
    }

    /// The root element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tree
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed.
    ///
    /// Returns `false` and leaves the tree untouched when `parent` is `child`
    /// or lies inside it.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if self.is_inclusive_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
        true
    }

    /// Create an element and append it to `parent` in one step.
    pub fn append_new(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Remove an element (and its subtree) from the document.
    pub fn remove(&mut self, id: ElementId) {
        self.detach(id);
        if self.focused.is_some_and(|f| !self.is_connected(f)) {
            self.focused = None;
        }
    }

    fn detach(&mut self, id: ElementId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
    }

    /// Whether the element is reachable from the body.
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.is_inclusive_ancestor(self.body, id)
    }

    fn is_inclusive_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = self.node(el).parent;
        }
        false
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.node(id).children
    }

    /// The element directly after `id` among its siblings.
    pub fn next_element_sibling(&self, id: ElementId) -> Option<ElementId> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// All descendants of `root` in document order, excluding `root`.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    /// Connected element carrying the given `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.body)
            .into_iter()
            .find(|el| self.attribute(*el, "id") == Some(id))
    }

    /// All connected elements matching `selector`, in document order.
    pub fn query_all(&self, selector: Selector<'_>) -> Vec<ElementId> {
        self.query_within(self.body, selector)
    }

    /// Descendants of `root` matching `selector`, in document order.
    pub fn query_within(&self, root: ElementId, selector: Selector<'_>) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|el| self.matches(*el, selector))
            .collect()
    }

    pub fn matches(&self, id: ElementId, selector: Selector<'_>) -> bool {
        let node = self.node(id);
        match selector {
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
            Selector::Attribute(name) => node.attributes.contains_key(name),
            Selector::InputType(kind) => {
                node.tag == "input"
                    && node
                        .attributes
                        .get("type")
                        .is_some_and(|t| t.eq_ignore_ascii_case(kind))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Element state
    // ─────────────────────────────────────────────────────────────────────────

    pub fn tag(&self, id: ElementId) -> &str {
        &self.node(id).tag
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node(id).attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        self.node_mut(id)
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if !self.has_class(id, class) {
            self.node_mut(id).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.node_mut(id).classes.retain(|c| c != class);
    }

    /// Space-separated class list, as `className` would report it.
    pub fn class_name(&self, id: ElementId) -> String {
        self.node(id).classes.join(" ")
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.node(id).style.get(property).map(String::as_str)
    }

    /// Set an inline style property. An empty value clears it.
    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        let style = &mut self.node_mut(id).style;
        if value.is_empty() {
            style.remove(property);
        } else {
            style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn value(&self, id: ElementId) -> &str {
        &self.node(id).value
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        self.node_mut(id).value = value.into();
    }

    pub fn text(&self, id: ElementId) -> &str {
        &self.node(id).text
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.node_mut(id).text = text.into();
    }

    pub fn files(&self, id: ElementId) -> &[SelectedFile] {
        &self.node(id).files
    }

    pub fn set_files(&mut self, id: ElementId, files: Vec<SelectedFile>) {
        self.node_mut(id).files = files;
    }

    /// Clear a file input: drops the selection and its value.
    pub fn clear_files(&mut self, id: ElementId) {
        let node = self.node_mut(id);
        node.files.clear();
        node.value.clear();
    }

    pub fn focus(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Scrollable height, measured in rows (one per child).
    pub fn scroll_height(&self, id: ElementId) -> usize {
        self.node(id).children.len()
    }

    pub fn scroll_top(&self, id: ElementId) -> usize {
        self.node(id).scroll_top
    }

    pub fn scroll_to_bottom(&mut self, id: ElementId) {
        let height = self.scroll_height(id);
        self.node_mut(id).scroll_top = height;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Blocking alerts
    // ─────────────────────────────────────────────────────────────────────────

    /// Show a blocking alert. Headless documents record it.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn node(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }
}

/// Shared, lockable handle to a [`Document`].
#[derive(Debug, Default)]
pub struct DocumentHandle {
    inner: Arc<Mutex<Document>>,
}

impl Clone for DocumentHandle {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl From<Document> for DocumentHandle {
    fn from(doc: Document) -> Self {
        Self {
            inner: Arc::new(Mutex::new(doc)),
        }
    }
}

impl DocumentHandle {
    /// Lock the document. Handlers run to completion, so a poisoned lock
    /// still holds a consistent tree.
    pub fn lock(&self) -> MutexGuard<'_, Document> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the document.
    pub fn with<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_queries() {
        let mut doc = Document::new();
        let form = doc.append_new(doc.body(), "form");
        let name = doc.append_new(form, "input");
        doc.set_attribute(name, "required", "");
        let age = doc.append_new(form, "input");
        doc.set_attribute(age, "type", "number");
        let hint = doc.append_new(form, "small");

        assert_eq!(doc.query_within(form, Selector::Attribute("required")), vec![name]);
        assert_eq!(doc.query_all(Selector::InputType("number")), vec![age]);
        assert_eq!(doc.next_element_sibling(age), Some(hint));
        assert_eq!(doc.next_element_sibling(hint), None);
    }

    #[test]
    fn test_remove_disconnects_subtree() {
        let mut doc = Document::new();
        let outer = doc.append_new(doc.body(), "div");
        let inner = doc.append_new(outer, "span");
        doc.set_attribute(inner, "id", "inner");
        doc.focus(inner);

        assert_eq!(doc.get_element_by_id("inner"), Some(inner));

        doc.remove(outer);
        assert!(!doc.is_connected(inner));
        assert_eq!(doc.get_element_by_id("inner"), None);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.append_new(doc.body(), "div");
        let inner = doc.append_new(outer, "div");

        assert!(!doc.append_child(inner, outer));
        assert!(!doc.append_child(outer, outer));
        assert_eq!(doc.children(outer), [inner]);
        assert!(doc.is_connected(inner));
        assert_eq!(doc.descendants(doc.body()), vec![outer, inner]);

        let other = doc.append_new(doc.body(), "div");
        assert!(doc.append_child(other, inner));
        assert!(doc.children(outer).is_empty());
    }

    #[test]
    fn test_style_and_classes() {
        let mut doc = Document::new();
        let el = doc.append_new(doc.body(), "div");

        doc.set_style(el, "border-color", "red");
        assert_eq!(doc.style(el, "border-color"), Some("red"));
        doc.set_style(el, "border-color", "");
        assert_eq!(doc.style(el, "border-color"), None);

        doc.add_class(el, "chatbot-message");
        doc.add_class(el, "bot");
        doc.add_class(el, "bot");
        assert_eq!(doc.class_name(el), "chatbot-message bot");
        doc.remove_class(el, "bot");
        assert!(!doc.has_class(el, "bot"));
    }

    #[test]
    fn test_scroll_to_bottom_tracks_children() {
        let mut doc = Document::new();
        let list = doc.append_new(doc.body(), "div");
        doc.append_new(list, "div");
        doc.append_new(list, "div");
        doc.scroll_to_bottom(list);
        assert_eq!(doc.scroll_top(list), 2);
    }
}
