//! Required-field validation on submit.

use tracing::info;

use crate::ui::dom::{Document, ElementId, Selector};

/// Alert shown when a submission is blocked.
pub const REQUIRED_ALERT: &str = "Please fill in all required fields";

/// Border color flagging an empty required field.
pub const INVALID_BORDER: &str = "red";

/// Check every required field in `form`, flagging the empty ones.
///
/// Returns whether the submission may proceed. On failure a single alert
/// is shown.
pub fn validate_required(doc: &mut Document, form: ElementId) -> bool {
    let mut invalid = 0usize;
    for field in doc.query_within(form, Selector::Attribute("required")) {
        if doc.value(field).trim().is_empty() {
            invalid += 1;
            doc.set_style(field, "border-color", INVALID_BORDER);
        } else {
            doc.set_style(field, "border-color", "");
        }
    }

    if invalid > 0 {
        info!(name: "page.form.rejected", invalid, "Form submission blocked");
        doc.alert(REQUIRED_ALERT);
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::markup;

    fn form_with_fields(doc: &mut Document) -> (ElementId, ElementId, ElementId, ElementId) {
        let body = doc.body();
        let form = doc.append_new(body, "form");
        let username = markup::input(doc, form, "text");
        doc.set_attribute(username, "required", "");
        let password = markup::input(doc, form, "password");
        doc.set_attribute(password, "required", "");
        let note = markup::input(doc, form, "text");
        (form, username, password, note)
    }

    #[test]
    fn test_blocks_on_blank_required_field() {
        let mut doc = Document::new();
        let (form, username, password, note) = form_with_fields(&mut doc);
        doc.set_value(username, "mj");
        doc.set_value(password, "   ");

        assert!(!validate_required(&mut doc, form));
        assert_eq!(doc.style(password, "border-color"), Some(INVALID_BORDER));
        assert_eq!(doc.style(username, "border-color"), None);
        assert_eq!(doc.style(note, "border-color"), None);
        assert_eq!(doc.alerts(), [REQUIRED_ALERT]);
    }

    #[test]
    fn test_unflags_after_correction() {
        let mut doc = Document::new();
        let (form, username, password, _) = form_with_fields(&mut doc);

        assert!(!validate_required(&mut doc, form));
        assert_eq!(doc.style(username, "border-color"), Some(INVALID_BORDER));

        doc.set_value(username, "mj");
        doc.set_value(password, "secret");
        assert!(validate_required(&mut doc, form));
        assert_eq!(doc.style(username, "border-color"), None);
        assert_eq!(doc.style(password, "border-color"), None);
        assert_eq!(doc.alerts().len(), 1);
    }
}
