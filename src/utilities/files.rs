//! File-size gate and selection label.

use tracing::info;

use crate::ui::dom::{Document, ElementId};

/// Largest accepted upload (16 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

const MIB: f64 = 1024.0 * 1024.0;

/// Tag of the descriptive label that may follow a file input.
pub const LABEL_TAG: &str = "small";

/// What happened to a file selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCheck {
    /// Nothing was selected.
    Empty,
    /// Too large; the selection was cleared.
    Rejected,
    /// Within bounds.
    Accepted {
        /// Whether a following label now describes the file.
        label_updated: bool,
    },
}

/// Alert text for a rejected file.
pub fn size_alert(max_bytes: u64) -> String {
    format!("File size exceeds {}MB limit", max_bytes / (1024 * 1024))
}

/// Label text describing a selected file.
pub fn describe(name: &str, size: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mib = size as f64 / MIB;
    format!("Selected: {name} ({mib:.2} MB)")
}

/// Gate the first selected file of `input` on its size.
pub fn check_selection(doc: &mut Document, input: ElementId, max_bytes: u64) -> FileCheck {
    let Some(file) = doc.files(input).first().cloned() else {
        return FileCheck::Empty;
    };

    if file.size > max_bytes {
        info!(name: "page.file.rejected", size = file.size, max_bytes, "File too large");
        doc.alert(size_alert(max_bytes));
        doc.clear_files(input);
        return FileCheck::Rejected;
    }

    let label = doc
        .next_element_sibling(input)
        .filter(|el| doc.tag(*el) == LABEL_TAG);
    if let Some(label) = label {
        doc.set_text(label, describe(&file.name, file.size));
    }
    FileCheck::Accepted {
        label_updated: label.is_some(),
    }
}
