use crate::annotate::{PinRecord, pin};
use crate::error::Result;
use serde::Serialize;

/// Replays pin edits inside the page. Each edit walks `childNodes` from the `<html>`
/// element, checks the text node still holds the recorded text, splits it and inserts the
/// pin. Nodes that were not split are left alone. Returns how many edits were applied.
const APPLY_EDITS_JS: &str = r#"(function(edits) {
    let applied = 0;
    for (const edit of edits) {
        let node = document.documentElement;
        for (const index of edit.path) {
            node = node ? node.childNodes[index] : null;
        }
        if (!node || node.nodeType !== Node.TEXT_NODE || node.data !== edit.text) {
            continue;
        }
        const pin = document.createElement(edit.tag);
        for (const [name, value] of edit.attributes) {
            pin.setAttribute(name, value);
        }
        pin.textContent = edit.label;
        const next = edit.offset < node.length ? node.splitText(edit.offset) : node.nextSibling;
        node.parentNode.insertBefore(pin, next);
        applied += 1;
    }
    return applied;
})"#;

/// One pin insertion, in the form the page script consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEdit {
    pub path: Vec<usize>,
    pub text: String,

    /// Split offset in UTF-16 code units
    pub offset: usize,
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub label: String,
}

impl PageEdit {
    pub fn new(record: &PinRecord, glyph: &str) -> Self {
        let element = pin::pin_element(&record.href);

        Self {
            path: record.splice.path.clone(),
            text: record.splice.text.clone(),
            offset: record.splice.utf16_offset(),
            tag: element.tag_name,
            attributes: element.attributes.into_iter().collect(),
            label: glyph.to_string(),
        }
    }
}

/// Script applying `edits` in order when evaluated in the page
pub fn apply_edits_script(edits: &[PageEdit]) -> Result<String> {
    Ok(format!("{}({})", APPLY_EDITS_JS, serde_json::to_string(edits)?))
}
