//! Edit operation types and their persisted JSON form.

use serde::{Deserialize, Serialize};

/// What an edit does at its anchor.
///
/// Serialized as snake_case (`insert_before`, `insert_after`, `replace`),
/// which is also the canonical spelling in the persisted JSON format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// Insert the new text immediately before the anchor.
    InsertBefore,
    /// Insert the new text immediately after the anchor.
    InsertAfter,
    /// Replace the anchor span with the new text.
    Replace,
}

impl EditKind {
    /// Parse a kind as it may appear in model output.
    ///
    /// Accepts the canonical snake_case spelling plus the hyphenated
    /// variant models sometimes emit. Anything else is unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().replace('-', "_").as_str() {
            "insert_before" => Some(EditKind::InsertBefore),
            "insert_after" => Some(EditKind::InsertAfter),
            "replace" => Some(EditKind::Replace),
            _ => None,
        }
    }

    /// Canonical snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            EditKind::InsertBefore => "insert_before",
            EditKind::InsertAfter => "insert_after",
            EditKind::Replace => "replace",
        }
    }
}

/// A single proposed change, keyed by a verbatim anchor substring.
///
/// The anchor must be non-empty and occur exactly once in the document the
/// edit is applied to; the applier rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOperation {
    /// Verbatim substring that locates the edit.
    pub anchor: String,
    /// What to do at the anchor.
    pub kind: EditKind,
    /// Text to insert, or the replacement text for `replace`.
    pub text: String,
}

impl EditOperation {
    /// Create an edit operation.
    #[must_use]
    pub fn new(anchor: impl Into<String>, kind: EditKind, text: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            kind,
            text: text.into(),
        }
    }
}

/// An ordered sequence of edit operations, as returned by the model.
///
/// Order carries no meaning for application: the applier sorts edits by
/// their located position in the original document.
pub type EditList = Vec<EditOperation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_canonical_and_hyphenated() {
        assert_eq!(EditKind::parse("insert_before"), Some(EditKind::InsertBefore));
        assert_eq!(EditKind::parse("insert-after"), Some(EditKind::InsertAfter));
        assert_eq!(EditKind::parse(" replace "), Some(EditKind::Replace));
        assert_eq!(EditKind::parse("delete"), None);
        assert_eq!(EditKind::parse(""), None);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&EditKind::InsertBefore).unwrap();
        assert_eq!(json, "\"insert_before\"");
    }

    #[test]
    fn edit_list_round_trips_through_json() {
        let edits: EditList = vec![
            EditOperation::new("Body", EditKind::InsertBefore, "# Section\n"),
            EditOperation::new("Conclusion", EditKind::Replace, "The End"),
        ];

        let json = serde_json::to_string_pretty(&edits).unwrap();
        let reloaded: EditList = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, edits);
    }
}
