//! Error taxonomy for edit parsing and application.

/// Errors produced while parsing or applying an edit list.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// The model response (or saved-edits file) is not a JSON array of
    /// edit records.
    #[error("malformed edit list: {0}")]
    MalformedResponse(String),

    /// An operation kind is not one of `insert_before`, `insert_after`,
    /// `replace`.
    #[error("unrecognized operation kind {kind:?} in edit {index}")]
    InvalidOperation { index: usize, kind: String },

    /// An edit record has a missing or empty anchor.
    #[error("edit {index} has a missing or empty anchor")]
    EmptyAnchor { index: usize },

    /// An anchor does not occur in the document.
    #[error("anchor not found in document: {0:?}")]
    AnchorNotFound(String),

    /// An anchor occurs more than once, so the edit target is ambiguous.
    #[error("anchor occurs {count} times in document (must be unique): {anchor:?}")]
    AmbiguousAnchor { anchor: String, count: usize },

    /// A resolved edit starts inside the span consumed by an earlier edit.
    #[error("edit anchored at {anchor:?} overlaps an earlier edit")]
    OverlappingEdits { anchor: String },
}
