//! Applying edit lists to a document.
//!
//! Every anchor is resolved against the ORIGINAL text, then the resolved
//! edits are sorted by position and the output is assembled in one
//! left-to-right pass: O(n + k) for an n-char document and k edits, and
//! the output does not depend on the order the edits arrived in.

use crate::edit::{EditKind, EditOperation};
use crate::error::EditError;

/// An edit resolved to a span of the original text.
#[derive(Debug)]
struct ResolvedEdit<'a> {
    /// Byte offset in the original text where the edit takes effect.
    pos: usize,
    /// Bytes of original text consumed (non-zero only for replace).
    removed: usize,
    /// Text spliced in at `pos`.
    inserted: &'a str,
    /// Anchor, kept for diagnostics.
    anchor: &'a str,
}

/// Apply an edit list to a document, producing the modified text.
///
/// The input document is untouched; the result is a new string. Fails
/// without partial effect if any anchor is empty, absent, ambiguous, or
/// overlaps another edit.
///
/// # Example
///
/// ```rust
/// use et_core::{apply_edits, EditKind, EditOperation};
///
/// let doc = "Intro\nBody\nConclusion";
/// let edits = vec![EditOperation::new("Body", EditKind::InsertBefore, "# Section\n")];
/// assert_eq!(apply_edits(doc, &edits).unwrap(), "Intro\n# Section\nBody\nConclusion");
/// ```
pub fn apply_edits(text: &str, edits: &[EditOperation]) -> Result<String, EditError> {
    let mut resolved = Vec::with_capacity(edits.len());

    for (index, edit) in edits.iter().enumerate() {
        if edit.anchor.is_empty() {
            return Err(EditError::EmptyAnchor { index });
        }

        let mut occurrences = text.match_indices(edit.anchor.as_str());
        let start = match occurrences.next() {
            Some((start, _)) => start,
            None => return Err(EditError::AnchorNotFound(edit.anchor.clone())),
        };
        let extra = occurrences.count();
        if extra > 0 {
            return Err(EditError::AmbiguousAnchor {
                anchor: edit.anchor.clone(),
                count: extra + 1,
            });
        }

        let (pos, removed) = match edit.kind {
            EditKind::InsertBefore => (start, 0),
            EditKind::InsertAfter => (start + edit.anchor.len(), 0),
            EditKind::Replace => (start, edit.anchor.len()),
        };
        resolved.push(ResolvedEdit {
            pos,
            removed,
            inserted: &edit.text,
            anchor: &edit.anchor,
        });
    }

    // Total order: position first, then span length, then the inserted
    // text itself, so even same-position inserts come out in one order
    // for every permutation of the input.
    resolved.sort_by(|a, b| {
        (a.pos, a.removed, a.inserted).cmp(&(b.pos, b.removed, b.inserted))
    });

    let inserted_total: usize = resolved.iter().map(|e| e.inserted.len()).sum();
    let mut out = String::with_capacity(text.len() + inserted_total);
    let mut cursor = 0;

    for edit in &resolved {
        if edit.pos < cursor {
            return Err(EditError::OverlappingEdits {
                anchor: edit.anchor.to_string(),
            });
        }
        out.push_str(&text[cursor..edit.pos]);
        out.push_str(edit.inserted);
        cursor = edit.pos + edit.removed;
    }
    out.push_str(&text[cursor..]);

    Ok(out)
}
