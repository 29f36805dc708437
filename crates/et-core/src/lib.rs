//! # et-core
//!
//! Edit data model, parser, and applier for anchored document edits.
//!
//! An edit anchors itself to a verbatim substring of the original document
//! and either inserts text around it or replaces it:
//!
//! | Kind | Effect |
//! |------|--------|
//! | `insert_before` | New text immediately before the anchor |
//! | `insert_after` | New text immediately after the anchor |
//! | `replace` | Anchor span replaced by the new text |
//!
//! The applier resolves every anchor against the ORIGINAL document text,
//! sorts the resolved edits by position, and builds the output in a single
//! left-to-right pass. The result is deterministic regardless of the order
//! edits arrive in, and the original string is never mutated.
//!
//! Anchors must be non-empty and occur exactly once. Anything else is
//! rejected with a distinct error rather than guessed at.

pub mod apply;
pub mod edit;
pub mod error;
pub mod parse;

pub use apply::apply_edits;
pub use edit::{EditKind, EditList, EditOperation};
pub use error::EditError;
pub use parse::{parse_json, parse_response};
