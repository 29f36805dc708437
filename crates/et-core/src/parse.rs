//! Parsing model responses into validated edit lists.
//!
//! Model output is untyped text. Every field is validated here: missing or
//! empty anchors and unrecognized operation kinds are rejected outright,
//! never silently dropped.

use serde::Deserialize;

use crate::edit::{EditKind, EditList, EditOperation};
use crate::error::EditError;

/// One raw record as the model (or a saved-edits file) provides it.
///
/// Loosely typed on purpose: validation happens field by field so each
/// failure maps to a distinct error. Accepts `operation`/`op` for `kind`
/// and `new_text` for `text`.
#[derive(Debug, Deserialize)]
struct RawEdit {
    #[serde(default)]
    anchor: Option<String>,
    #[serde(default, alias = "operation", alias = "op")]
    kind: Option<String>,
    #[serde(default, alias = "new_text")]
    text: Option<String>,
}

/// Parse a raw model response into an edit list.
///
/// Strips one markdown code fence if the model wrapped its output, then
/// parses the remainder as a JSON array of edit records.
pub fn parse_response(raw: &str) -> Result<EditList, EditError> {
    parse_json(strip_code_fence(raw))
}

/// Parse a JSON array of edit records, validating every field.
///
/// Strict form used for saved-edits files; no fence stripping.
pub fn parse_json(json: &str) -> Result<EditList, EditError> {
    let records: Vec<RawEdit> = serde_json::from_str(json.trim())
        .map_err(|e| EditError::MalformedResponse(e.to_string()))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let anchor = record
                .anchor
                .filter(|a| !a.is_empty())
                .ok_or(EditError::EmptyAnchor { index })?;

            let kind_value = record.kind.unwrap_or_default();
            let kind = EditKind::parse(&kind_value).ok_or(EditError::InvalidOperation {
                index,
                kind: kind_value,
            })?;

            Ok(EditOperation {
                anchor,
                kind,
                text: record.text.unwrap_or_default(),
            })
        })
        .collect()
}

/// Strip a single markdown code fence from a response.
///
/// Models sometimes wrap the JSON array in ```` ```json … ``` ```` despite
/// being told not to. The first line after the opening fence is treated as
/// an info string and skipped. Responses without a fence pass through.
fn strip_code_fence(raw: &str) -> &str {
    let Some(open) = raw.find("```") else {
        return raw;
    };
    let after = &raw[open + 3..];
    let body = match after.find('\n') {
        Some(i) => &after[i + 1..],
        None => after,
    };
    match body.find("```") {
        Some(close) => &body[..close],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_array() {
        let raw = r##"[
            {"anchor": "Body", "kind": "insert_before", "text": "# Section\n"},
            {"anchor": "End", "kind": "replace", "text": "Fin"}
        ]"##;

        let edits = parse_response(raw).unwrap();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].anchor, "Body");
        assert_eq!(edits[0].kind, EditKind::InsertBefore);
        assert_eq!(edits[0].text, "# Section\n");
        assert_eq!(edits[1].kind, EditKind::Replace);
        assert_eq!(edits[1].text, "Fin");
    }

    #[test]
    fn parses_fenced_response() {
        let raw = "Here are the edits:\n```json\n[{\"anchor\": \"a\", \"kind\": \"insert_after\", \"text\": \"b\"}]\n```\nDone.";
        let edits = parse_response(raw).unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].kind, EditKind::InsertAfter);
    }

    #[test]
    fn accepts_field_aliases() {
        let raw = r#"[{"anchor": "a", "operation": "replace", "new_text": "b"}]"#;
        let edits = parse_response(raw).unwrap();
        assert_eq!(edits[0].kind, EditKind::Replace);
        assert_eq!(edits[0].text, "b");
    }

    #[test]
    fn missing_text_defaults_to_empty() {
        let raw = r#"[{"anchor": "a", "kind": "replace"}]"#;
        let edits = parse_response(raw).unwrap();
        assert_eq!(edits[0].text, "");
    }

    #[test]
    fn rejects_non_array_input() {
        let err = parse_response("not json at all").unwrap_err();
        assert!(matches!(err, EditError::MalformedResponse(_)));

        let err = parse_response(r#"{"anchor": "a"}"#).unwrap_err();
        assert!(matches!(err, EditError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_unrecognized_kind() {
        let raw = r#"[{"anchor": "a", "kind": "append", "text": "b"}]"#;
        let err = parse_response(raw).unwrap_err();
        match err {
            EditError::InvalidOperation { index, kind } => {
                assert_eq!(index, 0);
                assert_eq!(kind, "append");
            }
            other => panic!("expected InvalidOperation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_or_empty_anchor() {
        let raw = r#"[{"kind": "replace", "text": "b"}]"#;
        assert!(matches!(
            parse_response(raw).unwrap_err(),
            EditError::EmptyAnchor { index: 0 }
        ));

        let raw = r#"[
            {"anchor": "ok", "kind": "replace", "text": "b"},
            {"anchor": "", "kind": "replace", "text": "b"}
        ]"#;
        assert!(matches!(
            parse_response(raw).unwrap_err(),
            EditError::EmptyAnchor { index: 1 }
        ));
    }

    #[test]
    fn strict_parse_does_not_strip_fences() {
        let raw = "```json\n[]\n```";
        assert!(matches!(
            parse_json(raw).unwrap_err(),
            EditError::MalformedResponse(_)
        ));
        assert!(parse_response(raw).unwrap().is_empty());
    }
}
