//! Issue identity and context models.
//!
//! Remote issue data is carried as a loosely-typed JSON field map because
//! the tracker's field set varies per project. Normalization keeps that
//! shape and only cleans string values.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw field map as returned by a backend for a single issue.
pub type RawIssueData = Map<String, Value>;

/// Field map with every string value whitespace-normalized.
pub type NormalizedContext = Map<String, Value>;

/// Identifier of a remote issue (e.g. `"PROJ-123"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueKey(String);

impl IssueKey {
    /// Wrap a key as-is. Validation happens at the configuration boundary.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the key is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IssueKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for IssueKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Normalized context for one issue, produced by the analyzer.
///
/// An empty `context` means the backend had nothing for this issue and
/// generation must be skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueContext {
    pub issue_key: IssueKey,
    pub context: NormalizedContext,
}

impl IssueContext {
    /// Context carrying field data.
    pub fn new(issue_key: IssueKey, context: NormalizedContext) -> Self {
        Self { issue_key, context }
    }

    /// The "nothing to process" context.
    pub fn empty(issue_key: IssueKey) -> Self {
        Self {
            issue_key,
            context: Map::new(),
        }
    }

    /// True when there is no field data to generate from.
    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }

    /// The `summary` field, when present as a string.
    pub fn summary(&self) -> Option<&str> {
        self.context.get("summary").and_then(Value::as_str)
    }
}

fn whitespace_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern is valid"))
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn normalize_text(value: &str) -> String {
    whitespace_run().replace_all(value.trim(), " ").into_owned()
}

/// Normalize every string field of a raw issue; other values are copied.
///
/// The key set of the output always equals the key set of the input.
pub fn normalize_fields(raw: &RawIssueData) -> NormalizedContext {
    raw.iter()
        .map(|(key, value)| {
            let cleaned = match value {
                Value::String(text) => Value::String(normalize_text(text)),
                other => other.clone(),
            };
            (key.clone(), cleaned)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> RawIssueData {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_normalize_summary_and_number() {
        let raw = fields(json!({"summary": "  Login   fails  ", "priority": 3}));
        let normalized = normalize_fields(&raw);
        assert_eq!(Value::Object(normalized), json!({"summary": "Login fails", "priority": 3}));
    }

    #[test]
    fn test_normalize_collapses_tabs_and_newlines() {
        assert_eq!(normalize_text("\tline one\n\n  line\r\ntwo "), "line one line two");
    }

    #[test]
    fn test_nested_values_pass_through() {
        let raw = fields(json!({
            "status": {"name": "  In   Progress "},
            "labels": ["  a  b "],
            "resolved": null,
        }));
        let normalized = normalize_fields(&raw);
        assert_eq!(normalized["status"], json!({"name": "  In   Progress "}));
        assert_eq!(normalized["labels"], json!(["  a  b "]));
        assert!(normalized["resolved"].is_null());
    }

    #[test]
    fn test_whitespace_only_string_becomes_empty() {
        let raw = fields(json!({"description": "   \n  "}));
        assert_eq!(normalize_fields(&raw)["description"], json!(""));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let raw = fields(json!({"summary": " a  b "}));
        let before = raw.clone();
        let _ = normalize_fields(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_issue_key_blank() {
        assert!(IssueKey::new("").is_blank());
        assert!(IssueKey::new("   ").is_blank());
        assert!(!IssueKey::new("X-1").is_blank());
        assert_eq!(IssueKey::from("X-1").to_string(), "X-1");
    }

    #[test]
    fn test_issue_context_summary() {
        let ctx = IssueContext::new(
            IssueKey::new("X-2"),
            fields(json!({"summary": "Checkout crash"})),
        );
        assert_eq!(ctx.summary(), Some("Checkout crash"));
        assert!(!ctx.is_empty());
        assert!(IssueContext::empty(IssueKey::new("X-1")).is_empty());
    }
}
