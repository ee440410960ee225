//! Recovering structured data from free-text model replies.
//!
//! Every call site goes through [`extract_structured`], which never fails:
//!
//! 1. the whole reply parses as JSON ([`Confidence::Strict`]);
//! 2. the widest span from the first `{` or `[` to the last matching closer
//!    parses ([`Confidence::Recovered`]);
//! 3. otherwise the trimmed reply is wrapped as `{raw_field: reply}`
//!    ([`Confidence::RawText`]), which callers surface as low confidence.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Strict,
    Recovered,
    RawText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub value: Value,
    pub confidence: Confidence,
}

/// Parse `reply`, falling back as described in the module docs.
#[must_use]
pub fn extract_structured(reply: &str, raw_field: &str) -> Extracted {
    let trimmed = reply.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Extracted {
            value,
            confidence: Confidence::Strict,
        };
    }

    if let Some(span) = bracket_span(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(span) {
            return Extracted {
                value,
                confidence: Confidence::Recovered,
            };
        }
    }

    tracing::warn!(
        raw_field,
        reply_chars = trimmed.len(),
        "model reply is not JSON, keeping raw text"
    );
    let mut map = Map::new();
    map.insert(raw_field.to_string(), Value::String(trimmed.to_string()));
    Extracted {
        value: Value::Object(map),
        confidence: Confidence::RawText,
    }
}

/// Widest span starting at whichever of `{` / `[` appears first.
fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let close = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

impl Extracted {
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.confidence == Confidence::RawText
    }

    /// Descend into `key` when it holds an object; otherwise stay put.
    ///
    /// Replies shaped `{"linkedin": {...}}` and bare `{...}` both work.
    #[must_use]
    pub fn scoped(self, key: &str) -> Self {
        match self.value.get(key) {
            Some(inner @ Value::Object(_)) => Self {
                value: inner.clone(),
                confidence: self.confidence,
            },
            _ => self,
        }
    }

    /// String value of `key`; numbers and booleans are stringified.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<String> {
        match self.value.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// List of strings under `key`. A lone string becomes a one-item list and
    /// non-string array entries are skipped.
    #[must_use]
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.value.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// The value itself when it is an array, else the array under `key`.
    #[must_use]
    pub fn array_or_field(&self, key: &str) -> Vec<Value> {
        match &self.value {
            Value::Array(items) => items.clone(),
            other => other
                .get(key)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strict_json_parses_directly() {
        let out = extract_structured(r#" {"topic": "Rewiring SaaS GTM"} "#, "topic");
        assert_eq!(out.confidence, Confidence::Strict);
        assert_eq!(out.str_field("topic").as_deref(), Some("Rewiring SaaS GTM"));
    }

    #[test]
    fn fenced_object_is_recovered_by_widest_span() {
        let reply = "Sure! Here you go:\n```json\n{\"title\": \"T\", \"outline\": [\"a\", \"b\"], \"blog\": \"{nested}\"}\n```\nEnjoy.";
        let out = extract_structured(reply, "blog");
        assert_eq!(out.confidence, Confidence::Recovered);
        assert_eq!(out.string_list("outline"), vec!["a", "b"]);
        assert_eq!(out.str_field("blog").as_deref(), Some("{nested}"));
    }

    #[test]
    fn array_reply_is_recovered() {
        let out = extract_structured("Queries:\n[\"SaaS churn\", \"GTM trends\"]", "queries");
        assert_eq!(out.confidence, Confidence::Recovered);
        assert_eq!(out.array_or_field("queries").len(), 2);
    }

    #[test]
    fn unparseable_reply_is_wrapped_as_raw_text() {
        let out = extract_structured("  Just a plain answer {oops  ", "blog");
        assert!(out.is_low_confidence());
        assert_eq!(out.value, json!({"blog": "Just a plain answer {oops"}));
    }

    #[test]
    fn scoped_descends_only_into_objects() {
        let out = extract_structured(r##"{"linkedin": {"caption": "c", "hashtags": ["#a"]}}"##, "caption")
            .scoped("linkedin");
        assert_eq!(out.str_field("caption").as_deref(), Some("c"));
        assert_eq!(out.string_list("hashtags"), vec!["#a"]);

        let raw = extract_structured("plain", "caption").scoped("linkedin");
        assert_eq!(raw.str_field("caption").as_deref(), Some("plain"));
        assert!(raw.is_low_confidence());
    }

    #[test]
    fn lone_string_becomes_single_item_list() {
        let out = extract_structured(r#"{"tags": "saas", "n": 3}"#, "x");
        assert_eq!(out.string_list("tags"), vec!["saas"]);
        assert_eq!(out.str_field("n").as_deref(), Some("3"));
        assert!(out.string_list("missing").is_empty());
    }
}
