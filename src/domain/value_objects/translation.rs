//! Translation records and the value tests shared by every extractor

use serde_json::{Map, Value};

/// Per-document translation output
///
/// Keys keep insertion order so `name` always leads the record.
pub type TranslationRecord = Map<String, Value>;

/// The string held by `value` when it has visible content
///
/// Whitespace-only strings count as absent. The original string is returned
/// untouched, not trimmed.
pub fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

/// Truthiness as the host scripting runtime sees it
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render an element identifier as a record key
///
/// Falsy identifiers (null, empty string, zero, false) yield `None`.
pub fn id_string(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| is_truthy(v))?;
    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_blank_rejects_whitespace() {
        assert_eq!(non_blank(Some(&json!("   "))), None);
        assert_eq!(non_blank(Some(&json!("\n\t"))), None);
        assert_eq!(non_blank(Some(&json!(""))), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(&json!(42))), None);
    }

    #[test]
    fn test_non_blank_keeps_original_text() {
        assert_eq!(non_blank(Some(&json!("  Strike  "))), Some("  Strike  "));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("a1")));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_id_string() {
        assert_eq!(id_string(Some(&json!("strike"))), Some("strike".to_string()));
        assert_eq!(id_string(Some(&json!(7))), Some("7".to_string()));
        assert_eq!(id_string(Some(&json!(null))), None);
        assert_eq!(id_string(Some(&json!(""))), None);
        assert_eq!(id_string(None), None);
    }
}
