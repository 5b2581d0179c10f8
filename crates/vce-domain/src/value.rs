//! Tagged-union value helpers
//!
//! Wire-format conventions for descriptor value expressions: the
//! `"_type"` discriminant selecting a constructor and the `"_ref"`
//! indirection referencing another named object.

use serde_json::Value;

use crate::constants::{REF_FIELD, TYPE_FIELD};

/// The discriminant tag of a tagged-union value, if present
pub fn type_tag(value: &Value) -> Option<&str> {
    value.get(TYPE_FIELD).and_then(Value::as_str)
}

/// The referenced object name of a `{"_ref": name}` value, if present
pub fn ref_name(value: &Value) -> Option<&str> {
    value.get(REF_FIELD).and_then(Value::as_str)
}

/// True when a string looks like an object URI (`<scheme>:/<path>`)
///
/// The scheme is everything before the first `":/"` and must be
/// non-empty ASCII-alphabetic; anything else is a plain string value.
pub fn is_uri_candidate(s: &str) -> bool {
    match s.split_once(":/") {
        Some((scheme, _)) => {
            !scheme.is_empty() && scheme.bytes().all(|b| b.is_ascii_alphabetic())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tag_and_ref_extraction() {
        assert_eq!(type_tag(&json!({"_type": "Point", "x": 0})), Some("Point"));
        assert_eq!(type_tag(&json!({"x": 0})), None);
        assert_eq!(ref_name(&json!({"_ref": "origin"})), Some("origin"));
        assert_eq!(ref_name(&json!("origin")), None);
    }

    #[test]
    fn uri_candidates() {
        assert!(is_uri_candidate("data:/some/path"));
        assert!(is_uri_candidate("http://host/path"));
        assert!(!is_uri_candidate("plain string"));
        assert!(!is_uri_candidate(":/no-scheme"));
        assert!(!is_uri_candidate("sch3me:/digits-not-allowed"));
    }
}
