//! Unit tests for the object URI value object

use vce_domain::error::Error;
use vce_domain::uri::ObjectUri;

#[test]
fn parses_scheme_path_and_params() {
    let uri = ObjectUri::parse("data:/reports/daily?format=csv&tz=utc").expect("should parse");

    assert_eq!(uri.scheme(), "data");
    assert_eq!(uri.path(), "reports/daily");
    assert_eq!(uri.parameter("format"), Some("csv"));
    assert_eq!(uri.parameter("tz"), Some("utc"));
    assert_eq!(uri.parameter("missing"), None);
}

#[test]
fn parses_without_query() {
    let uri = ObjectUri::parse("cache:/sessions").expect("should parse");

    assert_eq!(uri.scheme(), "cache");
    assert_eq!(uri.path(), "sessions");
    assert_eq!(uri.parameters().count(), 0);
}

#[test]
fn parameter_lookup_is_case_insensitive() {
    let uri = ObjectUri::parse("data:/x?Format=CSV").expect("should parse");

    assert_eq!(uri.parameter("format"), Some("CSV"));
    assert_eq!(uri.parameter("FORMAT"), Some("CSV"));
}

#[test]
fn display_round_trips() {
    for input in [
        "data:/reports/daily?format=csv&tz=utc",
        "cache:/sessions",
        "s:/p?k1=v1&k2=v2&k3=v3",
    ] {
        let uri = ObjectUri::parse(input).expect("should parse");
        assert_eq!(uri.to_string(), input);

        let reparsed = ObjectUri::parse(&uri.to_string()).expect("should reparse");
        assert_eq!(reparsed, uri);
    }
}

#[test]
fn missing_scheme_separator_fails() {
    let err = ObjectUri::parse("not a uri").unwrap_err();
    assert!(matches!(err, Error::UriParse { .. }));
}

#[test]
fn non_alphabetic_scheme_fails() {
    assert!(ObjectUri::parse("d4ta:/x").is_err());
    assert!(ObjectUri::parse(":/x").is_err());
}

#[test]
fn malformed_query_pair_fails() {
    let err = ObjectUri::parse("data:/x?novalue").unwrap_err();
    assert!(err.to_string().contains("novalue"));

    assert!(ObjectUri::parse("data:/x?a=b=c").is_err());
}

#[test]
fn serde_round_trip_as_string() {
    let uri = ObjectUri::parse("data:/x?a=1").expect("should parse");
    let json = serde_json::to_string(&uri).expect("serialization should succeed");
    assert_eq!(json, "\"data:/x?a=1\"");

    let back: ObjectUri = serde_json::from_str(&json).expect("deserialization should succeed");
    assert_eq!(back, uri);
}
