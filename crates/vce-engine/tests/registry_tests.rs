//! Unit tests for the type and provider registries

mod common;

use std::sync::Arc;

use serde_json::json;

use common::StubResolver;
use vce_domain::error::Error;
use vce_engine::registry::{ProviderRegistry, TypeRegistry};

fn point_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register(
        "Point",
        Arc::new(|input, _ctx| Ok(json!({"x": input["x"], "y": input["y"]}))),
    );
    registry
}

#[test]
fn create_resolves_single_tagged_object() {
    let registry = point_registry();
    assert!(registry.supports("Point"));
    assert!(!registry.supports("Rect"));

    let value = registry
        .create(&json!({"_type": "Point", "x": 1, "y": 2}), &StubResolver)
        .expect("should create");
    assert_eq!(value, json!({"x": 1, "y": 2}));
}

#[test]
fn create_resolves_uniform_array_in_order() {
    let registry = point_registry();
    let value = registry
        .create(
            &json!([
                {"_type": "Point", "x": 1, "y": 1},
                {"_type": "Point", "x": 2, "y": 2},
            ]),
            &StubResolver,
        )
        .expect("should create");

    assert_eq!(value, json!([{"x": 1, "y": 1}, {"x": 2, "y": 2}]));
}

#[test]
fn heterogeneous_array_is_rejected() {
    let mut registry = point_registry();
    registry.register("Rect", Arc::new(|input, _ctx| Ok(input.clone())));

    let err = registry
        .create(
            &json!([{"_type": "Point", "x": 1}, {"_type": "Rect"}]),
            &StubResolver,
        )
        .unwrap_err();

    assert!(matches!(err, Error::MixedArray { .. }));
    assert!(err.to_string().contains("must be uniform across array elements"));
}

#[test]
fn unknown_tag_is_rejected() {
    let registry = point_registry();
    let err = registry
        .create(&json!({"_type": "Widget"}), &StubResolver)
        .unwrap_err();

    assert!(matches!(err, Error::UnknownType { .. }));
    assert!(err.to_string().contains("Widget"));
}

#[test]
fn empty_array_and_untagged_input_are_rejected() {
    let registry = point_registry();
    assert!(registry.create(&json!([]), &StubResolver).is_err());
    assert!(registry.create(&json!({"x": 1}), &StubResolver).is_err());
    assert!(registry.create(&json!(42), &StubResolver).is_err());
}

fn echo_providers() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(
        "data",
        Arc::new(|uri, _ctx| Ok(json!({"path": uri.path(), "fmt": uri.parameter("format")}))),
    );
    registry
}

#[test]
fn provide_parses_and_dispatches() {
    let registry = echo_providers();
    let value = registry
        .provide(&json!("data:/reports/daily?format=csv"), &StubResolver)
        .expect("should provide");

    assert_eq!(value, json!({"path": "reports/daily", "fmt": "csv"}));
}

#[test]
fn scheme_matching_is_case_insensitive() {
    let mut registry = ProviderRegistry::new();
    registry.register("DATA", Arc::new(|uri, _ctx| Ok(json!(uri.path()))));

    assert!(registry.supports("data"));
    assert!(registry.supports("Data"));

    let value = registry
        .provide(&json!("Data:/x"), &StubResolver)
        .expect("should provide");
    assert_eq!(value, json!("x"));
}

#[test]
fn uniform_scheme_array_resolves_in_order() {
    let registry = echo_providers();
    let value = registry
        .provide(&json!(["data:/a", "data:/b"]), &StubResolver)
        .expect("should provide");

    assert_eq!(
        value,
        json!([{"path": "a", "fmt": null}, {"path": "b", "fmt": null}])
    );
}

#[test]
fn mixed_scheme_array_is_rejected() {
    let mut registry = echo_providers();
    registry.register("cache", Arc::new(|uri, _ctx| Ok(json!(uri.path()))));

    let err = registry
        .provide(&json!(["data:/a", "cache:/b"]), &StubResolver)
        .unwrap_err();
    assert!(matches!(err, Error::MixedArray { .. }));
}

#[test]
fn unknown_scheme_and_malformed_uri_are_rejected() {
    let registry = echo_providers();

    let err = registry.provide(&json!("cache:/x"), &StubResolver).unwrap_err();
    assert!(matches!(err, Error::UnknownScheme { .. }));

    let err = registry.provide(&json!("data:/x?bad"), &StubResolver).unwrap_err();
    assert!(matches!(err, Error::UriParse { .. }));
}
