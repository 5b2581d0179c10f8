//! Unit tests for error construction and messages

use vce_domain::error::Error;

#[test]
fn duplicate_definition_names_key_and_origin() {
    let err = Error::duplicate_definition("type", "Point", Some("app/types.json".to_string()));
    let message = err.to_string();

    assert!(message.contains("type"));
    assert!(message.contains("Point"));
    assert!(message.contains("app/types.json"));

    let without_origin = Error::duplicate_definition("named object", "origin", None);
    assert!(!without_origin.to_string().contains("declared in"));
}

#[test]
fn unknown_type_mentions_scope() {
    let err = Error::unknown_type("Widget", Some("request".to_string()));
    let message = err.to_string();

    assert!(message.contains("Widget"));
    assert!(message.contains("request"));
}

#[test]
fn mixed_array_names_both_tags() {
    let err = Error::mixed_array("type", "Point", "Rect");
    let message = err.to_string();

    assert!(message.contains("must be uniform across array elements"));
    assert!(message.contains("Point"));
    assert!(message.contains("Rect"));
}

#[test]
fn dependency_cycle_shows_chain() {
    let err = Error::dependency_cycle(vec![
        "a".to_string(),
        "b".to_string(),
        "a".to_string(),
    ]);
    assert_eq!(
        err.to_string(),
        "Cyclic named-object dependency: a -> b -> a"
    );
}

#[test]
fn configuration_errors_are_flagged() {
    assert!(Error::configuration("bad").is_configuration());
    assert!(Error::symbol_load("geometry", "point", "missing").is_configuration());
    assert!(!Error::resolution("bad").is_configuration());
    assert!(!Error::object_not_found("x", None).is_configuration());
}
