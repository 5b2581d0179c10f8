//! Unit tests for descriptor wire-format parsing and dependency sets

use serde_json::json;

use vce_domain::descriptor::{
    DependencySet, NamedObjectDescriptor, ProviderDescriptor, TypeDescriptor,
};

#[test]
fn type_descriptor_parses_camel_case() {
    let descriptor: TypeDescriptor = serde_json::from_value(json!({
        "typeTag": "Point",
        "moduleRef": "geometry",
        "constructorRef": "point"
    }))
    .expect("deserialization should succeed");

    assert_eq!(descriptor.type_tag, "Point");
    assert_eq!(descriptor.module_ref, "geometry");
    assert_eq!(descriptor.constructor_ref, "point");
    assert!(!descriptor.overrides);
    assert!(descriptor.origin.is_none());
}

#[test]
fn provider_descriptor_parses_overrides_flag() {
    let descriptor: ProviderDescriptor = serde_json::from_value(json!({
        "scheme": "data",
        "moduleRef": "stores",
        "loaderRef": "data",
        "overrides": true
    }))
    .expect("deserialization should succeed");

    assert_eq!(descriptor.scheme, "data");
    assert!(descriptor.overrides);
}

#[test]
fn named_object_descriptor_defaults() {
    let descriptor: NamedObjectDescriptor = serde_json::from_value(json!({
        "name": "origin",
        "value": {"_type": "Point", "x": 0, "y": 0}
    }))
    .expect("deserialization should succeed");

    assert_eq!(descriptor.name, "origin");
    assert!(!descriptor.private);
    assert!(!descriptor.overrides);
    assert!(descriptor.dependencies().is_none());
}

#[test]
fn missing_required_field_fails() {
    let result: Result<TypeDescriptor, _> = serde_json::from_value(json!({
        "typeTag": "Point",
        "moduleRef": "geometry"
    }));
    assert!(result.is_err());
}

#[test]
fn dependency_set_extend_unions_all_kinds() {
    let mut a = DependencySet::new();
    a.add_type_tag("Point");

    let mut b = DependencySet::new();
    b.add_scheme("Data");
    b.add_object_name("origin");

    a.extend(&b);
    assert!(a.type_tags.contains("Point"));
    assert!(a.schemes.contains("data"));
    assert!(a.object_names.contains("origin"));
    assert!(!a.is_empty());
}

#[test]
fn builder_style_constructors() {
    let descriptor = TypeDescriptor::new("Point", "geometry", "point")
        .with_overrides()
        .with_origin("app/types.json");

    assert!(descriptor.overrides);
    assert_eq!(descriptor.origin.as_deref(), Some("app/types.json"));

    let named = NamedObjectDescriptor::new("hidden", json!(1))
        .with_private()
        .with_origin("app/objects.json");
    assert!(named.private);
}
