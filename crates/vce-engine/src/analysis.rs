//! Dependency analyzer
//!
//! Statically inspects a named-object descriptor's value expression to
//! discover which type tags, URI schemes and named objects it
//! transitively touches. A descriptor depending on object X inherits
//! X's own (flattened) dependencies; a `_ref` chain closing on itself
//! is rejected here, at level-build time, never at request time.

use std::sync::Arc;

use serde_json::Value;

use vce_domain::constants::TYPE_FIELD;
use vce_domain::descriptor::{DependencySet, NamedObjectDescriptor};
use vce_domain::error::{Error, Result};
use vce_domain::uri::ObjectUri;
use vce_domain::value;

/// Lookup surface the analyzer walks `_ref` indirections through
///
/// Implemented by the definition builder over its local-plus-parent
/// view, so analysis sees descriptors freshly declared at the level
/// being built.
pub trait DescriptorView {
    /// The effective descriptor for a name, local level first
    fn named_descriptor(&self, name: &str) -> Option<Arc<NamedObjectDescriptor>>;
}

/// Compute (and memoize) the dependency set of one descriptor
pub fn analyze(
    descriptor: &NamedObjectDescriptor,
    view: &dyn DescriptorView,
) -> Result<DependencySet> {
    if let Some(deps) = descriptor.dependencies() {
        return Ok(deps.clone());
    }

    let mut visiting = vec![descriptor.name.clone()];
    let mut deps = DependencySet::new();
    walk_value(&descriptor.value, view, &mut visiting, &mut deps)?;
    Ok(descriptor.memoize_dependencies(deps).clone())
}

fn walk_value(
    value: &Value,
    view: &dyn DescriptorView,
    visiting: &mut Vec<String>,
    deps: &mut DependencySet,
) -> Result<()> {
    match value {
        Value::String(s) if value::is_uri_candidate(s) => {
            let uri = ObjectUri::parse(s)?;
            deps.add_scheme(uri.scheme());
        }
        Value::Object(fields) => {
            if let Some(name) = value::ref_name(value) {
                return walk_ref(name, view, visiting, deps);
            }
            if let Some(tag) = value::type_tag(value) {
                deps.add_type_tag(tag);
            }
            for (key, field) in fields {
                if key != TYPE_FIELD {
                    walk_value(field, view, visiting, deps)?;
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_value(item, view, visiting, deps)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn walk_ref(
    name: &str,
    view: &dyn DescriptorView,
    visiting: &mut Vec<String>,
    deps: &mut DependencySet,
) -> Result<()> {
    if visiting.iter().any(|n| n == name) {
        let mut chain = visiting.clone();
        chain.push(name.to_string());
        return Err(Error::dependency_cycle(chain));
    }

    deps.add_object_name(name);

    let referenced = view
        .named_descriptor(name)
        .ok_or_else(|| Error::object_not_found(name, None))?;

    if let Some(memoized) = referenced.dependencies() {
        deps.extend(memoized);
        return Ok(());
    }

    // Referenced object declared at the same level and not yet
    // analyzed: recurse with it on the visiting stack.
    visiting.push(name.to_string());
    let mut nested = DependencySet::new();
    walk_value(&referenced.value, view, visiting, &mut nested)?;
    visiting.pop();

    deps.extend(referenced.memoize_dependencies(nested));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct MapView(HashMap<String, Arc<NamedObjectDescriptor>>);

    impl DescriptorView for MapView {
        fn named_descriptor(&self, name: &str) -> Option<Arc<NamedObjectDescriptor>> {
            self.0.get(name).cloned()
        }
    }

    #[test]
    fn nested_tags_and_schemes_collected() {
        let desc = NamedObjectDescriptor::new(
            "widget",
            json!({
                "_type": "Widget",
                "icon": "asset:/icons/gear?size=16",
                "frame": {"_type": "Rect", "w": 10, "h": 20}
            }),
        );
        let deps = analyze(&desc, &MapView(HashMap::new())).unwrap();

        assert!(deps.type_tags.contains("Widget"));
        assert!(deps.type_tags.contains("Rect"));
        assert!(deps.schemes.contains("asset"));
        assert!(deps.object_names.is_empty());
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let desc = NamedObjectDescriptor::new("loop", json!({"_ref": "loop"}));
        let err = analyze(&desc, &MapView(HashMap::new())).unwrap_err();
        assert!(matches!(err, Error::DependencyCycle { .. }));
    }
}
