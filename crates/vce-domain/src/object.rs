//! Realized named objects

use std::sync::Arc;

use serde_json::Value;

use crate::descriptor::NamedObjectDescriptor;

/// A named object realized by some scope
///
/// Carries the resolved value, the descriptor it came from, and the
/// name of the scope that materialized it. An object inherited from an
/// ancestor keeps the ancestor's scope; one re-materialized because a
/// dependency was overridden carries the overriding scope.
#[derive(Debug, Clone)]
pub struct NamedObject {
    /// The descriptor the value was resolved from
    pub descriptor: Arc<NamedObjectDescriptor>,

    /// The resolved value
    pub value: Value,

    /// Name of the scope that produced the value
    pub scope: String,
}

impl NamedObject {
    /// Create a realized named object
    pub fn new(descriptor: Arc<NamedObjectDescriptor>, value: Value, scope: impl Into<String>) -> Self {
        Self {
            descriptor,
            value,
            scope: scope.into(),
        }
    }

    /// The object's lookup name
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// True when the object is hidden from discovery surfaces
    pub fn is_private(&self) -> bool {
        self.descriptor.private
    }
}
