//! Descriptor file loader
//!
//! Reads descriptor lists from JSON files, runs them through the
//! pluggable schema validator, and stamps each descriptor with its
//! originating file so duplicate-definition errors can name it.
//! Multiple files merged into one level arrive concatenated in file
//! order; the definition builder enforces the override rules.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use vce_domain::descriptor::{NamedObjectDescriptor, ProviderDescriptor, TypeDescriptor};
use vce_domain::error::{Error, Result};
use vce_domain::ports::schema::SchemaValidator;

use crate::error_ext::ErrorContext;
use crate::validate::NullSchemaValidator;

/// Schema reference descriptor files are validated against
pub const DESCRIPTOR_SCHEMA_REF: &str = "vce/descriptor-set";

/// The parsed contents of one or more descriptor files
///
/// Wire format: a JSON object with three optional arrays, e.g.
///
/// ```json
/// {
///   "types": [{"typeTag": "Point", "moduleRef": "geometry", "constructorRef": "point"}],
///   "providers": [{"scheme": "data", "moduleRef": "stores", "loaderRef": "data"}],
///   "namedObjects": [{"name": "origin", "value": {"_type": "Point", "x": 0, "y": 0}}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescriptorSet {
    /// Type descriptors in declaration order
    pub types: Vec<TypeDescriptor>,

    /// Provider descriptors in declaration order
    pub providers: Vec<ProviderDescriptor>,

    /// Named-object descriptors in declaration order
    pub named_objects: Vec<NamedObjectDescriptor>,
}

impl DescriptorSet {
    /// True when no descriptors are declared
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.providers.is_empty() && self.named_objects.is_empty()
    }

    /// Concatenate another set after this one, preserving order
    pub fn merge(&mut self, other: DescriptorSet) {
        self.types.extend(other.types);
        self.providers.extend(other.providers);
        self.named_objects.extend(other.named_objects);
    }

    /// Stamp every descriptor with an originating file
    pub fn with_origin(mut self, origin: &str) -> Self {
        for descriptor in &mut self.types {
            descriptor.origin = Some(origin.to_string());
        }
        for descriptor in &mut self.providers {
            descriptor.origin = Some(origin.to_string());
        }
        for descriptor in &mut self.named_objects {
            descriptor.origin = Some(origin.to_string());
        }
        self
    }
}

/// Loader service for descriptor files
pub struct ContextLoader {
    validator: Arc<dyn SchemaValidator>,
}

impl ContextLoader {
    /// Create a loader with the null validator
    pub fn new() -> Self {
        Self {
            validator: Arc::new(NullSchemaValidator::new()),
        }
    }

    /// Use a host-supplied schema validator
    pub fn with_validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Load one descriptor file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<DescriptorSet> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .io_context(format!("Failed to read descriptor file {}", path.display()))?;

        let raw: serde_json::Value = serde_json::from_str(&content)?;
        let report = self.validator.validate(&raw, DESCRIPTOR_SCHEMA_REF);
        if !report.valid {
            return Err(Error::configuration(format!(
                "Descriptor file {} failed schema validation: {}",
                path.display(),
                report.errors.join("; ")
            )));
        }

        let set: DescriptorSet = serde_json::from_value(raw)?;
        info!(
            file = %path.display(),
            types = set.types.len(),
            providers = set.providers.len(),
            objects = set.named_objects.len(),
            "loaded descriptor file"
        );
        Ok(set.with_origin(&path.display().to_string()))
    }

    /// Load and concatenate a level's descriptor files in order
    pub fn load_level<P: AsRef<Path>>(&self, paths: &[P]) -> Result<DescriptorSet> {
        let mut merged = DescriptorSet::default();
        for path in paths {
            merged.merge(self.load_file(path)?);
        }
        Ok(merged)
    }
}

impl Default for ContextLoader {
    fn default() -> Self {
        Self::new()
    }
}
