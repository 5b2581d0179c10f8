//! Context definitions
//!
//! An immutable, linked node describing one level's declared overrides
//! and additions, not yet merged with ancestors. Built once at
//! application/template load time, or once per incoming request (with
//! dependency computation disabled, since request-level objects are
//! never a base for further override analysis).

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use vce_domain::descriptor::{NamedObjectDescriptor, ProviderDescriptor, TypeDescriptor};
use vce_domain::error::{Error, Result};

use crate::analysis::{DescriptorView, analyze};

/// One level's declared descriptor sets
///
/// Immutable after construction; ancestors are shared, never mutated.
#[derive(Debug)]
pub struct ContextDefinition {
    parent: Option<Arc<ContextDefinition>>,
    types: BTreeMap<String, Arc<TypeDescriptor>>,
    providers: BTreeMap<String, Arc<ProviderDescriptor>>,
    named_objects: BTreeMap<String, Arc<NamedObjectDescriptor>>,
    compute_dependencies: bool,
}

impl ContextDefinition {
    /// Start building a definition level
    pub fn builder() -> ContextDefinitionBuilder {
        ContextDefinitionBuilder::new()
    }

    /// The parent definition, if this is not the root level
    pub fn parent(&self) -> Option<&Arc<ContextDefinition>> {
        self.parent.as_ref()
    }

    /// Whether dependency analysis ran for this level
    pub fn compute_dependencies(&self) -> bool {
        self.compute_dependencies
    }

    /// A type descriptor declared at this level
    pub fn type_descriptor(&self, tag: &str) -> Option<&Arc<TypeDescriptor>> {
        self.types.get(tag)
    }

    /// A provider descriptor declared at this level (scheme lowercase)
    pub fn provider_descriptor(&self, scheme: &str) -> Option<&Arc<ProviderDescriptor>> {
        self.providers.get(&scheme.to_ascii_lowercase())
    }

    /// A named-object descriptor declared at this level
    pub fn named_descriptor(&self, name: &str) -> Option<&Arc<NamedObjectDescriptor>> {
        self.named_objects.get(name)
    }

    /// The effective descriptor for a name along the whole chain
    pub fn find_named(&self, name: &str) -> Option<Arc<NamedObjectDescriptor>> {
        if let Some(descriptor) = self.named_objects.get(name) {
            return Some(descriptor.clone());
        }
        self.parent.as_ref()?.find_named(name)
    }

    /// Type descriptors declared at this level
    pub fn types(&self) -> impl Iterator<Item = &Arc<TypeDescriptor>> {
        self.types.values()
    }

    /// Provider descriptors declared at this level
    pub fn providers(&self) -> impl Iterator<Item = &Arc<ProviderDescriptor>> {
        self.providers.values()
    }

    /// Named-object descriptors declared at this level
    pub fn named_objects(&self) -> impl Iterator<Item = &Arc<NamedObjectDescriptor>> {
        self.named_objects.values()
    }
}

/// Builds the union-with-override of one level's descriptor lists
///
/// Descriptor lists are scanned in order (multiple merged files at one
/// level arrive concatenated): the first occurrence of a key is
/// inserted, a later occurrence replaces it only when it announces
/// `overrides = true`, otherwise building fails with a
/// duplicate-definition error naming the key and origin.
#[derive(Debug, Default)]
pub struct ContextDefinitionBuilder {
    parent: Option<Arc<ContextDefinition>>,
    types: Vec<TypeDescriptor>,
    providers: Vec<ProviderDescriptor>,
    named_objects: Vec<NamedObjectDescriptor>,
    compute_dependencies: bool,
}

impl ContextDefinitionBuilder {
    /// Create a builder for a root-level definition
    pub fn new() -> Self {
        Self {
            compute_dependencies: true,
            ..Self::default()
        }
    }

    /// Chain this level under a parent definition
    pub fn with_parent(mut self, parent: Arc<ContextDefinition>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Append type descriptors (in declaration order)
    pub fn types(mut self, descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.types.extend(descriptors);
        self
    }

    /// Append provider descriptors (in declaration order)
    pub fn providers(mut self, descriptors: impl IntoIterator<Item = ProviderDescriptor>) -> Self {
        self.providers.extend(descriptors);
        self
    }

    /// Append named-object descriptors (in declaration order)
    pub fn named_objects(
        mut self,
        descriptors: impl IntoIterator<Item = NamedObjectDescriptor>,
    ) -> Self {
        self.named_objects.extend(descriptors);
        self
    }

    /// Enable or disable dependency analysis for this level
    ///
    /// Disabled for request-level definitions: they are never a base
    /// for further overriding, so analysis would be wasted work.
    pub fn compute_dependencies(mut self, compute: bool) -> Self {
        self.compute_dependencies = compute;
        self
    }

    /// Validate, merge and (when enabled) analyze the level
    pub fn build(self) -> Result<Arc<ContextDefinition>> {
        let mut types = BTreeMap::new();
        for descriptor in self.types {
            merge_descriptor(
                &mut types,
                descriptor.type_tag.clone(),
                descriptor,
                "type",
                |d| d.overrides,
                |d| d.origin.clone(),
            )?;
        }

        let mut providers = BTreeMap::new();
        for descriptor in self.providers {
            merge_descriptor(
                &mut providers,
                descriptor.scheme.to_ascii_lowercase(),
                descriptor,
                "provider",
                |d| d.overrides,
                |d| d.origin.clone(),
            )?;
        }

        let mut named_objects = BTreeMap::new();
        for descriptor in self.named_objects {
            merge_descriptor(
                &mut named_objects,
                descriptor.name.clone(),
                descriptor,
                "named object",
                |d| d.overrides,
                |d| d.origin.clone(),
            )?;
        }

        let definition = ContextDefinition {
            parent: self.parent,
            types,
            providers,
            named_objects,
            compute_dependencies: self.compute_dependencies,
        };

        if definition.compute_dependencies {
            let view = DefinitionAnalysisView(&definition);
            for descriptor in definition.named_objects.values() {
                let deps = analyze(descriptor, &view)?;
                debug!(
                    name = %descriptor.name,
                    types = deps.type_tags.len(),
                    schemes = deps.schemes.len(),
                    objects = deps.object_names.len(),
                    "analyzed named object dependencies"
                );
            }
        }

        Ok(Arc::new(definition))
    }
}

fn merge_descriptor<D>(
    merged: &mut BTreeMap<String, Arc<D>>,
    key: String,
    descriptor: D,
    kind: &'static str,
    overrides: impl Fn(&D) -> bool,
    origin: impl Fn(&D) -> Option<String>,
) -> Result<()> {
    if merged.contains_key(&key) && !overrides(&descriptor) {
        return Err(Error::duplicate_definition(kind, key, origin(&descriptor)));
    }
    merged.insert(key, Arc::new(descriptor));
    Ok(())
}

/// Analysis view over the level being built plus its ancestors
///
/// Local descriptors win, so analysis sees a reference's effective
/// target even when the target is freshly overridden at this level.
struct DefinitionAnalysisView<'a>(&'a ContextDefinition);

impl DescriptorView for DefinitionAnalysisView<'_> {
    fn named_descriptor(&self, name: &str) -> Option<Arc<NamedObjectDescriptor>> {
        self.0.find_named(name)
    }
}
