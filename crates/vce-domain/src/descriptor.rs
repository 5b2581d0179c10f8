//! Declarative descriptor shapes
//!
//! The three descriptor kinds a context level is declared from, plus the
//! dependency set attached to named-object descriptors by the analyzer.
//! All three deserialize from the camelCase JSON wire format used by
//! descriptor files; the `origin` field is stamped by the loader after
//! parsing and never travels on the wire.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies a constructor function for one type tag
///
/// `module_ref` + `constructor_ref` name a pre-registered capability;
/// a relative `module_ref` is resolved against the owning context's
/// base directory before lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Discriminant value matched against an input's `_type` field
    pub type_tag: String,

    /// Module reference the constructor is reachable through
    pub module_ref: String,

    /// Symbol name of the constructor inside the module
    pub constructor_ref: String,

    /// Permits shadowing a same-tag descriptor declared earlier at the
    /// same level (multiple files merged into one level)
    #[serde(default)]
    pub overrides: bool,

    /// Source file the descriptor was declared in, when known
    #[serde(skip)]
    pub origin: Option<String>,
}

impl TypeDescriptor {
    /// Create a new type descriptor
    pub fn new(
        type_tag: impl Into<String>,
        module_ref: impl Into<String>,
        constructor_ref: impl Into<String>,
    ) -> Self {
        Self {
            type_tag: type_tag.into(),
            module_ref: module_ref.into(),
            constructor_ref: constructor_ref.into(),
            overrides: false,
            origin: None,
        }
    }

    /// Mark the descriptor as an override
    pub fn with_overrides(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// Record the originating file
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Identifies a loader function for one URI scheme
///
/// Same shape as [`TypeDescriptor`], keyed by scheme instead of tag.
/// Schemes are matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    /// URI scheme this provider serves
    pub scheme: String,

    /// Module reference the loader is reachable through
    pub module_ref: String,

    /// Symbol name of the loader inside the module
    pub loader_ref: String,

    /// Permits shadowing a same-scheme descriptor declared earlier at
    /// the same level
    #[serde(default)]
    pub overrides: bool,

    /// Source file the descriptor was declared in, when known
    #[serde(skip)]
    pub origin: Option<String>,
}

impl ProviderDescriptor {
    /// Create a new provider descriptor
    pub fn new(
        scheme: impl Into<String>,
        module_ref: impl Into<String>,
        loader_ref: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            module_ref: module_ref.into(),
            loader_ref: loader_ref.into(),
            overrides: false,
            origin: None,
        }
    }

    /// Mark the descriptor as an override
    pub fn with_overrides(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// Record the originating file
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Declares a named object and its value expression
///
/// `value` is a primitive, a tagged-union object, a URI string, a
/// `{"_ref": name}` indirection, or a homogeneous array of those. The
/// dependency set is computed once by the analyzer and memoized here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedObjectDescriptor {
    /// Lookup name of the object
    pub name: String,

    /// The value expression resolved when the object is materialized
    pub value: Value,

    /// Hidden from iteration/discovery surfaces when set
    #[serde(default)]
    pub private: bool,

    /// Permits shadowing a same-name descriptor declared earlier at the
    /// same level
    #[serde(default)]
    pub overrides: bool,

    /// Source file the descriptor was declared in, when known
    #[serde(skip)]
    pub origin: Option<String>,

    /// Dependency set computed lazily by the analyzer
    #[serde(skip)]
    dependencies: OnceLock<DependencySet>,
}

impl NamedObjectDescriptor {
    /// Create a new named-object descriptor
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            private: false,
            overrides: false,
            origin: None,
            dependencies: OnceLock::new(),
        }
    }

    /// Mark the descriptor as an override
    pub fn with_overrides(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// Mark the object as private
    pub fn with_private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Record the originating file
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// The memoized dependency set, if the analyzer has run
    pub fn dependencies(&self) -> Option<&DependencySet> {
        self.dependencies.get()
    }

    /// Memoize the computed dependency set
    ///
    /// The first computation wins; later calls return the stored set.
    pub fn memoize_dependencies(&self, deps: DependencySet) -> &DependencySet {
        self.dependencies.get_or_init(|| deps)
    }
}

/// The type tags, URI schemes and object names a value expression
/// transitively touches
///
/// Also used to describe the keys a context level introduces, so that
/// "does this inherited object depend on anything overridden here" is a
/// single intersection test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
    /// Type tags referenced through tagged-union values
    pub type_tags: BTreeSet<String>,

    /// URI schemes referenced through URI values (lowercase)
    pub schemes: BTreeSet<String>,

    /// Named objects referenced through `_ref` indirections
    pub object_names: BTreeSet<String>,
}

impl DependencySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing is referenced
    pub fn is_empty(&self) -> bool {
        self.type_tags.is_empty() && self.schemes.is_empty() && self.object_names.is_empty()
    }

    /// Record a type-tag dependency
    pub fn add_type_tag(&mut self, tag: impl Into<String>) {
        self.type_tags.insert(tag.into());
    }

    /// Record a scheme dependency (stored lowercase)
    pub fn add_scheme(&mut self, scheme: impl AsRef<str>) {
        self.schemes.insert(scheme.as_ref().to_ascii_lowercase());
    }

    /// Record a named-object dependency
    pub fn add_object_name(&mut self, name: impl Into<String>) {
        self.object_names.insert(name.into());
    }

    /// Union another set into this one
    pub fn extend(&mut self, other: &DependencySet) {
        self.type_tags.extend(other.type_tags.iter().cloned());
        self.schemes.extend(other.schemes.iter().cloned());
        self.object_names.extend(other.object_names.iter().cloned());
    }

    /// True when any member of either set appears in the other
    pub fn intersects(&self, other: &DependencySet) -> bool {
        self.type_tags.intersection(&other.type_tags).next().is_some()
            || self.schemes.intersection(&other.schemes).next().is_some()
            || self
                .object_names
                .intersection(&other.object_names)
                .next()
                .is_some()
    }
}
