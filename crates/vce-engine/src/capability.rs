//! Capability table - named, pre-compiled constructor and loader functions
//!
//! Replaces dynamic symbol loading with an explicit registration
//! surface: functions register themselves at compile time via `linkme`
//! distributed slices, and hosts may add closures at startup before any
//! context is built. Descriptors then reference capabilities by
//! `(module_ref, symbol_ref)`.
//!
//! ## Registering a capability
//!
//! ```ignore
//! use vce_engine::capability::{CONSTRUCTOR_CAPABILITIES, ConstructorCapability};
//!
//! #[linkme::distributed_slice(CONSTRUCTOR_CAPABILITIES)]
//! static POINT: ConstructorCapability = ConstructorCapability {
//!     module: "geometry",
//!     symbol: "make_point",
//!     description: "Plain point constructor",
//!     construct: |input, _ctx| Ok(input.clone()),
//! };
//! ```

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::Value;

use vce_domain::error::{Error, Result};
use vce_domain::ports::resolver::{ConstructorFn, LoaderFn, ObjectResolver};
use vce_domain::ports::symbols::SymbolSource;
use vce_domain::uri::ObjectUri;

/// Compile-time registry entry for a constructor function
pub struct ConstructorCapability {
    /// Module reference the capability is published under
    pub module: &'static str,
    /// Symbol name inside the module
    pub symbol: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The constructor itself
    pub construct: fn(&Value, &dyn ObjectResolver) -> Result<Value>,
}

/// Compile-time registry entry for a loader function
pub struct LoaderCapability {
    /// Module reference the capability is published under
    pub module: &'static str,
    /// Symbol name inside the module
    pub symbol: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The loader itself
    pub load: fn(&ObjectUri, &dyn ObjectResolver) -> Result<Value>,
}

// Auto-collection via linkme distributed slices - capabilities submit
// entries at compile time
#[linkme::distributed_slice]
pub static CONSTRUCTOR_CAPABILITIES: [ConstructorCapability] = [..];

#[linkme::distributed_slice]
pub static LOADER_CAPABILITIES: [LoaderCapability] = [..];

/// Runtime view over all registered capabilities
///
/// Seeds itself from the distributed slices and accepts additional
/// closures registered by the host before contexts are built. The
/// table is the engine's [`SymbolSource`] implementation.
pub struct CapabilityTable {
    constructors: RwLock<HashMap<(String, String), ConstructorFn>>,
    loaders: RwLock<HashMap<(String, String), LoaderFn>>,
}

impl CapabilityTable {
    /// Create a table seeded with all compile-time registrations
    pub fn new() -> Self {
        let mut constructors: HashMap<(String, String), ConstructorFn> = HashMap::new();
        for entry in CONSTRUCTOR_CAPABILITIES {
            let f = entry.construct;
            constructors.insert(
                (entry.module.to_string(), entry.symbol.to_string()),
                Arc::new(move |input, ctx| f(input, ctx)),
            );
        }

        let mut loaders: HashMap<(String, String), LoaderFn> = HashMap::new();
        for entry in LOADER_CAPABILITIES {
            let f = entry.load;
            loaders.insert(
                (entry.module.to_string(), entry.symbol.to_string()),
                Arc::new(move |uri, ctx| f(uri, ctx)),
            );
        }

        Self {
            constructors: RwLock::new(constructors),
            loaders: RwLock::new(loaders),
        }
    }

    /// Register a constructor closure at runtime
    pub fn register_constructor<F>(&self, module: impl Into<String>, symbol: impl Into<String>, f: F)
    where
        F: Fn(&Value, &dyn ObjectResolver) -> Result<Value> + Send + Sync + 'static,
    {
        self.constructors
            .write()
            .expect("capability table lock poisoned")
            .insert((module.into(), symbol.into()), Arc::new(f));
    }

    /// Register a loader closure at runtime
    pub fn register_loader<F>(&self, module: impl Into<String>, symbol: impl Into<String>, f: F)
    where
        F: Fn(&ObjectUri, &dyn ObjectResolver) -> Result<Value> + Send + Sync + 'static,
    {
        self.loaders
            .write()
            .expect("capability table lock poisoned")
            .insert((module.into(), symbol.into()), Arc::new(f));
    }

    /// List registered constructor capabilities as (module, symbol)
    pub fn constructors(&self) -> Vec<(String, String)> {
        let mut names: Vec<(String, String)> = self
            .constructors
            .read()
            .expect("capability table lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// List registered loader capabilities as (module, symbol)
    pub fn loaders(&self) -> Vec<(String, String)> {
        let mut names: Vec<(String, String)> = self
            .loaders
            .read()
            .expect("capability table lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolSource for CapabilityTable {
    fn constructor(&self, module_ref: &str, symbol_ref: &str) -> Result<ConstructorFn> {
        self.constructors
            .read()
            .expect("capability table lock poisoned")
            .get(&(module_ref.to_string(), symbol_ref.to_string()))
            .cloned()
            .ok_or_else(|| {
                Error::symbol_load(module_ref, symbol_ref, "no such constructor capability")
            })
    }

    fn loader(&self, module_ref: &str, symbol_ref: &str) -> Result<LoaderFn> {
        self.loaders
            .read()
            .expect("capability table lock poisoned")
            .get(&(module_ref.to_string(), symbol_ref.to_string()))
            .cloned()
            .ok_or_else(|| Error::symbol_load(module_ref, symbol_ref, "no such loader capability"))
    }
}

impl std::fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityTable")
            .field("constructors", &self.constructors().len())
            .field("loaders", &self.loaders().len())
            .finish()
    }
}

/// Resolve a module reference against a base directory
///
/// Relative references (`./x`, `../x`) are joined to `base_dir` and
/// normalized lexically; absolute or bare references pass through
/// unchanged.
pub fn canonical_module_ref(base_dir: &Path, module_ref: &str) -> String {
    if !(module_ref.starts_with("./") || module_ref.starts_with("../")) {
        return module_ref.to_string();
    }

    let joined = base_dir.join(module_ref);
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_registration_and_lookup() {
        let table = CapabilityTable::new();
        table.register_constructor("geometry", "make_point", |input, _ctx| Ok(input.clone()));

        assert!(table.constructor("geometry", "make_point").is_ok());
        let err = table.constructor("geometry", "missing").err().unwrap();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn module_ref_normalization() {
        let base = Path::new("/app/templates/checkout");
        assert_eq!(
            canonical_module_ref(base, "./ctors"),
            "/app/templates/checkout/ctors"
        );
        assert_eq!(
            canonical_module_ref(base, "../shared/ctors"),
            "/app/templates/shared/ctors"
        );
        assert_eq!(canonical_module_ref(base, "geometry"), "geometry");
    }
}
