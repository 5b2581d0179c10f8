//! Named object registry
//!
//! Write-once, read-many cache of the named objects a context level has
//! materialized. Application and template levels are shared read-only
//! across in-flight requests; a request-level registry belongs to
//! exactly one logical request.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use vce_domain::object::NamedObject;

/// Realized named objects cached at one context level
#[derive(Debug, Default)]
pub struct NamedObjectRegistry {
    objects: RwLock<HashMap<String, Arc<NamedObject>>>,
}

impl NamedObjectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A cached object, if this level has materialized it
    pub fn get(&self, name: &str) -> Option<Arc<NamedObject>> {
        self.objects
            .read()
            .expect("named object registry lock poisoned")
            .get(name)
            .cloned()
    }

    /// Cache a materialized object
    ///
    /// First materialization wins: when two callers race, both receive
    /// the value stored first, keeping the cache write-once.
    pub fn insert(&self, object: NamedObject) -> Arc<NamedObject> {
        let mut objects = self
            .objects
            .write()
            .expect("named object registry lock poisoned");
        objects
            .entry(object.name().to_string())
            .or_insert_with(|| Arc::new(object))
            .clone()
    }

    /// Names of everything cached so far
    pub fn names(&self) -> Vec<String> {
        self.objects
            .read()
            .expect("named object registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Number of cached objects
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .expect("named object registry lock poisoned")
            .len()
    }

    /// True when nothing has been materialized yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
