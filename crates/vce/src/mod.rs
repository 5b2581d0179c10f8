//! Variant Context Engine
//!
//! Lets a service run multiple behavioral variants side by side by
//! layering overridable object-construction contexts: global,
//! application, request-template and request levels each declare typed
//! constructors, URI providers and named objects, with child levels
//! shadowing ancestors and inherited objects re-resolved only when
//! something they depend on was overridden.
//!
//! This crate is the hosting facade: it assembles an [`Engine`], loads
//! descriptor files, and wires configuration and logging. The
//! resolution machinery itself lives in `vce-engine`; the shared data
//! model in `vce-domain`.

pub mod builtins;
pub mod config;
pub mod engine;
pub mod error_ext;
pub mod loader;
pub mod logging;
pub mod validate;

pub use config::{ConfigLoader, EngineConfig, LoggingConfig};
pub use engine::{Engine, EngineBuilder};
pub use loader::{ContextLoader, DescriptorSet};
pub use validate::NullSchemaValidator;

// Re-export the core surface so hosts depend on one crate.
pub use vce_domain::{
    DependencySet, Error, NamedObject, NamedObjectDescriptor, ObjectUri, ProviderDescriptor,
    Result, TypeDescriptor,
};
pub use vce_engine::{CapabilityTable, ContextDefinition, ContextDefinitionBuilder, ScopedContext};
