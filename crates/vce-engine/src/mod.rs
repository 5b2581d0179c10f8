//! Resolution engine for the Variant Context Engine
//!
//! The override-aware object-resolution core: a chain of scoped
//! contexts (global, application, template, request) that jointly
//! resolve typed construction, URI provisioning and named-object
//! lookup, with dependency-gated re-resolution when a child scope
//! shadows something an inherited object was built from.

pub mod analysis;
pub mod capability;
pub mod context;
pub mod definition;
pub mod registry;

pub use analysis::{DescriptorView, analyze};
pub use capability::{
    CONSTRUCTOR_CAPABILITIES, CapabilityTable, ConstructorCapability, LOADER_CAPABILITIES,
    LoaderCapability, canonical_module_ref,
};
pub use context::ScopedContext;
pub use definition::{ContextDefinition, ContextDefinitionBuilder};
pub use registry::{NamedObjectRegistry, ProviderRegistry, TypeRegistry};
