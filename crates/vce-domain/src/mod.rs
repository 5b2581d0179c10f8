//! Domain layer for the Variant Context Engine
//!
//! Plain data definitions and port traits shared by every other layer:
//! the three descriptor shapes, dependency sets, the object URI value
//! object, realized named objects, the error taxonomy, and the traits
//! the resolution engine expects from its collaborators.
//!
//! This crate is a pure library: `serde`, `serde_json` and `thiserror`
//! only, no runtime machinery.

pub mod constants;
pub mod descriptor;
pub mod error;
pub mod object;
pub mod ports;
pub mod uri;
pub mod value;

pub use constants::{REF_FIELD, TYPE_FIELD};
pub use descriptor::{
    DependencySet, NamedObjectDescriptor, ProviderDescriptor, TypeDescriptor,
};
pub use error::{Error, Result};
pub use object::NamedObject;
pub use uri::ObjectUri;
