//! Port traits consumed or exposed by the resolution engine
//!
//! Ports follow the dependency-inversion rule: the domain declares the
//! trait, outer layers supply implementations.

pub mod resolver;
pub mod schema;
pub mod symbols;

pub use resolver::{ConstructorFn, LoaderFn, ObjectResolver};
pub use schema::{SchemaValidator, ValidationReport};
pub use symbols::SymbolSource;
