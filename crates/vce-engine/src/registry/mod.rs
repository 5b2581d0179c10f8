//! Scoped registries
//!
//! One registry triple per context level: type tags to constructors,
//! URI schemes to loaders, and the write-once cache of realized named
//! objects. Each registry holds only the level's own declarations;
//! chaining to ancestors is the scoped context's job.

pub mod named;
pub mod providers;
pub mod types;

pub use named::NamedObjectRegistry;
pub use providers::ProviderRegistry;
pub use types::TypeRegistry;
