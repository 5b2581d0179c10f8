//! Symbol loading port
//!
//! Turns a descriptor's module/symbol reference into a callable. The
//! engine ships a capability-table implementation backed by
//! pre-compiled, registered functions; hosts may substitute their own
//! (e.g. an audited sandbox) behind this trait.

use crate::error::Result;
use crate::ports::resolver::{ConstructorFn, LoaderFn};

/// Source of pre-compiled constructor and loader functions
///
/// `module_ref` arrives already resolved against the declaring
/// context's base directory. Lookup failure is a build-time
/// configuration error, never a request-time one.
pub trait SymbolSource: Send + Sync {
    /// Resolve a constructor function
    fn constructor(&self, module_ref: &str, symbol_ref: &str) -> Result<ConstructorFn>;

    /// Resolve a loader function
    fn loader(&self, module_ref: &str, symbol_ref: &str) -> Result<LoaderFn>;
}
