//! Object resolution surface
//!
//! The trait a scoped context presents to constructor and loader
//! functions, so composite values can resolve their sub-fields through
//! the same override chain the outer value was resolved through.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::object::NamedObject;
use crate::uri::ObjectUri;

/// Constructor function registered for one type tag
///
/// Receives the full tagged input and the requesting resolution
/// context; may call back into the context to resolve nested fields.
pub type ConstructorFn = Arc<dyn Fn(&Value, &dyn ObjectResolver) -> Result<Value> + Send + Sync>;

/// Loader function registered for one URI scheme
pub type LoaderFn = Arc<dyn Fn(&ObjectUri, &dyn ObjectResolver) -> Result<Value> + Send + Sync>;

/// The resolution surface of one scope level
///
/// Implemented by the engine's scoped context; declared here so that
/// constructors, loaders and the hosting layer depend on the seam, not
/// the engine.
pub trait ObjectResolver: Send + Sync {
    /// Name of the scope resolution starts from
    fn scope_name(&self) -> &str;

    /// Directory relative module references at this level resolve against
    fn base_dir(&self) -> &Path;

    /// Construct a value from a tagged object, a URI string, or a
    /// homogeneous array of either
    fn create(&self, input: &Value) -> Result<Value>;

    /// Provision a value from a URI string (or uniform-scheme array)
    fn provide(&self, input: &Value) -> Result<Value>;

    /// Look up a named object; `Ok(None)` when undeclared anywhere
    fn get(&self, name: &str) -> Result<Option<Arc<NamedObject>>>;
}
