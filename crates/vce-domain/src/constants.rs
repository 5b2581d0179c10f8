//! Shared domain constants

/// Reserved discriminant field selecting a type constructor in a
/// tagged-union value.
pub const TYPE_FIELD: &str = "_type";

/// Reserved indirection field referencing another named object by name.
pub const REF_FIELD: &str = "_ref";

/// Scope name of the process-wide root context.
pub const SCOPE_GLOBAL: &str = "global";

/// Scope name of the application-level context.
pub const SCOPE_APPLICATION: &str = "application";

/// Scope name of the request-template context.
pub const SCOPE_TEMPLATE: &str = "template";

/// Scope name of the per-request context.
pub const SCOPE_REQUEST: &str = "request";
