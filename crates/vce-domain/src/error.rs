//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Variant Context Engine
///
/// Three families share this enum: configuration errors (raised while a
/// context level is built), resolution errors (raised by a single
/// `create`/`get`/`provide` call), and dependency-cycle errors (raised
/// during dependency analysis of a level's named objects).
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Two same-keyed descriptors at one level without an override marker
    #[error("Duplicate {kind} definition '{key}'{}", .origin.as_deref().map(|o| format!(" (declared in {o})")).unwrap_or_default())]
    DuplicateDefinition {
        /// Descriptor kind ("type", "provider" or "named object")
        kind: &'static str,
        /// The duplicated key (type tag, scheme or object name)
        key: String,
        /// Originating file, when known
        origin: Option<String>,
    },

    /// A descriptor's module/symbol reference could not be resolved
    #[error("Cannot load symbol '{symbol}' from module '{module}': {message}")]
    SymbolLoad {
        /// Module reference as declared (after base-dir resolution)
        module: String,
        /// Symbol reference as declared
        symbol: String,
        /// Description of the failure
        message: String,
    },

    /// Input carried a type tag no context in the chain supports
    #[error("Unsupported type tag '{tag}'{}", .scope.as_deref().map(|s| format!(" (resolving from scope '{s}')")).unwrap_or_default())]
    UnknownType {
        /// The unsupported tag
        tag: String,
        /// Scope the resolution started from, when known
        scope: Option<String>,
    },

    /// URI carried a scheme no context in the chain supports
    #[error("Unsupported URI scheme '{scheme}'{}", .scope.as_deref().map(|s| format!(" (resolving from scope '{s}')")).unwrap_or_default())]
    UnknownScheme {
        /// The unsupported scheme
        scheme: String,
        /// Scope the resolution started from, when known
        scope: Option<String>,
    },

    /// Array input mixed more than one type tag or URI scheme
    #[error("{kind} must be uniform across array elements (expected '{expected}', found '{found}')")]
    MixedArray {
        /// What had to be uniform ("type" or "scheme")
        kind: &'static str,
        /// Key carried by the first array element
        expected: String,
        /// Conflicting key found later in the array
        found: String,
    },

    /// A string failed to parse as `<scheme>:/<path>[?k=v[&k=v]*]`
    #[error("Malformed object URI '{uri}': {message}")]
    UriParse {
        /// The offending string
        uri: String,
        /// Description of the parse failure
        message: String,
    },

    /// A named object was referenced but is not declared anywhere
    #[error("Named object '{name}' not found{}", .scope.as_deref().map(|s| format!(" (resolving from scope '{s}')")).unwrap_or_default())]
    ObjectNotFound {
        /// The missing object name
        name: String,
        /// Scope the lookup started from, when known
        scope: Option<String>,
    },

    /// A named object transitively depends on itself
    #[error("Cyclic named-object dependency: {}", .chain.join(" -> "))]
    DependencyCycle {
        /// The reference chain closing the cycle
        chain: Vec<String>,
    },

    /// Generic resolution failure
    #[error("Resolution error: {message}")]
    Resolution {
        /// Description of the resolution failure
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a duplicate-definition error
    pub fn duplicate_definition<S: Into<String>>(
        kind: &'static str,
        key: S,
        origin: Option<String>,
    ) -> Self {
        Self::DuplicateDefinition {
            kind,
            key: key.into(),
            origin,
        }
    }

    /// Create a symbol-load error
    pub fn symbol_load<M, Y, S>(module: M, symbol: Y, message: S) -> Self
    where
        M: Into<String>,
        Y: Into<String>,
        S: Into<String>,
    {
        Self::SymbolLoad {
            module: module.into(),
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-type error
    pub fn unknown_type<S: Into<String>>(tag: S, scope: Option<String>) -> Self {
        Self::UnknownType {
            tag: tag.into(),
            scope,
        }
    }

    /// Create an unknown-scheme error
    pub fn unknown_scheme<S: Into<String>>(scheme: S, scope: Option<String>) -> Self {
        Self::UnknownScheme {
            scheme: scheme.into(),
            scope,
        }
    }

    /// Create a mixed-array error
    pub fn mixed_array<E: Into<String>, F: Into<String>>(
        kind: &'static str,
        expected: E,
        found: F,
    ) -> Self {
        Self::MixedArray {
            kind,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a URI parse error
    pub fn uri_parse<U: Into<String>, S: Into<String>>(uri: U, message: S) -> Self {
        Self::UriParse {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create an object-not-found error
    pub fn object_not_found<S: Into<String>>(name: S, scope: Option<String>) -> Self {
        Self::ObjectNotFound {
            name: name.into(),
            scope,
        }
    }

    /// Create a dependency-cycle error
    pub fn dependency_cycle(chain: Vec<String>) -> Self {
        Self::DependencyCycle { chain }
    }

    /// Create a generic resolution error
    pub fn resolution<S: Into<String>>(message: S) -> Self {
        Self::Resolution {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True for errors fatal at level-build time rather than per call
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::DuplicateDefinition { .. } | Self::SymbolLoad { .. }
        )
    }
}
