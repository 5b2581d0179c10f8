//! Provider registry
//!
//! Maps a URI scheme to a loader function and resolves URI strings (or
//! uniform-scheme arrays of them) to provisioned values. Schemes are
//! matched case-insensitively.

use std::collections::HashMap;

use serde_json::Value;

use vce_domain::error::{Error, Result};
use vce_domain::ports::resolver::{LoaderFn, ObjectResolver};
use vce_domain::uri::ObjectUri;

/// Loader functions declared at one context level, keyed by lowercase scheme
#[derive(Default)]
pub struct ProviderRegistry {
    loaders: HashMap<String, LoaderFn>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader for a scheme, replacing any previous one
    pub fn register(&mut self, scheme: impl AsRef<str>, loader: LoaderFn) {
        self.loaders
            .insert(scheme.as_ref().to_ascii_lowercase(), loader);
    }

    /// True when the scheme is declared at this level (case-insensitive)
    pub fn supports(&self, scheme: &str) -> bool {
        self.loaders.contains_key(&scheme.to_ascii_lowercase())
    }

    /// Schemes declared at this level (lowercase)
    pub fn schemes(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    /// Number of registered loaders
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Provision a value from a URI string or a uniform-scheme array
    pub fn provide(&self, input: &Value, ctx: &dyn ObjectResolver) -> Result<Value> {
        match input {
            Value::String(s) => {
                let uri = ObjectUri::parse(s)?;
                let loader = self.loader(&uri.scheme_lowercase(), ctx)?;
                loader(&uri, ctx)
            }
            Value::Array(items) => {
                if items.is_empty() {
                    return Err(Error::resolution("cannot provide from an empty array"));
                }
                let uris = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .ok_or_else(|| {
                                Error::resolution(format!("URI array element is not a string: {item}"))
                            })
                            .and_then(ObjectUri::parse)
                    })
                    .collect::<Result<Vec<_>>>()?;

                let expected = uris[0].scheme_lowercase();
                let loader = self.loader(&expected, ctx)?;

                let mut resolved = Vec::with_capacity(uris.len());
                for uri in &uris {
                    let scheme = uri.scheme_lowercase();
                    if scheme != expected {
                        return Err(Error::mixed_array("scheme", expected.clone(), scheme));
                    }
                    resolved.push(loader(uri, ctx)?);
                }
                Ok(Value::Array(resolved))
            }
            other => Err(Error::resolution(format!(
                "cannot provide from non-URI input: {other}"
            ))),
        }
    }

    fn loader(&self, scheme_lowercase: &str, ctx: &dyn ObjectResolver) -> Result<&LoaderFn> {
        self.loaders.get(scheme_lowercase).ok_or_else(|| {
            Error::unknown_scheme(scheme_lowercase, Some(ctx.scope_name().to_string()))
        })
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut schemes: Vec<&str> = self.schemes().collect();
        schemes.sort_unstable();
        f.debug_struct("ProviderRegistry")
            .field("schemes", &schemes)
            .finish()
    }
}
