//! Type registry
//!
//! Maps a type tag to a constructor function and resolves tagged-union
//! input (`{"_type": tag, ...}` or a homogeneous array thereof).

use std::collections::HashMap;

use serde_json::Value;

use vce_domain::error::{Error, Result};
use vce_domain::ports::resolver::{ConstructorFn, ObjectResolver};
use vce_domain::value;

/// Constructor functions declared at one context level
#[derive(Default)]
pub struct TypeRegistry {
    constructors: HashMap<String, ConstructorFn>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for a tag, replacing any previous one
    pub fn register(&mut self, tag: impl Into<String>, constructor: ConstructorFn) {
        self.constructors.insert(tag.into(), constructor);
    }

    /// True when the tag is declared at this level
    pub fn supports(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Tags declared at this level
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Number of registered constructors
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Construct a value from a tagged object or a homogeneous array
    ///
    /// The constructor receives the full input and the requesting
    /// resolution context, so nested fields can be resolved recursively
    /// through the same override chain.
    pub fn create(&self, input: &Value, ctx: &dyn ObjectResolver) -> Result<Value> {
        match input {
            Value::Object(_) => {
                let tag = tag_of(input)?;
                let constructor = self.constructor(tag, ctx)?;
                constructor(input, ctx)
            }
            Value::Array(items) => {
                if items.is_empty() {
                    return Err(Error::resolution("cannot create from an empty array"));
                }
                let expected = tag_of(&items[0])?.to_string();
                let constructor = self.constructor(&expected, ctx)?;

                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    let tag = tag_of(item)?;
                    if tag != expected {
                        return Err(Error::mixed_array("type", expected.clone(), tag));
                    }
                    resolved.push(constructor(item, ctx)?);
                }
                Ok(Value::Array(resolved))
            }
            other => Err(Error::resolution(format!(
                "cannot create from non-tagged input: {other}"
            ))),
        }
    }

    fn constructor(&self, tag: &str, ctx: &dyn ObjectResolver) -> Result<&ConstructorFn> {
        self.constructors
            .get(tag)
            .ok_or_else(|| Error::unknown_type(tag, Some(ctx.scope_name().to_string())))
    }
}

/// The discriminant of a single tagged value
fn tag_of(input: &Value) -> Result<&str> {
    value::type_tag(input).ok_or_else(|| {
        Error::resolution(format!(
            "tagged object missing '{}' discriminant: {input}",
            vce_domain::TYPE_FIELD
        ))
    })
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();
        f.debug_struct("TypeRegistry").field("tags", &tags).finish()
    }
}
