//! Scoped context - the core resolution engine
//!
//! Chains a parent context and one level's definition into a single
//! resolution surface. Per lookup it decides whether to serve a cached
//! ancestor value or re-materialize it locally because something it
//! depends on was overridden between the owning ancestor and here.
//!
//! Registries at ancestor levels are shared read-only by all descendant
//! contexts; only this level's own registries are populated, and only
//! during its one-time construction. The named-object cache is
//! write-once, read-many within the context's lifetime, so application
//! and template contexts are safe to read from many in-flight requests
//! without extra synchronization.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use vce_domain::descriptor::DependencySet;
use vce_domain::error::{Error, Result};
use vce_domain::object::NamedObject;
use vce_domain::ports::resolver::ObjectResolver;
use vce_domain::ports::symbols::SymbolSource;
use vce_domain::uri::ObjectUri;
use vce_domain::value;

use crate::capability::canonical_module_ref;
use crate::definition::ContextDefinition;
use crate::registry::{NamedObjectRegistry, ProviderRegistry, TypeRegistry};

/// One live, queryable scope level
///
/// Each level (global, application, template, request) owns exactly one
/// of these; the parent reference is shared and non-owning. Global,
/// application and template contexts persist for the process or the
/// template's registered lifetime; request contexts are created and
/// discarded per request.
pub struct ScopedContext {
    scope_name: String,
    base_dir: PathBuf,
    parent: Option<Arc<ScopedContext>>,
    definition: Arc<ContextDefinition>,
    types: TypeRegistry,
    providers: ProviderRegistry,
    objects: NamedObjectRegistry,
    /// Keys introduced at this level, shaped for intersection against
    /// an inherited object's dependency set.
    local_keys: DependencySet,
}

impl ScopedContext {
    /// Build a context for one level
    ///
    /// Resolves every local descriptor's module/symbol reference
    /// through `symbols` immediately, so a dangling reference fails the
    /// level's construction instead of a later request.
    pub fn new(
        scope_name: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        parent: Option<Arc<ScopedContext>>,
        definition: Arc<ContextDefinition>,
        symbols: &dyn SymbolSource,
    ) -> Result<Arc<Self>> {
        let scope_name = scope_name.into();
        let base_dir = base_dir.into();

        let mut types = TypeRegistry::new();
        let mut local_keys = DependencySet::new();

        for descriptor in definition.types() {
            let module = canonical_module_ref(&base_dir, &descriptor.module_ref);
            let constructor = symbols.constructor(&module, &descriptor.constructor_ref)?;
            local_keys.add_type_tag(&descriptor.type_tag);
            types.register(&descriptor.type_tag, constructor);
        }

        let mut providers = ProviderRegistry::new();
        for descriptor in definition.providers() {
            let module = canonical_module_ref(&base_dir, &descriptor.module_ref);
            let loader = symbols.loader(&module, &descriptor.loader_ref)?;
            local_keys.add_scheme(&descriptor.scheme);
            providers.register(&descriptor.scheme, loader);
        }

        for descriptor in definition.named_objects() {
            local_keys.add_object_name(&descriptor.name);
        }

        info!(
            scope = %scope_name,
            types = types.len(),
            providers = providers.len(),
            objects = definition.named_objects().count(),
            "scoped context built"
        );

        Ok(Arc::new(Self {
            scope_name,
            base_dir,
            parent,
            definition,
            types,
            providers,
            objects: NamedObjectRegistry::new(),
            local_keys,
        }))
    }

    /// The level's scope name
    pub fn scope_name(&self) -> &str {
        &self.scope_name
    }

    /// Directory relative module references at this level resolve against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The parent context, if this is not the root level
    pub fn parent(&self) -> Option<&Arc<ScopedContext>> {
        self.parent.as_ref()
    }

    /// The definition this level was built from
    pub fn definition(&self) -> &Arc<ContextDefinition> {
        &self.definition
    }

    /// Construct a value from a tagged object, a URI string, or a
    /// homogeneous array of either
    ///
    /// The nearest level declaring the input's tag or scheme supplies
    /// the constructor/loader; nested fields are resolved through this
    /// (requesting) context, so they pick up every override visible
    /// from here.
    pub fn create(&self, input: &Value) -> Result<Value> {
        match input {
            Value::String(_) => self.provide(input),
            Value::Array(items) if items.first().is_some_and(Value::is_string) => {
                self.provide(input)
            }
            Value::Object(_) | Value::Array(_) => self.create_typed(input),
            other => Err(Error::resolution(format!(
                "cannot create from input: {other}"
            ))),
        }
    }

    /// Provision a value from a URI string or uniform-scheme array
    pub fn provide(&self, input: &Value) -> Result<Value> {
        let scheme = lead_scheme(input)?;
        let owner = self.owner_for_scheme(&scheme).ok_or_else(|| {
            Error::unknown_scheme(&scheme, Some(self.scope_name.clone()))
        })?;
        owner.providers.provide(input, self)
    }

    /// Look up a named object
    ///
    /// A name declared at this level is materialized here (picking up
    /// every local override). An inherited object is served from the
    /// ancestor's cache unless its dependency set intersects a key
    /// introduced at this level or any level strictly between this one
    /// and the owning ancestor; then it is logically inherited but
    /// materially re-evaluated here, tagged with this scope. A `_ref`
    /// chain closing on itself during materialization fails with a
    /// dependency-cycle error instead of recursing.
    pub fn get(&self, name: &str) -> Result<Option<Arc<NamedObject>>> {
        let mut visiting = Vec::new();
        self.resolve(name, &mut visiting)
    }

    /// [`get`](Self::get) with the in-flight names threaded through
    ///
    /// The visiting stack is shared across levels: a rebuild at this
    /// level re-enters `resolve` for every `_ref`, and a name already
    /// on the stack means the chain closed. The cycle cannot be ruled
    /// out statically because a level built without dependency
    /// analysis (request) or an override rewiring a reference can
    /// introduce one at resolution time.
    fn resolve(&self, name: &str, visiting: &mut Vec<String>) -> Result<Option<Arc<NamedObject>>> {
        if let Some(cached) = self.objects.get(name) {
            return Ok(Some(cached));
        }

        if visiting.iter().any(|n| n == name) {
            let mut chain = visiting.clone();
            chain.push(name.to_string());
            return Err(Error::dependency_cycle(chain));
        }

        if let Some(descriptor) = self.definition.named_descriptor(name) {
            visiting.push(name.to_string());
            let value = self.materialize(&descriptor.value, visiting);
            visiting.pop();
            let object = NamedObject::new(descriptor.clone(), value?, self.scope_name.clone());
            return Ok(Some(self.objects.insert(object)));
        }

        let Some(parent) = &self.parent else {
            return Ok(None);
        };
        let Some(inherited) = parent.resolve(name, visiting)? else {
            return Ok(None);
        };

        if self.must_rebuild(&inherited) {
            debug!(
                name,
                owner = %inherited.scope,
                scope = %self.scope_name,
                "re-materializing inherited object (dependency overridden)"
            );
            visiting.push(name.to_string());
            let value = self.materialize(&inherited.descriptor.value, visiting);
            visiting.pop();
            let object =
                NamedObject::new(inherited.descriptor.clone(), value?, self.scope_name.clone());
            return Ok(Some(self.objects.insert(object)));
        }

        Ok(Some(inherited))
    }

    /// Visit every visible named object exactly once
    ///
    /// The union of names across the ancestor chain is traversed with
    /// closest-scope-wins shadowing; objects marked private are skipped
    /// (discovery surface only - `get` still returns them).
    pub fn for_each(&self, mut callback: impl FnMut(&Arc<NamedObject>)) -> Result<()> {
        let mut seen = BTreeSet::new();
        let mut level = Some(self);
        while let Some(context) = level {
            for descriptor in context.definition.named_objects() {
                if !seen.insert(descriptor.name.clone()) {
                    continue;
                }
                if descriptor.private {
                    continue;
                }
                if let Some(object) = self.get(&descriptor.name)? {
                    callback(&object);
                }
            }
            level = context.parent.as_deref();
        }
        Ok(())
    }

    /// Names visible from this context (private objects excluded)
    pub fn object_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut names = Vec::new();
        let mut level = Some(self);
        while let Some(context) = level {
            for descriptor in context.definition.named_objects() {
                if seen.insert(descriptor.name.clone()) && !descriptor.private {
                    names.push(descriptor.name.clone());
                }
            }
            level = context.parent.as_deref();
        }
        names
    }

    /// Resolve every visible named object (discovery endpoints)
    pub fn list_objects(&self) -> Result<Vec<Arc<NamedObject>>> {
        let mut objects = Vec::new();
        self.for_each(|object| objects.push(object.clone()))?;
        Ok(objects)
    }

    /// True when the tag is declared at this level
    pub fn supports_type(&self, tag: &str) -> bool {
        self.types.supports(tag)
    }

    /// True when the scheme is declared at this level
    pub fn supports_scheme(&self, scheme: &str) -> bool {
        self.providers.supports(scheme)
    }

    fn create_typed(&self, input: &Value) -> Result<Value> {
        let tag = lead_tag(input)?;
        let owner = self
            .owner_for_type(&tag)
            .ok_or_else(|| Error::unknown_type(&tag, Some(self.scope_name.clone())))?;
        owner.types.create(input, self)
    }

    fn owner_for_type(&self, tag: &str) -> Option<&ScopedContext> {
        let mut level = Some(self);
        while let Some(context) = level {
            if context.types.supports(tag) {
                return Some(context);
            }
            level = context.parent.as_deref();
        }
        None
    }

    fn owner_for_scheme(&self, scheme: &str) -> Option<&ScopedContext> {
        let mut level = Some(self);
        while let Some(context) = level {
            if context.providers.supports(scheme) {
                return Some(context);
            }
            level = context.parent.as_deref();
        }
        None
    }

    /// Decide whether an inherited object must be re-materialized here
    ///
    /// Walks from this level up to (but excluding) the owning scope,
    /// intersecting the object's dependency set with each level's
    /// introduced keys. A missing dependency set (owner built without
    /// analysis) rebuilds unconditionally - correctness over caching.
    fn must_rebuild(&self, inherited: &NamedObject) -> bool {
        let Some(deps) = inherited.descriptor.dependencies() else {
            return true;
        };
        let mut level = Some(self);
        while let Some(context) = level {
            if context.scope_name == inherited.scope {
                return false;
            }
            if deps.intersects(&context.local_keys) {
                return true;
            }
            level = context.parent.as_deref();
        }
        false
    }

    /// Resolve one named-object value expression through this context
    fn materialize(&self, expression: &Value, visiting: &mut Vec<String>) -> Result<Value> {
        match expression {
            Value::Object(_) if value::ref_name(expression).is_some() => {
                let name = value::ref_name(expression).unwrap_or_default();
                let object = self
                    .resolve(name, visiting)?
                    .ok_or_else(|| Error::object_not_found(name, Some(self.scope_name.clone())))?;
                Ok(object.value.clone())
            }
            Value::Object(_) if value::type_tag(expression).is_some() => self.create(expression),
            Value::String(s) if value::is_uri_candidate(s) => self.provide(expression),
            Value::Array(items) => match items.first() {
                Some(first) if value::ref_name(first).is_some() => items
                    .iter()
                    .map(|item| self.materialize(item, visiting))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array),
                Some(first)
                    if value::type_tag(first).is_some()
                        || first.as_str().is_some_and(value::is_uri_candidate) =>
                {
                    self.create(expression)
                }
                _ => Ok(expression.clone()),
            },
            other => Ok(other.clone()),
        }
    }
}

impl ObjectResolver for ScopedContext {
    fn scope_name(&self) -> &str {
        self.scope_name()
    }

    fn base_dir(&self) -> &Path {
        self.base_dir()
    }

    fn create(&self, input: &Value) -> Result<Value> {
        ScopedContext::create(self, input)
    }

    fn provide(&self, input: &Value) -> Result<Value> {
        ScopedContext::provide(self, input)
    }

    fn get(&self, name: &str) -> Result<Option<Arc<NamedObject>>> {
        ScopedContext::get(self, name)
    }
}

impl std::fmt::Debug for ScopedContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedContext")
            .field("scope", &self.scope_name)
            .field("base_dir", &self.base_dir)
            .field("types", &self.types)
            .field("providers", &self.providers)
            .field("parent", &self.parent.as_ref().map(|p| p.scope_name()))
            .finish()
    }
}

/// The lead type tag of a tagged input (object or array head)
fn lead_tag(input: &Value) -> Result<String> {
    let candidate = match input {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| Error::resolution("cannot create from an empty array"))?,
        other => other,
    };
    value::type_tag(candidate)
        .map(ToString::to_string)
        .ok_or_else(|| {
            Error::resolution(format!(
                "tagged object missing '{}' discriminant: {candidate}",
                vce_domain::TYPE_FIELD
            ))
        })
}

/// The lead scheme of a URI input (string or array head), lowercase
fn lead_scheme(input: &Value) -> Result<String> {
    let candidate = match input {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| Error::resolution("cannot provide from an empty array"))?,
        other => other,
    };
    let s = candidate
        .as_str()
        .ok_or_else(|| Error::resolution(format!("URI input is not a string: {candidate}")))?;
    Ok(ObjectUri::parse(s)?.scheme_lowercase())
}
