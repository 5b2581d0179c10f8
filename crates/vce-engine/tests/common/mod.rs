//! Shared fixtures for engine tests

use std::path::Path;
use std::sync::Arc;

use serde_json::{Value, json};

use vce_domain::descriptor::{NamedObjectDescriptor, ProviderDescriptor, TypeDescriptor};
use vce_domain::error::{Error, Result};
use vce_domain::object::NamedObject;
use vce_domain::ports::resolver::ObjectResolver;
use vce_engine::capability::CapabilityTable;
use vce_engine::context::ScopedContext;
use vce_engine::definition::ContextDefinitionBuilder;

/// Capability table with the geometry constructors and store loaders
/// the scenario tests are written against.
pub fn symbols() -> Arc<CapabilityTable> {
    let table = CapabilityTable::new();

    table.register_constructor("geometry", "point", |input, _ctx| {
        Ok(json!({"x": input["x"], "y": input["y"]}))
    });
    table.register_constructor("geometry", "point_shifted", |input, _ctx| {
        Ok(json!({
            "x": input["x"].as_i64().unwrap_or(0) + 1,
            "y": input["y"].as_i64().unwrap_or(0) + 1,
        }))
    });
    table.register_constructor("geometry", "segment", |input, ctx| {
        let start = ctx.create(&input["start"])?;
        let end = ctx.create(&input["end"])?;
        Ok(json!({"start": start, "end": end}))
    });

    table.register_loader("stores", "echo", |uri, _ctx| {
        Ok(json!({"scheme": uri.scheme(), "path": uri.path()}))
    });
    table.register_loader("stores", "upper", |uri, _ctx| {
        Ok(json!({"scheme": uri.scheme(), "path": uri.path().to_uppercase()}))
    });

    Arc::new(table)
}

/// One level's descriptor lists
#[derive(Default)]
pub struct Level {
    pub types: Vec<TypeDescriptor>,
    pub providers: Vec<ProviderDescriptor>,
    pub named: Vec<NamedObjectDescriptor>,
}

impl Level {
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    pub fn with_provider(mut self, descriptor: ProviderDescriptor) -> Self {
        self.providers.push(descriptor);
        self
    }

    pub fn with_named(mut self, descriptor: NamedObjectDescriptor) -> Self {
        self.named.push(descriptor);
        self
    }
}

/// Build one context level under an optional parent.
pub fn build_context(
    scope: &str,
    parent: Option<&Arc<ScopedContext>>,
    level: Level,
    compute_dependencies: bool,
    symbols: &CapabilityTable,
) -> Arc<ScopedContext> {
    try_build_context(scope, parent, level, compute_dependencies, symbols)
        .expect("context should build")
}

pub fn try_build_context(
    scope: &str,
    parent: Option<&Arc<ScopedContext>>,
    level: Level,
    compute_dependencies: bool,
    symbols: &CapabilityTable,
) -> Result<Arc<ScopedContext>> {
    let mut builder = ContextDefinitionBuilder::new()
        .types(level.types)
        .providers(level.providers)
        .named_objects(level.named)
        .compute_dependencies(compute_dependencies);
    if let Some(parent) = parent {
        builder = builder.with_parent(parent.definition().clone());
    }
    let definition = builder.build()?;
    ScopedContext::new(scope, "/srv/app", parent.cloned(), definition, symbols)
}

/// Resolver stub for driving registries directly in unit-style tests.
pub struct StubResolver;

impl ObjectResolver for StubResolver {
    fn scope_name(&self) -> &str {
        "stub"
    }

    fn base_dir(&self) -> &Path {
        Path::new("/srv/app")
    }

    fn create(&self, input: &Value) -> Result<Value> {
        Err(Error::resolution(format!("stub cannot create: {input}")))
    }

    fn provide(&self, input: &Value) -> Result<Value> {
        Err(Error::resolution(format!("stub cannot provide: {input}")))
    }

    fn get(&self, _name: &str) -> Result<Option<Arc<NamedObject>>> {
        Ok(None)
    }
}
