//! Engine assembly
//!
//! An [`Engine`] owns the capability table and the global context and
//! stamps out the level chain: application and template contexts once
//! at load time, one request context per incoming request. Engines are
//! explicitly constructed and passed by reference; the process-global
//! handle below is a thin optional wrapper owning exactly one instance
//! with explicit init/teardown.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock, RwLock};

use tracing::info;

use vce_domain::constants::{SCOPE_APPLICATION, SCOPE_GLOBAL, SCOPE_REQUEST, SCOPE_TEMPLATE};
use vce_domain::error::{Error, Result};
use vce_engine::capability::CapabilityTable;
use vce_engine::context::ScopedContext;
use vce_engine::definition::{ContextDefinition, ContextDefinitionBuilder};

use crate::loader::DescriptorSet;

/// One fully assembled engine instance
///
/// Multiple independent engines (one per isolated worker) may run in
/// parallel; each carries its own capability table and context chain
/// and shares no mutable state with its replicas.
pub struct Engine {
    symbols: Arc<CapabilityTable>,
    global: Arc<ScopedContext>,
}

impl Engine {
    /// Start assembling an engine
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// The engine's capability table
    pub fn symbols(&self) -> &Arc<CapabilityTable> {
        &self.symbols
    }

    /// The global (root) context
    pub fn global_context(&self) -> &Arc<ScopedContext> {
        &self.global
    }

    /// Build the application-level context under the global one
    pub fn application_context(
        &self,
        base_dir: impl Into<PathBuf>,
        descriptors: DescriptorSet,
    ) -> Result<Arc<ScopedContext>> {
        self.child_context(SCOPE_APPLICATION, base_dir, self.global.clone(), descriptors, true)
    }

    /// Build a request-template context under an application context
    pub fn template_context(
        &self,
        base_dir: impl Into<PathBuf>,
        parent: Arc<ScopedContext>,
        descriptors: DescriptorSet,
    ) -> Result<Arc<ScopedContext>> {
        self.child_context(SCOPE_TEMPLATE, base_dir, parent, descriptors, true)
    }

    /// Build a short-lived request context
    ///
    /// Dependency analysis is skipped: request-level objects are never
    /// a base for further override analysis.
    pub fn request_context(
        &self,
        parent: Arc<ScopedContext>,
        descriptors: DescriptorSet,
    ) -> Result<Arc<ScopedContext>> {
        let base_dir = parent.base_dir().to_path_buf();
        self.child_context(SCOPE_REQUEST, base_dir, parent, descriptors, false)
    }

    /// Build a context level with an explicit scope name
    pub fn child_context(
        &self,
        scope_name: &str,
        base_dir: impl Into<PathBuf>,
        parent: Arc<ScopedContext>,
        descriptors: DescriptorSet,
        compute_dependencies: bool,
    ) -> Result<Arc<ScopedContext>> {
        let definition = ContextDefinitionBuilder::new()
            .with_parent(parent.definition().clone())
            .types(descriptors.types)
            .providers(descriptors.providers)
            .named_objects(descriptors.named_objects)
            .compute_dependencies(compute_dependencies)
            .build()?;
        ScopedContext::new(
            scope_name,
            base_dir,
            Some(parent),
            definition,
            self.symbols.as_ref(),
        )
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("symbols", &self.symbols)
            .field("global", &self.global.scope_name())
            .finish()
    }
}

/// Staged engine construction
pub struct EngineBuilder {
    symbols: Arc<CapabilityTable>,
    base_dir: PathBuf,
    global_descriptors: DescriptorSet,
}

impl EngineBuilder {
    /// Create a builder with a freshly seeded capability table
    pub fn new() -> Self {
        Self {
            symbols: Arc::new(CapabilityTable::new()),
            base_dir: PathBuf::from("."),
            global_descriptors: DescriptorSet::default(),
        }
    }

    /// Use a pre-populated capability table
    pub fn with_symbols(mut self, symbols: Arc<CapabilityTable>) -> Self {
        self.symbols = symbols;
        self
    }

    /// Set the global context's base directory
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Declare the global level's descriptors
    pub fn with_global_descriptors(mut self, descriptors: DescriptorSet) -> Self {
        self.global_descriptors = descriptors;
        self
    }

    /// Build the engine and its global context
    pub fn build(self) -> Result<Engine> {
        let definition = ContextDefinitionBuilder::new()
            .types(self.global_descriptors.types)
            .providers(self.global_descriptors.providers)
            .named_objects(self.global_descriptors.named_objects)
            .compute_dependencies(true)
            .build()?;

        let global = ScopedContext::new(
            SCOPE_GLOBAL,
            self.base_dir,
            None,
            definition,
            self.symbols.as_ref(),
        )?;

        info!("Engine assembled");
        Ok(Engine {
            symbols: self.symbols,
            global,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot behind the process-global convenience accessors
fn engine_slot() -> &'static RwLock<Option<Arc<Engine>>> {
    static SLOT: OnceLock<RwLock<Option<Arc<Engine>>>> = OnceLock::new();
    SLOT.get_or_init(|| RwLock::new(None))
}

/// Install a process-global engine instance
///
/// Fails when one is already installed; call [`shutdown`] first to
/// replace it.
pub fn init(engine: Engine) -> Result<Arc<Engine>> {
    let mut slot = engine_slot().write().expect("engine slot lock poisoned");
    if slot.is_some() {
        return Err(Error::configuration(
            "A process-global engine is already installed",
        ));
    }
    let engine = Arc::new(engine);
    *slot = Some(engine.clone());
    Ok(engine)
}

/// The process-global engine, if one is installed
pub fn global() -> Option<Arc<Engine>> {
    engine_slot()
        .read()
        .expect("engine slot lock poisoned")
        .clone()
}

/// Tear down the process-global engine
///
/// Existing `Arc` holders keep their instance alive; new callers of
/// [`global`] see `None`.
pub fn shutdown() {
    engine_slot()
        .write()
        .expect("engine slot lock poisoned")
        .take();
}
