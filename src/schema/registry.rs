//! Process-wide compiled-schema registry
//!
//! A registry owns a schema cache and the list of types marked for
//! compilation. The global instance is installed once through [`init`];
//! standalone instances can be created freely.

use std::any::TypeId;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::{debug, info};

use super::cache::SchemaKey;
use super::compiler::SchemaCompiler;
use super::types::TypeSchema;
use crate::config::{ConfigError, ConfigResult, EngineConfig};
use crate::reflect::{Reflect, TypeInfo};

static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();

/// Installs the global registry.
///
/// Fails if the configuration is invalid or a registry is already installed.
pub fn init(config: EngineConfig) -> ConfigResult<&'static SchemaRegistry> {
    config.validate()?;

    let mut installed = false;
    let registry = GLOBAL.get_or_init(|| {
        installed = true;
        SchemaRegistry::with_config(config)
    });

    if !installed {
        return Err(ConfigError::AlreadyInitialized);
    }
    info!(
        max_depth = registry.config().default_max_depth,
        "schema registry initialized"
    );
    Ok(registry)
}

/// Returns the global registry, if installed
pub fn global() -> Option<&'static SchemaRegistry> {
    GLOBAL.get()
}

/// Compiled-schema registry
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    config: EngineConfig,
    compiler: SchemaCompiler,
    marked: RwLock<Vec<TypeInfo>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            compiler: SchemaCompiler::new(),
            marked: RwLock::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn compiler(&self) -> &SchemaCompiler {
        &self.compiler
    }

    /// Marks `T` for compilation by [`compile_marked`](Self::compile_marked)
    pub fn mark<T: Reflect>(&self) {
        self.mark_info(T::type_info());
    }

    /// Marks a described type; marking the same type twice has no effect
    pub fn mark_info(&self, info: TypeInfo) {
        let mut marked = self.marked.write().unwrap_or_else(PoisonError::into_inner);
        if marked.iter().all(|m| m.id != info.id) {
            debug!(type_name = info.name, "type marked for compilation");
            marked.push(info);
        }
    }

    /// Returns the marked types, in marking order
    pub fn scan(&self) -> Vec<TypeInfo> {
        self.marked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Compiles the schema of `T`
    pub fn compile<T: Reflect>(
        &self,
        max_depth: usize,
        override_ignores: bool,
    ) -> Option<Arc<TypeSchema>> {
        self.compiler.compile::<T>(max_depth, override_ignores)
    }

    /// Compiles `T` with the configured depth and ignore override
    pub fn compile_default<T: Reflect>(&self) -> Option<Arc<TypeSchema>> {
        self.compile::<T>(self.config.default_max_depth, self.config.override_ignores)
    }

    pub fn compile_info(
        &self,
        info: &TypeInfo,
        max_depth: usize,
        override_ignores: bool,
    ) -> Option<Arc<TypeSchema>> {
        self.compiler.compile_info(info, max_depth, override_ignores)
    }

    /// Compiles every marked type at `max_depth`, skipping absent results
    pub fn compile_marked(&self, max_depth: usize) -> Vec<Arc<TypeSchema>> {
        self.scan()
            .iter()
            .filter_map(|info| self.compile_info(info, max_depth, self.config.override_ignores))
            .collect()
    }

    pub fn is_compiled<T: Reflect>(&self, max_depth: usize) -> bool {
        self.is_compiled_id(TypeId::of::<T>(), max_depth)
    }

    pub fn is_compiled_id(&self, type_id: TypeId, max_depth: usize) -> bool {
        self.get_compiled_id(type_id, max_depth).is_some()
    }

    /// Returns the compiled schema of `T` at `max_depth`.
    ///
    /// The ignore-honoring entry is preferred over the override entry.
    pub fn get_compiled<T: Reflect>(&self, max_depth: usize) -> Option<Arc<TypeSchema>> {
        self.get_compiled_id(TypeId::of::<T>(), max_depth)
    }

    pub fn get_compiled_id(&self, type_id: TypeId, max_depth: usize) -> Option<Arc<TypeSchema>> {
        let cache = self.compiler.cache();
        cache
            .get(&SchemaKey::new(type_id, max_depth, false))
            .or_else(|| cache.get(&SchemaKey::new(type_id, max_depth, true)))
    }
}
