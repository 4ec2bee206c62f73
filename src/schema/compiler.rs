//! Recursive schema compiler
//!
//! Depth rules:
//! - a budget of 0 yields no schema
//! - atomic and enumeration types compile directly
//! - a collection compiles its element at the same budget and is
//!   absent if the element is absent
//! - a composite with budget > 1 compiles each non-ignored field at
//!   budget - 1, dropping fields that come back absent
//! - a composite with budget 1 carries no properties
//!
//! Only root compilations are cached.

use std::sync::Arc;

use tracing::debug;

use super::cache::{SchemaCache, SchemaKey};
use super::types::TypeSchema;
use crate::reflect::{Reflect, TypeInfo, TypeKind};

/// Compiles type descriptors into cached schemas
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    cache: Arc<SchemaCache>,
}

impl SchemaCompiler {
    /// Creates a compiler with its own empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compiler sharing an existing cache
    pub fn with_cache(cache: Arc<SchemaCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Compiles the schema of `T`
    pub fn compile<T: Reflect>(
        &self,
        max_depth: usize,
        override_ignores: bool,
    ) -> Option<Arc<TypeSchema>> {
        self.compile_info(&T::type_info(), max_depth, override_ignores)
    }

    /// Compiles the schema of a described type.
    ///
    /// Returns `None` when the depth budget is 0 or the type is ignored
    /// without override.
    pub fn compile_info(
        &self,
        info: &TypeInfo,
        max_depth: usize,
        override_ignores: bool,
    ) -> Option<Arc<TypeSchema>> {
        let key = SchemaKey::new(info.id, max_depth, override_ignores);

        if let Some(cached) = self.cache.get(&key) {
            debug!(type_name = info.name, max_depth, override_ignores, "schema cache hit");
            return Some(cached);
        }
        debug!(type_name = info.name, max_depth, override_ignores, "schema cache miss");

        let schema = build_node(info, info.name, max_depth, override_ignores)?;
        Some(self.cache.insert_if_absent(key, Arc::new(schema)))
    }
}

fn build_node(
    info: &TypeInfo,
    name: &str,
    depth: usize,
    override_ignores: bool,
) -> Option<TypeSchema> {
    if depth == 0 {
        debug!(type_name = info.name, node = name, "depth exhausted, skipping");
        return None;
    }
    if info.ignored && !override_ignores {
        debug!(type_name = info.name, node = name, "ignored type, skipping");
        return None;
    }

    let shape = info.shape();
    let mut node = TypeSchema {
        name: name.to_string(),
        declared_type_name: info.declared_name(),
        nullable: info.nullable,
        shape: shape.tag(),
        category: shape.category(),
        enum_values: None,
        properties: None,
        collection_element: None,
        allowed_operators: shape.allowed_operators(),
    };

    match info.kind {
        TypeKind::Atomic(_) => {}
        TypeKind::Enumeration(values) => {
            node.enum_values = Some(values.iter().map(|v| v.to_string()).collect());
        }
        TypeKind::Collection(element) => {
            let element = element();
            let child = build_node(&element, element.name, depth, override_ignores)?;
            node.collection_element = Some(Box::new(child));
        }
        TypeKind::Composite(fields) if depth > 1 => {
            let properties = fields()
                .into_iter()
                .filter(|field| {
                    if field.ignored && !override_ignores {
                        debug!(type_name = info.name, field = field.name, "ignored field, skipping");
                        return false;
                    }
                    true
                })
                .filter_map(|field| {
                    build_node(&field.type_info(), field.name, depth - 1, override_ignores)
                })
                .collect();
            node.properties = Some(properties);
        }
        TypeKind::Composite(_) => {}
    }

    Some(node)
}
