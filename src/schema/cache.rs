//! Compiled-schema cache
//!
//! Entries are keyed by (type identity, depth budget, ignore override)
//! and are never invalidated. Values are shared `Arc`s, so a reader
//! either sees no entry or a fully built one.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::types::TypeSchema;

/// Cache key of one compiled schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaKey {
    pub type_id: TypeId,
    pub max_depth: usize,
    pub override_ignores: bool,
}

impl SchemaKey {
    pub fn new(type_id: TypeId, max_depth: usize, override_ignores: bool) -> Self {
        Self {
            type_id,
            max_depth,
            override_ignores,
        }
    }
}

/// Thread-safe map of compiled schemas
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: RwLock<HashMap<SchemaKey, Arc<TypeSchema>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SchemaKey) -> Option<Arc<TypeSchema>> {
        // Values are inserted whole, so a poisoned map is still consistent
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    pub fn contains(&self, key: &SchemaKey) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(key)
    }

    /// Stores `schema` unless the key is already present.
    ///
    /// Returns the stored entry, which is the earlier one on a race.
    pub fn insert_if_absent(&self, key: SchemaKey, schema: Arc<TypeSchema>) -> Arc<TypeSchema> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key).or_insert(schema))
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{catalog, ShapeTag};

    fn schema(name: &str) -> Arc<TypeSchema> {
        Arc::new(TypeSchema {
            name: name.into(),
            declared_type_name: name.into(),
            nullable: false,
            shape: ShapeTag::Composite,
            category: None,
            enum_values: None,
            properties: None,
            collection_element: None,
            allowed_operators: catalog::for_composite(),
        })
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = SchemaCache::new();
        let key = SchemaKey::new(TypeId::of::<u8>(), 2, false);

        let first = cache.insert_if_absent(key, schema("first"));
        let second = cache.insert_if_absent(key, schema("second"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.get(&key).unwrap().name, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_differ_by_depth_and_override() {
        let cache = SchemaCache::new();
        let id = TypeId::of::<u8>();
        cache.insert_if_absent(SchemaKey::new(id, 1, false), schema("a"));
        cache.insert_if_absent(SchemaKey::new(id, 2, false), schema("b"));
        cache.insert_if_absent(SchemaKey::new(id, 2, true), schema("c"));

        assert_eq!(cache.len(), 3);
        assert!(cache.contains(&SchemaKey::new(id, 2, true)));
        assert!(!cache.contains(&SchemaKey::new(id, 3, false)));
    }

    #[test]
    fn test_clear() {
        let cache = SchemaCache::new();
        cache.insert_if_absent(SchemaKey::new(TypeId::of::<u8>(), 1, false), schema("a"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
