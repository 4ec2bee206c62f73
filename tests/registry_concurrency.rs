//! Registry Concurrency Tests
//!
//! The compiled-schema cache is the only shared mutable state. These
//! tests compile from many threads at once and check that:
//! - Every key ends up with exactly one stored schema
//! - Concurrent compiles of one key agree on the stored instance
//! - Distinct depths never collide

use std::sync::{Arc, Barrier};
use std::thread;

use typefilter::config::EngineConfig;
use typefilter::demo::{self, Category, Order, Person};
use typefilter::schema::{SchemaCache, SchemaCompiler, SchemaRegistry};

// =============================================================================
// Helper Functions
// =============================================================================

const THREADS: usize = 8;

fn spawn_all<F>(f: F) -> Vec<thread::JoinHandle<()>>
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let barrier = Arc::new(Barrier::new(THREADS));
    (0..THREADS)
        .map(|i| {
            let f = Arc::clone(&f);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                f(i);
            })
        })
        .collect()
}

fn join_all(handles: Vec<thread::JoinHandle<()>>) {
    for handle in handles {
        handle.join().unwrap();
    }
}

// =============================================================================
// Same-Key Tests
// =============================================================================

/// Racing compiles of one key all return the stored schema.
#[test]
fn test_same_key_single_instance() {
    let registry = Arc::new(SchemaRegistry::new());
    let results = Arc::new(std::sync::Mutex::new(Vec::new()));

    let shared = Arc::clone(&registry);
    let sink = Arc::clone(&results);
    join_all(spawn_all(move |_| {
        let schema = shared.compile::<Person>(3, false).unwrap();
        sink.lock().unwrap().push(schema);
    }));

    let results = results.lock().unwrap();
    assert_eq!(results.len(), THREADS);
    let stored = registry.get_compiled::<Person>(3).unwrap();
    for schema in results.iter() {
        assert!(Arc::ptr_eq(schema, &stored));
    }
    assert_eq!(registry.compiler().cache().len(), 1);
}

// =============================================================================
// Distinct-Key Tests
// =============================================================================

/// Each thread compiles its own depth; none overwrite another.
#[test]
fn test_distinct_depths_do_not_collide() {
    let registry = Arc::new(SchemaRegistry::new());

    let shared = Arc::clone(&registry);
    join_all(spawn_all(move |i| {
        let depth = i + 1;
        let schema = shared.compile::<Category>(depth, false).unwrap();
        assert_eq!(schema.nesting_depth(), depth - 1);
    }));

    for depth in 1..=THREADS {
        assert!(registry.is_compiled::<Category>(depth));
        let schema = registry.get_compiled::<Category>(depth).unwrap();
        assert_eq!(schema.nesting_depth(), depth - 1);
    }
    assert!(!registry.is_compiled::<Category>(THREADS + 1));
}

/// Mixed types and depths through a shared cache.
#[test]
fn test_shared_cache_across_compilers() {
    let cache = Arc::new(SchemaCache::new());

    let shared = Arc::clone(&cache);
    join_all(spawn_all(move |i| {
        let compiler = SchemaCompiler::with_cache(Arc::clone(&shared));
        let depth = 1 + i % 2;
        if i % 2 == 0 {
            compiler.compile::<Person>(depth, false).unwrap();
        } else {
            compiler.compile::<Order>(depth, false).unwrap();
        }
    }));

    // Person at depth 1 and Order at depth 2
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

/// Marking from many threads keeps one entry per type.
#[test]
fn test_concurrent_marking_and_compile_marked() {
    let registry = Arc::new(SchemaRegistry::with_config(EngineConfig::default()));

    let shared = Arc::clone(&registry);
    join_all(spawn_all(move |_| demo::register(&shared)));

    assert_eq!(registry.scan().len(), 5);

    // The audit type is ignored and drops out
    let compiled = registry.compile_marked(2);
    let names: Vec<_> = compiled.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Person", "Address", "Order", "Category"]);
}
