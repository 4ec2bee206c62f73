//! Schema compiler subsystem
//!
//! Introspects reflected types into serializable [`TypeSchema`] trees
//! describing fields, nesting and the filter operators legal per node.
//!
//! # Design Principles
//!
//! - Depth exhaustion and ignore markers yield absent schemas, not errors
//! - Compiled schemas are immutable and shared
//! - The cache is the only shared mutable state

mod cache;
mod compiler;
pub mod registry;
mod types;

pub use cache::{SchemaCache, SchemaKey};
pub use compiler::SchemaCompiler;
pub use registry::SchemaRegistry;
pub use types::TypeSchema;
