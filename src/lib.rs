//! typefilter - type-driven filter schemas and predicate compilation
//!
//! Pipeline:
//! - `schema`: compile a type's shape and legal operators, cached per (type, depth)
//! - `coerce`: convert loosely-typed wire values into native atoms
//! - `predicate`: build and compose predicates from filter descriptions
//! - `query`: apply predicates, ordering and paging to a sequence
//!
//! User types opt in through `impl_record!` and `impl_filter_enum!`.

pub mod cli;
pub mod coerce;
pub mod config;
pub mod demo;
pub mod model;
pub mod predicate;
pub mod query;
pub mod reflect;
pub mod schema;
