//! Predicate builder and filter-tree composer
//!
//! Turns wire filters into typed [`Predicate`]s over reflected element
//! types. All failures are returned as [`PredicateError`]s; a malformed
//! filter is rejected whole, never partially applied.

mod builder;
mod composer;
mod errors;
mod expr;
mod filter;

pub(crate) use builder::resolve_path;
pub use builder::PredicateBuilder;
pub use composer::FilterComposer;
pub use errors::{PredicateError, PredicateErrorCode, PredicateResult};
pub use expr::{CompareOp, Expr, FieldPath, Operand, Predicate};
pub use filter::{FilterExpression, LogicalOperator, PropertyFilter};
