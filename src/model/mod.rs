//! Value-kind model
//!
//! Defines the closed vocabulary the rest of the engine is built on:
//!
//! - atomic value categories and their native representations
//! - the filter operator set and per-operator arity
//! - the operator catalog (which operators apply to which shape)
//! - type shape classification

mod category;
mod operator;
mod shape;

pub use category::{AtomValue, AtomicCategory};
pub use operator::{catalog, FilterOperator, OperatorSet};
pub use shape::{ShapeTag, TypeShape};
