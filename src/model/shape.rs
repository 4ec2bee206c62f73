//! Type shape classification

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::AtomicCategory;
use super::operator::{catalog, OperatorSet};

/// Classification of an introspected type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// Primitive value of one category
    Atomic(AtomicCategory),
    /// Closed set of named values
    Enumeration,
    /// Single-element-type sequence
    Collection,
    /// Named sub-fields
    Composite,
}

impl TypeShape {
    /// Returns the wire tag for this shape
    pub fn tag(&self) -> ShapeTag {
        match self {
            TypeShape::Atomic(_) => ShapeTag::Atomic,
            TypeShape::Enumeration => ShapeTag::Enumeration,
            TypeShape::Collection => ShapeTag::Collection,
            TypeShape::Composite => ShapeTag::Composite,
        }
    }

    /// Returns the atomic category, if atomic
    pub fn category(&self) -> Option<AtomicCategory> {
        match self {
            TypeShape::Atomic(category) => Some(*category),
            _ => None,
        }
    }

    /// Returns the operators legal for values of this shape
    pub fn allowed_operators(&self) -> OperatorSet {
        match self {
            TypeShape::Atomic(category) => catalog::for_category(*category),
            TypeShape::Enumeration => catalog::for_enum(),
            TypeShape::Collection => catalog::for_collection(),
            TypeShape::Composite => catalog::for_composite(),
        }
    }
}

/// Serialized shape tag of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTag {
    Atomic,
    Enumeration,
    Collection,
    Composite,
}

impl ShapeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeTag::Atomic => "atomic",
            ShapeTag::Enumeration => "enumeration",
            ShapeTag::Collection => "collection",
            ShapeTag::Composite => "composite",
        }
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterOperator;

    #[test]
    fn test_shape_tags() {
        assert_eq!(
            TypeShape::Atomic(AtomicCategory::Int32).tag(),
            ShapeTag::Atomic
        );
        assert_eq!(TypeShape::Collection.tag().as_str(), "collection");
    }

    #[test]
    fn test_composite_allows_null_tests_only() {
        let ops = TypeShape::Composite.allowed_operators();
        assert_eq!(ops.len(), 2);
        assert!(ops.contains(&FilterOperator::IsNull));
        assert!(ops.contains(&FilterOperator::IsNotNull));
    }

    #[test]
    fn test_enum_operators() {
        let ops = TypeShape::Enumeration.allowed_operators();
        assert!(ops.contains(&FilterOperator::InSequence));
        assert!(!ops.contains(&FilterOperator::LessThan));
    }
}
