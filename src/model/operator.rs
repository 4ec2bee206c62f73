//! Filter operators and the operator catalog
//!
//! The catalog fixes which operators are legal for which value category:
//!
//! - ordered atoms (numeric, char, boolean, decimal, temporal, uuid):
//!   null tests, equality, ordering, range and sequence
//! - string: null tests, equality, sequence and containment
//! - enumeration: null tests, equality and sequence
//! - composite: null tests only
//! - collection: null tests and emptiness

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::AtomicCategory;

/// Closed set of filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    IsNull,
    IsNotNull,
    EqualTo,
    NotEqualTo,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    InRange,
    InSequence,
    StringContains,
    CollectionIsEmpty,
    CollectionIsNotEmpty,
}

impl FilterOperator {
    /// All operators, in declaration order
    pub const ALL: [FilterOperator; 13] = [
        FilterOperator::IsNull,
        FilterOperator::IsNotNull,
        FilterOperator::EqualTo,
        FilterOperator::NotEqualTo,
        FilterOperator::LessThan,
        FilterOperator::LessOrEqual,
        FilterOperator::GreaterThan,
        FilterOperator::GreaterOrEqual,
        FilterOperator::InRange,
        FilterOperator::InSequence,
        FilterOperator::StringContains,
        FilterOperator::CollectionIsEmpty,
        FilterOperator::CollectionIsNotEmpty,
    ];

    /// Returns the (minimum, maximum) number of arguments
    pub fn arity(&self) -> (usize, usize) {
        match self {
            FilterOperator::IsNull
            | FilterOperator::IsNotNull
            | FilterOperator::CollectionIsEmpty
            | FilterOperator::CollectionIsNotEmpty => (0, 0),
            FilterOperator::EqualTo
            | FilterOperator::NotEqualTo
            | FilterOperator::LessThan
            | FilterOperator::LessOrEqual
            | FilterOperator::GreaterThan
            | FilterOperator::GreaterOrEqual
            | FilterOperator::StringContains => (1, 1),
            FilterOperator::InRange => (2, 2),
            FilterOperator::InSequence => (1, 2),
        }
    }

    /// Returns true if `count` arguments satisfy this operator's arity
    pub fn accepts_arity(&self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min && count <= max
    }

    /// Returns the wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::IsNull => "isNull",
            FilterOperator::IsNotNull => "isNotNull",
            FilterOperator::EqualTo => "equalTo",
            FilterOperator::NotEqualTo => "notEqualTo",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::LessOrEqual => "lessOrEqual",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::GreaterOrEqual => "greaterOrEqual",
            FilterOperator::InRange => "inRange",
            FilterOperator::InSequence => "inSequence",
            FilterOperator::StringContains => "stringContains",
            FilterOperator::CollectionIsEmpty => "collectionIsEmpty",
            FilterOperator::CollectionIsNotEmpty => "collectionIsNotEmpty",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered set of operators legal for one schema node
pub type OperatorSet = BTreeSet<FilterOperator>;

/// The operator catalog
pub mod catalog {
    use super::{AtomicCategory, FilterOperator, OperatorSet};

    use FilterOperator::*;

    const NULL_TESTS: [FilterOperator; 2] = [IsNull, IsNotNull];

    const ORDERED: [FilterOperator; 10] = [
        IsNull,
        IsNotNull,
        EqualTo,
        NotEqualTo,
        LessThan,
        LessOrEqual,
        GreaterThan,
        GreaterOrEqual,
        InRange,
        InSequence,
    ];

    const STRING: [FilterOperator; 6] = [
        IsNull,
        IsNotNull,
        EqualTo,
        NotEqualTo,
        InSequence,
        StringContains,
    ];

    const ENUMERATION: [FilterOperator; 5] = [IsNull, IsNotNull, EqualTo, NotEqualTo, InSequence];

    const COLLECTION: [FilterOperator; 4] =
        [IsNull, IsNotNull, CollectionIsEmpty, CollectionIsNotEmpty];

    /// Operators legal for an atomic category
    pub fn for_category(category: AtomicCategory) -> OperatorSet {
        match category {
            AtomicCategory::String => STRING.into_iter().collect(),
            _ => ORDERED.into_iter().collect(),
        }
    }

    /// Operators legal for an enumeration
    pub fn for_enum() -> OperatorSet {
        ENUMERATION.into_iter().collect()
    }

    /// Operators legal for a composite (reference) value
    pub fn for_composite() -> OperatorSet {
        NULL_TESTS.into_iter().collect()
    }

    /// Operators legal for a collection
    pub fn for_collection() -> OperatorSet {
        COLLECTION.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_table() {
        assert_eq!(FilterOperator::IsNull.arity(), (0, 0));
        assert_eq!(FilterOperator::EqualTo.arity(), (1, 1));
        assert_eq!(FilterOperator::InRange.arity(), (2, 2));
        assert_eq!(FilterOperator::InSequence.arity(), (1, 2));
        assert_eq!(FilterOperator::CollectionIsNotEmpty.arity(), (0, 0));
    }

    #[test]
    fn test_accepts_arity() {
        assert!(FilterOperator::InSequence.accepts_arity(1));
        assert!(FilterOperator::InSequence.accepts_arity(2));
        assert!(!FilterOperator::InSequence.accepts_arity(3));
        assert!(!FilterOperator::EqualTo.accepts_arity(0));
    }

    #[test]
    fn test_string_catalog_has_no_ordering() {
        let ops = catalog::for_category(AtomicCategory::String);
        assert!(ops.contains(&FilterOperator::StringContains));
        assert!(!ops.contains(&FilterOperator::LessThan));
        assert!(!ops.contains(&FilterOperator::InRange));
        assert_eq!(ops.len(), 6);
    }

    #[test]
    fn test_ordered_catalog_for_every_non_string_category() {
        for category in AtomicCategory::ALL {
            if category == AtomicCategory::String {
                continue;
            }
            let ops = catalog::for_category(category);
            assert_eq!(ops.len(), 10, "category {:?}", category);
            assert!(ops.contains(&FilterOperator::InRange));
            assert!(!ops.contains(&FilterOperator::StringContains));
        }
    }

    #[test]
    fn test_collection_catalog() {
        let ops = catalog::for_collection();
        assert_eq!(
            ops.into_iter().collect::<Vec<_>>(),
            vec![
                FilterOperator::IsNull,
                FilterOperator::IsNotNull,
                FilterOperator::CollectionIsEmpty,
                FilterOperator::CollectionIsNotEmpty
            ]
        );
    }

    #[test]
    fn test_wire_names_match_serde() {
        for op in FilterOperator::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
    }
}
