//! Result ordering
//!
//! Sorts by resolved field paths, most significant key first. Sort is
//! stable, so items with equal keys keep their source order.

use std::cmp::Ordering;

use super::page::{SortDirection, SortSpec};
use crate::predicate::{resolve_path, FieldPath, PredicateResult};
use crate::reflect::{FieldValue, Record, TypeInfo};

/// A sort key resolved against an element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub path: FieldPath,
    pub direction: SortDirection,
}

/// Sorts records by field values
pub struct ResultSorter;

impl ResultSorter {
    /// Resolves sort specs against `element`, rejecting unknown paths
    pub fn resolve(element: &TypeInfo, specs: &[SortSpec]) -> PredicateResult<Vec<SortKey>> {
        specs
            .iter()
            .map(|spec| {
                let (path, _) = resolve_path(element, &spec.path)?;
                Ok(SortKey {
                    path,
                    direction: spec.direction,
                })
            })
            .collect()
    }

    pub fn sort<T: Record>(items: &mut [&T], keys: &[SortKey]) {
        if keys.is_empty() {
            return;
        }
        items.sort_by(|a, b| {
            keys.iter()
                .map(|key| {
                    let ordering = Self::compare_values(
                        &key.path.resolve(*a),
                        &key.path.resolve(*b),
                    );
                    match key.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Compares two field values for sorting.
    ///
    /// Ordering rules:
    /// - null < atom < enum < collection < record
    /// - atoms of one category by value, enums by name, collections by length
    /// - incomparable atoms (NaN, mixed categories) are equal
    fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
        let rank = |v: &FieldValue<'_>| -> u8 {
            match v {
                FieldValue::Null => 0,
                FieldValue::Atom(_) => 1,
                FieldValue::Enum(_) => 2,
                FieldValue::Collection(_) => 3,
                FieldValue::Record(_) => 4,
            }
        };

        match (a, b) {
            (FieldValue::Atom(x), FieldValue::Atom(y)) => x.compare(y).unwrap_or(Ordering::Equal),
            (FieldValue::Enum(x), FieldValue::Enum(y)) => x.cmp(y),
            (FieldValue::Collection(x), FieldValue::Collection(y)) => x.cmp(y),
            _ => rank(a).cmp(&rank(b)),
        }
    }
}
