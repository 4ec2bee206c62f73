//! Query applicator
//!
//! Applies a composed predicate, ordering and paging to a queryable
//! source. The source decides how filtering actually runs; the in-memory
//! implementation evaluates the predicate per item.

use tracing::debug;

use super::page::{FilterRequest, Page, PageRequest, SortSpec};
use super::sorter::ResultSorter;
use crate::config::EngineConfig;
use crate::predicate::{FilterComposer, Predicate, PredicateError, PredicateResult};
use crate::reflect::{Record, Reflect};

/// A sequence that can be filtered, counted, ordered and paged
pub trait Queryable<T: Record>: Sized {
    type Item;

    /// Keeps only items matching `predicate`
    fn filter(self, predicate: &Predicate<T>) -> Self;

    /// Counts items matching `predicate` without consuming the source
    fn count(&self, predicate: &Predicate<T>) -> usize;

    /// Returns the number of items in the source
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Orders items by `order`, most significant key first
    fn order_by(self, order: &[SortSpec]) -> PredicateResult<Self>;

    /// Skips `skip` items and returns up to `take` of the rest
    fn page(self, skip: usize, take: usize) -> Vec<Self::Item>;
}

/// In-memory query over borrowed items
#[derive(Debug)]
pub struct MemoryQuery<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T> MemoryQuery<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items: items.iter().collect(),
        }
    }
}

impl<'a, T: Record + Reflect> Queryable<T> for MemoryQuery<'a, T> {
    type Item = &'a T;

    fn filter(mut self, predicate: &Predicate<T>) -> Self {
        self.items.retain(|item| predicate.matches(item));
        self
    }

    fn count(&self, predicate: &Predicate<T>) -> usize {
        self.items.iter().filter(|item| predicate.matches(item)).count()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn order_by(mut self, order: &[SortSpec]) -> PredicateResult<Self> {
        let keys = ResultSorter::resolve(&T::type_info(), order)?;
        ResultSorter::sort(&mut self.items, &keys);
        Ok(self)
    }

    fn page(self, skip: usize, take: usize) -> Vec<&'a T> {
        self.items.into_iter().skip(skip).take(take).collect()
    }
}

/// Applies filter requests to queryable sources
#[derive(Debug, Clone)]
pub struct QueryApplicator {
    composer: FilterComposer,
    max_page_size: usize,
    default_page_size: usize,
}

impl Default for QueryApplicator {
    fn default() -> Self {
        Self::with_config(&EngineConfig::default())
    }
}

impl QueryApplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            composer: FilterComposer::with_config(config),
            max_page_size: config.max_page_size,
            default_page_size: config.default_page_size,
        }
    }

    pub fn composer(&self) -> &FilterComposer {
        &self.composer
    }

    /// Filters, counts, orders and pages `source`.
    ///
    /// Without a predicate every item matches.
    pub fn apply<T, Q>(
        &self,
        source: Q,
        predicate: Option<&Predicate<T>>,
        page: &PageRequest,
    ) -> PredicateResult<Page<Q::Item>>
    where
        T: Record,
        Q: Queryable<T>,
    {
        let page_size = self.page_size(page)?;

        let matched = match predicate {
            Some(predicate) => source.filter(predicate),
            None => source,
        };
        let total_count = matched.len();

        let skip = page.page_index.saturating_mul(page_size);
        let items = matched.order_by(&page.order_by)?.page(skip, page_size);

        debug!(
            total_count,
            returned = items.len(),
            page_index = page.page_index,
            page_size,
            "query applied"
        );

        Ok(Page {
            items,
            total_count,
            page_index: page.page_index,
            page_size,
        })
    }

    /// Composes the request's filter over `T` and applies it to `source`
    pub fn execute<T, Q>(&self, source: Q, request: &FilterRequest) -> PredicateResult<Page<Q::Item>>
    where
        T: Record + Reflect,
        Q: Queryable<T>,
    {
        let predicate = request
            .filter
            .as_ref()
            .map(|filter| self.composer.compose::<T>(filter))
            .transpose()?;
        self.apply(source, predicate.as_ref(), &request.page)
    }

    fn page_size(&self, page: &PageRequest) -> PredicateResult<usize> {
        let size = page.page_size.unwrap_or(self.default_page_size);
        if size == 0 || size > self.max_page_size {
            return Err(PredicateError::argument(
                "pageSize",
                format!(
                    "Page size {} is outside 1..={}",
                    size, self.max_page_size
                ),
            ));
        }
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::RawValue;
    use crate::model::FilterOperator;
    use crate::predicate::{FilterExpression, PredicateBuilder, PredicateErrorCode, PropertyFilter};

    #[derive(Debug)]
    struct Reading {
        value: i64,
    }

    crate::impl_record! {
        Reading { value: i64 }
    }

    fn readings(n: i64) -> Vec<Reading> {
        (1..=n).map(|value| Reading { value }).collect()
    }

    fn values(page: &Page<&Reading>) -> Vec<i64> {
        page.items.iter().map(|r| r.value).collect()
    }

    #[test]
    fn test_apply_filters_counts_and_pages() {
        let data = readings(10);
        let pred = PredicateBuilder::new()
            .build::<Reading>("value", FilterOperator::GreaterThan, &[RawValue::from(3)])
            .unwrap();
        let request = PageRequest::new(1, 3).ordered_by(SortSpec::desc("value"));

        let page = QueryApplicator::new()
            .apply(MemoryQuery::new(&data), Some(&pred), &request)
            .unwrap();

        assert_eq!(page.total_count, 7);
        assert_eq!(values(&page), vec![7, 6, 5]);
        assert_eq!(page.page_count(), 3);
    }

    #[test]
    fn test_memory_query_count_leaves_source_intact() {
        let data = readings(5);
        let pred = PredicateBuilder::new()
            .build::<Reading>("value", FilterOperator::LessOrEqual, &[RawValue::from(2)])
            .unwrap();
        let query = MemoryQuery::new(&data);

        assert_eq!(query.count(&pred), 2);
        assert_eq!(query.len(), 5);
        assert_eq!(query.filter(&pred).len(), 2);
    }

    #[test]
    fn test_rejected_page_reports_error() {
        let data = readings(2);
        let err = QueryApplicator::new()
            .apply::<Reading, _>(MemoryQuery::new(&data), None, &PageRequest::new(0, 0))
            .unwrap_err();
        assert_eq!(err.path(), "pageSize");
        assert!(err.to_string().starts_with("ARGUMENT: "));
    }

    #[test]
    fn test_with_config_carries_separator() {
        let config = EngineConfig {
            sequence_separator: ";".into(),
            ..EngineConfig::default()
        };
        let applicator = QueryApplicator::with_config(&config);
        assert_eq!(applicator.composer().builder().separator(), ";");
    }

    #[test]
    fn test_apply_without_predicate() {
        let data = readings(4);
        let page = QueryApplicator::new()
            .apply::<Reading, _>(MemoryQuery::new(&data), None, &PageRequest::default())
            .unwrap();
        assert_eq!(page.total_count, 4);
        assert_eq!(page.page_size, 50);
        assert_eq!(values(&page), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let data = readings(4);
        let page = QueryApplicator::new()
            .apply::<Reading, _>(MemoryQuery::new(&data), None, &PageRequest::new(5, 2))
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn test_invalid_page_size() {
        let data = readings(1);
        let applicator = QueryApplicator::new();
        for size in [0, 1001] {
            let err = applicator
                .apply::<Reading, _>(MemoryQuery::new(&data), None, &PageRequest::new(0, size))
                .unwrap_err();
            assert_eq!(err.code(), PredicateErrorCode::Argument);
        }
    }

    #[test]
    fn test_unknown_sort_path() {
        let data = readings(1);
        let request = PageRequest::new(0, 10).ordered_by(SortSpec::asc("missing"));
        let err = QueryApplicator::new()
            .apply::<Reading, _>(MemoryQuery::new(&data), None, &request)
            .unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::UnknownField);
    }

    #[test]
    fn test_execute_request() {
        let data = readings(6);
        let request = FilterRequest {
            filter: Some(FilterExpression::single(PropertyFilter::new(
                "value",
                FilterOperator::InSequence,
                vec![RawValue::from("2,4,6")],
            ))),
            page: PageRequest::new(0, 2),
        };
        let page = QueryApplicator::new()
            .execute::<Reading, _>(MemoryQuery::new(&data), &request)
            .unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(values(&page), vec![2, 4]);
    }
}
