//! Query applicator
//!
//! The boundary between compiled predicates and a backing sequence:
//! filtering, total counting, ordering and paging.

mod applicator;
mod page;
mod sorter;

pub use applicator::{MemoryQuery, QueryApplicator, Queryable};
pub use page::{FilterRequest, Page, PageRequest, SortDirection, SortSpec};
pub use sorter::{ResultSorter, SortKey};
