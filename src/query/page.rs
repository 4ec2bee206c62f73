//! Paging and ordering request types

use serde::{Deserialize, Serialize};

use crate::predicate::FilterExpression;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One ordering key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field path of one or two segments
    pub path: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Requested page of results
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Zero-based page number
    #[serde(default)]
    pub page_index: usize,
    /// Items per page; the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Ordering keys, most significant first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortSpec>,
}

impl PageRequest {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: Some(page_size),
            order_by: Vec::new(),
        }
    }

    pub fn ordered_by(mut self, spec: SortSpec) -> Self {
        self.order_by.push(spec);
        self
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matching items across all pages
    pub total_count: usize,
    pub page_index: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Returns the number of pages needed for all matching items
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        (self.total_count + self.page_size - 1) / self.page_size
    }
}

/// Full filter request as sent by a client
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterExpression>,
    #[serde(default)]
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_count() {
        let page = Page::<u8> {
            items: vec![],
            total_count: 21,
            page_index: 0,
            page_size: 10,
        };
        assert_eq!(page.page_count(), 3);

        let empty = Page::<u8> {
            items: vec![],
            total_count: 0,
            page_index: 0,
            page_size: 10,
        };
        assert_eq!(empty.page_count(), 0);
    }

    #[test]
    fn test_request_defaults() {
        let request: FilterRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.filter.is_none());
        assert_eq!(request.page.page_index, 0);
        assert_eq!(request.page.page_size, None);
        assert!(request.page.order_by.is_empty());
    }

    #[test]
    fn test_request_wire_names() {
        let request: FilterRequest = serde_json::from_value(json!({
            "page": {"pageIndex": 2, "pageSize": 5, "orderBy": [{"path": "age", "direction": "desc"}, {"path": "name"}]}
        }))
        .unwrap();
        assert_eq!(request.page.page_index, 2);
        assert_eq!(request.page.page_size, Some(5));
        assert_eq!(request.page.order_by[0], SortSpec::desc("age"));
        assert_eq!(request.page.order_by[1], SortSpec::asc("name"));
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page {
            items: vec![1, 2],
            total_count: 7,
            page_index: 1,
            page_size: 2,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalCount"], json!(7));
        assert_eq!(value["pageSize"], json!(2));
    }
}
