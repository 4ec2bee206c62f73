//! Wire form of filters

use serde::{Deserialize, Serialize};

use crate::coerce::RawValue;
use crate::model::FilterOperator;

/// Boolean operator joining sibling expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicalOperator {
    And,
    Or,
}

/// A single-field filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    /// Dot-delimited field path of one or two segments
    pub path: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub arguments: Vec<RawValue>,
}

impl PropertyFilter {
    pub fn new(path: impl Into<String>, operator: FilterOperator, arguments: Vec<RawValue>) -> Self {
        Self {
            path: path.into(),
            operator,
            arguments,
        }
    }
}

/// A node of the filter tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterExpression {
    pub first: PropertyFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<LogicalOperator>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub others: Vec<FilterExpression>,
}

impl FilterExpression {
    /// An expression consisting of one filter
    pub fn single(first: PropertyFilter) -> Self {
        Self {
            first,
            logical_operator: None,
            others: Vec::new(),
        }
    }

    /// An expression joining `first` with each of `others` by `operator`
    pub fn chain(
        first: PropertyFilter,
        operator: LogicalOperator,
        others: Vec<FilterExpression>,
    ) -> Self {
        Self {
            first,
            logical_operator: Some(operator),
            others,
        }
    }

    /// Returns the number of property filters in the tree
    pub fn filter_count(&self) -> usize {
        1 + self.others.iter().map(FilterExpression::filter_count).sum::<usize>()
    }
}

impl From<PropertyFilter> for FilterExpression {
    fn from(filter: PropertyFilter) -> Self {
        FilterExpression::single(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_tree() {
        let expr: FilterExpression = serde_json::from_value(json!({
            "first": {"path": "age", "operator": "greaterOrEqual", "arguments": [30]},
            "logicalOperator": "or",
            "others": [
                {"first": {"path": "externalId", "operator": "equalTo", "arguments": ["X"]}}
            ]
        }))
        .unwrap();

        assert_eq!(expr.first.operator, FilterOperator::GreaterOrEqual);
        assert_eq!(expr.first.arguments, vec![RawValue::Int(30)]);
        assert_eq!(expr.logical_operator, Some(LogicalOperator::Or));
        assert_eq!(expr.others.len(), 1);
        assert!(expr.others[0].logical_operator.is_none());
        assert_eq!(expr.filter_count(), 2);
    }

    #[test]
    fn test_arguments_default_to_empty() {
        let filter: PropertyFilter =
            serde_json::from_value(json!({"path": "note", "operator": "isNull"})).unwrap();
        assert!(filter.arguments.is_empty());
    }

    #[test]
    fn test_serialize_omits_empty_chain() {
        let expr = FilterExpression::single(PropertyFilter::new(
            "age",
            FilterOperator::IsNotNull,
            vec![],
        ));
        let value = serde_json::to_value(&expr).unwrap();
        assert!(value.get("logicalOperator").is_none());
        assert!(value.get("others").is_none());
        assert_eq!(value["first"]["operator"], json!("isNotNull"));
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let result: Result<PropertyFilter, _> =
            serde_json::from_value(json!({"path": "a", "operator": "like", "arguments": []}));
        assert!(result.is_err());
    }
}
