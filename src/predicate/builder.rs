//! Single-field predicate builder
//!
//! Building a predicate runs in a fixed order:
//! 1. resolve the path against the element type (one or two segments)
//! 2. check the argument count against the operator's arity
//! 3. rewrite equality against null into a null test
//! 4. check the operator against the field's catalog entry
//! 5. coerce arguments to the field's declared type

use tracing::{debug, trace};

use super::errors::{PredicateError, PredicateResult};
use super::expr::{CompareOp, Expr, FieldPath, Operand, Predicate};
use super::filter::PropertyFilter;
use crate::coerce::{coerce, coerce_enum, CoercionError, RawValue};
use crate::config::EngineConfig;
use crate::model::{AtomValue, AtomicCategory, FilterOperator};
use crate::reflect::{Record, Reflect, TypeInfo, TypeKind};

/// Builds single-field predicates
#[derive(Debug, Clone)]
pub struct PredicateBuilder {
    separator: String,
}

impl Default for PredicateBuilder {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
        }
    }
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_separator(config.sequence_separator.clone())
    }

    /// Uses `separator` for InSequence filters that do not supply one
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Builds a predicate over `T` for one field
    pub fn build<T: Reflect + Record>(
        &self,
        path: &str,
        operator: FilterOperator,
        arguments: &[RawValue],
    ) -> PredicateResult<Predicate<T>> {
        self.build_expr(&T::type_info(), path, operator, arguments)
            .map(Predicate::from_expr)
    }

    pub fn build_filter<T: Reflect + Record>(
        &self,
        filter: &PropertyFilter,
    ) -> PredicateResult<Predicate<T>> {
        self.build::<T>(&filter.path, filter.operator, &filter.arguments)
    }

    /// Builds the expression for one field of a described element type
    pub fn build_expr(
        &self,
        element: &TypeInfo,
        path: &str,
        operator: FilterOperator,
        arguments: &[RawValue],
    ) -> PredicateResult<Expr> {
        let result = self.build_inner(element, path, operator, arguments);
        match &result {
            Ok(expr) => trace!(element = element.name, path, %expr, "predicate built"),
            Err(e) => debug!(
                element = element.name,
                path,
                code = e.code().code(),
                "filter rejected: {}",
                e.message()
            ),
        }
        result
    }

    fn build_inner(
        &self,
        element: &TypeInfo,
        path: &str,
        operator: FilterOperator,
        arguments: &[RawValue],
    ) -> PredicateResult<Expr> {
        let (field_path, field) = resolve_path(element, path)?;

        if !operator.accepts_arity(arguments.len()) {
            return Err(PredicateError::arity(path, operator, arguments.len()));
        }

        let operator = match operator {
            FilterOperator::EqualTo if arguments[0].is_null() => FilterOperator::IsNull,
            FilterOperator::NotEqualTo if arguments[0].is_null() => FilterOperator::IsNotNull,
            other => other,
        };

        if !field.shape().allowed_operators().contains(&operator) {
            return Err(PredicateError::unsupported_operator(
                path,
                operator,
                &field.declared_name(),
            ));
        }

        let compare = |op: CompareOp, raw: &RawValue| -> PredicateResult<Expr> {
            Ok(Expr::Compare {
                path: field_path,
                op,
                value: operand(&field, path, raw)?,
            })
        };

        match operator {
            FilterOperator::IsNull => Ok(Expr::IsNull(field_path)),
            FilterOperator::IsNotNull => Ok(Expr::IsNotNull(field_path)),
            FilterOperator::EqualTo => compare(CompareOp::Eq, &arguments[0]),
            FilterOperator::NotEqualTo => compare(CompareOp::Ne, &arguments[0]),
            FilterOperator::LessThan => compare(CompareOp::Lt, &arguments[0]),
            FilterOperator::LessOrEqual => compare(CompareOp::Le, &arguments[0]),
            FilterOperator::GreaterThan => compare(CompareOp::Gt, &arguments[0]),
            FilterOperator::GreaterOrEqual => compare(CompareOp::Ge, &arguments[0]),
            FilterOperator::InRange => {
                let low = compare(CompareOp::Ge, &arguments[0])?;
                let high = compare(CompareOp::Le, &arguments[1])?;
                Ok(low.and(high))
            }
            FilterOperator::InSequence => {
                let separator = match arguments.get(1) {
                    None | Some(RawValue::Null) => self.separator.clone(),
                    Some(raw) => text_argument(path, raw)?,
                };
                if separator.is_empty() {
                    return Err(PredicateError::argument(
                        path,
                        "InSequence separator must not be empty",
                    ));
                }

                let list = text_argument(path, &arguments[0])?;
                list.split(separator.as_str())
                    .map(str::trim)
                    .filter(|element| !element.is_empty())
                    .map(|element| compare(CompareOp::Eq, &RawValue::from(element)))
                    .reduce(|chain, next| Ok(chain?.or(next?)))
                    .unwrap_or_else(|| {
                        Err(PredicateError::argument(
                            path,
                            format!("InSequence list {:?} has no elements", list),
                        ))
                    })
            }
            FilterOperator::StringContains => Ok(Expr::Contains {
                path: field_path,
                needle: text_argument(path, &arguments[0])?,
            }),
            FilterOperator::CollectionIsEmpty => Ok(Expr::Count {
                path: field_path,
                op: CompareOp::Eq,
                count: 0,
            }),
            FilterOperator::CollectionIsNotEmpty => Ok(Expr::Count {
                path: field_path,
                op: CompareOp::Gt,
                count: 0,
            }),
        }
    }
}

/// Resolves a one- or two-segment path to its field descriptor
pub(crate) fn resolve_path(element: &TypeInfo, path: &str) -> PredicateResult<(FieldPath, TypeInfo)> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PredicateError::argument(
            path,
            format!("Path '{}' has an empty segment", path),
        ));
    }

    match segments.as_slice() {
        [name] => {
            let field = element
                .field(name)
                .ok_or_else(|| PredicateError::unknown_field(path, name, element.name))?;
            Ok((FieldPath::direct(field.name), field.type_info()))
        }
        [outer, inner] => {
            let outer_field = element
                .field(outer)
                .ok_or_else(|| PredicateError::unknown_field(path, outer, element.name))?;
            let outer_type = outer_field.type_info();
            if !matches!(outer_type.kind, TypeKind::Composite(_)) {
                return Err(PredicateError::unknown_field(path, inner, &outer_type.declared_name()));
            }
            let inner_field = outer_type
                .field(inner)
                .ok_or_else(|| PredicateError::unknown_field(path, inner, outer_type.name))?;
            Ok((
                FieldPath::nested(outer_field.name, inner_field.name),
                inner_field.type_info(),
            ))
        }
        _ => Err(PredicateError::path_too_deep(path)),
    }
}

/// Coerces a comparison argument to the field's declared type
fn operand(field: &TypeInfo, path: &str, raw: &RawValue) -> PredicateResult<Operand> {
    match field.kind {
        TypeKind::Atomic(category) => coerce(raw, category, true)
            .and_then(|value| value.ok_or_else(|| CoercionError::required(category.native_type_name())))
            .map(Operand::Atom)
            .map_err(|e| PredicateError::coercion(path, e)),
        TypeKind::Enumeration(names) => coerce_enum(raw, field.name, names, true)
            .and_then(|value| value.ok_or_else(|| CoercionError::required(field.name)))
            .map(Operand::Enum)
            .map_err(|e| PredicateError::coercion(path, e)),
        TypeKind::Collection(_) | TypeKind::Composite(_) => Err(PredicateError::argument(
            path,
            format!("{} values cannot be compared", field.declared_name()),
        )),
    }
}

fn text_argument(path: &str, raw: &RawValue) -> PredicateResult<String> {
    match coerce(raw, AtomicCategory::String, true) {
        Ok(Some(AtomValue::String(text))) => Ok(text),
        Ok(_) => Err(PredicateError::coercion(
            path,
            CoercionError::required(AtomicCategory::String.native_type_name()),
        )),
        Err(e) => Err(PredicateError::coercion(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::CoercionErrorCode;
    use crate::predicate::PredicateErrorCode;
    use serde_json::json;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Level {
        Low,
        High,
    }

    crate::impl_filter_enum!(Level { Low, High });

    struct Spot {
        city: String,
    }

    crate::impl_record! {
        Spot { city: String }
    }

    struct Row {
        size: i32,
        label: Option<String>,
        level: Level,
        spot: Option<Spot>,
        marks: Vec<i32>,
    }

    crate::impl_record! {
        Row {
            size: i32,
            label: Option<String>,
            level: Level,
            spot: Option<Spot>,
            marks: Vec<i32>,
        }
    }

    fn row(size: i32) -> Row {
        Row {
            size,
            label: None,
            level: Level::Low,
            spot: None,
            marks: Vec::new(),
        }
    }

    fn build(path: &str, op: FilterOperator, args: Vec<serde_json::Value>) -> PredicateResult<Predicate<Row>> {
        let args: Vec<RawValue> = args.into_iter().map(RawValue::from).collect();
        PredicateBuilder::new().build::<Row>(path, op, &args)
    }

    #[test]
    fn test_equal_to_null_rewrites_to_is_null() {
        let eq_null = build("label", FilterOperator::EqualTo, vec![json!(null)]).unwrap();
        let is_null = build("label", FilterOperator::IsNull, vec![]).unwrap();
        assert_eq!(eq_null.expr(), is_null.expr());

        let ne_null = build("label", FilterOperator::NotEqualTo, vec![json!(null)]).unwrap();
        assert_eq!(ne_null.expr(), &Expr::IsNotNull(FieldPath::direct("label")));
    }

    #[test]
    fn test_in_range_is_inclusive() {
        let pred = build("size", FilterOperator::InRange, vec![json!(10), json!(20)]).unwrap();
        for size in [10, 15, 20] {
            assert!(pred.matches(&row(size)), "size {}", size);
        }
        for size in [9, 21] {
            assert!(!pred.matches(&row(size)), "size {}", size);
        }
    }

    #[test]
    fn test_in_sequence_default_separator() {
        let pred = build("size", FilterOperator::InSequence, vec![json!("1,2,3")]).unwrap();
        assert!(pred.matches(&row(2)));
        assert!(!pred.matches(&row(4)));
        assert_eq!(pred.to_string(), "((size = 1 OR size = 2) OR size = 3)");
    }

    #[test]
    fn test_in_sequence_custom_separator_and_trimming() {
        let pred = build("size", FilterOperator::InSequence, vec![json!(" 7 ; ;8"), json!(";")]).unwrap();
        assert!(pred.matches(&row(7)));
        assert!(pred.matches(&row(8)));

        let args = [RawValue::from("4|5")];
        let pred = PredicateBuilder::with_separator("|")
            .build::<Row>("size", FilterOperator::InSequence, &args)
            .unwrap();
        assert!(pred.matches(&row(5)));
    }

    #[test]
    fn test_in_sequence_without_elements_is_argument_error() {
        let err = build("size", FilterOperator::InSequence, vec![json!(" , ")]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Argument);
    }

    #[test]
    fn test_in_sequence_element_coercion_failure() {
        let err = build("size", FilterOperator::InSequence, vec![json!("1,x")]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Coercion);
        assert_eq!(err.as_coercion().unwrap().value(), "\"x\"");
    }

    #[test]
    fn test_arity_errors() {
        let err = build("size", FilterOperator::EqualTo, vec![]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Argument);

        let err = build("size", FilterOperator::IsNull, vec![json!(1)]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Argument);

        let err = build("size", FilterOperator::InRange, vec![json!(1)]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Argument);
    }

    #[test]
    fn test_path_errors() {
        let err = build("spot.city.name", FilterOperator::IsNull, vec![]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Argument);

        let err = build("missing", FilterOperator::IsNull, vec![]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::UnknownField);

        let err = build("spot.zip", FilterOperator::IsNull, vec![]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::UnknownField);

        let err = build("size.value", FilterOperator::IsNull, vec![]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::UnknownField);

        let err = build("", FilterOperator::IsNull, vec![]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Argument);
    }

    #[test]
    fn test_unsupported_operator_rejected() {
        let err = build("label", FilterOperator::LessThan, vec![json!("a")]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::UnsupportedOperator);

        let err = build("size", FilterOperator::StringContains, vec![json!("1")]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::UnsupportedOperator);

        let err = build("marks", FilterOperator::EqualTo, vec![json!(1)]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::UnsupportedOperator);
    }

    #[test]
    fn test_coercion_errors_propagate_unchanged() {
        let err = build("size", FilterOperator::EqualTo, vec![json!("abc")]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Coercion);
        assert_eq!(err.as_coercion().unwrap().code(), CoercionErrorCode::TypeConversion);

        let err = build("size", FilterOperator::EqualTo, vec![json!([1])]).unwrap_err();
        assert_eq!(
            err.as_coercion().unwrap().code(),
            CoercionErrorCode::TypeConversionAtomValueExpected
        );
    }

    #[test]
    fn test_enum_comparison() {
        let pred = build("level", FilterOperator::EqualTo, vec![json!("High")]).unwrap();
        let mut high = row(1);
        high.level = Level::High;
        assert!(pred.matches(&high));
        assert!(!pred.matches(&row(1)));

        let err = build("level", FilterOperator::EqualTo, vec![json!("high")]).unwrap_err();
        assert_eq!(err.code(), PredicateErrorCode::Coercion);
    }

    #[test]
    fn test_nested_string_contains() {
        let pred = build("spot.city", FilterOperator::StringContains, vec![json!("ber")]).unwrap();
        let mut r = row(1);
        assert!(!pred.matches(&r));
        r.spot = Some(Spot {
            city: "Berlin".into(),
        });
        assert!(!pred.matches(&r));
        r.spot = Some(Spot {
            city: "Aberdeen".into(),
        });
        assert!(pred.matches(&r));
    }

    #[test]
    fn test_collection_emptiness() {
        let empty = build("marks", FilterOperator::CollectionIsEmpty, vec![]).unwrap();
        let not_empty = build("marks", FilterOperator::CollectionIsNotEmpty, vec![]).unwrap();
        let mut r = row(1);
        assert!(empty.matches(&r));
        assert!(!not_empty.matches(&r));
        r.marks.push(1);
        assert!(!empty.matches(&r));
        assert!(not_empty.matches(&r));
    }

    #[test]
    fn test_native_argument_passes_through() {
        let args = [RawValue::Native(AtomValue::Int32(3))];
        let pred = PredicateBuilder::new()
            .build::<Row>("size", FilterOperator::GreaterThan, &args)
            .unwrap();
        assert!(pred.matches(&row(4)));
        assert!(!pred.matches(&row(3)));
    }
}
