//! Predicate error types
//!
//! Error codes:
//! - ARGUMENT: operator arity mismatch or malformed path
//! - UNKNOWN_FIELD: path segment does not resolve against the element type
//! - UNSUPPORTED_OPERATOR: operator not in the field's catalog entry
//! - COERCION: argument could not be coerced to the field's type

use std::fmt;

use crate::coerce::CoercionError;
use crate::model::FilterOperator;

/// Predicate error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateErrorCode {
    /// Wrong argument count or malformed path
    Argument,
    /// Path segment not found
    UnknownField,
    /// Operator illegal for the field's shape
    UnsupportedOperator,
    /// Argument coercion failed
    Coercion,
}

impl PredicateErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PredicateErrorCode::Argument => "ARGUMENT",
            PredicateErrorCode::UnknownField => "UNKNOWN_FIELD",
            PredicateErrorCode::UnsupportedOperator => "UNSUPPORTED_OPERATOR",
            PredicateErrorCode::Coercion => "COERCION",
        }
    }
}

impl fmt::Display for PredicateErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Predicate error with the offending field path
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateError {
    code: PredicateErrorCode,
    message: String,
    path: String,
    coercion: Option<CoercionError>,
}

impl PredicateError {
    /// Create a general argument error
    pub fn argument(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: PredicateErrorCode::Argument,
            message: message.into(),
            path: path.into(),
            coercion: None,
        }
    }

    /// Create an arity mismatch error
    pub fn arity(path: impl Into<String>, operator: FilterOperator, given: usize) -> Self {
        let (min, max) = operator.arity();
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        Self::argument(
            path,
            format!(
                "Operator {} takes {} argument(s), {} given",
                operator, expected, given
            ),
        )
    }

    /// Create a path-too-deep error
    pub fn path_too_deep(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::argument(
            path.clone(),
            format!("Path '{}' has more than two segments", path),
        )
    }

    /// Create an unknown field error
    pub fn unknown_field(path: impl Into<String>, segment: &str, type_name: &str) -> Self {
        let path = path.into();
        Self {
            code: PredicateErrorCode::UnknownField,
            message: format!(
                "Field '{}' of path '{}' does not exist on {}",
                segment, path, type_name
            ),
            path,
            coercion: None,
        }
    }

    /// Create an unsupported operator error
    pub fn unsupported_operator(
        path: impl Into<String>,
        operator: FilterOperator,
        type_name: &str,
    ) -> Self {
        let path = path.into();
        Self {
            code: PredicateErrorCode::UnsupportedOperator,
            message: format!(
                "Operator {} is not supported on '{}' of type {}",
                operator, path, type_name
            ),
            path,
            coercion: None,
        }
    }

    /// Wrap a coercion failure for the given path
    pub fn coercion(path: impl Into<String>, source: CoercionError) -> Self {
        let path = path.into();
        Self {
            code: PredicateErrorCode::Coercion,
            message: format!("Invalid argument for '{}': {}", path, source),
            path,
            coercion: Some(source),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PredicateErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the field path the error refers to
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the underlying coercion error, if any
    pub fn as_coercion(&self) -> Option<&CoercionError> {
        self.coercion.as_ref()
    }
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for PredicateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.coercion
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for predicate operations
pub type PredicateResult<T> = Result<T, PredicateError>;
