//! Coercion error types
//!
//! Error codes:
//! - TYPE_CONVERSION: value cannot be parsed or cast to the target
//! - TYPE_CONVERSION_NOT_SUPPORTED: conversion is categorically impossible
//! - TYPE_CONVERSION_ATOM_VALUE_EXPECTED: array or object given where one atom was required

use std::fmt;

/// Coercion error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionErrorCode {
    /// Value could not be parsed or cast
    TypeConversion,
    /// No conversion exists from this value kind to the target
    TypeConversionNotSupported,
    /// Composite wire value supplied for a single atom
    TypeConversionAtomValueExpected,
}

impl CoercionErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            CoercionErrorCode::TypeConversion => "TYPE_CONVERSION",
            CoercionErrorCode::TypeConversionNotSupported => "TYPE_CONVERSION_NOT_SUPPORTED",
            CoercionErrorCode::TypeConversionAtomValueExpected => {
                "TYPE_CONVERSION_ATOM_VALUE_EXPECTED"
            }
        }
    }
}

impl fmt::Display for CoercionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Coercion error with the offending value and target type
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionError {
    code: CoercionErrorCode,
    message: String,
    value: String,
    target: String,
}

impl CoercionError {
    /// Create a conversion error
    pub fn conversion(
        value: impl Into<String>,
        target: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        let value = value.into();
        let target = target.into();
        Self {
            code: CoercionErrorCode::TypeConversion,
            message: format!("Cannot convert {} to {}: {}", value, target, reason),
            value,
            target,
        }
    }

    /// Create a required-value error
    pub fn required(target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            code: CoercionErrorCode::TypeConversion,
            message: format!("A value is required for non-nullable {}", target),
            value: "null".into(),
            target,
        }
    }

    /// Create a not-supported error
    pub fn not_supported(
        value: impl Into<String>,
        kind: &str,
        target: impl Into<String>,
    ) -> Self {
        let value = value.into();
        let target = target.into();
        Self {
            code: CoercionErrorCode::TypeConversionNotSupported,
            message: format!("Conversion from {} {} to {} is not supported", kind, value, target),
            value,
            target,
        }
    }

    /// Create an atom-value-expected error
    pub fn atom_value_expected(value: impl Into<String>, target: impl Into<String>) -> Self {
        let value = value.into();
        let target = target.into();
        Self {
            code: CoercionErrorCode::TypeConversionAtomValueExpected,
            message: format!("Expected a single value for {}, got {}", target, value),
            value,
            target,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> CoercionErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the rendered offending value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the target type name
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CoercionError {}

/// Result type for coercion operations
pub type CoercionResult<T> = Result<T, CoercionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CoercionErrorCode::TypeConversion.code(), "TYPE_CONVERSION");
        assert_eq!(
            CoercionErrorCode::TypeConversionNotSupported.code(),
            "TYPE_CONVERSION_NOT_SUPPORTED"
        );
        assert_eq!(
            CoercionErrorCode::TypeConversionAtomValueExpected.code(),
            "TYPE_CONVERSION_ATOM_VALUE_EXPECTED"
        );
    }

    #[test]
    fn test_error_carries_context() {
        let err = CoercionError::conversion("\"abc\"", "i32", "invalid digit");
        assert_eq!(err.value(), "\"abc\"");
        assert_eq!(err.target(), "i32");

        let display = err.to_string();
        assert!(display.contains("TYPE_CONVERSION"));
        assert!(display.contains("abc"));
        assert!(display.contains("i32"));
    }

    #[test]
    fn test_required_error_is_conversion() {
        let err = CoercionError::required("i64");
        assert_eq!(err.code(), CoercionErrorCode::TypeConversion);
        assert_eq!(err.value(), "null");
    }
}
