//! Raw value to typed atom conversion
//!
//! Conversion is a total match over the closed set of raw value kinds:
//!
//! - null: absent, or an error for required targets
//! - native of the target category: returned unchanged
//! - number: range-checked into numeric targets, code point into char,
//!   decimal literal into string; never into boolean, uuid or temporal
//! - bool: into boolean or string only
//! - text: parsed in the target's canonical format
//! - bytes: UTF-8 into string, 16 bytes into uuid
//! - array/object: never a single atom

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use super::errors::{CoercionError, CoercionResult};
use super::raw::RawValue;
use super::temporal;
use crate::model::{AtomValue, AtomicCategory};

/// Magnitude above which no float can be an integer of any supported width
const MAX_INTEGRAL_FLOAT: f64 = 1.9e19;

/// Coerces a raw value into the target category.
///
/// Returns `Ok(None)` for a null input when the target is not required.
pub fn coerce(
    raw: &RawValue,
    target: AtomicCategory,
    required: bool,
) -> CoercionResult<Option<AtomValue>> {
    let rendered = || raw.to_string();
    let target_name = target.native_type_name();

    let value = match raw {
        RawValue::Null => {
            return if required {
                Err(CoercionError::required(target_name))
            } else {
                Ok(None)
            };
        }
        RawValue::Native(atom) if atom.category() == target => atom.clone(),
        RawValue::Native(atom) => return coerce(&reduce_native(atom), target, required),
        RawValue::Bool(b) => from_bool(*b, target, &rendered())?,
        RawValue::Int(i) => from_number(Number::Int(*i), target, &rendered())?,
        RawValue::UInt(u) => from_number(Number::UInt(*u), target, &rendered())?,
        RawValue::Float(f) => from_number(Number::Float(*f), target, &rendered())?,
        RawValue::Text(s) => from_text(s, target, &rendered())?,
        RawValue::Bytes(bytes) => from_bytes(bytes, target, &rendered())?,
        RawValue::Sequence(_) | RawValue::Map(_) => {
            return Err(CoercionError::atom_value_expected(rendered(), target_name));
        }
    };

    Ok(Some(value))
}

/// Coerces a JSON wire value into the target category
pub fn coerce_json(
    value: &Value,
    target: AtomicCategory,
    required: bool,
) -> CoercionResult<Option<AtomValue>> {
    coerce(&RawValue::from(value), target, required)
}

/// Coerces a raw value into one of an enumeration's declared names.
///
/// Matching is case-sensitive.
pub fn coerce_enum(
    raw: &RawValue,
    type_name: &str,
    names: &'static [&'static str],
    required: bool,
) -> CoercionResult<Option<&'static str>> {
    let text = match raw {
        RawValue::Null => {
            return if required {
                Err(CoercionError::required(type_name))
            } else {
                Ok(None)
            };
        }
        RawValue::Text(s) => s.as_str(),
        RawValue::Native(AtomValue::String(s)) => s.as_str(),
        RawValue::Sequence(_) | RawValue::Map(_) => {
            return Err(CoercionError::atom_value_expected(raw.to_string(), type_name));
        }
        other => {
            return Err(CoercionError::not_supported(
                other.to_string(),
                other.kind_name(),
                type_name,
            ));
        }
    };

    names
        .iter()
        .find(|name| **name == text)
        .copied()
        .map(Some)
        .ok_or_else(|| {
            CoercionError::conversion(
                raw.to_string(),
                type_name,
                format!("'{}' is not a declared value", text),
            )
        })
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    fn to_text(self) -> String {
        match self {
            Number::Int(i) => i.to_string(),
            Number::UInt(u) => u.to_string(),
            Number::Float(f) => f.to_string(),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }

    /// Widens to i128, rejecting floats with a fractional part
    fn to_wide_integer(self, rendered: &str, target: &str) -> CoercionResult<i128> {
        match self {
            Number::Int(i) => Ok(i128::from(i)),
            Number::UInt(u) => Ok(i128::from(u)),
            Number::Float(f) => {
                if !f.is_finite() || f.fract() != 0.0 || f.abs() > MAX_INTEGRAL_FLOAT {
                    return Err(CoercionError::conversion(
                        rendered,
                        target,
                        "not an integral value",
                    ));
                }
                Ok(f as i128)
            }
        }
    }
}

macro_rules! narrow {
    ($wide:expr, $ty:ty, $variant:ident, $rendered:expr, $target:expr) => {
        <$ty>::try_from($wide)
            .map(AtomValue::$variant)
            .map_err(|e| CoercionError::conversion($rendered, $target, e))
    };
}

fn from_number(number: Number, target: AtomicCategory, rendered: &str) -> CoercionResult<AtomValue> {
    let name = target.native_type_name();

    match target {
        AtomicCategory::Int8 => narrow!(number.to_wide_integer(rendered, name)?, i8, Int8, rendered, name),
        AtomicCategory::Int16 => narrow!(number.to_wide_integer(rendered, name)?, i16, Int16, rendered, name),
        AtomicCategory::Int32 => narrow!(number.to_wide_integer(rendered, name)?, i32, Int32, rendered, name),
        AtomicCategory::Int64 => narrow!(number.to_wide_integer(rendered, name)?, i64, Int64, rendered, name),
        AtomicCategory::UInt8 => narrow!(number.to_wide_integer(rendered, name)?, u8, UInt8, rendered, name),
        AtomicCategory::UInt16 => narrow!(number.to_wide_integer(rendered, name)?, u16, UInt16, rendered, name),
        AtomicCategory::UInt32 => narrow!(number.to_wide_integer(rendered, name)?, u32, UInt32, rendered, name),
        AtomicCategory::UInt64 => narrow!(number.to_wide_integer(rendered, name)?, u64, UInt64, rendered, name),
        AtomicCategory::Float32 => {
            let f = number.to_f64();
            if f.is_finite() && f.abs() > f64::from(f32::MAX) {
                return Err(CoercionError::conversion(rendered, name, "out of range for f32"));
            }
            Ok(AtomValue::Float32(f as f32))
        }
        AtomicCategory::Float64 => Ok(AtomValue::Float64(number.to_f64())),
        AtomicCategory::Decimal => match number {
            Number::Int(i) => Ok(AtomValue::Decimal(Decimal::from(i))),
            Number::UInt(u) => Ok(AtomValue::Decimal(Decimal::from(u))),
            Number::Float(f) => Decimal::try_from(f)
                .map(AtomValue::Decimal)
                .map_err(|e| CoercionError::conversion(rendered, name, e)),
        },
        AtomicCategory::Char => {
            let wide = number.to_wide_integer(rendered, name)?;
            u32::try_from(wide)
                .ok()
                .and_then(char::from_u32)
                .map(AtomValue::Char)
                .ok_or_else(|| CoercionError::conversion(rendered, name, "not a valid code point"))
        }
        AtomicCategory::String => Ok(AtomValue::String(number.to_text())),
        AtomicCategory::Boolean
        | AtomicCategory::Uuid
        | AtomicCategory::Date
        | AtomicCategory::DateTime
        | AtomicCategory::DateTimeOffset
        | AtomicCategory::Time
        | AtomicCategory::TimeSpan => Err(CoercionError::not_supported(rendered, "number", name)),
    }
}

fn from_bool(value: bool, target: AtomicCategory, rendered: &str) -> CoercionResult<AtomValue> {
    match target {
        AtomicCategory::Boolean => Ok(AtomValue::Boolean(value)),
        AtomicCategory::String => Ok(AtomValue::String(value.to_string())),
        _ => Err(CoercionError::not_supported(
            rendered,
            "bool",
            target.native_type_name(),
        )),
    }
}

fn from_text(text: &str, target: AtomicCategory, rendered: &str) -> CoercionResult<AtomValue> {
    let name = target.native_type_name();
    let trimmed = text.trim();
    let parse_err = |reason: String| CoercionError::conversion(rendered, name, reason);

    match target {
        AtomicCategory::String => Ok(AtomValue::String(text.to_string())),
        AtomicCategory::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(AtomValue::Char(c)),
                _ => Err(parse_err("expected exactly one character".into())),
            }
        }
        AtomicCategory::Boolean => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(AtomValue::Boolean(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(AtomValue::Boolean(false))
            } else {
                Err(parse_err("expected 'true' or 'false'".into()))
            }
        }
        AtomicCategory::Int8 => trimmed.parse().map(AtomValue::Int8).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::Int16 => trimmed.parse().map(AtomValue::Int16).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::Int32 => trimmed.parse().map(AtomValue::Int32).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::Int64 => trimmed.parse().map(AtomValue::Int64).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::UInt8 => trimmed.parse().map(AtomValue::UInt8).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::UInt16 => trimmed.parse().map(AtomValue::UInt16).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::UInt32 => trimmed.parse().map(AtomValue::UInt32).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::UInt64 => trimmed.parse().map(AtomValue::UInt64).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::Float32 => trimmed.parse().map(AtomValue::Float32).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::Float64 => trimmed.parse().map(AtomValue::Float64).map_err(|e| parse_err(e.to_string())),
        AtomicCategory::Decimal => Decimal::from_str(trimmed)
            .map(AtomValue::Decimal)
            .map_err(|e| parse_err(e.to_string())),
        AtomicCategory::Uuid => Uuid::parse_str(trimmed)
            .map(AtomValue::Uuid)
            .map_err(|e| parse_err(e.to_string())),
        AtomicCategory::Date => temporal::parse_date(trimmed)
            .map(AtomValue::Date)
            .ok_or_else(|| parse_err("expected YYYY-MM-DD".into())),
        AtomicCategory::DateTime => temporal::parse_date_time(trimmed)
            .map(AtomValue::DateTime)
            .ok_or_else(|| parse_err("expected YYYY-MM-DDTHH:MM:SS".into())),
        AtomicCategory::DateTimeOffset => temporal::parse_date_time_offset(trimmed)
            .map(AtomValue::DateTimeOffset)
            .ok_or_else(|| parse_err("expected an RFC 3339 timestamp".into())),
        AtomicCategory::Time => temporal::parse_time(trimmed)
            .map(AtomValue::Time)
            .ok_or_else(|| parse_err("expected HH:MM[:SS]".into())),
        AtomicCategory::TimeSpan => temporal::parse_time_span(trimmed)
            .map(AtomValue::TimeSpan)
            .ok_or_else(|| parse_err("expected [-][d.]hh:mm[:ss[.f]]".into())),
    }
}

fn from_bytes(bytes: &[u8], target: AtomicCategory, rendered: &str) -> CoercionResult<AtomValue> {
    let name = target.native_type_name();

    match target {
        AtomicCategory::String => String::from_utf8(bytes.to_vec())
            .map(AtomValue::String)
            .map_err(|e| CoercionError::conversion(rendered, name, e)),
        AtomicCategory::Uuid => Uuid::from_slice(bytes)
            .map(AtomValue::Uuid)
            .map_err(|e| CoercionError::conversion(rendered, name, e)),
        _ => Err(CoercionError::not_supported(rendered, "bytes", name)),
    }
}

/// Reduces a native value of another category to its raw numeric or text form
fn reduce_native(atom: &AtomValue) -> RawValue {
    match atom {
        AtomValue::Boolean(b) => RawValue::Bool(*b),
        AtomValue::Int8(v) => RawValue::Int(i64::from(*v)),
        AtomValue::Int16(v) => RawValue::Int(i64::from(*v)),
        AtomValue::Int32(v) => RawValue::Int(i64::from(*v)),
        AtomValue::Int64(v) => RawValue::Int(*v),
        AtomValue::UInt8(v) => RawValue::UInt(u64::from(*v)),
        AtomValue::UInt16(v) => RawValue::UInt(u64::from(*v)),
        AtomValue::UInt32(v) => RawValue::UInt(u64::from(*v)),
        AtomValue::UInt64(v) => RawValue::UInt(*v),
        AtomValue::Float32(v) => RawValue::Float(f64::from(*v)),
        AtomValue::Float64(v) => RawValue::Float(*v),
        other => RawValue::Text(other.to_canonical_string()),
    }
}
