//! Atomic value categories and their native representations
//!
//! Every category maps to exactly one Rust type:
//!
//! | Category         | Native type                    |
//! |------------------|--------------------------------|
//! | char             | `char`                         |
//! | boolean          | `bool`                         |
//! | int8 .. int64    | `i8` .. `i64`                  |
//! | uint8 .. uint64  | `u8` .. `u64`                  |
//! | float32/float64  | `f32` / `f64`                  |
//! | decimal          | `rust_decimal::Decimal`        |
//! | string           | `String`                       |
//! | uuid             | `uuid::Uuid`                   |
//! | date             | `chrono::NaiveDate`            |
//! | dateTime         | `chrono::NaiveDateTime`        |
//! | dateTimeOffset   | `chrono::DateTime<FixedOffset>`|
//! | time             | `chrono::NaiveTime`            |
//! | timeSpan         | `chrono::TimeDelta`            |

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coerce::format_time_span;

/// Closed set of primitive value categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AtomicCategory {
    Char,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    #[serde(rename = "uint8")]
    UInt8,
    #[serde(rename = "uint16")]
    UInt16,
    #[serde(rename = "uint32")]
    UInt32,
    #[serde(rename = "uint64")]
    UInt64,
    Float32,
    Float64,
    Decimal,
    String,
    Uuid,
    Date,
    DateTime,
    DateTimeOffset,
    Time,
    TimeSpan,
}

impl AtomicCategory {
    /// All categories, in declaration order
    pub const ALL: [AtomicCategory; 20] = [
        AtomicCategory::Char,
        AtomicCategory::Boolean,
        AtomicCategory::Int8,
        AtomicCategory::Int16,
        AtomicCategory::Int32,
        AtomicCategory::Int64,
        AtomicCategory::UInt8,
        AtomicCategory::UInt16,
        AtomicCategory::UInt32,
        AtomicCategory::UInt64,
        AtomicCategory::Float32,
        AtomicCategory::Float64,
        AtomicCategory::Decimal,
        AtomicCategory::String,
        AtomicCategory::Uuid,
        AtomicCategory::Date,
        AtomicCategory::DateTime,
        AtomicCategory::DateTimeOffset,
        AtomicCategory::Time,
        AtomicCategory::TimeSpan,
    ];

    /// Returns the name of the native Rust type backing this category
    pub fn native_type_name(&self) -> &'static str {
        match self {
            AtomicCategory::Char => "char",
            AtomicCategory::Boolean => "bool",
            AtomicCategory::Int8 => "i8",
            AtomicCategory::Int16 => "i16",
            AtomicCategory::Int32 => "i32",
            AtomicCategory::Int64 => "i64",
            AtomicCategory::UInt8 => "u8",
            AtomicCategory::UInt16 => "u16",
            AtomicCategory::UInt32 => "u32",
            AtomicCategory::UInt64 => "u64",
            AtomicCategory::Float32 => "f32",
            AtomicCategory::Float64 => "f64",
            AtomicCategory::Decimal => "Decimal",
            AtomicCategory::String => "String",
            AtomicCategory::Uuid => "Uuid",
            AtomicCategory::Date => "NaiveDate",
            AtomicCategory::DateTime => "NaiveDateTime",
            AtomicCategory::DateTimeOffset => "DateTime<FixedOffset>",
            AtomicCategory::Time => "NaiveTime",
            AtomicCategory::TimeSpan => "TimeDelta",
        }
    }

    /// Returns true for the fixed-width integer categories
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            AtomicCategory::Int8
                | AtomicCategory::Int16
                | AtomicCategory::Int32
                | AtomicCategory::Int64
                | AtomicCategory::UInt8
                | AtomicCategory::UInt16
                | AtomicCategory::UInt32
                | AtomicCategory::UInt64
        )
    }

    /// Returns true for integer, floating point and decimal categories
    pub fn is_numeric(&self) -> bool {
        self.is_integer()
            || matches!(
                self,
                AtomicCategory::Float32 | AtomicCategory::Float64 | AtomicCategory::Decimal
            )
    }

    /// Returns true for date, time and duration categories
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            AtomicCategory::Date
                | AtomicCategory::DateTime
                | AtomicCategory::DateTimeOffset
                | AtomicCategory::Time
                | AtomicCategory::TimeSpan
        )
    }
}

impl fmt::Display for AtomicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.native_type_name())
    }
}

/// A strongly typed atomic value
#[derive(Debug, Clone, PartialEq)]
pub enum AtomValue {
    Char(char),
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    String(String),
    Uuid(Uuid),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Time(NaiveTime),
    TimeSpan(TimeDelta),
}

impl AtomValue {
    /// Returns the category of this value
    pub fn category(&self) -> AtomicCategory {
        match self {
            AtomValue::Char(_) => AtomicCategory::Char,
            AtomValue::Boolean(_) => AtomicCategory::Boolean,
            AtomValue::Int8(_) => AtomicCategory::Int8,
            AtomValue::Int16(_) => AtomicCategory::Int16,
            AtomValue::Int32(_) => AtomicCategory::Int32,
            AtomValue::Int64(_) => AtomicCategory::Int64,
            AtomValue::UInt8(_) => AtomicCategory::UInt8,
            AtomValue::UInt16(_) => AtomicCategory::UInt16,
            AtomValue::UInt32(_) => AtomicCategory::UInt32,
            AtomValue::UInt64(_) => AtomicCategory::UInt64,
            AtomValue::Float32(_) => AtomicCategory::Float32,
            AtomValue::Float64(_) => AtomicCategory::Float64,
            AtomValue::Decimal(_) => AtomicCategory::Decimal,
            AtomValue::String(_) => AtomicCategory::String,
            AtomValue::Uuid(_) => AtomicCategory::Uuid,
            AtomValue::Date(_) => AtomicCategory::Date,
            AtomValue::DateTime(_) => AtomicCategory::DateTime,
            AtomValue::DateTimeOffset(_) => AtomicCategory::DateTimeOffset,
            AtomValue::Time(_) => AtomicCategory::Time,
            AtomValue::TimeSpan(_) => AtomicCategory::TimeSpan,
        }
    }

    /// Compares two values of the same category.
    ///
    /// Values of different categories are unordered.
    pub fn compare(&self, other: &AtomValue) -> Option<Ordering> {
        use AtomValue::*;

        match (self, other) {
            (Char(a), Char(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Int8(a), Int8(b)) => Some(a.cmp(b)),
            (Int16(a), Int16(b)) => Some(a.cmp(b)),
            (Int32(a), Int32(b)) => Some(a.cmp(b)),
            (Int64(a), Int64(b)) => Some(a.cmp(b)),
            (UInt8(a), UInt8(b)) => Some(a.cmp(b)),
            (UInt16(a), UInt16(b)) => Some(a.cmp(b)),
            (UInt32(a), UInt32(b)) => Some(a.cmp(b)),
            (UInt64(a), UInt64(b)) => Some(a.cmp(b)),
            (Float32(a), Float32(b)) => a.partial_cmp(b),
            (Float64(a), Float64(b)) => a.partial_cmp(b),
            (Decimal(a), Decimal(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (DateTimeOffset(a), DateTimeOffset(b)) => Some(a.cmp(b)),
            (Time(a), Time(b)) => Some(a.cmp(b)),
            (TimeSpan(a), TimeSpan(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Renders the value in its category's canonical text format
    pub fn to_canonical_string(&self) -> String {
        match self {
            AtomValue::Char(v) => v.to_string(),
            AtomValue::Boolean(v) => v.to_string(),
            AtomValue::Int8(v) => v.to_string(),
            AtomValue::Int16(v) => v.to_string(),
            AtomValue::Int32(v) => v.to_string(),
            AtomValue::Int64(v) => v.to_string(),
            AtomValue::UInt8(v) => v.to_string(),
            AtomValue::UInt16(v) => v.to_string(),
            AtomValue::UInt32(v) => v.to_string(),
            AtomValue::UInt64(v) => v.to_string(),
            AtomValue::Float32(v) => v.to_string(),
            AtomValue::Float64(v) => v.to_string(),
            AtomValue::Decimal(v) => v.to_string(),
            AtomValue::String(v) => v.clone(),
            AtomValue::Uuid(v) => v.hyphenated().to_string(),
            AtomValue::Date(v) => v.format("%Y-%m-%d").to_string(),
            AtomValue::DateTime(v) => v.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            AtomValue::DateTimeOffset(v) => v.to_rfc3339(),
            AtomValue::Time(v) => v.format("%H:%M:%S%.f").to_string(),
            AtomValue::TimeSpan(v) => format_time_span(v),
        }
    }
}

impl fmt::Display for AtomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomValue::String(s) => write!(f, "{:?}", s),
            AtomValue::Char(c) => write!(f, "'{}'", c),
            AtomValue::Uuid(_)
            | AtomValue::Date(_)
            | AtomValue::DateTime(_)
            | AtomValue::DateTimeOffset(_)
            | AtomValue::Time(_)
            | AtomValue::TimeSpan(_) => write!(f, "'{}'", self.to_canonical_string()),
            _ => write!(f, "{}", self.to_canonical_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_reports_its_category() {
        assert_eq!(AtomValue::Int32(5).category(), AtomicCategory::Int32);
        assert_eq!(
            AtomValue::String("x".into()).category(),
            AtomicCategory::String
        );
        assert_eq!(
            AtomValue::TimeSpan(TimeDelta::seconds(3)).category(),
            AtomicCategory::TimeSpan
        );
    }

    #[test]
    fn test_compare_same_category() {
        assert_eq!(
            AtomValue::Int64(1).compare(&AtomValue::Int64(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            AtomValue::Boolean(true).compare(&AtomValue::Boolean(false)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_compare_across_categories_is_unordered() {
        assert_eq!(AtomValue::Int32(1).compare(&AtomValue::Int64(1)), None);
        assert_eq!(
            AtomValue::String("1".into()).compare(&AtomValue::Int32(1)),
            None
        );
    }

    #[test]
    fn test_nan_is_unordered() {
        assert_eq!(
            AtomValue::Float64(f64::NAN).compare(&AtomValue::Float64(1.0)),
            None
        );
    }

    #[test]
    fn test_category_classes() {
        assert!(AtomicCategory::UInt16.is_integer());
        assert!(AtomicCategory::Decimal.is_numeric());
        assert!(!AtomicCategory::Decimal.is_integer());
        assert!(AtomicCategory::TimeSpan.is_temporal());
        assert!(!AtomicCategory::Uuid.is_temporal());
    }

    #[test]
    fn test_display_quotes_text_like_values() {
        assert_eq!(AtomValue::String("X".into()).to_string(), "\"X\"");
        assert_eq!(AtomValue::Int32(30).to_string(), "30");
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(AtomValue::Date(date).to_string(), "'2024-02-29'");
    }
}
