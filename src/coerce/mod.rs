//! Value coercion
//!
//! Converts untyped filter arguments into typed atoms of a given
//! category, or into one of an enumeration's declared names.

mod engine;
mod errors;
mod raw;
mod temporal;

pub use engine::{coerce, coerce_enum, coerce_json};
pub use errors::{CoercionError, CoercionErrorCode, CoercionResult};
pub use raw::RawValue;
pub use temporal::{
    format_time_span, parse_date, parse_date_time, parse_date_time_offset, parse_time,
    parse_time_span,
};
