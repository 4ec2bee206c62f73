//! Reflection capability
//!
//! The engine never inspects Rust types directly. It consumes two views:
//!
//! - a static descriptor ([`TypeInfo`]) enumerating named, typed,
//!   optionally nullable fields plus ignore markers per type and field
//! - a runtime accessor ([`Record`]) returning a field's current value
//!
//! Both are generated for user types by [`impl_record!`] and
//! [`impl_filter_enum!`].
//!
//! [`impl_record!`]: crate::impl_record
//! [`impl_filter_enum!`]: crate::impl_filter_enum

mod macros;
mod primitives;
mod types;

pub use types::{FieldInfo, FieldValue, IntoFieldValue, Record, Reflect, TypeInfo, TypeKind};
