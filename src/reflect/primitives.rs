//! Reflection for native atomic types and standard wrappers

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{FieldValue, IntoFieldValue, Reflect, TypeInfo};
use crate::model::{AtomValue, AtomicCategory};

macro_rules! atomic {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::atomic::<$ty>($name, AtomicCategory::$variant)
                }
            }

            impl IntoFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Atom(AtomValue::$variant(self.clone()))
                }
            }
        )*
    };
}

atomic! {
    char => Char, "char";
    bool => Boolean, "bool";
    i8 => Int8, "i8";
    i16 => Int16, "i16";
    i32 => Int32, "i32";
    i64 => Int64, "i64";
    u8 => UInt8, "u8";
    u16 => UInt16, "u16";
    u32 => UInt32, "u32";
    u64 => UInt64, "u64";
    f32 => Float32, "f32";
    f64 => Float64, "f64";
    Decimal => Decimal, "Decimal";
    String => String, "String";
    Uuid => Uuid, "Uuid";
    NaiveDate => Date, "NaiveDate";
    NaiveDateTime => DateTime, "NaiveDateTime";
    DateTime<FixedOffset> => DateTimeOffset, "DateTime<FixedOffset>";
    NaiveTime => Time, "NaiveTime";
    TimeDelta => TimeSpan, "TimeDelta";
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo {
            id: std::any::TypeId::of::<Option<T>>(),
            ..T::type_info().into_nullable()
        }
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

// Boxes are transparent: a `Box<T>` field describes and reads as `T`.
impl<T: Reflect> Reflect for Box<T> {
    fn type_info() -> TypeInfo {
        T::type_info()
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Box<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        self.as_ref().to_field_value()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::collection::<Vec<T>>("Vec", T::type_info)
    }
}

impl<T> IntoFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue<'_> {
        FieldValue::Collection(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeShape;

    #[test]
    fn test_atomic_descriptors() {
        let info = i32::type_info();
        assert_eq!(info.shape(), TypeShape::Atomic(AtomicCategory::Int32));
        assert!(!info.nullable);

        let info = <DateTime<FixedOffset>>::type_info();
        assert_eq!(info.category(), Some(AtomicCategory::DateTimeOffset));
    }

    #[test]
    fn test_option_is_nullable_with_own_identity() {
        let info = <Option<String>>::type_info();
        assert!(info.nullable);
        assert_eq!(info.category(), Some(AtomicCategory::String));
        assert_ne!(info.id, String::type_info().id);
        assert_eq!(info.declared_name(), "Option<String>");
    }

    #[test]
    fn test_vec_is_collection() {
        let info = <Vec<u8>>::type_info();
        assert_eq!(info.shape(), TypeShape::Collection);
        assert_eq!(info.element().unwrap().category(), Some(AtomicCategory::UInt8));
        assert_eq!(info.declared_name(), "Vec<u8>");
    }

    #[test]
    fn test_field_values() {
        assert!(None::<i32>.to_field_value().is_null());
        assert_eq!(
            Some(5i32).to_field_value().as_atom(),
            Some(&AtomValue::Int32(5))
        );
        assert!(matches!(
            vec![1, 2, 3].to_field_value(),
            FieldValue::Collection(3)
        ));
    }
}
