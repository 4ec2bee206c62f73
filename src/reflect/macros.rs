//! Declarative implementations of the reflection traits for user types

/// Implements [`Reflect`], [`Record`] and [`IntoFieldValue`] for a struct.
///
/// Only the listed fields are visible to the engine. A field may be exposed
/// under a different name with `as "name"`. The `#[ignore]` marker may be
/// placed on the type or on individual fields.
///
/// ```ignore
/// impl_record! {
///     Person {
///         age: i32,
///         external_id as "externalId": Option<String>,
///         #[ignore] password_hash: String,
///     }
/// }
/// ```
///
/// [`Reflect`]: crate::reflect::Reflect
/// [`Record`]: crate::reflect::Record
/// [`IntoFieldValue`]: crate::reflect::IntoFieldValue
#[macro_export]
macro_rules! impl_record {
    (@ignored ignore) => { true };
    (@ignored) => { false };
    (@name $field:ident) => { stringify!($field) };
    (@name $field:ident $alias:literal) => { $alias };
    (
        $(#[$type_marker:ident])?
        $ty:ident {
            $( $(#[$field_marker:ident])? $field:ident $(as $alias:literal)? : $fty:ty ),* $(,)?
        }
    ) => {
        impl $crate::reflect::Reflect for $ty {
            fn type_info() -> $crate::reflect::TypeInfo {
                $crate::reflect::TypeInfo::composite::<$ty>(
                    stringify!($ty),
                    $crate::impl_record!(@ignored $($type_marker)?),
                    || {
                        vec![
                            $(
                                $crate::reflect::FieldInfo::new::<$fty>(
                                    $crate::impl_record!(@name $field $($alias)?),
                                    $crate::impl_record!(@ignored $($field_marker)?),
                                ),
                            )*
                        ]
                    },
                )
            }
        }

        impl $crate::reflect::Record for $ty {
            fn field(&self, name: &str) -> Option<$crate::reflect::FieldValue<'_>> {
                $(
                    if name == $crate::impl_record!(@name $field $($alias)?) {
                        return Some($crate::reflect::IntoFieldValue::to_field_value(&self.$field));
                    }
                )*
                None
            }
        }

        impl $crate::reflect::IntoFieldValue for $ty {
            fn to_field_value(&self) -> $crate::reflect::FieldValue<'_> {
                $crate::reflect::FieldValue::Record(self)
            }
        }
    };
}

/// Implements [`Reflect`] and [`IntoFieldValue`] for a fieldless enum.
///
/// Values are exposed by variant name, in declaration order.
///
/// [`Reflect`]: crate::reflect::Reflect
/// [`IntoFieldValue`]: crate::reflect::IntoFieldValue
#[macro_export]
macro_rules! impl_filter_enum {
    (
        $(#[$type_marker:ident])?
        $ty:ident { $($variant:ident),* $(,)? }
    ) => {
        impl $crate::reflect::Reflect for $ty {
            fn type_info() -> $crate::reflect::TypeInfo {
                const VALUES: &[&str] = &[$(stringify!($variant)),*];
                $crate::reflect::TypeInfo::enumeration::<$ty>(
                    stringify!($ty),
                    $crate::impl_record!(@ignored $($type_marker)?),
                    VALUES,
                )
            }
        }

        impl $crate::reflect::IntoFieldValue for $ty {
            fn to_field_value(&self) -> $crate::reflect::FieldValue<'_> {
                match self {
                    $( $ty::$variant => $crate::reflect::FieldValue::Enum(stringify!($variant)), )*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::model::{AtomValue, TypeShape};
    use crate::reflect::{FieldValue, IntoFieldValue, Record, Reflect};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Color {
        Red,
        Green,
    }

    crate::impl_filter_enum!(Color { Red, Green });

    struct Swatch {
        code: String,
        color: Color,
        secret: u64,
    }

    crate::impl_record! {
        #[ignore]
        Swatch {
            code as "swatchCode": String,
            color: Color,
            #[ignore] secret: u64,
        }
    }

    #[test]
    fn test_record_descriptor() {
        let info = Swatch::type_info();
        assert_eq!(info.name, "Swatch");
        assert!(info.ignored);
        assert_eq!(info.shape(), TypeShape::Composite);

        let fields = info.fields().unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["swatchCode", "color", "secret"]);
        assert!(!fields[0].ignored);
        assert!(fields[2].ignored);
    }

    #[test]
    fn test_record_field_access() {
        let swatch = Swatch {
            code: "S-1".into(),
            color: Color::Green,
            secret: 7,
        };

        assert_eq!(
            swatch.field("swatchCode").unwrap().as_atom(),
            Some(&AtomValue::String("S-1".into()))
        );
        assert!(matches!(
            swatch.field("color"),
            Some(FieldValue::Enum("Green"))
        ));
        assert!(swatch.field("secret").is_some());
        assert!(swatch.field("code").is_none());
    }

    #[test]
    fn test_enum_descriptor() {
        let info = Color::type_info();
        assert_eq!(info.enum_values(), Some(&["Red", "Green"][..]));
        assert!(matches!(Color::Red.to_field_value(), FieldValue::Enum("Red")));
    }
}
