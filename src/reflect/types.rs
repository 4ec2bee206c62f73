//! Type descriptors and runtime field access

use std::any::TypeId;
use std::fmt;

use crate::model::{AtomValue, AtomicCategory, TypeShape};

/// Structural kind of a described type.
///
/// Nested descriptors are produced lazily so that self-referential
/// types can be described without infinite recursion.
#[derive(Clone, Copy)]
pub enum TypeKind {
    /// Primitive of one category
    Atomic(AtomicCategory),
    /// Closed set of declared value names, in declaration order
    Enumeration(&'static [&'static str]),
    /// Sequence of a single element type
    Collection(fn() -> TypeInfo),
    /// Named sub-fields, in declaration order
    Composite(fn() -> Vec<FieldInfo>),
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Atomic(category) => write!(f, "Atomic({:?})", category),
            TypeKind::Enumeration(names) => write!(f, "Enumeration({:?})", names),
            TypeKind::Collection(element) => write!(f, "Collection({})", element().name),
            TypeKind::Composite(_) => write!(f, "Composite"),
        }
    }
}

/// Descriptor of a type the engine can introspect
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// Short type name
    pub name: &'static str,
    /// Identity of the described Rust type
    pub id: TypeId,
    /// Whether values of this type may be absent
    pub nullable: bool,
    /// Whether the type carries the ignore marker
    pub ignored: bool,
    /// Structural kind
    pub kind: TypeKind,
}

impl TypeInfo {
    /// Describes an atomic type
    pub fn atomic<T: 'static>(name: &'static str, category: AtomicCategory) -> Self {
        Self {
            name,
            id: TypeId::of::<T>(),
            nullable: false,
            ignored: false,
            kind: TypeKind::Atomic(category),
        }
    }

    /// Describes an enumeration
    pub fn enumeration<T: 'static>(
        name: &'static str,
        ignored: bool,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            id: TypeId::of::<T>(),
            nullable: false,
            ignored,
            kind: TypeKind::Enumeration(values),
        }
    }

    /// Describes a collection of `element`
    pub fn collection<T: 'static>(name: &'static str, element: fn() -> TypeInfo) -> Self {
        Self {
            name,
            id: TypeId::of::<T>(),
            nullable: false,
            ignored: false,
            kind: TypeKind::Collection(element),
        }
    }

    /// Describes a composite type
    pub fn composite<T: 'static>(
        name: &'static str,
        ignored: bool,
        fields: fn() -> Vec<FieldInfo>,
    ) -> Self {
        Self {
            name,
            id: TypeId::of::<T>(),
            nullable: false,
            ignored,
            kind: TypeKind::Composite(fields),
        }
    }

    /// Returns the shape classification of this type
    pub fn shape(&self) -> TypeShape {
        match self.kind {
            TypeKind::Atomic(category) => TypeShape::Atomic(category),
            TypeKind::Enumeration(_) => TypeShape::Enumeration,
            TypeKind::Collection(_) => TypeShape::Collection,
            TypeKind::Composite(_) => TypeShape::Composite,
        }
    }

    /// Returns the atomic category, if atomic
    pub fn category(&self) -> Option<AtomicCategory> {
        self.shape().category()
    }

    /// Returns the declared enum value names, if an enumeration
    pub fn enum_values(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            TypeKind::Enumeration(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the element descriptor, if a collection
    pub fn element(&self) -> Option<TypeInfo> {
        match self.kind {
            TypeKind::Collection(element) => Some(element()),
            _ => None,
        }
    }

    /// Returns the field descriptors, if composite
    pub fn fields(&self) -> Option<Vec<FieldInfo>> {
        match self.kind {
            TypeKind::Composite(fields) => Some(fields()),
            _ => None,
        }
    }

    /// Looks up a field of a composite type by name
    pub fn field(&self, name: &str) -> Option<FieldInfo> {
        self.fields()?.into_iter().find(|f| f.name == name)
    }

    /// Returns the declared type name, including wrappers
    ///
    /// e.g. `Option<i32>`, `Vec<String>`, `Person`
    pub fn declared_name(&self) -> String {
        let base = match self.element() {
            Some(element) => format!("{}<{}>", self.name, element.declared_name()),
            None => self.name.to_string(),
        };
        if self.nullable {
            format!("Option<{}>", base)
        } else {
            base
        }
    }

    /// Returns a copy of this descriptor marked nullable
    pub fn into_nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }
}

/// Descriptor of one field of a composite type
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    /// Field name as exposed to filters
    pub name: &'static str,
    /// Whether the field carries the ignore marker
    pub ignored: bool,
    ty: fn() -> TypeInfo,
}

impl FieldInfo {
    /// Describes a field of type `T`
    pub fn new<T: Reflect>(name: &'static str, ignored: bool) -> Self {
        Self {
            name,
            ignored,
            ty: T::type_info,
        }
    }

    /// Returns the descriptor of the field's declared type
    pub fn type_info(&self) -> TypeInfo {
        (self.ty)()
    }
}

/// Static type introspection.
///
/// Implemented for all atomic native types, `Option<T>`, `Box<T>` and
/// `Vec<T>`; user types implement it through [`impl_record!`] and
/// [`impl_filter_enum!`].
///
/// [`impl_record!`]: crate::impl_record
/// [`impl_filter_enum!`]: crate::impl_filter_enum
pub trait Reflect: 'static {
    fn type_info() -> TypeInfo;
}

/// Runtime view of one field value of a record
#[derive(Clone)]
pub enum FieldValue<'a> {
    /// Absent value
    Null,
    /// Atomic value
    Atom(AtomValue),
    /// Enumeration value, by declared name
    Enum(&'static str),
    /// Nested composite value
    Record(&'a dyn Record),
    /// Collection, by element count
    Collection(usize),
}

impl<'a> FieldValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the atomic value, if any
    pub fn as_atom(&self) -> Option<&AtomValue> {
        match self {
            FieldValue::Atom(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "Null"),
            FieldValue::Atom(v) => write!(f, "Atom({:?})", v),
            FieldValue::Enum(name) => write!(f, "Enum({})", name),
            FieldValue::Record(_) => write!(f, "Record(..)"),
            FieldValue::Collection(len) => write!(f, "Collection(len={})", len),
        }
    }
}

/// Runtime field access on a composite value
pub trait Record {
    /// Returns the value of the named field, or `None` if no such field exists
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Conversion of a native value into its runtime field view
pub trait IntoFieldValue {
    fn to_field_value(&self) -> FieldValue<'_>;
}
