//! Predicate expression trees
//!
//! An [`Expr`] is the inspectable form of a compiled filter. It can be
//! evaluated against any [`Record`] or translated by a query provider.
//!
//! Evaluation uses lifted-null semantics: a null operand never satisfies
//! a comparison, except that it always differs from a non-null value.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::model::AtomValue;
use crate::reflect::{FieldValue, Record};

/// A resolved field path of one or two segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath {
    head: &'static str,
    tail: Option<&'static str>,
}

impl FieldPath {
    pub fn direct(field: &'static str) -> Self {
        Self {
            head: field,
            tail: None,
        }
    }

    pub fn nested(field: &'static str, sub_field: &'static str) -> Self {
        Self {
            head: field,
            tail: Some(sub_field),
        }
    }

    pub fn head(&self) -> &'static str {
        self.head
    }

    pub fn tail(&self) -> Option<&'static str> {
        self.tail
    }

    /// Reads the value at this path.
    ///
    /// A missing field or a null intermediate object reads as null.
    pub fn resolve<'a>(&self, record: &'a dyn Record) -> FieldValue<'a> {
        let value = match record.field(self.head) {
            Some(value) => value,
            None => return FieldValue::Null,
        };
        match self.tail {
            None => value,
            Some(tail) => match value {
                FieldValue::Record(inner) => inner.field(tail).unwrap_or(FieldValue::Null),
                _ => FieldValue::Null,
            },
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tail {
            Some(tail) => write!(f, "{}.{}", self.head, tail),
            None => write!(f, "{}", self.head),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Returns true if `ordering` (left compared to right) satisfies this operator
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Atom(AtomValue),
    /// Enumeration value, by declared name
    Enum(&'static str),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Atom(value) => write!(f, "{}", value),
            Operand::Enum(name) => write!(f, "{}", name),
        }
    }
}

/// Compiled predicate expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IsNull(FieldPath),
    IsNotNull(FieldPath),
    Compare {
        path: FieldPath,
        op: CompareOp,
        value: Operand,
    },
    /// Substring test on a string field
    Contains { path: FieldPath, needle: String },
    /// Element-count test on a collection field
    Count {
        path: FieldPath,
        op: CompareOp,
        count: usize,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Evaluates the expression against one record
    pub fn evaluate(&self, record: &dyn Record) -> bool {
        match self {
            Expr::IsNull(path) => path.resolve(record).is_null(),
            Expr::IsNotNull(path) => !path.resolve(record).is_null(),
            Expr::Compare { path, op, value } => compare(&path.resolve(record), *op, value),
            Expr::Contains { path, needle } => match path.resolve(record) {
                FieldValue::Atom(AtomValue::String(s)) => s.contains(needle.as_str()),
                _ => false,
            },
            Expr::Count { path, op, count } => match path.resolve(record) {
                FieldValue::Collection(len) => op.holds(len.cmp(count)),
                _ => false,
            },
            Expr::And(left, right) => left.evaluate(record) && right.evaluate(record),
            Expr::Or(left, right) => left.evaluate(record) || right.evaluate(record),
        }
    }
}

fn compare(actual: &FieldValue<'_>, op: CompareOp, expected: &Operand) -> bool {
    let ordering = match (actual, expected) {
        (FieldValue::Atom(a), Operand::Atom(b)) => a.compare(b),
        (FieldValue::Enum(a), Operand::Enum(b)) => Some(a.cmp(b)),
        _ => None,
    };
    match ordering {
        Some(ordering) => op.holds(ordering),
        // Null or incomparable values differ from everything
        None => op == CompareOp::Ne,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::IsNull(path) => write!(f, "{} IS NULL", path),
            Expr::IsNotNull(path) => write!(f, "{} IS NOT NULL", path),
            Expr::Compare { path, op, value } => write!(f, "{} {} {}", path, op.symbol(), value),
            Expr::Contains { path, needle } => write!(f, "{} CONTAINS {:?}", path, needle),
            Expr::Count { path, op, count } => {
                write!(f, "COUNT({}) {} {}", path, op.symbol(), count)
            }
            Expr::And(left, right) => write!(f, "({} AND {})", left, right),
            Expr::Or(left, right) => write!(f, "({} OR {})", left, right),
        }
    }
}

/// A predicate over elements of type `T`
pub struct Predicate<T> {
    expr: Expr,
    _element: PhantomData<fn(&T) -> bool>,
}

impl<T: Record> Predicate<T> {
    /// Wraps an expression already resolved against `T`
    pub fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _element: PhantomData,
        }
    }

    pub fn matches(&self, item: &T) -> bool {
        self.expr.evaluate(item)
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn and(self, other: Predicate<T>) -> Predicate<T> {
        Predicate::from_expr(self.expr.and(other.expr))
    }

    pub fn or(self, other: Predicate<T>) -> Predicate<T> {
        Predicate::from_expr(self.expr.or(other.expr))
    }

    /// Converts into a boxed closure for sequence-filtering APIs
    pub fn into_fn(self) -> Box<dyn Fn(&T) -> bool + Send + Sync>
    where
        T: 'static,
    {
        let expr = self.expr;
        Box::new(move |item: &T| expr.evaluate(item))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _element: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.expr).finish()
    }
}

impl<T> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
