use crate::value::Value;
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Pure, schema-agnostic representation of query predicates.
/// This layer contains no execution semantics; any store can interpret
/// or compile the tree. In-process interpretation lives in `eval`.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Ne = 0x02,
    In = 0x03,
    NotIn = 0x04,
    /// Collection field shares at least one element with the literal list.
    AnyIn = 0x05,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    TextContainsCi { field: String, value: Value },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Eq, value))
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: Value) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Ne, value))
    }

    #[must_use]
    pub fn in_(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Compare(ComparePredicate::new(
            field,
            CompareOp::In,
            Value::List(values),
        ))
    }

    #[must_use]
    pub fn not_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Compare(ComparePredicate::new(
            field,
            CompareOp::NotIn,
            Value::List(values),
        ))
    }

    #[must_use]
    pub fn any_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Compare(ComparePredicate::new(
            field,
            CompareOp::AnyIn,
            Value::List(values),
        ))
    }

    #[must_use]
    pub fn text_contains_ci(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::TextContainsCi {
            field: field.into(),
            value: Value::Text(needle.into()),
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::And(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::Or(vec![self.clone(), rhs.clone()])
    }
}
