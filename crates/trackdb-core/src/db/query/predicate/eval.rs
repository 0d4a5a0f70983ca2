use crate::{
    db::query::predicate::{CompareOp, ComparePredicate, Predicate},
    traits::FieldValues,
    value::{TextMode, Value},
};

///
/// FieldPresence
///
/// Result of attempting to read a field from a row during predicate
/// evaluation. This distinguishes between a missing field and a
/// present field whose value may be `Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    /// Field exists and has a value (including `Value::Null`).
    Present(Value),
    /// Field is not present on the row.
    Missing,
}

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples predicate evaluation from concrete entity types.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence;
}

impl<T: FieldValues> Row for T {
    fn field(&self, name: &str) -> FieldPresence {
        match self.get_value(name) {
            Some(value) => FieldPresence::Present(value),
            None => FieldPresence::Missing,
        }
    }
}

// Evaluate a field predicate only when the field is present.
fn on_present<R: Row + ?Sized>(row: &R, field: &str, f: impl FnOnce(&Value) -> bool) -> bool {
    match row.field(field) {
        FieldPresence::Present(value) => f(&value),
        FieldPresence::Missing => false,
    }
}

///
/// Evaluate a predicate against a single row.
///
/// Pure runtime evaluation: no schema access, no store access.
/// Comparisons against a missing field, or between incompatible values,
/// evaluate to `false`.
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,

        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Not(inner) => !eval(row, inner),

        Predicate::Compare(cmp) => eval_compare(row, cmp),

        Predicate::TextContainsCi { field, value } => on_present(row, field, |actual| {
            // NOTE: Non-text comparisons are treated as non-matches.
            actual.text_contains(value, TextMode::Ci).unwrap_or(false)
        }),
    }
}

fn eval_compare<R: Row + ?Sized>(row: &R, cmp: &ComparePredicate) -> bool {
    let ComparePredicate { field, op, value } = cmp;

    let FieldPresence::Present(actual) = row.field(field) else {
        return false;
    };

    match op {
        CompareOp::Eq => actual == *value,
        CompareOp::Ne => actual != *value,

        // Null never matches a membership list, in either polarity.
        CompareOp::In => !actual.is_null() && actual.in_list(value).unwrap_or(false),
        CompareOp::NotIn => !actual.is_null() && actual.in_list(value).is_some_and(|hit| !hit),

        CompareOp::AnyIn => actual.any_in(value).unwrap_or(false),
    }
}
