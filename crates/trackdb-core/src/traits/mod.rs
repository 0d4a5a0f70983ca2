use crate::value::Value;
use std::fmt::Debug;

// ============================================================================
// ENTITY IDENTITY & SCHEMA
// ============================================================================

///
/// Path
/// Stable, fully qualified name of a stored type.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// EntityKind
///
/// A stored, queryable record. Entities expose their fields as `Value`s
/// so predicates and orderings never depend on the concrete type.
///

pub trait EntityKind: Path + FieldValues + Clone {
    type Key: Copy + Debug + Ord;

    /// Field name of the primary key.
    const PRIMARY_KEY: &'static str;

    fn key(&self) -> Self::Key;
}

// ============================================================================
// ENTITY VALUES
// ============================================================================

///
/// FieldValues
///
/// Read access to an entity's fields by name.
/// Returns `None` when the entity has no such field; a present field whose
/// content is absent is reported as `Value::Null`.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// FieldValue
///
/// Conversion of a typed field (or filter literal) into a runtime `Value`.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl FieldValue for u32 {
    fn to_value(&self) -> Value {
        Value::Uint(u64::from(*self))
    }
}

impl FieldValue for u64 {
    fn to_value(&self) -> Value {
        Value::Uint(*self)
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FieldValue for crate::types::Timestamp {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}
