use crate::value::Value;
use std::cmp::Ordering;

// Variant rank used when two values of different kinds are compared.
// Null ranks last so absent optional fields sort after present ones in
// ascending order and before them in descending order.
const fn tag_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Enum(_) => 1,
        Value::Float64(_) => 2,
        Value::Int(_) => 3,
        Value::List(_) => 4,
        Value::Text(_) => 5,
        Value::Timestamp(_) => 6,
        Value::Uint(_) => 7,
        Value::Ulid(_) => 8,
        Value::Null => 9,
    }
}

///
/// Total ordering over values, used for sorting rows.
///
/// Values of the same kind compare naturally (enums by declaration rank);
/// values of different kinds compare by kind.
///
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Enum(a), Value::Enum(b)) => a
            .rank
            .cmp(&b.rank)
            .then_with(|| a.variant.cmp(&b.variant)),
        (Value::Float64(a), Value::Float64(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => cmp_lists(a, b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Ulid(a), Value::Ulid(b)) => a.cmp(b),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => tag_rank(left).cmp(&tag_rank(right)),
    }
}

fn cmp_lists(left: &[Value], right: &[Value]) -> Ordering {
    for (a, b) in left.iter().zip(right) {
        let ordering = canonical_cmp(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}
