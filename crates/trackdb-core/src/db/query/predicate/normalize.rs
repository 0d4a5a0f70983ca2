use crate::{
    db::query::predicate::{CompareOp, ComparePredicate, Predicate},
    value::Value,
};

///
/// Normalize a predicate into canonical form.
///
/// - nested `And`/`Or` are flattened
/// - `True` is dropped from conjunctions, `False` from disjunctions
/// - `False` short-circuits a conjunction, `True` a disjunction
/// - an empty conjunction is `True`, an empty disjunction is `False`
/// - a single-child `And`/`Or` collapses to the child
/// - double negation collapses
/// - children are sorted and deduplicated by a stable key
///
/// Normalization never changes which rows a predicate matches.
///
#[must_use]
pub fn normalize(predicate: &Predicate) -> Predicate {
    match predicate {
        Predicate::True => Predicate::True,
        Predicate::False => Predicate::False,
        Predicate::And(children) => normalize_and(children),
        Predicate::Or(children) => normalize_or(children),
        Predicate::Not(inner) => normalize_not(inner),
        Predicate::Compare(cmp) => Predicate::Compare(normalize_compare(cmp)),
        Predicate::TextContainsCi { field, value } => Predicate::TextContainsCi {
            field: field.clone(),
            value: value.clone(),
        },
    }
}

// Membership lists are order-insensitive; sort and dedup them so equal
// sets produce equal trees. Eq/Ne literals compare as a whole and are kept.
fn normalize_compare(cmp: &ComparePredicate) -> ComparePredicate {
    let value = match (&cmp.value, cmp.op) {
        (Value::List(items), CompareOp::In | CompareOp::NotIn | CompareOp::AnyIn) => {
            let mut items = items.clone();
            items.sort_by(crate::value::canonical_cmp);
            items.dedup();
            Value::List(items)
        }
        (other, _) => other.clone(),
    };

    ComparePredicate {
        field: cmp.field.clone(),
        op: cmp.op,
        value,
    }
}

fn normalize_not(inner: &Predicate) -> Predicate {
    match normalize(inner) {
        Predicate::True => Predicate::False,
        Predicate::False => Predicate::True,
        Predicate::Not(double) => *double,
        normalized => Predicate::Not(Box::new(normalized)),
    }
}

fn normalize_and(children: &[Predicate]) -> Predicate {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Predicate::True => {}
            Predicate::False => return Predicate::False,
            Predicate::And(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    finish_junction(out, Predicate::True, Predicate::And)
}

fn normalize_or(children: &[Predicate]) -> Predicate {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Predicate::False => {}
            Predicate::True => return Predicate::True,
            Predicate::Or(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    finish_junction(out, Predicate::False, Predicate::Or)
}

fn finish_junction(
    mut out: Vec<Predicate>,
    empty: Predicate,
    wrap: fn(Vec<Predicate>) -> Predicate,
) -> Predicate {
    out.sort_by_cached_key(sort_key);
    out.dedup();

    match out.len() {
        0 => empty,
        1 => out.pop().unwrap_or(empty),
        _ => wrap(out),
    }
}

fn sort_key(predicate: &Predicate) -> String {
    match predicate {
        Predicate::True => "00:true".to_string(),
        Predicate::False => "01:false".to_string(),
        Predicate::And(children) => junction_key("02:and[", children),
        Predicate::Or(children) => junction_key("03:or[", children),
        Predicate::Not(inner) => format!("04:not({})", sort_key(inner)),
        Predicate::Compare(ComparePredicate { field, op, value }) => {
            format!("05:cmp:{field}:{:02x}:{}", op.tag(), value_key(value))
        }
        Predicate::TextContainsCi { field, value } => {
            format!("06:text_contains_ci:{field}:{}", value_key(value))
        }
    }
}

fn junction_key(prefix: &str, children: &[Predicate]) -> String {
    let mut key = String::from(prefix);
    for child in children {
        key.push_str(&sort_key(child));
        key.push(';');
    }
    key.push(']');
    key
}

fn value_key(value: &Value) -> String {
    match value {
        Value::Bool(v) => format!("bool:{v}"),
        Value::Enum(v) => format!("enum:{}:{}", v.rank, v.variant),
        Value::Float64(v) => format!("float64:{}", v.get().to_bits()),
        Value::Int(v) => format!("int:{v}"),
        Value::List(items) => {
            let mut out = String::from("list[");
            for item in items {
                out.push_str(&value_key(item));
                out.push(',');
            }
            out.push(']');
            out
        }
        Value::Null => "null".to_string(),
        Value::Text(v) => format!("text:{v}"),
        Value::Timestamp(v) => format!("timestamp:{v}"),
        Value::Uint(v) => format!("uint:{v}"),
        Value::Ulid(v) => format!("ulid:{v}"),
    }
}
