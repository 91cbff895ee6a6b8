//! In-process evaluation of translated queries.
//!
//! Mirrors the comparison rules of the SQL the libSQL store emits: missing
//! and `null` fields are equal to `null`, booleans compare as 0/1, ordered
//! comparisons only hold between values of the same type, and sorting ranks
//! null below numbers below strings. Arrays and objects never equal or compare
//! to an operand; they sort after strings and tie with each other.

use std::cmp::Ordering;

use serde_json::Value;

use catalog_core::query::{Condition, Direction, FieldPath, Predicate, Sort};

use super::Document;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Scalar<'a> {
    Null,
    Number(f64),
    Text(&'a str),
    Composite,
}

impl Scalar<'_> {
    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Composite => 3,
        }
    }
}

fn scalar(value: Option<&Value>) -> Scalar<'_> {
    match value {
        None | Some(Value::Null) => Scalar::Null,
        Some(Value::Bool(b)) => Scalar::Number(if *b { 1.0 } else { 0.0 }),
        Some(Value::Number(n)) => n.as_f64().map_or(Scalar::Composite, Scalar::Number),
        Some(Value::String(s)) => Scalar::Text(s),
        Some(Value::Array(_) | Value::Object(_)) => Scalar::Composite,
    }
}

/// Resolve a dotted path inside a document.
pub(super) fn lookup<'a>(document: &'a Document, field: &FieldPath) -> Option<&'a Value> {
    let mut segments = field.segments();
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn equals(field: Option<&Value>, operand: &Value) -> bool {
    match (scalar(field), scalar(Some(operand))) {
        (Scalar::Null, Scalar::Null) => true,
        (Scalar::Number(a), Scalar::Number(b)) => a == b,
        (Scalar::Text(a), Scalar::Text(b)) => a == b,
        _ => false,
    }
}

fn compare(field: Option<&Value>, operand: &Value) -> Option<Ordering> {
    match (scalar(field), scalar(Some(operand))) {
        (Scalar::Number(a), Scalar::Number(b)) => a.partial_cmp(&b),
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Whether a document satisfies every predicate.
pub(super) fn matches_all(document: &Document, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| matches(document, p))
}

fn matches(document: &Document, predicate: &Predicate) -> bool {
    let field = lookup(document, &predicate.field);
    match &predicate.condition {
        Condition::Eq(v) => equals(field, v),
        Condition::Ne(v) => !equals(field, v),
        Condition::Gt(v) => compare(field, v) == Some(Ordering::Greater),
        Condition::Gte(v) => matches!(compare(field, v), Some(Ordering::Greater | Ordering::Equal)),
        Condition::Lt(v) => compare(field, v) == Some(Ordering::Less),
        Condition::Lte(v) => matches!(compare(field, v), Some(Ordering::Less | Ordering::Equal)),
        Condition::In(vs) => vs.iter().any(|v| equals(field, v)),
        Condition::Nin(vs) => !vs.iter().any(|v| equals(field, v)),
        Condition::Exists(expected) => field.is_some() == *expected,
    }
}

/// Order two documents by the sort field; ties are left to the caller.
pub(super) fn sort_order(a: &Document, b: &Document, sort: &Sort) -> Ordering {
    let left = scalar(lookup(a, &sort.field));
    let right = scalar(lookup(b, &sort.field));
    let ordering = match (left, right) {
        (Scalar::Number(x), Scalar::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Scalar::Text(x), Scalar::Text(y)) => x.cmp(y),
        _ => left.rank().cmp(&right.rank()),
    };
    match sort.direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}
