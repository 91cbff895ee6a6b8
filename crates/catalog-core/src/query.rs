//! Query translation: transport-neutral [`QuerySpec`] into store primitives.
//!
//! Translation is pure and never touches the store. Every malformed spec is
//! rejected here with a `QueryError`, so the store only ever sees filters,
//! sorts, and projections that passed validation.
//!
//! Filter syntax follows the document-store convention: a bare scalar means
//! equality, an object of `$`-prefixed operators is a conjunction of
//! comparisons on the same field. Operands of filters on the record key
//! (`id` or `_id`) pass through the identifier normalizer.
//!
//! ```text
//! {"title": "Core Rules"}                      title == "Core Rules"
//! {"year": {"$gte": 1990, "$lt": 2000}}        1990 <= year < 2000
//! {"status": {"$in": ["active", "draft"]}}
//! {"deletedAt": {"$exists": false}}
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::QueryError;
use crate::ids;

/// Transport-neutral description of a collection request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    /// Field name to match condition.
    pub filter: BTreeMap<String, Value>,
    /// Single sort field; a leading `-` sorts descending.
    pub sort: Option<String>,
    /// Fields to include; empty means all.
    pub projection: BTreeSet<String>,
    /// Zero-based offset into the filtered, sorted result set.
    pub start: u64,
    /// Maximum number of records; zero means the store's default page size.
    pub limit: u32,
}

impl QuerySpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter condition for `field`.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, condition: Value) -> Self {
        self.filter.insert(field.into(), condition);
        self
    }

    #[must_use]
    pub fn sort(mut self, key: impl Into<String>) -> Self {
        self.sort = Some(key.into());
        self
    }

    #[must_use]
    pub fn project(mut self, field: impl Into<String>) -> Self {
        self.projection.insert(field.into());
        self
    }

    #[must_use]
    pub const fn window(mut self, start: u64, limit: u32) -> Self {
        self.start = start;
        self.limit = limit;
        self
    }
}

/// A validated, dot-separated field path. `_id` is folded into `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    /// Validate a field name.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidField` unless every dot-separated segment
    /// matches `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        if raw == "_id" {
            return Ok(Self("id".to_string()));
        }
        let valid = !raw.is_empty() && raw.split('.').all(is_valid_segment);
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(QueryError::InvalidField(raw.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// First segment; projection operates on top-level fields.
    #[must_use]
    pub fn root(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Whether the path addresses the record key.
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.0 == "id"
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A single store-native comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    Exists(bool),
}

impl Condition {
    /// Operator name as written in a filter expression.
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        match self {
            Self::Eq(_) => "$eq",
            Self::Ne(_) => "$ne",
            Self::Gt(_) => "$gt",
            Self::Gte(_) => "$gte",
            Self::Lt(_) => "$lt",
            Self::Lte(_) => "$lte",
            Self::In(_) => "$in",
            Self::Nin(_) => "$nin",
            Self::Exists(_) => "$exists",
        }
    }
}

/// One field condition within a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: FieldPath,
    pub condition: Condition,
}

/// Conjunction of predicates, in a deterministic field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// The match-everything filter.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Add a predicate.
    #[must_use]
    pub fn and(mut self, field: FieldPath, condition: Condition) -> Self {
        self.predicates.push(Predicate { field, condition });
        self
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Combine with a caller-imposed base filter.
    ///
    /// Predicates from `base` replace this filter's predicates on the same
    /// field, then the remaining predicates of both sides are conjoined.
    #[must_use]
    pub fn restricted_by(self, base: Self) -> Self {
        let base_fields: BTreeSet<&FieldPath> =
            base.predicates.iter().map(|p| &p.field).collect();
        let mut predicates: Vec<Predicate> = self
            .predicates
            .iter()
            .filter(|p| !base_fields.contains(&p.field))
            .cloned()
            .collect();
        predicates.extend(base.predicates.iter().cloned());
        Self { predicates }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: FieldPath,
    pub direction: Direction,
}

/// Fields to return; empty means every field. The key is always returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: BTreeSet<FieldPath>,
}

impl Projection {
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldPath> {
        self.fields.iter()
    }

    /// Strip a document down to the projected top-level fields plus `id`.
    pub fn apply(&self, document: &mut Map<String, Value>) {
        if self.is_all() {
            return;
        }
        let keep: BTreeSet<&str> = self.fields.iter().map(FieldPath::root).collect();
        document.retain(|key, _| key == "id" || keep.contains(key.as_str()));
    }
}

/// Pagination window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    /// `None` selects the store's default page size.
    pub limit: Option<NonZeroU32>,
}

impl Page {
    /// Resolve the effective limit against the store's page-size policy.
    #[must_use]
    pub fn effective_limit(&self, default_size: u32, max_size: u32) -> u32 {
        self.limit.map_or(default_size, NonZeroU32::get).min(max_size)
    }
}

/// Store-native query arguments produced by [`translate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreQuery {
    pub filter: Filter,
    pub sort: Option<Sort>,
    pub projection: Projection,
    pub page: Page,
}

impl StoreQuery {
    /// Flat attribute list describing the query, for span annotation.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let filter = self
            .filter
            .predicates()
            .iter()
            .map(|p| format!("{}{}", p.field, p.condition.operator()))
            .collect::<Vec<_>>()
            .join(",");
        let sort = self.sort.as_ref().map_or_else(String::new, |s| match s.direction {
            Direction::Ascending => s.field.to_string(),
            Direction::Descending => format!("-{}", s.field),
        });
        let projection = self
            .projection
            .fields()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("filter", filter),
            ("sort", sort),
            ("projection", projection),
            ("start", self.page.offset.to_string()),
            (
                "limit",
                self.page.limit.map_or(0, NonZeroU32::get).to_string(),
            ),
        ]
    }
}

/// Translate a [`QuerySpec`] into store-native query arguments.
///
/// # Errors
///
/// Returns `QueryError` for malformed field names, unknown operators,
/// operands of the wrong shape, or an invalid sort key.
pub fn translate(spec: &QuerySpec) -> Result<StoreQuery, QueryError> {
    let mut filter = Filter::all();
    for (raw_field, condition) in &spec.filter {
        let field = FieldPath::parse(raw_field)?;
        for condition in parse_conditions(raw_field, condition)? {
            let condition = if field.is_id() {
                normalize_key_condition(raw_field, condition)?
            } else {
                condition
            };
            filter = filter.and(field.clone(), condition);
        }
    }

    let sort = spec.sort.as_deref().map(parse_sort).transpose()?;

    let fields = spec
        .projection
        .iter()
        .map(|f| FieldPath::parse(f))
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(StoreQuery {
        filter,
        sort,
        projection: Projection { fields },
        page: Page {
            offset: spec.start,
            limit: NonZeroU32::new(spec.limit),
        },
    })
}

fn parse_sort(raw: &str) -> Result<Sort, QueryError> {
    let (direction, field) = match raw.strip_prefix('-') {
        Some(rest) => (Direction::Descending, rest),
        None => (Direction::Ascending, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let field = FieldPath::parse(field).map_err(|_| QueryError::InvalidSort(raw.to_string()))?;
    Ok(Sort { field, direction })
}

fn parse_conditions(field: &str, raw: &Value) -> Result<Vec<Condition>, QueryError> {
    match raw {
        Value::Object(ops) => {
            if ops.is_empty() {
                return Err(QueryError::InvalidOperand {
                    field: field.to_string(),
                    op: "{}".to_string(),
                    reason: "empty condition object".to_string(),
                });
            }
            ops.iter()
                .map(|(op, operand)| parse_operator(field, op, operand))
                .collect()
        }
        Value::Array(_) => Err(QueryError::InvalidOperand {
            field: field.to_string(),
            op: "$eq".to_string(),
            reason: "bare arrays are not a condition; use $in".to_string(),
        }),
        scalar => Ok(vec![Condition::Eq(scalar.clone())]),
    }
}

fn parse_operator(field: &str, op: &str, operand: &Value) -> Result<Condition, QueryError> {
    let invalid = |reason: &str| QueryError::InvalidOperand {
        field: field.to_string(),
        op: op.to_string(),
        reason: reason.to_string(),
    };
    let scalar = || {
        if is_scalar(operand) {
            Ok(operand.clone())
        } else {
            Err(invalid("expected a scalar"))
        }
    };
    let ordered = || match operand {
        Value::Number(_) | Value::String(_) => Ok(operand.clone()),
        _ => Err(invalid("expected a number or string")),
    };
    let list = || match operand {
        Value::Array(items) if items.iter().all(is_scalar) => Ok(items.clone()),
        Value::Array(_) => Err(invalid("expected an array of scalars")),
        _ => Err(invalid("expected an array")),
    };

    match op {
        "$eq" => scalar().map(Condition::Eq),
        "$ne" => scalar().map(Condition::Ne),
        "$gt" => ordered().map(Condition::Gt),
        "$gte" => ordered().map(Condition::Gte),
        "$lt" => ordered().map(Condition::Lt),
        "$lte" => ordered().map(Condition::Lte),
        "$in" => list().map(Condition::In),
        "$nin" => list().map(Condition::Nin),
        "$exists" => operand
            .as_bool()
            .map(Condition::Exists)
            .ok_or_else(|| invalid("expected a boolean")),
        _ => Err(QueryError::UnknownOperator {
            field: field.to_string(),
            op: op.to_string(),
        }),
    }
}

/// Run key operands through the identifier normalizer so filters on `id`
/// compare against the stored lowercase form.
fn normalize_key_condition(field: &str, condition: Condition) -> Result<Condition, QueryError> {
    let op = condition.operator();
    let key = |operand: &Value| -> Result<Value, QueryError> {
        let Value::String(raw) = operand else {
            return Err(QueryError::InvalidOperand {
                field: field.to_string(),
                op: op.to_string(),
                reason: "expected an identifier string".to_string(),
            });
        };
        ids::normalize(raw)
            .map(|id| Value::String(id.to_hex()))
            .map_err(|source| QueryError::InvalidIdentifier {
                field: field.to_string(),
                op: op.to_string(),
                source,
            })
    };
    let keys = |operands: &[Value]| operands.iter().map(&key).collect::<Result<Vec<_>, _>>();

    match condition {
        Condition::Eq(v) => key(&v).map(Condition::Eq),
        Condition::Ne(v) => key(&v).map(Condition::Ne),
        Condition::In(vs) => keys(&vs).map(Condition::In),
        Condition::Nin(vs) => keys(&vs).map(Condition::Nin),
        Condition::Exists(flag) => Ok(Condition::Exists(flag)),
        Condition::Gt(_) | Condition::Gte(_) | Condition::Lt(_) | Condition::Lte(_) => {
            Err(QueryError::InvalidOperand {
                field: field.to_string(),
                op: op.to_string(),
                reason: "record keys have no order".to_string(),
            })
        }
    }
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn field(name: &str) -> FieldPath {
        FieldPath::parse(name).unwrap()
    }

    #[test]
    fn empty_spec_translates_to_match_all_default_page() {
        let query = translate(&QuerySpec::new()).unwrap();
        assert!(query.filter.is_empty());
        assert!(query.sort.is_none());
        assert!(query.projection.is_all());
        assert_eq!(query.page, Page { offset: 0, limit: None });
    }

    #[test]
    fn scalar_means_equality() {
        let spec = QuerySpec::new().filter("title", json!("Core Rules"));
        let query = translate(&spec).unwrap();
        assert_eq!(
            query.filter.predicates(),
            &[Predicate {
                field: field("title"),
                condition: Condition::Eq(json!("Core Rules")),
            }]
        );
    }

    #[test]
    fn operator_object_yields_conjunction() {
        let spec = QuerySpec::new().filter("year", json!({"$gte": 1990, "$lt": 2000}));
        let query = translate(&spec).unwrap();
        let conditions: Vec<_> = query
            .filter
            .predicates()
            .iter()
            .map(|p| p.condition.clone())
            .collect();
        assert_eq!(
            conditions,
            vec![Condition::Gte(json!(1990)), Condition::Lt(json!(2000))]
        );
    }

    #[test]
    fn underscore_id_folds_into_id() {
        let spec = QuerySpec::new().filter("_id", json!("65a1f0c2b3d4e5f601234567"));
        let query = translate(&spec).unwrap();
        assert!(query.filter.predicates()[0].field.is_id());
    }

    #[test]
    fn key_operands_are_normalized_to_lowercase() {
        let spec = QuerySpec::new()
            .filter("_id", json!({"$in": ["65A1F0C2B3D4E5F601234567"], "$ne": "65a1f0c2b3d4e5f6000000AA"}));
        let query = translate(&spec).unwrap();
        let conditions: Vec<_> = query
            .filter
            .predicates()
            .iter()
            .map(|p| p.condition.clone())
            .collect();
        assert_eq!(
            conditions,
            vec![
                Condition::In(vec![json!("65a1f0c2b3d4e5f601234567")]),
                Condition::Ne(json!("65a1f0c2b3d4e5f6000000aa")),
            ]
        );
    }

    #[test]
    fn malformed_key_operand_is_rejected() {
        let err = translate(&QuerySpec::new().filter("id", json!("garbage"))).unwrap_err();
        assert!(
            matches!(
                err,
                QueryError::InvalidIdentifier { ref op, ref source, .. }
                    if op == "$eq" && source.id() == "garbage"
            ),
            "{err}"
        );
    }

    #[rstest]
    #[case(json!({"$gt": "65a1f0c2b3d4e5f601234567"}))]
    #[case(json!({"$in": [12]}))]
    #[case(json!(null))]
    fn rejects_unusable_key_operands(#[case] condition: Value) {
        let err = translate(&QuerySpec::new().filter("_id", condition)).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOperand { .. }), "{err}");
    }

    #[rstest]
    #[case("title", Direction::Ascending, "title")]
    #[case("+title", Direction::Ascending, "title")]
    #[case("-createdAt", Direction::Descending, "createdAt")]
    fn sort_direction(#[case] raw: &str, #[case] direction: Direction, #[case] name: &str) {
        let query = translate(&QuerySpec::new().sort(raw)).unwrap();
        assert_eq!(
            query.sort,
            Some(Sort {
                field: field(name),
                direction,
            })
        );
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("title desc")]
    fn rejects_bad_sort(#[case] raw: &str) {
        let err = translate(&QuerySpec::new().sort(raw)).unwrap_err();
        assert_eq!(err, QueryError::InvalidSort(raw.to_string()));
    }

    #[rstest]
    #[case("", json!(1))]
    #[case("1abc", json!(1))]
    #[case("a..b", json!(1))]
    #[case("$where", json!(1))]
    #[case("title;drop", json!(1))]
    fn rejects_bad_field_names(#[case] name: &str, #[case] value: Value) {
        let err = translate(&QuerySpec::new().filter(name, value)).unwrap_err();
        assert_eq!(err, QueryError::InvalidField(name.to_string()));
    }

    #[rstest]
    #[case(json!({"$regex": "x"}))]
    #[case(json!({"$eq": 1, "$near": 2}))]
    fn rejects_unknown_operators(#[case] condition: Value) {
        let err = translate(&QuerySpec::new().filter("title", condition)).unwrap_err();
        assert!(matches!(err, QueryError::UnknownOperator { .. }), "{err}");
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!(["a", "b"]))]
    #[case(json!({"$in": "a"}))]
    #[case(json!({"$in": [["a"]]}))]
    #[case(json!({"$exists": "yes"}))]
    #[case(json!({"$gt": true}))]
    #[case(json!({"$eq": {"nested": 1}}))]
    fn rejects_bad_operands(#[case] condition: Value) {
        let err = translate(&QuerySpec::new().filter("title", condition)).unwrap_err();
        assert!(matches!(err, QueryError::InvalidOperand { .. }), "{err}");
    }

    #[test]
    fn rejects_bad_projection_field() {
        let err = translate(&QuerySpec::new().project("bad field")).unwrap_err();
        assert_eq!(err, QueryError::InvalidField("bad field".into()));
    }

    #[test]
    fn limit_zero_means_store_default() {
        let query = translate(&QuerySpec::new().window(10, 0)).unwrap();
        assert_eq!(query.page.offset, 10);
        assert_eq!(query.page.limit, None);
        assert_eq!(query.page.effective_limit(20, 100), 20);

        let query = translate(&QuerySpec::new().window(0, 500)).unwrap();
        assert_eq!(query.page.effective_limit(20, 100), 100);
    }

    #[test]
    fn projection_keeps_id_and_roots() {
        let query = translate(&QuerySpec::new().project("title").project("audit.createdAt")).unwrap();
        let mut doc = json!({
            "id": "65a1f0c2b3d4e5f601234567",
            "title": "t",
            "notes": "n",
            "audit": {"createdAt": "x"},
        })
        .as_object()
        .cloned()
        .unwrap();
        query.projection.apply(&mut doc);
        let mut keys: Vec<_> = doc.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["audit", "id", "title"]);
    }

    #[test]
    fn base_filter_wins_on_conflict() {
        let requested = Filter::all()
            .and(field("status"), Condition::Eq(json!("draft")))
            .and(field("title"), Condition::Eq(json!("x")));
        let base = Filter::all().and(field("status"), Condition::Eq(json!("published")));
        let merged = requested.restricted_by(base);
        assert_eq!(
            merged.predicates(),
            &[
                Predicate {
                    field: field("title"),
                    condition: Condition::Eq(json!("x")),
                },
                Predicate {
                    field: field("status"),
                    condition: Condition::Eq(json!("published")),
                },
            ]
        );
    }

    #[test]
    fn attributes_describe_query() {
        let query = translate(
            &QuerySpec::new()
                .filter("title", json!("x"))
                .sort("-title")
                .window(5, 10),
        )
        .unwrap();
        let attrs = query.attributes();
        assert_eq!(attrs[0], ("filter", "title$eq".to_string()));
        assert_eq!(attrs[1], ("sort", "-title".to_string()));
        assert_eq!(attrs[3], ("start", "5".to_string()));
        assert_eq!(attrs[4], ("limit", "10".to_string()));
    }
}
