//! libSQL-backed document store.
//!
//! All collections share one `documents` table. Filters and sorts are pushed
//! down as `json_extract` expressions over the stored body; projection is
//! applied after the rows come back.

use async_trait::async_trait;
use libsql::Builder;
use serde_json::Value;

use catalog_config::StoreConfig;
use catalog_core::ids::ObjectId;
use catalog_core::query::{Condition, Direction, FieldPath, Predicate, StoreQuery};

use super::{Document, DocumentStore, split_key, with_key};
use crate::error::DataError;

const MIGRATION_001: &str = include_str!("../../migrations/001_documents.sql");

pub struct LibsqlStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    default_page_size: u32,
    max_page_size: u32,
}

impl LibsqlStore {
    /// Open the store described by `config`, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `DataError::StoreUnavailable` if the database cannot be opened
    /// or the schema cannot be created.
    pub async fn open(config: &StoreConfig) -> Result<Self, DataError> {
        let mut store = Self::open_local(&config.path).await?;
        store.default_page_size = config.default_page_size;
        store.max_page_size = config.max_page_size;
        Ok(store)
    }

    /// Open a local database file, or `":memory:"`, with default page sizes.
    ///
    /// # Errors
    ///
    /// Returns `DataError::StoreUnavailable` if the database cannot be opened
    /// or the schema cannot be created.
    pub async fn open_local(path: &str) -> Result<Self, DataError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        conn.execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DataError::StoreUnavailable(format!("001_documents: {e}")))?;
        let defaults = StoreConfig::default();
        Ok(Self {
            db,
            conn,
            default_page_size: defaults.default_page_size,
            max_page_size: defaults.max_page_size,
        })
    }

    /// Insert or replace one document; the key is read from `id` or `_id`.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if the document has no valid key or the write fails.
    pub async fn put(&self, collection: &str, document: Value) -> Result<ObjectId, DataError> {
        let (key, body) = split_key(document)?;
        Self::write(&self.conn, collection, &key, &body).await?;
        Ok(key)
    }

    /// Insert or replace many documents in one transaction.
    ///
    /// Nothing is written if any document is rejected.
    ///
    /// # Errors
    ///
    /// Returns `DataError` for the first document without a valid key, or if
    /// the transaction fails.
    pub async fn put_many(
        &self,
        collection: &str,
        documents: impl IntoIterator<Item = Value>,
    ) -> Result<usize, DataError> {
        let rows = documents
            .into_iter()
            .map(split_key)
            .collect::<Result<Vec<_>, _>>()?;
        let tx = self.conn.transaction().await?;
        for (key, body) in &rows {
            Self::write(&tx, collection, key, body).await?;
        }
        tx.commit().await?;
        Ok(rows.len())
    }

    /// Number of documents stored in a collection.
    ///
    /// # Errors
    ///
    /// Returns `DataError::StoreUnavailable` if the query fails.
    pub async fn count(&self, collection: &str) -> Result<u64, DataError> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1",
                [collection],
            )
            .await?;
        let count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn write(
        conn: &libsql::Connection,
        collection: &str,
        key: &ObjectId,
        body: &Document,
    ) -> Result<(), DataError> {
        let body = Value::Object(body.clone()).to_string();
        conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
             ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body",
            libsql::params![collection, key.to_hex(), body],
        )
        .await?;
        Ok(())
    }

    fn decode_row(collection: &str, row: &libsql::Row) -> Result<Document, DataError> {
        let raw_key = row.get::<String>(0)?;
        let raw_body = row.get::<String>(1)?;
        let decode_failure = |reason: String| DataError::DecodeFailure {
            collection: collection.to_string(),
            reason,
        };
        let key = ObjectId::parse(&raw_key).map_err(|e| decode_failure(e.to_string()))?;
        match serde_json::from_str::<Value>(&raw_body) {
            Ok(Value::Object(body)) => Ok(with_key(&key, body)),
            Ok(_) => Err(decode_failure(format!("document {key} is not a JSON object"))),
            Err(e) => Err(decode_failure(format!("document {key}: {e}"))),
        }
    }
}

#[async_trait]
impl DocumentStore for LibsqlStore {
    async fn get(&self, collection: &str, key: &ObjectId) -> Result<Option<Document>, DataError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2",
                libsql::params![collection, key.to_hex()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Self::decode_row(collection, &row).map(Some),
            None => Ok(None),
        }
    }

    async fn query(&self, collection: &str, query: &StoreQuery) -> Result<Vec<Document>, DataError> {
        let limit = query
            .page
            .effective_limit(self.default_page_size, self.max_page_size);
        let (sql, params) = SelectBuilder::new(collection).build(query, limit);
        tracing::trace!(%sql, "document query");

        let mut rows = self
            .conn
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next().await? {
            let mut document = Self::decode_row(collection, &row)?;
            query.projection.apply(&mut document);
            documents.push(document);
        }
        Ok(documents)
    }
}

/// Builds one parameterized `SELECT` over the documents table.
///
/// Field paths are bound as JSON path parameters, never spliced into SQL.
struct SelectBuilder {
    clauses: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SelectBuilder {
    fn new(collection: &str) -> Self {
        Self {
            clauses: vec!["collection = ?1".to_string()],
            params: vec![collection.into()],
        }
    }

    fn bind(&mut self, value: libsql::Value) -> String {
        self.params.push(value);
        format!("?{}", self.params.len())
    }

    /// SQL expression for the field's value.
    fn value_expr(&mut self, field: &FieldPath) -> String {
        if field.is_id() {
            "id".to_string()
        } else {
            let path = self.bind(json_path(field).into());
            format!("json_extract(body, {path})")
        }
    }

    /// SQL expression for the field's JSON type; NULL when the field is missing.
    fn type_expr(&mut self, field: &FieldPath) -> String {
        if field.is_id() {
            "'text'".to_string()
        } else {
            let path = self.bind(json_path(field).into());
            format!("json_type(body, {path})")
        }
    }

    fn push_predicate(&mut self, predicate: &Predicate) {
        let field = &predicate.field;
        let clause = match &predicate.condition {
            Condition::Eq(v) => self.equals(field, v),
            Condition::Ne(v) => {
                let eq = self.equals(field, v);
                format!("NOT ({eq})")
            }
            Condition::Gt(v) => self.ordered(field, ">", v),
            Condition::Gte(v) => self.ordered(field, ">=", v),
            Condition::Lt(v) => self.ordered(field, "<", v),
            Condition::Lte(v) => self.ordered(field, "<=", v),
            Condition::In(vs) => self.any_of(field, vs),
            Condition::Nin(vs) => {
                let any = self.any_of(field, vs);
                format!("NOT ({any})")
            }
            Condition::Exists(expected) => {
                let ty = self.type_expr(field);
                if *expected {
                    format!("{ty} IS NOT NULL")
                } else {
                    format!("{ty} IS NULL")
                }
            }
        };
        self.clauses.push(clause);
    }

    /// Always TRUE or FALSE, never NULL, so `NOT` inverts it exactly.
    fn equals(&mut self, field: &FieldPath, operand: &Value) -> String {
        let expr = self.value_expr(field);
        match operand {
            Value::Null => format!("{expr} IS NULL"),
            other => {
                let ty = self.type_expr(field);
                let p = self.bind(sql_value(other));
                format!("coalesce({ty} NOT IN ('array', 'object') AND {expr} = {p}, 0)")
            }
        }
    }

    fn any_of(&mut self, field: &FieldPath, operands: &[Value]) -> String {
        if operands.is_empty() {
            return "0".to_string();
        }
        let parts: Vec<String> = operands.iter().map(|v| self.equals(field, v)).collect();
        format!("({})", parts.join(" OR "))
    }

    /// Ordered comparison, restricted to fields of the operand's JSON type.
    fn ordered(&mut self, field: &FieldPath, op: &str, operand: &Value) -> String {
        let ty = self.type_expr(field);
        let guard = match operand {
            Value::String(_) => format!("{ty} = 'text'"),
            _ => format!("{ty} IN ('integer', 'real', 'true', 'false')"),
        };
        let expr = self.value_expr(field);
        let p = self.bind(sql_value(operand));
        format!("coalesce({guard} AND {expr} {op} {p}, 0)")
    }

    fn build(mut self, query: &StoreQuery, limit: u32) -> (String, Vec<libsql::Value>) {
        for predicate in query.filter.predicates() {
            self.push_predicate(predicate);
        }

        let mut sql = format!(
            "SELECT id, body FROM documents WHERE {}",
            self.clauses.join(" AND ")
        );

        // SQLite orders NULL < numbers < text. Arrays and objects rank above
        // text and tie with each other; the key breaks ties.
        match &query.sort {
            Some(sort) if !sort.field.is_id() => {
                let ty = self.type_expr(&sort.field);
                let expr = self.value_expr(&sort.field);
                let dir = match sort.direction {
                    Direction::Ascending => "ASC",
                    Direction::Descending => "DESC",
                };
                let composite = format!("coalesce({ty} IN ('array', 'object'), 0)");
                sql.push_str(&format!(
                    " ORDER BY {composite} {dir}, \
                     CASE WHEN {composite} THEN NULL ELSE {expr} END {dir}, id ASC"
                ));
            }
            Some(sort) if sort.direction == Direction::Descending => {
                sql.push_str(" ORDER BY id DESC");
            }
            _ => sql.push_str(" ORDER BY id ASC"),
        }

        let limit = self.bind(i64::from(limit).into());
        let offset = self.bind(i64::try_from(query.page.offset).unwrap_or(i64::MAX).into());
        sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));

        (sql, self.params)
    }
}

fn json_path(field: &FieldPath) -> String {
    format!("$.{field}")
}

/// Bind a JSON scalar the way `json_extract` surfaces it: booleans as 0/1.
fn sql_value(value: &Value) -> libsql::Value {
    match value {
        Value::Null => libsql::Value::Null,
        Value::Bool(b) => libsql::Value::Integer(i64::from(*b)),
        Value::Number(n) => n.as_i64().map_or_else(
            || libsql::Value::Real(n.as_f64().unwrap_or(f64::NAN)),
            libsql::Value::Integer,
        ),
        Value::String(s) => libsql::Value::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => libsql::Value::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::query::{QuerySpec, translate};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn key(n: u8) -> String {
        format!("65a1f0c2b3d4e5f6000000{n:02x}")
    }

    async fn seeded() -> LibsqlStore {
        let store = LibsqlStore::open_local(":memory:").await.unwrap();
        store
            .put_many(
                "volumes",
                vec![
                    json!({"id": key(3), "title": "Gamma", "year": 1999, "draft": false}),
                    json!({"id": key(1), "title": "Alpha", "year": 2001, "draft": true}),
                    json!({"_id": key(2), "title": "Beta", "year": 1995}),
                ],
            )
            .await
            .unwrap();
        store
    }

    async fn titles(store: &LibsqlStore, spec: QuerySpec) -> Vec<String> {
        store
            .query("volumes", &translate(&spec).unwrap())
            .await
            .unwrap()
            .iter()
            .map(|d| d["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let store = LibsqlStore::open_local(":memory:").await.unwrap();
        assert_eq!(store.count("volumes").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn put_then_get_round_trips_body() {
        let store = seeded().await;
        let id = ObjectId::parse(&key(2)).unwrap();
        let doc = store.get("volumes", &id).await.unwrap().unwrap();
        assert_eq!(doc["id"], key(2));
        assert_eq!(doc["year"], 1995);
        assert!(!doc.contains_key("_id"));
        assert!(store.get("systems", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_replaces_existing_document() {
        let store = seeded().await;
        store
            .put("volumes", json!({"id": key(1), "title": "Alpha 2e"}))
            .await
            .unwrap();
        assert_eq!(store.count("volumes").await.unwrap(), 3);
        let id = ObjectId::parse(&key(1)).unwrap();
        let doc = store.get("volumes", &id).await.unwrap().unwrap();
        assert_eq!(doc["title"], "Alpha 2e");
    }

    #[tokio::test]
    async fn put_many_rejects_whole_batch_on_bad_key() {
        let store = LibsqlStore::open_local(":memory:").await.unwrap();
        let result = store
            .put_many("systems", vec![json!({"id": key(1)}), json!({"id": "bogus"})])
            .await;
        assert!(matches!(result, Err(DataError::InvalidIdentifier(_))));
        assert_eq!(store.count("systems").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn default_order_is_by_key() {
        let store = seeded().await;
        assert_eq!(titles(&store, QuerySpec::new()).await, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[tokio::test]
    async fn sorts_by_field_both_directions() {
        let store = seeded().await;
        assert_eq!(
            titles(&store, QuerySpec::new().sort("year")).await,
            vec!["Beta", "Gamma", "Alpha"]
        );
        assert_eq!(
            titles(&store, QuerySpec::new().sort("-title")).await,
            vec!["Gamma", "Beta", "Alpha"]
        );
    }

    #[tokio::test]
    async fn comparison_operators() {
        let store = seeded().await;
        assert_eq!(
            titles(&store, QuerySpec::new().filter("year", json!({"$gte": 1995, "$lt": 2000}))).await,
            vec!["Beta", "Gamma"]
        );
        assert_eq!(
            titles(&store, QuerySpec::new().filter("title", json!({"$gt": "Beta"}))).await,
            vec!["Gamma"]
        );
        assert!(
            titles(&store, QuerySpec::new().filter("title", json!({"$gt": 5})))
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn equality_in_and_missing_fields() {
        let store = seeded().await;
        assert_eq!(
            titles(&store, QuerySpec::new().filter("draft", json!(true))).await,
            vec!["Alpha"]
        );
        assert_eq!(
            titles(&store, QuerySpec::new().filter("draft", json!({"$ne": true}))).await,
            vec!["Beta", "Gamma"]
        );
        assert_eq!(
            titles(&store, QuerySpec::new().filter("title", json!({"$in": ["Beta", "Gamma"]}))).await,
            vec!["Beta", "Gamma"]
        );
        assert_eq!(
            titles(&store, QuerySpec::new().filter("title", json!({"$nin": ["Beta"]}))).await,
            vec!["Alpha", "Gamma"]
        );
        assert_eq!(
            titles(&store, QuerySpec::new().filter("draft", json!({"$exists": false}))).await,
            vec!["Beta"]
        );
    }

    #[tokio::test]
    async fn filters_on_key() {
        let store = seeded().await;
        assert_eq!(
            titles(&store, QuerySpec::new().filter("_id", json!(key(3)))).await,
            vec!["Gamma"]
        );
    }

    #[tokio::test]
    async fn pagination_and_projection() {
        let store = seeded().await;
        let docs = store
            .query(
                "volumes",
                &translate(&QuerySpec::new().sort("title").project("title").window(1, 1)).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["title"], "Beta");
        assert_eq!(docs[0].len(), 2);
    }

    #[test]
    fn builder_binds_paths_as_parameters() {
        let query = translate(&QuerySpec::new().filter("title", json!("x")).sort("-year")).unwrap();
        let (sql, params) = SelectBuilder::new("volumes").build(&query, 20);
        assert!(!sql.contains("title"));
        assert!(sql.contains("ORDER BY json_extract(body, ?4) DESC, id ASC"));
        assert_eq!(params.len(), 6);
    }
}
