//! Document store port and its implementations.
//!
//! The catalog reads records as JSON documents keyed by [`ObjectId`]. A store
//! answers two questions: fetch one document by key, and run a translated
//! [`StoreQuery`] over a collection. Every document a store returns carries
//! its key under `"id"` as lowercase hex, so records decode uniformly.
//!
//! - [`LibsqlStore`]: libSQL-backed, the production store.
//! - [`MemoryStore`]: in-process store with call counters and fault
//!   injection, used by tests and demos.

mod libsql_store;
mod matching;
mod memory;

pub use libsql_store::LibsqlStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

use catalog_core::ids::ObjectId;
use catalog_core::query::StoreQuery;

use crate::error::DataError;

/// A stored record body: a JSON object including its `"id"`.
pub type Document = Map<String, Value>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by key. `Ok(None)` when no such record exists.
    async fn get(&self, collection: &str, key: &ObjectId) -> Result<Option<Document>, DataError>;

    /// Run a query over a collection, honoring filter, sort, projection and
    /// pagination.
    async fn query(&self, collection: &str, query: &StoreQuery) -> Result<Vec<Document>, DataError>;
}

/// Split a document about to be written into its key and body.
///
/// Accepts the key under `id` or `_id`; neither is kept in the body.
pub(crate) fn split_key(document: Value) -> Result<(ObjectId, Document), DataError> {
    let Value::Object(mut body) = document else {
        return Err(DataError::DecodeFailure {
            collection: String::new(),
            reason: "document must be a JSON object".into(),
        });
    };
    let raw = match (body.remove("id"), body.remove("_id")) {
        (Some(Value::String(id)), _) | (None, Some(Value::String(id))) => id,
        _ => {
            return Err(DataError::DecodeFailure {
                collection: String::new(),
                reason: "document has no string `id`".into(),
            });
        }
    };
    let key = ObjectId::parse(&raw)?;
    Ok((key, body))
}

/// Put the key back into a stored body.
pub(crate) fn with_key(key: &ObjectId, mut body: Document) -> Document {
    body.insert("id".to_string(), Value::String(key.to_hex()));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_key_accepts_either_key_name() {
        let (key, body) = split_key(json!({"id": "65a1f0c2b3d4e5f601234567", "title": "x"})).unwrap();
        assert_eq!(key.to_hex(), "65a1f0c2b3d4e5f601234567");
        assert!(!body.contains_key("id"));

        let (key, body) = split_key(json!({"_id": "65A1F0C2B3D4E5F601234567"})).unwrap();
        assert_eq!(key.to_hex(), "65a1f0c2b3d4e5f601234567");
        assert!(body.is_empty());
    }

    #[test]
    fn split_key_rejects_missing_or_bad_key() {
        assert!(matches!(
            split_key(json!({"title": "x"})),
            Err(DataError::DecodeFailure { .. })
        ));
        assert!(matches!(
            split_key(json!({"id": "nope"})),
            Err(DataError::InvalidIdentifier(_))
        ));
        assert!(split_key(json!([1, 2])).is_err());
    }

    #[test]
    fn with_key_renders_lowercase_hex() {
        let key = ObjectId::parse("65A1F0C2B3D4E5F601234567").unwrap();
        let doc = with_key(&key, Document::new());
        assert_eq!(doc["id"], "65a1f0c2b3d4e5f601234567");
    }
}
