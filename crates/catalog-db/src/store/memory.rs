//! In-process document store.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use catalog_core::ids::ObjectId;
use catalog_core::query::StoreQuery;

use super::matching::{matches_all, sort_order};
use super::{Document, DocumentStore, split_key, with_key};
use crate::error::DataError;

/// Documents grouped by collection, each collection ordered by key.
type Collections = BTreeMap<String, BTreeMap<ObjectId, Document>>;

/// A [`DocumentStore`] held entirely in memory.
///
/// Counts every call it serves and can be told to fail specific calls or to
/// delay each one, which is what tests need to observe lookups and isolate
/// failures.
pub struct MemoryStore {
    collections: RwLock<Collections>,
    default_page_size: u32,
    max_page_size: u32,
    failing_gets: Mutex<HashSet<(String, ObjectId)>>,
    failing_queries: Mutex<HashSet<String>>,
    latency: Mutex<Option<Duration>>,
    get_calls: AtomicUsize,
    query_calls: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_page_sizes(20, 100)
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page_sizes(default_page_size: u32, max_page_size: u32) -> Self {
        Self {
            collections: RwLock::new(BTreeMap::new()),
            default_page_size,
            max_page_size,
            failing_gets: Mutex::new(HashSet::new()),
            failing_queries: Mutex::new(HashSet::new()),
            latency: Mutex::new(None),
            get_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
        }
    }

    /// Insert or replace a document; the key is read from `id` or `_id`.
    ///
    /// # Errors
    ///
    /// Returns `DataError` when the document is not an object or its key is
    /// missing or malformed.
    pub fn insert(&self, collection: &str, document: Value) -> Result<ObjectId, DataError> {
        let (key, body) = split_key(document)?;
        self.write()?
            .entry(collection.to_string())
            .or_default()
            .insert(key, body);
        Ok(key)
    }

    /// Make every later `get` of this key fail with `StoreUnavailable`.
    pub fn fail_get(&self, collection: &str, key: &ObjectId) {
        if let Ok(mut failing) = self.failing_gets.lock() {
            failing.insert((collection.to_string(), *key));
        }
    }

    /// Make every later query on this collection fail with `StoreUnavailable`.
    pub fn fail_query(&self, collection: &str) {
        if let Ok(mut failing) = self.failing_queries.lock() {
            failing.insert(collection.to_string());
        }
    }

    /// Delay each call by `latency` before answering.
    pub fn set_latency(&self, latency: Duration) {
        if let Ok(mut slot) = self.latency.lock() {
            *slot = Some(latency);
        }
    }

    /// Number of `get` calls served so far, failed ones included.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Number of `query` calls served so far, failed ones included.
    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Zero both call counters, e.g. after seeding through the store.
    pub fn reset_counters(&self) {
        self.get_calls.store(0, Ordering::SeqCst);
        self.query_calls.store(0, Ordering::SeqCst);
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Collections>, DataError> {
        self.collections
            .read()
            .map_err(|_| DataError::StoreUnavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Collections>, DataError> {
        self.collections
            .write()
            .map_err(|_| DataError::StoreUnavailable("memory store lock poisoned".into()))
    }

    async fn simulate_latency(&self) {
        let latency = self.latency.lock().ok().and_then(|slot| *slot);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn get_fails(&self, collection: &str, key: &ObjectId) -> bool {
        self.failing_gets
            .lock()
            .is_ok_and(|failing| failing.contains(&(collection.to_string(), *key)))
    }

    fn query_fails(&self, collection: &str) -> bool {
        self.failing_queries
            .lock()
            .is_ok_and(|failing| failing.contains(collection))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &ObjectId) -> Result<Option<Document>, DataError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.get_fails(collection, key) {
            return Err(DataError::StoreUnavailable(format!(
                "injected failure reading {collection}/{key}"
            )));
        }
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .map(|body| with_key(key, body.clone())))
    }

    async fn query(&self, collection: &str, query: &StoreQuery) -> Result<Vec<Document>, DataError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.query_fails(collection) {
            return Err(DataError::StoreUnavailable(format!(
                "injected failure querying {collection}"
            )));
        }

        let mut matched: Vec<Document> = {
            let collections = self.read()?;
            collections
                .get(collection)
                .into_iter()
                .flat_map(BTreeMap::iter)
                .map(|(key, body)| with_key(key, body.clone()))
                .filter(|doc| matches_all(doc, query.filter.predicates()))
                .collect()
        };

        // Keys are already ascending; a stable sort keeps them as the tiebreak.
        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| sort_order(a, b, sort));
        }

        let offset = usize::try_from(query.page.offset).unwrap_or(usize::MAX);
        let limit = query
            .page
            .effective_limit(self.default_page_size, self.max_page_size) as usize;

        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|mut doc| {
                query.projection.apply(&mut doc);
                doc
            })
            .collect())
    }
}
