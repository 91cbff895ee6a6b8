//! Generic per-kind repository over a [`DocumentStore`].
//!
//! A repository only fetches and decodes raw records. It takes identifiers
//! already normalized and queries already translated, so the only failures it
//! adds are decode failures.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;

use catalog_core::entities::Record;
use catalog_core::ids::ObjectId;
use catalog_core::query::StoreQuery;

use crate::error::DataError;
use crate::store::{Document, DocumentStore};
use crate::telemetry::Telemetry;

pub struct Repository<R> {
    store: Arc<dyn DocumentStore>,
    telemetry: Arc<dyn Telemetry>,
    record: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            telemetry: Arc::clone(&self.telemetry),
            record: PhantomData,
        }
    }
}

impl<R: Record> Repository<R> {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, telemetry: Arc<dyn Telemetry>) -> Self {
        Self {
            store,
            telemetry,
            record: PhantomData,
        }
    }

    /// Fetch one record by key inside a `db-get-<kind>` span.
    ///
    /// # Errors
    ///
    /// Returns `DataError::StoreUnavailable` if the store call fails and
    /// `DataError::DecodeFailure` if the document does not decode.
    pub async fn fetch_one(&self, key: &ObjectId) -> Result<Option<R>, DataError> {
        let span = self
            .telemetry
            .start_span(&R::KIND.get_span(), &[("id", key.to_hex())]);
        let fetched = self
            .store
            .get(R::KIND.collection(), key)
            .instrument(span.span())
            .await;
        span.end();

        fetched?.map(decode::<R>).transpose()
    }

    /// Run a translated query inside a `db-query-<kinds>` span.
    ///
    /// # Errors
    ///
    /// Returns `DataError::StoreUnavailable` if the store call fails and
    /// `DataError::DecodeFailure` if any returned document does not decode.
    pub async fn fetch_many(&self, query: &StoreQuery) -> Result<Vec<R>, DataError> {
        let span = self
            .telemetry
            .start_span(&R::KIND.query_span(), &query.attributes());
        let fetched = self
            .store
            .query(R::KIND.collection(), query)
            .instrument(span.span())
            .await;
        span.end();

        fetched?.into_iter().map(decode::<R>).collect()
    }
}

fn decode<R: Record>(document: Document) -> Result<R, DataError> {
    serde_json::from_value(Value::Object(document)).map_err(|e| DataError::DecodeFailure {
        collection: R::KIND.collection().to_string(),
        reason: e.to_string(),
    })
}
