//! Service layer: identifier normalization, query translation, and hydration.
//!
//! `CatalogService` owns the store and telemetry handles. The generic
//! operations live here; the per-kind entry points (`get_volume`,
//! `get_reviews`, ...) are `impl CatalogService` blocks in [`crate::repos`].

use std::future::Future;
use std::sync::Arc;

use catalog_config::{CatalogConfig, HydrationConfig};
use catalog_core::entities::Record;
use catalog_core::ids::{self, ObjectId};
use catalog_core::query::{Filter, QuerySpec, translate};
use tracing::Instrument;

use crate::error::DataError;
use crate::hydrate::Hydrate;
use crate::repository::Repository;
use crate::store::{DocumentStore, LibsqlStore};
use crate::telemetry::{Telemetry, TracingTelemetry};

/// Read-only entry point to the catalog.
///
/// Every public operation follows the same protocol:
/// 1. Normalize the identifier or translate the query spec (no store call
///    on failure)
/// 2. Fetch raw records through the kind's repository
/// 3. Hydrate each record into its view, resolving relations best effort
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
    telemetry: Arc<dyn Telemetry>,
    hydration: HydrationConfig,
}

impl CatalogService {
    /// Create a service over an arbitrary store, with default hydration
    /// settings.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, telemetry: Arc<dyn Telemetry>) -> Self {
        Self {
            store,
            telemetry,
            hydration: HydrationConfig::default(),
        }
    }

    /// Open the libSQL store named in `config`, reporting spans to `tracing`.
    ///
    /// # Errors
    ///
    /// Returns `DataError::StoreUnavailable` if the store cannot be opened.
    pub async fn open(config: &CatalogConfig) -> Result<Self, DataError> {
        let store = LibsqlStore::open(&config.store).await?;
        Ok(Self::new(Arc::new(store), Arc::new(TracingTelemetry))
            .with_hydration(config.hydration.clone()))
    }

    #[must_use]
    pub fn with_hydration(mut self, hydration: HydrationConfig) -> Self {
        self.hydration = hydration;
        self
    }

    #[must_use]
    pub const fn hydration(&self) -> &HydrationConfig {
        &self.hydration
    }

    /// Repository for one record kind, sharing this service's handles.
    #[must_use]
    pub fn repository<R: Record>(&self) -> Repository<R> {
        Repository::new(Arc::clone(&self.store), Arc::clone(&self.telemetry))
    }

    /// Fetch one record by external id and hydrate it.
    ///
    /// Returns `Ok(None)` when no record has this id.
    ///
    /// # Errors
    ///
    /// - `DataError::InvalidIdentifier` if `id` is malformed; the store is
    ///   not contacted.
    /// - `DataError::StoreUnavailable` if fetching the record itself fails or
    ///   the request budget runs out.
    /// - `DataError::DecodeFailure` if the record does not decode.
    pub async fn get_one<R: Hydrate>(&self, id: &str) -> Result<Option<R::View>, DataError> {
        let key = ids::normalize(id).inspect_err(|e| {
            tracing::warn!(kind = %R::KIND, id, error = %e, "rejected malformed identifier");
        })?;
        self.within_budget(self.fetch_view::<R>(&key))
            .await
            .inspect_err(|e| {
                tracing::error!(kind = %R::KIND, id = %key, error = %e, "error while fetching record");
            })
    }

    /// Fetch a page of records and hydrate each one.
    ///
    /// Records that fail to hydrate are skipped; the rest keep store order.
    ///
    /// # Errors
    ///
    /// - `DataError::InvalidQuery` if the spec does not translate.
    /// - `DataError::StoreUnavailable` if the collection query fails or the
    ///   request budget runs out.
    /// - `DataError::DecodeFailure` if a returned record does not decode.
    pub async fn get_many<R: Hydrate>(&self, spec: &QuerySpec) -> Result<Vec<R::View>, DataError> {
        self.get_many_where::<R>(Filter::all(), spec).await
    }

    /// Like [`Self::get_many`], with a base filter the caller cannot widen.
    ///
    /// Predicates in `base` replace any caller predicates on the same field.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_many`].
    pub async fn get_many_where<R: Hydrate>(
        &self,
        base: Filter,
        spec: &QuerySpec,
    ) -> Result<Vec<R::View>, DataError> {
        let mut query = translate(spec).inspect_err(|e| {
            tracing::warn!(kind = %R::KIND, error = %e, "rejected query");
        })?;
        query.filter = query.filter.restricted_by(base);

        let span = self
            .telemetry
            .start_span(&R::KIND.many_span(), &query.attributes());
        let result = self
            .within_budget(
                async {
                    let records = self.repository::<R>().fetch_many(&query).await?;
                    Ok::<_, DataError>(self.hydrate_batch::<R>(records).await)
                }
                .instrument(span.span()),
            )
            .await;
        span.end();

        result.inspect_err(|e| {
            tracing::error!(kind = %R::KIND, error = %e, "collection request failed");
        })
    }

    /// Fetch one record by normalized key and hydrate it, without a budget.
    ///
    /// Failures are returned unlogged; relation and batch callers report them
    /// at `warn`.
    pub(crate) async fn fetch_view<R: Hydrate>(
        &self,
        key: &ObjectId,
    ) -> Result<Option<R::View>, DataError> {
        match self.repository::<R>().fetch_one(key).await? {
            Some(record) => Ok(Some(record.hydrate(self).await)),
            None => {
                tracing::debug!(kind = %R::KIND, id = %key, "no record found");
                Ok(None)
            }
        }
    }

    /// Apply the configured request timeout to a whole operation.
    async fn within_budget<T>(
        &self,
        operation: impl Future<Output = Result<T, DataError>>,
    ) -> Result<T, DataError> {
        match self.hydration.request_timeout() {
            Some(budget) => tokio::time::timeout(budget, operation)
                .await
                .map_err(|_| {
                    DataError::StoreUnavailable(format!(
                        "request exceeded its {}ms budget",
                        budget.as_millis()
                    ))
                })?,
            None => operation.await,
        }
    }
}
