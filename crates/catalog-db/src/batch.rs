//! Batch coordination for collection requests.

use crate::hydrate::Hydrate;
use crate::service::CatalogService;

impl CatalogService {
    /// Turn the records of one collection query into views.
    ///
    /// Collection queries may return projected documents, so each record is
    /// re-fetched in full by key before hydration. Items are processed in
    /// order, one at a time. An item that fails to re-fetch or that has
    /// vanished since the query is logged and skipped; the batch itself never
    /// fails.
    pub(crate) async fn hydrate_batch<R: Hydrate>(&self, records: Vec<R>) -> Vec<R::View> {
        if records.is_empty() {
            return Vec::new();
        }

        let requested = records.len();
        let mut views = Vec::with_capacity(requested);
        for record in records {
            let key = *record.id();
            match self.fetch_view::<R>(&key).await {
                Ok(Some(view)) => views.push(view),
                Ok(None) => {
                    tracing::info!(kind = %R::KIND, id = %key, "record vanished during batch; skipping");
                }
                Err(e) => {
                    tracing::warn!(kind = %R::KIND, id = %key, error = %e, "skipping record that failed to assemble");
                }
            }
        }

        if views.len() < requested {
            tracing::warn!(
                kind = %R::KIND,
                requested,
                assembled = views.len(),
                "batch returned fewer views than records"
            );
        }
        views
    }
}
