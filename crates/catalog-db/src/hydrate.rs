//! Relation resolution and view assembly.
//!
//! Each record kind implements [`Hydrate`] in its module under
//! [`crate::repos`]. Resolution is best effort: a reference that cannot be
//! fetched becomes an `Unresolved` entry on the view and a warning in the
//! log, never an error for the owning record.
//!
//! # Relation graph
//!
//! Hydration recurses through related kinds, so the relation graph must
//! stay acyclic:
//!
//! ```text
//! Contribution -> Person
//! Contribution -> Volume -> {System, Publisher, Studio, License}
//! Review       -> Volume -> {System, Publisher, Studio, License}
//! ```
//!
//! The deepest chain is two hops. Adding a back-reference (for example
//! `Volume -> Review`) would make hydration unbounded.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;

use catalog_config::Fanout;
use catalog_core::entities::Record;
use catalog_core::enums::EntityKind;
use catalog_core::ids::ObjectId;
use catalog_core::relation::{Relation, RelationList, Unresolved, UnresolvedReason};

use crate::service::CatalogService;

/// A record kind that can be turned into its read-only view.
///
/// The trait is object-safe through `async_trait` boxing, which also breaks
/// the recursive future types between related kinds.
#[async_trait]
pub trait Hydrate: Record {
    type View: Serialize + Send + Sync + 'static;

    /// Resolve this record's relations and assemble its view.
    async fn hydrate(self, catalog: &CatalogService) -> Self::View;
}

/// The record whose relations are being resolved; used for logging.
#[derive(Debug, Clone, Copy)]
pub struct Owner<'a> {
    kind: EntityKind,
    id: &'a ObjectId,
}

impl<'a> Owner<'a> {
    #[must_use]
    pub fn of<R: Record>(record: &'a R) -> Self {
        Self {
            kind: R::KIND,
            id: record.id(),
        }
    }
}

impl CatalogService {
    /// Resolve a single-valued reference.
    ///
    /// No reference gives `Relation::Absent` without a lookup.
    pub async fn resolve_one<R: Hydrate>(
        &self,
        owner: Owner<'_>,
        reference: Option<&str>,
    ) -> Relation<R::View> {
        let Some(raw) = reference else {
            return Relation::Absent;
        };
        match self.resolve::<R>(raw).await {
            Ok(view) => Relation::Resolved(view),
            Err(reason) => {
                let unresolved = Unresolved {
                    kind: R::KIND,
                    id: raw.to_string(),
                    position: None,
                    reason,
                };
                log_unresolved(owner, &unresolved);
                Relation::Unresolved(unresolved)
            }
        }
    }

    /// Resolve a list of references, keeping stored order among the
    /// references that resolve.
    ///
    /// Lookups run one after another, or concurrently when the hydration
    /// fan-out is [`Fanout::Concurrent`]; the outcome is the same.
    pub async fn resolve_list<R: Hydrate>(
        &self,
        owner: Owner<'_>,
        references: &[String],
    ) -> RelationList<R::View> {
        if references.is_empty() {
            return RelationList::empty();
        }

        let outcomes = match self.hydration().fanout {
            Fanout::Sequential => {
                let mut outcomes = Vec::with_capacity(references.len());
                for raw in references {
                    outcomes.push(self.resolve::<R>(raw).await);
                }
                outcomes
            }
            Fanout::Concurrent => join_all(references.iter().map(|raw| self.resolve::<R>(raw))).await,
        };

        let list = RelationList::collect(R::KIND, references.iter().cloned().zip(outcomes));
        for unresolved in list.unresolved() {
            log_unresolved(owner, unresolved);
        }
        list
    }

    async fn resolve<R: Hydrate>(&self, raw: &str) -> Result<R::View, UnresolvedReason> {
        // A malformed stored reference never reaches the store.
        let key = ObjectId::parse(raw).map_err(|e| UnresolvedReason::InvalidIdentifier(e.to_string()))?;
        match self.fetch_view::<R>(&key).await {
            Ok(Some(view)) => Ok(view),
            Ok(None) => Err(UnresolvedReason::NotFound),
            Err(e) => Err(e.unresolved_reason()),
        }
    }
}

fn log_unresolved(owner: Owner<'_>, unresolved: &Unresolved) {
    match &unresolved.reason {
        UnresolvedReason::NotFound => tracing::warn!(
            owner = %owner.kind,
            owner_id = %owner.id,
            kind = %unresolved.kind,
            id = %unresolved.id,
            "no related record found"
        ),
        reason => tracing::warn!(
            owner = %owner.kind,
            owner_id = %owner.id,
            kind = %unresolved.kind,
            id = %unresolved.id,
            ?reason,
            "related record could not be resolved"
        ),
    }
}
