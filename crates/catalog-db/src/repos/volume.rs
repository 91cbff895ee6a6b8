//! Volume hydration: four reference lists, resolved in stored order.

use async_trait::async_trait;

use catalog_core::entities::{License, Publisher, Studio, System, Volume, VolumeRelations, VolumeView};
use catalog_core::query::{Filter, QuerySpec};

use crate::error::DataError;
use crate::hydrate::{Hydrate, Owner};
use crate::service::CatalogService;

#[async_trait]
impl Hydrate for Volume {
    type View = VolumeView;

    async fn hydrate(self, catalog: &CatalogService) -> VolumeView {
        let owner = Owner::of(&self);
        let relations = VolumeRelations {
            systems: catalog.resolve_list::<System>(owner, &self.system_ids).await,
            publishers: catalog
                .resolve_list::<Publisher>(owner, &self.publisher_ids)
                .await,
            studios: catalog.resolve_list::<Studio>(owner, &self.studio_ids).await,
            licenses: catalog.resolve_list::<License>(owner, &self.license_ids).await,
        };
        VolumeView::assemble(self, relations)
    }
}

impl CatalogService {
    /// Fetch a volume with its systems, publishers, studios, and licenses.
    pub async fn get_volume(&self, id: &str) -> Result<Option<VolumeView>, DataError> {
        self.get_one::<Volume>(id).await
    }

    pub async fn get_volumes(&self, spec: &QuerySpec) -> Result<Vec<VolumeView>, DataError> {
        self.get_many::<Volume>(spec).await
    }

    /// Volumes restricted by a base filter, e.g. excluding soft-deleted ones.
    pub async fn get_volumes_where(
        &self,
        base: Filter,
        spec: &QuerySpec,
    ) -> Result<Vec<VolumeView>, DataError> {
        self.get_many_where::<Volume>(base, spec).await
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::relation::UnresolvedReason;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::test_support::helpers::{id, seed, test_catalog};

    #[tokio::test]
    async fn unresolvable_references_are_omitted_in_order() {
        let (catalog, store, _) = test_catalog();
        seed(&store, "systems", json!({"id": id(0xa1), "gameSystem": "First"}));
        seed(&store, "systems", json!({"id": id(0xa3), "gameSystem": "Third"}));
        seed(
            &store,
            "volumes",
            json!({
                "id": id(1),
                "title": "Core Rules",
                "systemIds": [id(0xa1), id(0xa2), "not-an-id", id(0xa3)],
            }),
        );

        let volume = catalog.get_volume(&id(1)).await.unwrap().unwrap();

        let names: Vec<_> = volume.systems().iter().map(|s| s.game_system()).collect();
        assert_eq!(names, vec!["First", "Third"]);
        let reasons: Vec<_> = volume
            .systems()
            .unresolved()
            .iter()
            .map(|u| (u.position, u.reason.clone()))
            .collect();
        assert_eq!(reasons[0], (Some(1), UnresolvedReason::NotFound));
        assert!(matches!(reasons[1], (Some(2), UnresolvedReason::InvalidIdentifier(_))));
        // volume + three well-formed system references
        assert_eq!(store.get_calls(), 4);
        assert!(!volume.is_fully_resolved());
    }

    #[tokio::test]
    async fn empty_reference_lists_need_no_lookups() {
        let (catalog, store, _) = test_catalog();
        seed(&store, "volumes", json!({"id": id(1), "title": "Solo"}));

        let volume = catalog.get_volume(&id(1)).await.unwrap().unwrap();

        assert!(volume.is_fully_resolved());
        assert!(volume.licenses().is_empty());
        assert_eq!(store.get_calls(), 1);
    }
}
