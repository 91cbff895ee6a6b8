use async_trait::async_trait;

use catalog_core::entities::{Review, ReviewView, Volume};
use catalog_core::query::QuerySpec;

use crate::error::DataError;
use crate::hydrate::{Hydrate, Owner};
use crate::service::CatalogService;

#[async_trait]
impl Hydrate for Review {
    type View = ReviewView;

    async fn hydrate(self, catalog: &CatalogService) -> ReviewView {
        let volume = catalog
            .resolve_one::<Volume>(Owner::of(&self), self.volume_ref())
            .await;
        ReviewView::assemble(self, volume)
    }
}

impl CatalogService {
    pub async fn get_review(&self, id: &str) -> Result<Option<ReviewView>, DataError> {
        self.get_one::<Review>(id).await
    }

    pub async fn get_reviews(&self, spec: &QuerySpec) -> Result<Vec<ReviewView>, DataError> {
        self.get_many::<Review>(spec).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_support::helpers::{id, seed, test_catalog};

    #[tokio::test]
    async fn review_embeds_hydrated_volume() {
        let (catalog, store, _) = test_catalog();
        seed(&store, "publishers", json!({"id": id(0xb1), "name": "Acme"}));
        seed(
            &store,
            "volumes",
            json!({"id": id(1), "title": "Core Rules", "publisherIds": [id(0xb1)]}),
        );
        seed(
            &store,
            "reviews",
            json!({"id": id(0xd1), "title": "Solid", "volumeId": id(1)}),
        );

        let review = catalog.get_review(&id(0xd1)).await.unwrap().unwrap();

        let volume = review.volume().value().unwrap();
        assert_eq!(volume.title(), "Core Rules");
        assert_eq!(volume.publishers().items()[0].name(), "Acme");
    }

    #[tokio::test]
    async fn missing_volume_leaves_review_intact() {
        let (catalog, store, _) = test_catalog();
        seed(
            &store,
            "reviews",
            json!({"id": id(0xd1), "title": "Orphan", "volumeId": id(9)}),
        );

        let review = catalog.get_review(&id(0xd1)).await.unwrap().unwrap();

        assert_eq!(review.title(), "Orphan");
        assert!(review.volume().unresolved().is_some());
        assert!(review.volume().value().is_none());
    }

    #[tokio::test]
    async fn no_volume_reference_is_absent_without_lookup() {
        let (catalog, store, _) = test_catalog();
        seed(&store, "reviews", json!({"id": id(0xd1), "title": "Loose"}));

        let review = catalog.get_review(&id(0xd1)).await.unwrap().unwrap();

        assert!(review.volume().is_absent());
        assert_eq!(store.get_calls(), 1);
    }
}
