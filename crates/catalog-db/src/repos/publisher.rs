use async_trait::async_trait;

use catalog_core::entities::{Publisher, PublisherView};
use catalog_core::query::QuerySpec;

use crate::error::DataError;
use crate::hydrate::Hydrate;
use crate::service::CatalogService;

#[async_trait]
impl Hydrate for Publisher {
    type View = PublisherView;

    async fn hydrate(self, _catalog: &CatalogService) -> PublisherView {
        PublisherView::assemble(self)
    }
}

impl CatalogService {
    pub async fn get_publisher(&self, id: &str) -> Result<Option<PublisherView>, DataError> {
        self.get_one::<Publisher>(id).await
    }

    pub async fn get_publishers(&self, spec: &QuerySpec) -> Result<Vec<PublisherView>, DataError> {
        self.get_many::<Publisher>(spec).await
    }
}
