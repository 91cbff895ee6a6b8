//! Studio hydration.

use async_trait::async_trait;

use catalog_core::entities::{Studio, StudioView};
use catalog_core::query::QuerySpec;

use crate::error::DataError;
use crate::hydrate::Hydrate;
use crate::service::CatalogService;

#[async_trait]
impl Hydrate for Studio {
    type View = StudioView;

    async fn hydrate(self, _catalog: &CatalogService) -> StudioView {
        StudioView::assemble(self)
    }
}

impl CatalogService {
    pub async fn get_studio(&self, id: &str) -> Result<Option<StudioView>, DataError> {
        self.get_one::<Studio>(id).await
    }

    pub async fn get_studios(&self, spec: &QuerySpec) -> Result<Vec<StudioView>, DataError> {
        self.get_many::<Studio>(spec).await
    }
}
