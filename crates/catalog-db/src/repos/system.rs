//! System hydration. Systems hold no references, so hydration is assembly only.

use async_trait::async_trait;

use catalog_core::entities::{System, SystemView};
use catalog_core::query::QuerySpec;

use crate::error::DataError;
use crate::hydrate::Hydrate;
use crate::service::CatalogService;

#[async_trait]
impl Hydrate for System {
    type View = SystemView;

    async fn hydrate(self, _catalog: &CatalogService) -> SystemView {
        SystemView::assemble(self)
    }
}

impl CatalogService {
    pub async fn get_system(&self, id: &str) -> Result<Option<SystemView>, DataError> {
        self.get_one::<System>(id).await
    }

    pub async fn get_systems(&self, spec: &QuerySpec) -> Result<Vec<SystemView>, DataError> {
        self.get_many::<System>(spec).await
    }
}
