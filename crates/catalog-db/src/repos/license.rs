use async_trait::async_trait;

use catalog_core::entities::{License, LicenseView};
use catalog_core::query::QuerySpec;

use crate::error::DataError;
use crate::hydrate::Hydrate;
use crate::service::CatalogService;

#[async_trait]
impl Hydrate for License {
    type View = LicenseView;

    async fn hydrate(self, _catalog: &CatalogService) -> LicenseView {
        LicenseView::assemble(self)
    }
}

impl CatalogService {
    /// Fetch a license by id; licenses have no relations to resolve.
    pub async fn get_license(&self, id: &str) -> Result<Option<LicenseView>, DataError> {
        self.get_one::<License>(id).await
    }

    pub async fn get_licenses(&self, spec: &QuerySpec) -> Result<Vec<LicenseView>, DataError> {
        self.get_many::<License>(spec).await
    }
}
