//! Person hydration. Persons hold no references, so hydration is assembly only.

use async_trait::async_trait;

use catalog_core::entities::{Person, PersonView};
use catalog_core::query::QuerySpec;

use crate::error::DataError;
use crate::hydrate::Hydrate;
use crate::service::CatalogService;

#[async_trait]
impl Hydrate for Person {
    type View = PersonView;

    async fn hydrate(self, _catalog: &CatalogService) -> PersonView {
        PersonView::assemble(self)
    }
}

impl CatalogService {
    pub async fn get_person(&self, id: &str) -> Result<Option<PersonView>, DataError> {
        self.get_one::<Person>(id).await
    }

    pub async fn get_persons(&self, spec: &QuerySpec) -> Result<Vec<PersonView>, DataError> {
        self.get_many::<Person>(spec).await
    }
}
