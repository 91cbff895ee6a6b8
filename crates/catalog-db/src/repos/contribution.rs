//! Contribution hydration: a person and a volume, each optional.

use async_trait::async_trait;

use catalog_core::entities::{Contribution, ContributionView, Person, Volume};
use catalog_core::query::QuerySpec;

use crate::error::DataError;
use crate::hydrate::{Hydrate, Owner};
use crate::service::CatalogService;

#[async_trait]
impl Hydrate for Contribution {
    type View = ContributionView;

    async fn hydrate(self, catalog: &CatalogService) -> ContributionView {
        let owner = Owner::of(&self);
        let person = catalog.resolve_one::<Person>(owner, self.person_ref()).await;
        let volume = catalog.resolve_one::<Volume>(owner, self.volume_ref()).await;
        ContributionView::assemble(self, person, volume)
    }
}

impl CatalogService {
    pub async fn get_contribution(&self, id: &str) -> Result<Option<ContributionView>, DataError> {
        self.get_one::<Contribution>(id).await
    }

    pub async fn get_contributions(
        &self,
        spec: &QuerySpec,
    ) -> Result<Vec<ContributionView>, DataError> {
        self.get_many::<Contribution>(spec).await
    }
}
