use anyhow::Context;
use serde_json::Value;

use catalog_core::entities::{Contribution, License, Person, Publisher, Review, Studio, System, Volume};
use catalog_core::enums::EntityKind;
use catalog_config::CatalogConfig;
use catalog_db::{CatalogService, Hydrate};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GetArgs;
use crate::output::output;

pub async fn handle(args: &GetArgs, config: &CatalogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = CatalogService::open(config)
        .await
        .with_context(|| format!("failed to open store at {}", config.store.path))?;

    let view = fetch_by_kind(&catalog, args.kind, &args.id).await?;
    match view {
        Some(view) => output(&view, flags.format),
        None => anyhow::bail!("no {} with id {}", args.kind, args.id),
    }
}

pub async fn fetch_by_kind(
    catalog: &CatalogService,
    kind: EntityKind,
    id: &str,
) -> anyhow::Result<Option<Value>> {
    match kind {
        EntityKind::Contribution => fetch::<Contribution>(catalog, id).await,
        EntityKind::License => fetch::<License>(catalog, id).await,
        EntityKind::Person => fetch::<Person>(catalog, id).await,
        EntityKind::Publisher => fetch::<Publisher>(catalog, id).await,
        EntityKind::Review => fetch::<Review>(catalog, id).await,
        EntityKind::Studio => fetch::<Studio>(catalog, id).await,
        EntityKind::System => fetch::<System>(catalog, id).await,
        EntityKind::Volume => fetch::<Volume>(catalog, id).await,
    }
}

async fn fetch<R: Hydrate>(catalog: &CatalogService, id: &str) -> anyhow::Result<Option<Value>> {
    let view = catalog.get_one::<R>(id).await?;
    Ok(view.map(serde_json::to_value).transpose()?)
}
