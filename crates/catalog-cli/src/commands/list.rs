use anyhow::Context;
use serde_json::Value;

use catalog_core::entities::{Contribution, License, Person, Publisher, Review, Studio, System, Volume};
use catalog_core::enums::EntityKind;
use catalog_core::query::QuerySpec;
use catalog_config::CatalogConfig;
use catalog_db::{CatalogService, Hydrate};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::output::output;

pub async fn handle(args: &ListArgs, config: &CatalogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spec = build_spec(args)?;
    let catalog = CatalogService::open(config)
        .await
        .with_context(|| format!("failed to open store at {}", config.store.path))?;

    let views = list_by_kind(&catalog, args.kind, &spec).await?;
    output(&views, flags.format)
}

/// Assemble a query spec from `--where`, then `--filter` on top.
pub fn build_spec(args: &ListArgs) -> anyhow::Result<QuerySpec> {
    let mut spec = QuerySpec::new().window(args.start, args.limit);

    if let Some(raw) = &args.where_json {
        let parsed: Value = serde_json::from_str(raw).context("--where is not valid JSON")?;
        let Value::Object(conditions) = parsed else {
            anyhow::bail!("--where must be a JSON object");
        };
        spec.filter.extend(conditions);
    }

    for raw in &args.filters {
        let (field, value) = raw
            .split_once('=')
            .with_context(|| format!("--filter '{raw}' is not FIELD=VALUE"))?;
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        spec = spec.filter(field, value);
    }

    spec.sort.clone_from(&args.sort);
    spec.projection.extend(args.fields.iter().cloned());
    Ok(spec)
}

async fn list_by_kind(
    catalog: &CatalogService,
    kind: EntityKind,
    spec: &QuerySpec,
) -> anyhow::Result<Vec<Value>> {
    match kind {
        EntityKind::Contribution => list::<Contribution>(catalog, spec).await,
        EntityKind::License => list::<License>(catalog, spec).await,
        EntityKind::Person => list::<Person>(catalog, spec).await,
        EntityKind::Publisher => list::<Publisher>(catalog, spec).await,
        EntityKind::Review => list::<Review>(catalog, spec).await,
        EntityKind::Studio => list::<Studio>(catalog, spec).await,
        EntityKind::System => list::<System>(catalog, spec).await,
        EntityKind::Volume => list::<Volume>(catalog, spec).await,
    }
}

async fn list<R: Hydrate>(catalog: &CatalogService, spec: &QuerySpec) -> anyhow::Result<Vec<Value>> {
    let views = catalog.get_many::<R>(spec).await?;
    views
        .iter()
        .map(|v| serde_json::to_value(v).map_err(Into::into))
        .collect()
}
