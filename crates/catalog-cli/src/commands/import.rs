use anyhow::Context;
use serde_json::Value;

use catalog_config::CatalogConfig;
use catalog_db::store::LibsqlStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::output::output;

pub async fn handle(args: &ImportArgs, config: &CatalogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let documents = read_documents(&args.file)?;
    let store = LibsqlStore::open(&config.store)
        .await
        .with_context(|| format!("failed to open store at {}", config.store.path))?;

    let imported = store
        .put_many(args.kind.collection(), documents)
        .await
        .with_context(|| format!("failed to import {}", args.file))?;
    tracing::info!(kind = %args.kind, imported, file = %args.file, "import finished");

    output(
        &serde_json::json!({
            "collection": args.kind.collection(),
            "imported": imported,
        }),
        flags.format,
    )
}

fn read_documents(path: &str) -> anyhow::Result<Vec<Value>> {
    serde_jsonlines::json_lines::<Value, _>(path)
        .with_context(|| format!("failed to open {path}"))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to parse {path} as JSON Lines"))
}
