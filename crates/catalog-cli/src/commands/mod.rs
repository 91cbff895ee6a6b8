//! Command handlers.

mod get;
mod import;
mod list;

use catalog_config::CatalogConfig;

use crate::cli::{Commands, GlobalFlags};

pub async fn dispatch(command: Commands, config: &CatalogConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Get(args) => get::handle(&args, config, flags).await,
        Commands::List(args) => list::handle(&args, config, flags).await,
        Commands::Import(args) => import::handle(&args, config, flags).await,
    }
}
