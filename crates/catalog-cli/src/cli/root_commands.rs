use clap::{Args, Subcommand};

use catalog_core::enums::EntityKind;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch one record by id, with its relations hydrated.
    Get(GetArgs),
    /// List records of a kind, filtered, sorted, and paginated.
    List(ListArgs),
    /// Load documents from a JSON Lines file into the store.
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Entity kind, singular or plural (e.g. `volume`, `reviews`).
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,
    /// 24-character hex object id.
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    /// Equality condition `field=value`; the value is read as JSON when it
    /// parses, otherwise as a string. Repeatable.
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,

    /// Filter object in query syntax, e.g. `{"year": {"$gte": 1990}}`.
    #[arg(long = "where", value_name = "JSON")]
    pub where_json: Option<String>,

    /// Sort field; prefix with `-` for descending.
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Field to include in the query projection. Repeatable.
    #[arg(long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,

    /// Zero-based offset.
    #[arg(long, default_value_t = 0)]
    pub start: u64,

    /// Page size; 0 uses the store default.
    #[arg(long, default_value_t = 0)]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,
    /// JSON Lines file, one document per line, each with an `id` or `_id`.
    pub file: String,
}

fn parse_kind(raw: &str) -> Result<EntityKind, String> {
    raw.parse()
}
