use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `catalog` binary.
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Catalog - read hydrated catalog records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Store path, overriding `store.path` from configuration
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use catalog_core::enums::EntityKind;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn get_accepts_plural_kind() {
        let cli = Cli::try_parse_from(["catalog", "get", "volumes", "65a1f0c2b3d4e5f601234567"])
            .expect("cli should parse");
        let Commands::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.kind, EntityKind::Volume);
        assert_eq!(args.id, "65a1f0c2b3d4e5f601234567");
    }

    #[test]
    fn list_collects_repeated_options() {
        let cli = Cli::try_parse_from([
            "catalog", "list", "review", "--filter", "language=en", "--filter", "year=1999",
            "--sort", "-title", "--field", "title", "--start", "10", "--limit", "5", "--format",
            "raw",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.kind, EntityKind::Review);
        assert_eq!(args.filters, vec!["language=en", "year=1999"]);
        assert_eq!(args.sort.as_deref(), Some("-title"));
        assert_eq!(args.fields, vec!["title"]);
        assert_eq!((args.start, args.limit), (10, 5));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["catalog", "get", "widget", "x"]).is_err());
    }

    #[test]
    fn db_flag_is_global() {
        let cli = Cli::try_parse_from(["catalog", "import", "system", "s.jsonl", "--db", "/tmp/c.db", "-q"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/c.db"));
        assert!(flags.quiet);
    }
}
