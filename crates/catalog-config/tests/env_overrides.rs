use figment::Jail;
use catalog_config::{CatalogConfig, Fanout};

#[test]
fn env_vars_map_to_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("CATALOG_STORE__PATH", "/tmp/from-env.db");
        jail.set_env("CATALOG_STORE__DEFAULT_PAGE_SIZE", "30");
        jail.set_env("CATALOG_HYDRATION__FANOUT", "concurrent");

        let config = CatalogConfig::load().expect("config loads");
        assert_eq!(config.store.path, "/tmp/from-env.db");
        assert_eq!(config.store.default_page_size, 30);
        assert_eq!(config.hydration.fanout, Fanout::Concurrent);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".catalog")?;
        jail.create_file(
            ".catalog/config.toml",
            r#"
[store]
path = "from-file.db"
"#,
        )?;
        jail.set_env("CATALOG_STORE__PATH", "from-env.db");

        let config = CatalogConfig::load().expect("config loads");
        assert_eq!(config.store.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn dotenv_file_feeds_environment() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "CATALOG_HYDRATION__REQUEST_TIMEOUT_MS=750\n")?;

        let config = CatalogConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.hydration.request_timeout_ms, Some(750));
        Ok(())
    });
}
