//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use catalog_config::{CatalogConfig, ConfigError, Fanout};

#[test]
fn loads_store_and_hydration_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
path = "/var/lib/catalog/catalog.db"
default_page_size = 25
max_page_size = 200

[hydration]
fanout = "concurrent"
request_timeout_ms = 2500

[logging]
level = "catalog_db=debug"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CatalogConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = CatalogConfig::from_figment(&figment).expect("valid config");

        assert_eq!(config.store.path, "/var/lib/catalog/catalog.db");
        assert_eq!(config.store.default_page_size, 25);
        assert_eq!(config.store.max_page_size, 200);
        assert_eq!(config.hydration.fanout, Fanout::Concurrent);
        assert_eq!(config.hydration.request_timeout_ms, Some(2500));
        assert_eq!(config.logging.level, "catalog_db=debug");
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".catalog")?;
        jail.create_file(
            ".catalog/config.toml",
            r#"
[store]
path = ":memory:"
"#,
        )?;

        let config = CatalogConfig::load().expect("config loads");
        assert!(config.store.is_in_memory());
        assert_eq!(config.store.default_page_size, 20);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[hydration]
fanout = "sequential"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CatalogConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = CatalogConfig::from_figment(&figment).expect("valid config");
        assert_eq!(config.hydration.request_timeout_ms, None);
        assert_eq!(config.store.max_page_size, 100);
        Ok(())
    });
}

#[test]
fn out_of_range_page_size_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
default_page_size = 150
max_page_size = 100
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CatalogConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = CatalogConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn unknown_fanout_is_an_extraction_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[hydration]
fanout = "parallel-ish"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(CatalogConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = CatalogConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
