//! # catalog-config
//!
//! Layered configuration loading for the catalog read layer using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CATALOG_*` prefix, `__` as separator)
//! 2. Project-level `.catalog/config.toml`
//! 3. User-level `~/.config/catalog/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CATALOG_STORE__PATH` -> `store.path`,
//! `CATALOG_HYDRATION__FANOUT` -> `hydration.fanout`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use catalog_config::CatalogConfig;
//!
//! let config = CatalogConfig::load_with_dotenv().expect("config");
//! println!("store: {}", config.store.path);
//! ```

mod error;
mod hydration;
mod logging;
mod store;

pub use error::ConfigError;
pub use hydration::{Fanout, HydrationConfig};
pub use logging::LoggingConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub hydration: HydrationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CatalogConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading a `.env` file from the current
    /// directory, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".catalog/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CATALOG_").split("__"))
    }

    /// Reject values the store cannot honor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero default page size or a
    /// default page size above the maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.default_page_size".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.store.default_page_size > self.store.max_page_size {
            return Err(ConfigError::InvalidValue {
                field: "store.default_page_size".into(),
                reason: format!(
                    "{} exceeds store.max_page_size {}",
                    self.store.default_page_size, self.store.max_page_size
                ),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("catalog").join("config.toml"))
    }
}
