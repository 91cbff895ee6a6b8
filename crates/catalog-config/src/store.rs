//! Document store configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "catalog.db".to_string()
}

/// Page size used when a query leaves its limit unset.
const fn default_page_size() -> u32 {
    20
}

/// Upper bound on any single page.
const fn default_max_page_size() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// libSQL database file, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Page size applied when a query's limit is zero.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest page a single query may return.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl StoreConfig {
    /// Whether the store lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
