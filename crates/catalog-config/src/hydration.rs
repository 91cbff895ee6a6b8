//! Relation hydration configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How sibling relation lookups of one list are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fanout {
    /// One lookup at a time, in stored order.
    #[default]
    Sequential,
    /// All lookups of a list in flight at once; results keep stored order.
    Concurrent,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HydrationConfig {
    #[serde(default)]
    pub fanout: Fanout,

    /// Budget for one whole `get_one` / `get_many` request, in milliseconds.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl HydrationConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
