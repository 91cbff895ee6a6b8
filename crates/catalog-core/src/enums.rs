//! Entity kinds served by the catalog and their per-kind metadata.
//!
//! Collection and span names are derived here so repositories and hydrators
//! stay generic over the kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every entity kind the catalog can fetch and hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Contribution,
    License,
    Person,
    Publisher,
    Review,
    Studio,
    System,
    Volume,
}

impl EntityKind {
    /// All kinds, in alphabetical order.
    pub const ALL: [Self; 8] = [
        Self::Contribution,
        Self::License,
        Self::Person,
        Self::Publisher,
        Self::Review,
        Self::Studio,
        Self::System,
        Self::Volume,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contribution => "contribution",
            Self::License => "license",
            Self::Person => "person",
            Self::Publisher => "publisher",
            Self::Review => "review",
            Self::Studio => "studio",
            Self::System => "system",
            Self::Volume => "volume",
        }
    }

    /// Name of the store collection holding records of this kind.
    ///
    /// Adding a kind forces choosing its collection here.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Contribution => "contributions",
            Self::License => "licenses",
            Self::Person => "persons",
            Self::Publisher => "publishers",
            Self::Review => "reviews",
            Self::Studio => "studios",
            Self::System => "systems",
            Self::Volume => "volumes",
        }
    }

    /// Span name for a single-record store read, e.g. `db-get-volume`.
    #[must_use]
    pub fn get_span(self) -> String {
        format!("db-get-{}", self.as_str())
    }

    /// Span name for a collection store query, e.g. `db-query-volumes`.
    #[must_use]
    pub fn query_span(self) -> String {
        format!("db-query-{}", self.collection())
    }

    /// Span name wrapping a whole collection request, e.g. `get-volumes`.
    #[must_use]
    pub fn many_span(self) -> String {
        format!("get-{}", self.collection())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts the singular kind name or its collection name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.collection() == s)
            .ok_or_else(|| format!("unknown entity kind '{s}'"))
    }
}
