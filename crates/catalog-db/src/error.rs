//! Error taxonomy for catalog reads.
//!
//! A soft miss (no record for a valid id) is not an error: it is `Ok(None)`
//! from every single-record operation.

use catalog_core::errors::{IdError, QueryError};
use catalog_core::relation::UnresolvedReason;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// The identifier is malformed; raised before any store call.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdError),

    /// The query specification could not be translated.
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    /// The store could not be reached or failed the call.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored document does not have the expected shape.
    #[error("Decode failure in '{collection}': {reason}")]
    DecodeFailure { collection: String, reason: String },
}

impl DataError {
    /// How this failure appears on a relation that could not be resolved.
    #[must_use]
    pub fn unresolved_reason(&self) -> UnresolvedReason {
        match self {
            Self::InvalidIdentifier(e) => UnresolvedReason::InvalidIdentifier(e.to_string()),
            Self::InvalidQuery(e) => UnresolvedReason::StoreUnavailable(e.to_string()),
            Self::StoreUnavailable(reason) => UnresolvedReason::StoreUnavailable(reason.clone()),
            Self::DecodeFailure { reason, .. } => UnresolvedReason::DecodeFailure(reason.clone()),
        }
    }
}

impl From<libsql::Error> for DataError {
    fn from(error: libsql::Error) -> Self {
        Self::StoreUnavailable(error.to_string())
    }
}
