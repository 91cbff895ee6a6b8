//! Validation errors raised before any store interaction.
//!
//! Store-level failures (`StoreUnavailable`, `DecodeFailure`) belong to
//! `catalog-db`, which converges these into its `DataError`.

use thiserror::Error;

/// An external identifier that does not match the store's key format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier is not exactly 24 characters long.
    #[error("identifier '{id}' must be 24 hex characters, got {len}")]
    Length { id: String, len: usize },

    /// The identifier has the right length but contains non-hex characters.
    #[error("identifier '{id}' is not hexadecimal")]
    NotHex { id: String },
}

impl IdError {
    /// The rejected identifier, as supplied by the caller.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Length { id, .. } | Self::NotHex { id } => id,
        }
    }
}

/// A query specification that cannot be translated into store primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A filter, sort, or projection field name is malformed.
    #[error("invalid field name '{0}'")]
    InvalidField(String),

    /// A filter condition uses an operator the translator does not know.
    #[error("unknown operator '{op}' on field '{field}'")]
    UnknownOperator { field: String, op: String },

    /// A filter condition has an operand of the wrong shape.
    #[error("invalid operand for '{op}' on field '{field}': {reason}")]
    InvalidOperand {
        field: String,
        op: String,
        reason: String,
    },

    /// The sort key is empty or malformed.
    #[error("invalid sort key '{0}'")]
    InvalidSort(String),

    /// A filter on the record key names an identifier the store cannot hold.
    #[error("invalid identifier in '{op}' on field '{field}': {source}")]
    InvalidIdentifier {
        field: String,
        op: String,
        #[source]
        source: IdError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_error_exposes_rejected_input() {
        let err = IdError::Length {
            id: "abc".into(),
            len: 3,
        };
        assert_eq!(err.id(), "abc");
        assert_eq!(
            err.to_string(),
            "identifier 'abc' must be 24 hex characters, got 3"
        );
    }

    #[test]
    fn query_error_messages_name_the_field() {
        let err = QueryError::UnknownOperator {
            field: "title".into(),
            op: "$regex".into(),
        };
        assert_eq!(err.to_string(), "unknown operator '$regex' on field 'title'");
    }
}
