//! # catalog-core
//!
//! Core types shared by every catalog crate.
//!
//! - Native identifiers and the identifier normalizer ([`ids`])
//! - Entity kinds and their collection metadata ([`enums`])
//! - The audit envelope carried by every entity ([`audit`])
//! - Raw records and their hydrated, read-only views ([`entities`])
//! - Typed relation-resolution outcomes ([`relation`])
//! - Transport-neutral query specs and their translation into store-native
//!   query primitives ([`query`])
//! - Validation error types ([`errors`])

pub mod audit;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod query;
pub mod relation;
