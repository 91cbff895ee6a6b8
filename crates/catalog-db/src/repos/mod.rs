//! Per-kind hydration and entry points.
//!
//! Each module implements [`crate::hydrate::Hydrate`] for one record kind
//! and adds its `get_<kind>` / `get_<kinds>` methods to
//! [`crate::service::CatalogService`].

pub mod contribution;
pub mod license;
pub mod person;
pub mod publisher;
pub mod review;
pub mod studio;
pub mod system;
pub mod volume;
