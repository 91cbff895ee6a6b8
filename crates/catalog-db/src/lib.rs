//! # catalog-db
//!
//! Read access to the catalog: fetch records of the eight entity kinds from a
//! document store and hydrate them into views with their related records
//! embedded.
//!
//! - [`store`]: the `DocumentStore` port, with libSQL and in-memory backends
//! - [`repository`]: generic per-kind fetch and decode
//! - [`hydrate`]: best-effort relation resolution
//! - [`service`]: `CatalogService`, the public entry point
//!
//! ```no_run
//! # async fn run() -> Result<(), catalog_db::error::DataError> {
//! use catalog_config::CatalogConfig;
//! use catalog_db::CatalogService;
//!
//! let catalog = CatalogService::open(&CatalogConfig::default()).await?;
//! if let Some(volume) = catalog.get_volume("65a1f0c2b3d4e5f601234567").await? {
//!     println!("{} ({} systems)", volume.title(), volume.systems().len());
//! }
//! # Ok(())
//! # }
//! ```

mod batch;
pub mod error;
pub mod hydrate;
pub mod repos;
pub mod repository;
pub mod service;
pub mod store;
pub mod telemetry;
mod test_support;

pub use error::DataError;
pub use hydrate::Hydrate;
pub use service::CatalogService;
