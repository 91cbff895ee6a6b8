//! Raw records and hydrated views for every catalog entity kind.
//!
//! Each module pairs the as-stored record (foreign keys as plain strings,
//! lenient decoding so projected documents still parse) with its read-only
//! view. Views are assembled from a record plus its resolved relations and
//! expose accessors only; once built they are never mutated.

mod contribution;
mod embedded;
mod license;
mod person;
mod publisher;
mod review;
mod studio;
mod system;
mod volume;

pub use contribution::{Contribution, ContributionView};
pub use embedded::{Property, Tag};
pub use license::{License, LicenseView};
pub use person::{Person, PersonView};
pub use publisher::{Publisher, PublisherView};
pub use review::{Review, ReviewView};
pub use studio::{Studio, StudioView};
pub use system::{System, SystemView};
pub use volume::{Volume, VolumeRelations, VolumeView};

use serde::de::DeserializeOwned;

use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;

/// An as-stored catalog record.
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    /// Kind metadata: collection and span names derive from it.
    const KIND: EntityKind;

    fn id(&self) -> &ObjectId;

    fn audit(&self) -> &AuditEnvelope;
}

/// Normalize an optional stored reference: empty strings count as absent.
pub(crate) fn reference(raw: Option<&String>) -> Option<&str> {
    raw.map(String::as_str).filter(|id| !id.is_empty())
}
