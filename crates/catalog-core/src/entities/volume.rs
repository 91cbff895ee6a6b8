use serde::{Deserialize, Serialize};

use super::{LicenseView, Property, PublisherView, Record, StudioView, SystemView, Tag};
use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;
use crate::relation::RelationList;

/// A published volume, as stored.
///
/// Reference lists keep their stored order; it is significant for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub notes: String,
    pub system_ids: Vec<String>,
    pub publisher_ids: Vec<String>,
    pub studio_ids: Vec<String>,
    pub license_ids: Vec<String>,
    pub properties: Vec<Property>,
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub audit: AuditEnvelope,
}

impl Record for Volume {
    const KIND: EntityKind = EntityKind::Volume;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}

/// Resolved relations of a volume, one list per reference field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeRelations {
    pub systems: RelationList<SystemView>,
    pub publishers: RelationList<PublisherView>,
    pub studios: RelationList<StudioView>,
    pub licenses: RelationList<LicenseView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeView {
    id: ObjectId,
    title: String,
    description: String,
    notes: String,
    systems: RelationList<SystemView>,
    publishers: RelationList<PublisherView>,
    studios: RelationList<StudioView>,
    licenses: RelationList<LicenseView>,
    properties: Vec<Property>,
    tags: Vec<Tag>,
    #[serde(flatten)]
    audit: AuditEnvelope,
}

impl VolumeView {
    #[must_use]
    pub fn assemble(record: Volume, relations: VolumeRelations) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            notes: record.notes,
            systems: relations.systems,
            publishers: relations.publishers,
            studios: relations.studios,
            licenses: relations.licenses,
            properties: record.properties,
            tags: record.tags,
            audit: record.audit,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ObjectId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub const fn systems(&self) -> &RelationList<SystemView> {
        &self.systems
    }

    #[must_use]
    pub const fn publishers(&self) -> &RelationList<PublisherView> {
        &self.publishers
    }

    #[must_use]
    pub const fn studios(&self) -> &RelationList<StudioView> {
        &self.studios
    }

    #[must_use]
    pub const fn licenses(&self) -> &RelationList<LicenseView> {
        &self.licenses
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[must_use]
    pub const fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }

    /// Whether every stored reference of the volume resolved.
    #[must_use]
    pub fn is_fully_resolved(&self) -> bool {
        self.systems.is_complete()
            && self.publishers.is_complete()
            && self.studios.is_complete()
            && self.licenses.is_complete()
    }
}
