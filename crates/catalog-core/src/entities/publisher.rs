use serde::{Deserialize, Serialize};

use super::{Property, Record, Tag};
use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;

/// A publishing house, as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Publisher {
    pub id: ObjectId,
    pub name: String,
    pub address: String,
    pub website: String,
    pub notes: String,
    pub properties: Vec<Property>,
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub audit: AuditEnvelope,
}

impl Record for Publisher {
    const KIND: EntityKind = EntityKind::Publisher;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherView {
    id: ObjectId,
    name: String,
    address: String,
    website: String,
    notes: String,
    properties: Vec<Property>,
    tags: Vec<Tag>,
    #[serde(flatten)]
    audit: AuditEnvelope,
}

impl PublisherView {
    #[must_use]
    pub fn assemble(record: Publisher) -> Self {
        Self {
            id: record.id,
            name: record.name,
            address: record.address,
            website: record.website,
            notes: record.notes,
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
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn website(&self) -> &str {
        &self.website
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
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
}
