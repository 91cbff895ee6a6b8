use serde::{Deserialize, Serialize};

use super::{Property, Record, Tag};
use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;

/// A design studio, as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Studio {
    pub id: ObjectId,
    pub name: String,
    pub website: String,
    pub notes: String,
    pub properties: Vec<Property>,
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub audit: AuditEnvelope,
}

impl Record for Studio {
    const KIND: EntityKind = EntityKind::Studio;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioView {
    id: ObjectId,
    name: String,
    website: String,
    notes: String,
    properties: Vec<Property>,
    tags: Vec<Tag>,
    #[serde(flatten)]
    audit: AuditEnvelope,
}

impl StudioView {
    #[must_use]
    pub fn assemble(record: Studio) -> Self {
        Self {
            id: record.id,
            name: record.name,
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
