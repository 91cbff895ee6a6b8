use serde::{Deserialize, Serialize};

use super::{Property, Record, Tag};
use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;

/// A person credited on catalog volumes, as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub id: ObjectId,
    pub name: String,
    pub notes: String,
    pub properties: Vec<Property>,
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub audit: AuditEnvelope,
}

impl Record for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    id: ObjectId,
    name: String,
    notes: String,
    properties: Vec<Property>,
    tags: Vec<Tag>,
    #[serde(flatten)]
    audit: AuditEnvelope,
}

impl PersonView {
    #[must_use]
    pub fn assemble(record: Person) -> Self {
        Self {
            id: record.id,
            name: record.name,
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
