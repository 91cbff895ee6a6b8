use serde::{Deserialize, Serialize};

use super::{Property, Record, Tag};
use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;

/// A content license, as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct License {
    pub id: ObjectId,
    pub title: String,
    pub short_title: String,
    pub version: String,
    pub deed: String,
    pub legal_code: String,
    pub url: String,
    pub status: String,
    pub availability: String,
    pub notes: String,
    pub properties: Vec<Property>,
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub audit: AuditEnvelope,
}

impl Record for License {
    const KIND: EntityKind = EntityKind::License;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseView {
    id: ObjectId,
    title: String,
    short_title: String,
    version: String,
    deed: String,
    legal_code: String,
    url: String,
    status: String,
    availability: String,
    notes: String,
    properties: Vec<Property>,
    tags: Vec<Tag>,
    #[serde(flatten)]
    audit: AuditEnvelope,
}

impl LicenseView {
    #[must_use]
    pub fn assemble(record: License) -> Self {
        Self {
            id: record.id,
            title: record.title,
            short_title: record.short_title,
            version: record.version,
            deed: record.deed,
            legal_code: record.legal_code,
            url: record.url,
            status: record.status,
            availability: record.availability,
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
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn short_title(&self) -> &str {
        &self.short_title
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn deed(&self) -> &str {
        &self.deed
    }

    #[must_use]
    pub fn legal_code(&self) -> &str {
        &self.legal_code
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn availability(&self) -> &str {
        &self.availability
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
