use serde::{Deserialize, Serialize};

use super::{Record, Tag, VolumeView, reference};
use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;
use crate::relation::Relation;

/// A review of a volume, as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    pub id: ObjectId,
    pub title: String,
    pub body: String,
    pub language: String,
    pub volume_id: Option<String>,
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub audit: AuditEnvelope,
}

impl Review {
    /// Stored volume reference, if any.
    #[must_use]
    pub fn volume_ref(&self) -> Option<&str> {
        reference(self.volume_id.as_ref())
    }
}

impl Record for Review {
    const KIND: EntityKind = EntityKind::Review;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    id: ObjectId,
    title: String,
    body: String,
    language: String,
    volume: Relation<VolumeView>,
    tags: Vec<Tag>,
    #[serde(flatten)]
    audit: AuditEnvelope,
}

impl ReviewView {
    #[must_use]
    pub fn assemble(record: Review, volume: Relation<VolumeView>) -> Self {
        Self {
            id: record.id,
            title: record.title,
            body: record.body,
            language: record.language,
            volume,
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
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub const fn volume(&self) -> &Relation<VolumeView> {
        &self.volume
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
