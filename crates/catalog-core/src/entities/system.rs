use serde::{Deserialize, Serialize};

use super::{Record, Tag};
use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;

/// A game system, as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct System {
    pub id: ObjectId,
    pub game_system: String,
    pub edition: String,
    pub notes: String,
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub audit: AuditEnvelope,
}

impl Record for System {
    const KIND: EntityKind = EntityKind::System;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}

/// Read-only view of a game system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemView {
    id: ObjectId,
    game_system: String,
    edition: String,
    notes: String,
    tags: Vec<Tag>,
    #[serde(flatten)]
    audit: AuditEnvelope,
}

impl SystemView {
    /// Systems have no foreign references; the view is a verbatim copy.
    #[must_use]
    pub fn assemble(record: System) -> Self {
        Self {
            id: record.id,
            game_system: record.game_system,
            edition: record.edition,
            notes: record.notes,
            tags: record.tags,
            audit: record.audit,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ObjectId {
        &self.id
    }

    #[must_use]
    pub fn game_system(&self) -> &str {
        &self.game_system
    }

    #[must_use]
    pub fn edition(&self) -> &str {
        &self.edition
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
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
