use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{PersonView, Record, VolumeView, reference};
use crate::audit::AuditEnvelope;
use crate::enums::EntityKind;
use crate::ids::ObjectId;
use crate::relation::Relation;

/// A person's contribution to a volume, as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contribution {
    pub id: ObjectId,
    pub person_id: Option<String>,
    pub volume_id: Option<String>,
    /// Role tags, e.g. `author`, `artist`, `editor`.
    pub roles: BTreeSet<String>,
    #[serde(flatten)]
    pub audit: AuditEnvelope,
}

impl Contribution {
    #[must_use]
    pub fn person_ref(&self) -> Option<&str> {
        reference(self.person_id.as_ref())
    }

    #[must_use]
    pub fn volume_ref(&self) -> Option<&str> {
        reference(self.volume_id.as_ref())
    }
}

impl Record for Contribution {
    const KIND: EntityKind = EntityKind::Contribution;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionView {
    id: ObjectId,
    person: Relation<PersonView>,
    volume: Relation<VolumeView>,
    roles: BTreeSet<String>,
    #[serde(flatten)]
    audit: AuditEnvelope,
}

impl ContributionView {
    #[must_use]
    pub fn assemble(
        record: Contribution,
        person: Relation<PersonView>,
        volume: Relation<VolumeView>,
    ) -> Self {
        Self {
            id: record.id,
            person,
            volume,
            roles: record.roles,
            audit: record.audit,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ObjectId {
        &self.id
    }

    #[must_use]
    pub const fn person(&self) -> &Relation<PersonView> {
        &self.person
    }

    #[must_use]
    pub const fn volume(&self) -> &Relation<VolumeView> {
        &self.volume
    }

    #[must_use]
    pub const fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    #[must_use]
    pub const fn audit(&self) -> &AuditEnvelope {
        &self.audit
    }
}
