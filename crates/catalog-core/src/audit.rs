//! Audit envelope attached to every catalog entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Created / updated / soft-deleted metadata.
///
/// Opaque to the read layer: copied verbatim from the raw record into the
/// view, never computed or adjusted here. A field that is missing or `null`
/// in the record stays `None` and serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditEnvelope {
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
}

impl AuditEnvelope {
    /// Whether the record carries a soft-delete marker.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_camel_case_with_nullable_delete() {
        let json = serde_json::json!({
            "createdAt": "2024-01-02T03:04:05Z",
            "createdBy": "alice",
            "updatedAt": "2024-02-03T04:05:06Z",
            "updatedBy": "bob",
            "deletedAt": null,
            "deletedBy": null,
        });
        let audit: AuditEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(
            audit,
            AuditEnvelope {
                created_at: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
                created_by: Some("alice".into()),
                updated_at: Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap()),
                updated_by: Some("bob".into()),
                deleted_at: None,
                deleted_by: None,
            }
        );
        assert!(!audit.is_deleted());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let audit: AuditEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(audit, AuditEnvelope::default());
    }

    #[test]
    fn null_fields_decode_as_none() {
        let audit: AuditEnvelope = serde_json::from_value(serde_json::json!({
            "createdAt": null,
            "createdBy": null,
            "updatedAt": null,
            "updatedBy": null,
        }))
        .unwrap();
        assert_eq!(audit, AuditEnvelope::default());
    }

    #[test]
    fn absent_timestamps_serialize_as_null() {
        let json = serde_json::to_value(AuditEnvelope::default()).unwrap();
        assert_eq!(json["createdAt"], serde_json::Value::Null);
        assert_eq!(json["updatedAt"], serde_json::Value::Null);
    }
}
