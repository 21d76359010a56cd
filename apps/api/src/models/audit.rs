use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the capped activity feed. The stored list is newest-first
/// and truncated to the hundred most recent entries on every append.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    /// Upper-snake action name, e.g. `CREATE_RESUME` or `PASSWORD_RESET`.
    pub action: String,
    /// Id of the account the action is attributed to.
    pub performed_by: String,
    /// Id of the entity the action touched.
    pub target_id: String,
    /// Free-form human-readable summary.
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_with_frontend_field_names() {
        let entry = AuditLogEntry {
            id: "log-1".to_string(),
            action: "CREATE_RESUME".to_string(),
            performed_by: "u1".to_string(),
            target_id: "r1".to_string(),
            details: "New resume submitted".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["performedBy"], "u1");
        assert_eq!(json["targetId"], "r1");
        assert_eq!(json["action"], "CREATE_RESUME");
    }
}
