use chrono::Utc;

use crate::errors::AppError;
use crate::models::audit::AuditLogEntry;
use crate::storage::keys;

use super::{ids, Store};

/// The activity feed keeps only this many entries.
const MAX_AUDIT_ENTRIES: usize = 100;

impl Store {
    /// The activity feed, newest first, at most 100 entries.
    pub async fn list_audit_logs(&self) -> Result<Vec<AuditLogEntry>, AppError> {
        let _guard = self.op_lock.lock().await;
        self.load_audit_logs().await
    }

    /// Records one action. Called by the mutating operations while they
    /// hold the operation lock; not part of the public surface.
    pub(crate) async fn append_audit_log(
        &self,
        action: &str,
        performed_by: &str,
        target_id: &str,
        details: &str,
    ) -> Result<(), AppError> {
        let mut logs = self.load_audit_logs().await?;
        push_capped(
            &mut logs,
            AuditLogEntry {
                id: ids::entity_id(),
                action: action.to_string(),
                performed_by: performed_by.to_string(),
                target_id: target_id.to_string(),
                details: details.to_string(),
                timestamp: Utc::now(),
            },
        );
        self.write_json(keys::LOGS, &logs).await
    }

    async fn load_audit_logs(&self) -> Result<Vec<AuditLogEntry>, AppError> {
        Ok(self.read_json(keys::LOGS).await?.unwrap_or_default())
    }
}

/// Inserts newest-first, then trims to the cap.
fn push_capped(logs: &mut Vec<AuditLogEntry>, entry: AuditLogEntry) {
    logs.insert(0, entry);
    logs.truncate(MAX_AUDIT_ENTRIES);
}
