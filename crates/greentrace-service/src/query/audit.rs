//! Audit trail search criteria.

use serde::{Deserialize, Serialize};

use greentrace_core::types::{DocumentId, PageRequest};
use greentrace_entity::audit::{AuditAction, AuditTrailEntry};

/// Filters applied to the newest-first audit trail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    /// Only entries for this document.
    #[serde(default)]
    pub document_id: Option<DocumentId>,
    /// Only entries with this action.
    #[serde(default)]
    pub action: Option<AuditAction>,
    /// Page to return.
    #[serde(default)]
    pub page: PageRequest,
}

impl AuditQuery {
    /// Whether `entry` passes every filter.
    pub fn matches(&self, entry: &AuditTrailEntry) -> bool {
        self.document_id.is_none_or(|id| id == entry.document_id)
            && self.action.is_none_or(|action| action == entry.action)
    }
}
