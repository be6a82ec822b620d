//! Audit trail entry entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use greentrace_core::types::{AuditEntryId, DocumentId};

use crate::document::{DocumentStatus, VerificationStatus};

/// The kind of action an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Document registered (upload or capture).
    Upload,
    /// Processing status, extraction, or compliance mapping changed.
    Process,
    /// Verification status changed to pending or flagged.
    Verify,
    /// Verification status changed to verified.
    Approve,
    /// Verification status changed to rejected.
    Reject,
    /// Document moved to archived.
    Archive,
    /// Document included in an outbound export.
    Export,
}

impl AuditAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Process => "process",
            Self::Verify => "verify",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Archive => "archive",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upload" => Ok(Self::Upload),
            "process" => Ok(Self::Process),
            "verify" => Ok(Self::Verify),
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            "archive" => Ok(Self::Archive),
            "export" => Ok(Self::Export),
            _ => Err(format!("unknown audit action '{s}'")),
        }
    }
}

/// Before/after snapshot carried by a change entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuditChange {
    /// Document lifecycle status change.
    #[serde(rename_all = "camelCase")]
    Status {
        /// Status before the write.
        previous_value: DocumentStatus,
        /// Status after the write.
        new_value: DocumentStatus,
    },
    /// Verification status change.
    #[serde(rename_all = "camelCase")]
    Verification {
        /// Status before the write.
        previous_value: VerificationStatus,
        /// Status after the write.
        new_value: VerificationStatus,
    },
    /// Category re-mapping.
    #[serde(rename_all = "camelCase")]
    Compliance {
        /// Category before the mapping.
        previous_value: String,
        /// Category the document was mapped to.
        new_value: String,
    },
}

/// An immutable record of one action taken against one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrailEntry {
    /// Unique entry identifier.
    pub id: AuditEntryId,
    /// The document the action was taken against.
    pub document_id: DocumentId,
    /// What was done.
    pub action: AuditAction,
    /// When it was done.
    pub timestamp: DateTime<Utc>,
    /// Who did it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Human-readable description.
    pub details: String,
    /// Typed before/after values for change entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<AuditChange>,
    /// Client IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Client User-Agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}
