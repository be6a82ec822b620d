//! Verification record attached to each document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::VerificationStatus;

/// Review state of a document's extracted data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    /// Current review status.
    pub status: VerificationStatus,
    /// Reviewer identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    /// When the status was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<DateTime<Utc>>,
    /// Reviewer notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Lowercase hex SHA-256 of the document payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_hash: Option<String>,
}
