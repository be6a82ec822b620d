//! Source attribution for a document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who issued the document and what kind of document it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    /// Issuing provider, e.g. a utility or supplier.
    pub provider: String,
    /// Document kind, e.g. `"Invoice/Bill"`.
    pub document_type: String,
    /// Date the provider issued the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<DateTime<Utc>>,
    /// External reference such as an invoice number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl SourceInfo {
    /// Source record for a file whose provider is not yet known.
    pub fn unknown_invoice() -> Self {
        Self {
            provider: "Unknown".to_string(),
            document_type: "Invoice/Bill".to_string(),
            issue_date: None,
            reference: None,
        }
    }

    /// Source record for a camera capture.
    pub fn camera_scan() -> Self {
        Self {
            provider: "Camera OCR".to_string(),
            document_type: "Scanned Document".to_string(),
            issue_date: None,
            reference: None,
        }
    }

    /// Shallow-merge a patch.
    pub fn apply(&mut self, patch: SourcePatch) {
        if let Some(provider) = patch.provider {
            self.provider = provider;
        }
        if let Some(document_type) = patch.document_type {
            self.document_type = document_type;
        }
        if let Some(issue_date) = patch.issue_date {
            self.issue_date = Some(issue_date);
        }
        if let Some(reference) = patch.reference {
            self.reference = Some(reference);
        }
    }
}

/// Partial update for [`SourceInfo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePatch {
    /// New provider.
    #[serde(default)]
    pub provider: Option<String>,
    /// New document type.
    #[serde(default)]
    pub document_type: Option<String>,
    /// New issue date.
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,
    /// New reference.
    #[serde(default)]
    pub reference: Option<String>,
}
