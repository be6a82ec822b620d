//! Document entity model.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use greentrace_core::types::DocumentId;

use crate::compliance::ComplianceRecord;

use super::extracted::ExtractedData;
use super::file_type::FileType;
use super::processing::ProcessingInfo;
use super::source::SourceInfo;
use super::status::{DocumentStatus, UploadMethod};
use super::verification::Verification;

/// A source artifact (invoice, receipt, survey, ...) tracked by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Stored file name (`<id>_<original name>`).
    pub file_name: String,
    /// File name as submitted.
    pub original_name: String,
    /// File type derived from the extension.
    pub file_type: FileType,
    /// Payload size in bytes; zero for a camera capture until attached.
    pub file_size: u64,
    /// How the document was acquired.
    pub upload_method: UploadMethod,
    /// When the document was registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_timestamp: Option<DateTime<Utc>>,
    /// When processing (last) started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_timestamp: Option<DateTime<Utc>>,
    /// When processing completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_timestamp: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Extraction results.
    pub extracted_data: ExtractedData,
    /// Source attribution.
    pub source: SourceInfo,
    /// Regulatory framework mapping.
    pub compliance: ComplianceRecord,
    /// Review state.
    pub verification: Verification,
    /// Processing metadata.
    pub processing: ProcessingInfo,
}

impl Document {
    /// Whether the document counts towards aggregate metrics.
    pub fn is_completed(&self) -> bool {
        self.status == DocumentStatus::Completed
    }

    /// Milliseconds between processing start and completion, when both are stamped.
    pub fn processing_millis(&self) -> Option<i64> {
        match (self.processing_timestamp, self.completion_timestamp) {
            (Some(started), Some(finished)) => Some((finished - started).num_milliseconds()),
            _ => None,
        }
    }

    /// Latest lifecycle stamp; new stamps must not precede it.
    pub fn latest_stamp(&self) -> Option<DateTime<Utc>> {
        [
            self.upload_timestamp,
            self.processing_timestamp,
            self.completion_timestamp,
        ]
        .into_iter()
        .flatten()
        .max()
    }
}

/// File metadata supplied by the intake surface.
///
/// When payload bytes are present the size is always their length.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    /// File name as submitted.
    pub name: String,
    size: u64,
    content: Option<Bytes>,
}

impl FileDescriptor {
    /// Describe a file by name and size only.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content: None,
        }
    }

    /// Describe a file from its payload; the size is taken from the bytes.
    pub fn with_content(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len() as u64,
            content: Some(content),
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Payload bytes, when the caller has them; used for the checksum.
    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }
}
