//! Audit export payload for external compliance review.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use greentrace_core::error::{AppError, ErrorKind};
use greentrace_entity::audit::AuditTrailEntry;
use greentrace_entity::document::Document;

use super::metrics::AggregateMetrics;

/// Snapshot of the registry at export time.
///
/// Field names are part of the external contract: `exportDate`,
/// `documents`, `auditTrail` (newest first), `metrics`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditExport<'a> {
    /// ISO-8601 export timestamp.
    pub export_date: String,
    /// Every tracked document.
    pub documents: Vec<&'a Document>,
    /// Full audit trail, newest first.
    pub audit_trail: Vec<&'a AuditTrailEntry>,
    /// Aggregate metrics at export time.
    pub metrics: AggregateMetrics,
    #[serde(skip)]
    exported_at: DateTime<Utc>,
}

impl<'a> AuditExport<'a> {
    /// Assemble an export snapshot.
    pub fn new(
        exported_at: DateTime<Utc>,
        documents: Vec<&'a Document>,
        audit_trail: Vec<&'a AuditTrailEntry>,
        metrics: AggregateMetrics,
    ) -> Self {
        Self {
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            documents,
            audit_trail,
            metrics,
            exported_at,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, AppError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// File name this export is written under.
    pub fn file_name(&self) -> String {
        format!(
            "audit-export-{}.json",
            self.exported_at.format("%Y%m%dT%H%M%S%.3fZ")
        )
    }

    /// Write the export into `directory`, creating it if needed.
    pub fn write_to(&self, directory: &Path, pretty: bool) -> Result<PathBuf, AppError> {
        std::fs::create_dir_all(directory).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create export directory '{}'", directory.display()),
                e,
            )
        })?;

        let path = directory.join(self.file_name());
        std::fs::write(&path, self.to_json(pretty)?)?;

        info!(
            path = %path.display(),
            documents = self.documents.len(),
            entries = self.audit_trail.len(),
            "Audit export written"
        );
        Ok(path)
    }
}
