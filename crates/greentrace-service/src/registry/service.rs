//! Document registry: intake, lifecycle bookkeeping, and reads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use greentrace_core::config::{AppConfig, ComplianceConfig, ExportConfig, RegistryConfig};
use greentrace_core::error::AppError;
use greentrace_core::traits::{Clock, SystemClock};
use greentrace_core::types::{AuditEntryId, DocumentId, PageResponse};
use greentrace_entity::audit::{AuditAction, AuditChange, AuditTrailEntry};
use greentrace_entity::compliance::ComplianceRecord;
use greentrace_entity::document::{
    Document, DocumentStatus, ExtractedData, ExtractedDataPatch, FileDescriptor, FileType,
    ProcessingInfo, SourceInfo, SourcePatch, UploadMethod, Verification, VerificationStatus,
};

use super::audit::AuditTrail;
use super::transition::{check_transition, status_action, verification_action};
use crate::context::RequestContext;
use crate::query::{AuditQuery, DocumentQuery};
use crate::report::{AggregateMetrics, AuditExport};

/// Category given to freshly uploaded files.
const UNKNOWN_CATEGORY: &str = "Unknown";
/// Category given to camera captures until they are mapped.
const CAMERA_CATEGORY: &str = "Camera Capture";

/// In-process store of tracked documents and their audit trail.
///
/// Every successful mutation appends exactly one audit entry. Mutators
/// addressed at an unknown id return `ErrorKind::NotFound` and change
/// nothing; use [`NotFoundExt`](greentrace_core::NotFoundExt) to ignore that.
#[derive(Debug)]
pub struct DocumentRegistry {
    /// Documents by id.
    documents: HashMap<DocumentId, Document>,
    /// Ids in registration order.
    order: Vec<DocumentId>,
    /// Append-only audit log.
    audit: AuditTrail,
    /// Time source for every stamp.
    clock: Arc<dyn Clock>,
    /// Registry behaviour.
    config: RegistryConfig,
    /// Coverage denominators.
    compliance: ComplianceConfig,
    /// Export settings.
    export: ExportConfig,
}

impl Default for DocumentRegistry {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl DocumentRegistry {
    /// Creates an empty registry on the system clock.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an empty registry on the given clock.
    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            documents: HashMap::new(),
            order: Vec::new(),
            audit: AuditTrail::new(),
            clock,
            config: config.registry.clone(),
            compliance: config.compliance.clone(),
            export: config.export.clone(),
        }
    }

    // ── Intake ─────────────────────────────────────────────────

    /// Returns an identifier never issued by this registry before.
    pub fn generate_document_id(&self) -> DocumentId {
        loop {
            let id = DocumentId::new();
            if !self.documents.contains_key(&id) {
                return id;
            }
        }
    }

    /// Registers an uploaded file.
    pub fn track_upload(
        &mut self,
        ctx: &RequestContext,
        file: FileDescriptor,
        upload_method: UploadMethod,
    ) -> Document {
        let id = self.generate_document_id();
        let now = self.clock.now();
        let details = format!("Document uploaded: {}", file.name);

        let document = Document {
            id,
            file_name: format!("{id}_{}", file.name),
            file_type: FileType::from_file_name(&file.name),
            file_size: file.size(),
            upload_method,
            upload_timestamp: Some(now),
            processing_timestamp: None,
            completion_timestamp: None,
            status: DocumentStatus::Pending,
            extracted_data: ExtractedData::placeholder(UNKNOWN_CATEGORY),
            source: SourceInfo::unknown_invoice(),
            compliance: ComplianceRecord::default(),
            verification: Verification {
                checksum_hash: file.content().map(checksum),
                ..Verification::default()
            },
            processing: ProcessingInfo::default(),
            original_name: file.name,
        };

        info!(
            document_id = %id,
            name = %document.original_name,
            size = document.file_size,
            method = %upload_method,
            "Document uploaded"
        );

        self.insert(ctx, document, now, details)
    }

    /// Registers a camera capture. The payload size is unknown until
    /// [`attach_capture_payload`](Self::attach_capture_payload) is called.
    pub fn track_camera_capture(&mut self, ctx: &RequestContext, file_name: &str) -> Document {
        let id = self.generate_document_id();
        let now = self.clock.now();

        let document = Document {
            id,
            file_name: format!("{id}_{file_name}"),
            original_name: file_name.to_string(),
            file_type: FileType::Image,
            file_size: 0,
            upload_method: UploadMethod::Camera,
            upload_timestamp: Some(now),
            processing_timestamp: None,
            completion_timestamp: None,
            status: DocumentStatus::Pending,
            extracted_data: ExtractedData::placeholder(CAMERA_CATEGORY),
            source: SourceInfo::camera_scan(),
            compliance: ComplianceRecord::default(),
            verification: Verification::default(),
            processing: ProcessingInfo {
                ocr_used: true,
                ..ProcessingInfo::default()
            },
        };

        info!(document_id = %id, name = %file_name, "Document captured via camera");

        self.insert(
            ctx,
            document,
            now,
            format!("Document captured via camera: {file_name}"),
        )
    }

    fn insert(
        &mut self,
        ctx: &RequestContext,
        document: Document,
        now: DateTime<Utc>,
        details: String,
    ) -> Document {
        let id = document.id;
        self.documents.insert(id, document.clone());
        self.order.push(id);
        self.record(ctx, id, AuditAction::Upload, now, details, None);
        document
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Writes a new processing status and merges extracted data.
    ///
    /// Entering `processing` stamps the processing time if it is unset, or
    /// re-stamps it on a retry out of `error` (clearing any completion
    /// stamp). Entering `completed` stamps the completion time and fills
    /// the processing duration. Stamps never precede earlier stamps.
    pub fn update_processing_status(
        &mut self,
        ctx: &RequestContext,
        id: DocumentId,
        status: DocumentStatus,
        extracted: Option<ExtractedDataPatch>,
    ) -> Result<Document, AppError> {
        let policy = self.config.transition_policy;
        let now = self.clock.now();
        let default_model = self.config.default_model_version.clone();

        let document = self.document_mut(id)?;
        let previous = document.status;
        check_transition(policy, id, previous, status).inspect_err(|e| {
            warn!(document_id = %id, from = %previous, to = %status, "{e}");
        })?;

        let stamp = not_before(now, document.latest_stamp());
        document.status = status;

        match status {
            DocumentStatus::Processing => {
                if previous == DocumentStatus::Error {
                    document.processing_timestamp = Some(stamp);
                    document.completion_timestamp = None;
                } else if document.processing_timestamp.is_none() {
                    document.processing_timestamp = Some(stamp);
                }
            }
            DocumentStatus::Completed => {
                document.completion_timestamp = Some(stamp);
                document.processing.processing_duration = document
                    .processing_millis()
                    .map(|ms| u64::try_from(ms).unwrap_or(0));
                document
                    .processing
                    .ai_model_version
                    .get_or_insert(default_model);
            }
            DocumentStatus::Pending | DocumentStatus::Error | DocumentStatus::Archived => {}
        }

        if let Some(patch) = extracted {
            document.extracted_data.apply(patch);
        }

        let snapshot = document.clone();
        debug!(document_id = %id, from = %previous, to = %status, "Processing status changed");

        self.record(
            ctx,
            id,
            status_action(status),
            stamp,
            format!("Status changed from {previous} to {status}"),
            Some(AuditChange::Status {
                previous_value: previous,
                new_value: status,
            }),
        );
        Ok(snapshot)
    }

    /// Writes a new verification status.
    ///
    /// Stamps the verification date, records the acting user as reviewer,
    /// and overwrites the notes only when new notes are given.
    pub fn update_verification_status(
        &mut self,
        ctx: &RequestContext,
        id: DocumentId,
        status: VerificationStatus,
        notes: Option<String>,
    ) -> Result<Document, AppError> {
        let now = self.clock.now();
        let document = self.document_mut(id)?;

        let previous = document.verification.status;
        document.verification.status = status;
        document.verification.verification_date = Some(now);
        if let Some(user) = &ctx.user_id {
            document.verification.verified_by = Some(user.clone());
        }
        if let Some(notes) = notes {
            document.verification.notes = Some(notes);
        }

        let snapshot = document.clone();
        debug!(document_id = %id, from = %previous, to = %status, "Verification status changed");

        self.record(
            ctx,
            id,
            verification_action(status),
            now,
            format!("Verification status changed from {previous} to {status}"),
            Some(AuditChange::Verification {
                previous_value: previous,
                new_value: status,
            }),
        );
        Ok(snapshot)
    }

    /// Maps a document to the compliance frameworks of `category`.
    ///
    /// The compliance record is replaced wholesale; an unknown category
    /// leaves it empty.
    pub fn map_to_compliance(
        &mut self,
        ctx: &RequestContext,
        id: DocumentId,
        category: &str,
        amount: Option<String>,
    ) -> Result<Document, AppError> {
        let now = self.clock.now();
        let document = self.document_mut(id)?;

        let previous_category =
            std::mem::replace(&mut document.extracted_data.category, category.to_string());
        document.compliance = ComplianceRecord::for_category(category);
        if let Some(amount) = amount {
            document.extracted_data.amount = Some(amount);
        }

        let snapshot = document.clone();
        debug!(
            document_id = %id,
            category,
            aligned = snapshot.compliance.eu_taxonomy_aligned,
            "Mapped to compliance frameworks"
        );

        self.record(
            ctx,
            id,
            AuditAction::Process,
            now,
            format!("Mapped to compliance frameworks: {category}"),
            Some(AuditChange::Compliance {
                previous_value: previous_category,
                new_value: category.to_string(),
            }),
        );
        Ok(snapshot)
    }

    /// Attaches the payload of a camera capture, setting size and checksum.
    pub fn attach_capture_payload(
        &mut self,
        ctx: &RequestContext,
        id: DocumentId,
        content: Bytes,
    ) -> Result<Document, AppError> {
        let now = self.clock.now();
        let document = self.document_mut(id)?;

        document.file_size = content.len() as u64;
        document.verification.checksum_hash = Some(checksum(&content));

        let snapshot = document.clone();
        self.record(
            ctx,
            id,
            AuditAction::Process,
            now,
            format!("Capture payload attached: {} bytes", snapshot.file_size),
            None,
        );
        Ok(snapshot)
    }

    /// Appends extraction errors and warnings to the processing metadata.
    pub fn record_processing_notes(
        &mut self,
        ctx: &RequestContext,
        id: DocumentId,
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> Result<Document, AppError> {
        let now = self.clock.now();
        let document = self.document_mut(id)?;

        let details = format!(
            "Processing notes recorded: {} error(s), {} warning(s)",
            errors.len(),
            warnings.len()
        );
        document.processing.errors.extend(errors);
        document.processing.warnings.extend(warnings);

        let snapshot = document.clone();
        self.record(ctx, id, AuditAction::Process, now, details, None);
        Ok(snapshot)
    }

    /// Merges source attribution fields.
    pub fn update_source(
        &mut self,
        ctx: &RequestContext,
        id: DocumentId,
        patch: SourcePatch,
    ) -> Result<Document, AppError> {
        let now = self.clock.now();
        let document = self.document_mut(id)?;
        document.source.apply(patch);

        let snapshot = document.clone();
        self.record(
            ctx,
            id,
            AuditAction::Process,
            now,
            format!("Source updated: {}", snapshot.source.provider),
            None,
        );
        Ok(snapshot)
    }

    // ── Reads ──────────────────────────────────────────────────

    /// All documents in registration order.
    pub fn all_documents(&self) -> Vec<&Document> {
        self.order
            .iter()
            .filter_map(|id| self.documents.get(id))
            .collect()
    }

    /// One document by id.
    pub fn get_document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// Audit entries for one document, oldest first.
    pub fn document_audit_trail(&self, id: DocumentId) -> Vec<&AuditTrailEntry> {
        self.audit.for_document(id)
    }

    /// Every audit entry, newest first.
    pub fn full_audit_trail(&self) -> Vec<&AuditTrailEntry> {
        self.audit.newest_first()
    }

    /// Search, filter, sort, and page the document collection.
    pub fn query_documents(&self, query: &DocumentQuery) -> PageResponse<&Document> {
        let mut matching: Vec<&Document> = self
            .all_documents()
            .into_iter()
            .filter(|doc| query.matches(doc))
            .collect();
        matching.sort_by(|a, b| query.compare(a, b));
        query.page.paginate(matching)
    }

    /// Filter and page the newest-first audit trail.
    pub fn search_audit_trail(&self, query: &AuditQuery) -> PageResponse<&AuditTrailEntry> {
        self.audit.search(query)
    }

    /// Number of tracked documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents are tracked.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    // ── Reporting ──────────────────────────────────────────────

    /// Summary statistics over all documents.
    pub fn aggregate_metrics(&self) -> AggregateMetrics {
        AggregateMetrics::compute(self.all_documents(), &self.compliance)
    }

    /// Snapshot of documents, newest-first trail, and metrics.
    pub fn build_export(&self) -> AuditExport<'_> {
        AuditExport::new(
            self.clock.now(),
            self.all_documents(),
            self.full_audit_trail(),
            self.aggregate_metrics(),
        )
    }

    /// Serialize the export snapshot to JSON.
    pub fn export_audit_trail(&self) -> Result<String, AppError> {
        let export = self.build_export();
        info!(
            documents = export.documents.len(),
            entries = export.audit_trail.len(),
            "Audit trail exported"
        );
        export.to_json(self.export.pretty)
    }

    /// Write the export snapshot to `directory`, or the configured export
    /// directory when `None`. Returns the written path.
    pub fn write_export(&self, directory: Option<&Path>) -> Result<PathBuf, AppError> {
        let directory = directory
            .map_or_else(|| PathBuf::from(&self.export.directory), Path::to_path_buf);
        self.build_export().write_to(&directory, self.export.pretty)
    }

    // ── Internals ──────────────────────────────────────────────

    fn document_mut(&mut self, id: DocumentId) -> Result<&mut Document, AppError> {
        self.documents.get_mut(&id).ok_or_else(|| {
            warn!(document_id = %id, "Document not found");
            AppError::not_found(format!("Document {id} not found"))
        })
    }

    fn record(
        &mut self,
        ctx: &RequestContext,
        document_id: DocumentId,
        action: AuditAction,
        timestamp: DateTime<Utc>,
        details: String,
        change: Option<AuditChange>,
    ) {
        let entry = AuditTrailEntry {
            id: AuditEntryId::new(),
            document_id,
            action,
            timestamp,
            user_id: ctx.user_id.clone().or_else(|| self.config.audit_actor.clone()),
            details,
            change,
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
        };
        self.audit.append(entry);
    }
}

/// `now`, or `floor` if the clock reads earlier than it.
fn not_before(now: DateTime<Utc>, floor: Option<DateTime<Utc>>) -> DateTime<Utc> {
    floor.map_or(now, |floor| now.max(floor))
}

/// Lowercase hex SHA-256 of a payload.
fn checksum(content: &Bytes) -> String {
    hex::encode(Sha256::digest(content))
}
