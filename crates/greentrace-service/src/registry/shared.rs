//! Cloneable handle for multi-task access to one registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use greentrace_core::error::AppError;
use greentrace_core::types::{DocumentId, PageResponse};
use greentrace_entity::audit::AuditTrailEntry;
use greentrace_entity::document::{
    Document, DocumentStatus, ExtractedDataPatch, FileDescriptor, SourcePatch, UploadMethod,
    VerificationStatus,
};

use super::service::DocumentRegistry;
use crate::context::RequestContext;
use crate::query::{AuditQuery, DocumentQuery};
use crate::report::AggregateMetrics;

/// A [`DocumentRegistry`] behind an async read-write lock.
///
/// Writers are serialized; each mutator holds the write lock for the whole
/// read-modify-write plus its audit append. Reads return owned snapshots.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<DocumentRegistry>>,
}

impl SharedRegistry {
    /// Wraps a registry.
    pub fn new(registry: DocumentRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Acquires the read lock for multi-step reads.
    pub async fn read(&self) -> RwLockReadGuard<'_, DocumentRegistry> {
        self.inner.read().await
    }

    /// Acquires the write lock for multi-step writes.
    pub async fn write(&self) -> RwLockWriteGuard<'_, DocumentRegistry> {
        self.inner.write().await
    }

    /// See [`DocumentRegistry::track_upload`].
    pub async fn track_upload(
        &self,
        ctx: &RequestContext,
        file: FileDescriptor,
        upload_method: UploadMethod,
    ) -> Document {
        self.inner.write().await.track_upload(ctx, file, upload_method)
    }

    /// See [`DocumentRegistry::track_camera_capture`].
    pub async fn track_camera_capture(&self, ctx: &RequestContext, file_name: &str) -> Document {
        self.inner.write().await.track_camera_capture(ctx, file_name)
    }

    /// See [`DocumentRegistry::update_processing_status`].
    pub async fn update_processing_status(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        status: DocumentStatus,
        extracted: Option<ExtractedDataPatch>,
    ) -> Result<Document, AppError> {
        self.inner
            .write()
            .await
            .update_processing_status(ctx, id, status, extracted)
    }

    /// See [`DocumentRegistry::update_verification_status`].
    pub async fn update_verification_status(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        status: VerificationStatus,
        notes: Option<String>,
    ) -> Result<Document, AppError> {
        self.inner
            .write()
            .await
            .update_verification_status(ctx, id, status, notes)
    }

    /// See [`DocumentRegistry::map_to_compliance`].
    pub async fn map_to_compliance(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        category: &str,
        amount: Option<String>,
    ) -> Result<Document, AppError> {
        self.inner
            .write()
            .await
            .map_to_compliance(ctx, id, category, amount)
    }

    /// See [`DocumentRegistry::attach_capture_payload`].
    pub async fn attach_capture_payload(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        content: Bytes,
    ) -> Result<Document, AppError> {
        self.inner
            .write()
            .await
            .attach_capture_payload(ctx, id, content)
    }

    /// See [`DocumentRegistry::record_processing_notes`].
    pub async fn record_processing_notes(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        errors: Vec<String>,
        warnings: Vec<String>,
    ) -> Result<Document, AppError> {
        self.inner
            .write()
            .await
            .record_processing_notes(ctx, id, errors, warnings)
    }

    /// See [`DocumentRegistry::update_source`].
    pub async fn update_source(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        patch: SourcePatch,
    ) -> Result<Document, AppError> {
        self.inner.write().await.update_source(ctx, id, patch)
    }

    /// Snapshot of all documents in registration order.
    pub async fn all_documents(&self) -> Vec<Document> {
        self.inner
            .read()
            .await
            .all_documents()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Snapshot of one document.
    pub async fn get_document(&self, id: DocumentId) -> Option<Document> {
        self.inner.read().await.get_document(id).cloned()
    }

    /// Snapshot of the full audit trail, newest first.
    pub async fn full_audit_trail(&self) -> Vec<AuditTrailEntry> {
        self.inner
            .read()
            .await
            .full_audit_trail()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Owned page of [`DocumentRegistry::query_documents`].
    pub async fn query_documents(&self, query: &DocumentQuery) -> PageResponse<Document> {
        self.inner
            .read()
            .await
            .query_documents(query)
            .map(Document::clone)
    }

    /// Owned page of [`DocumentRegistry::search_audit_trail`].
    pub async fn search_audit_trail(&self, query: &AuditQuery) -> PageResponse<AuditTrailEntry> {
        self.inner
            .read()
            .await
            .search_audit_trail(query)
            .map(AuditTrailEntry::clone)
    }

    /// See [`DocumentRegistry::aggregate_metrics`].
    pub async fn aggregate_metrics(&self) -> AggregateMetrics {
        self.inner.read().await.aggregate_metrics()
    }

    /// See [`DocumentRegistry::export_audit_trail`].
    pub async fn export_audit_trail(&self) -> Result<String, AppError> {
        self.inner.read().await.export_audit_trail()
    }

    /// See [`DocumentRegistry::write_export`].
    pub async fn write_export(&self, directory: Option<&Path>) -> Result<PathBuf, AppError> {
        self.inner.read().await.write_export(directory)
    }
}

impl From<DocumentRegistry> for SharedRegistry {
    fn from(registry: DocumentRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_uploads_are_all_recorded() {
        let shared = SharedRegistry::new(DocumentRegistry::default());

        let mut handles = Vec::new();
        for i in 0..16 {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                let ctx = RequestContext::actor(format!("worker-{i}"));
                shared
                    .track_upload(&ctx, FileDescriptor::new(format!("bill-{i}.pdf"), 100), UploadMethod::Api)
                    .await
            }));
        }
        for handle in handles {
            handle.await.expect("task");
        }

        assert_eq!(shared.all_documents().await.len(), 16);
        assert_eq!(shared.full_audit_trail().await.len(), 16);
        assert_eq!(shared.aggregate_metrics().await.total_documents, 16);
    }

    #[tokio::test]
    async fn test_notes_source_and_queries_through_handle() {
        let shared = SharedRegistry::new(DocumentRegistry::default());
        let ctx = RequestContext::actor("ops");
        let doc = shared
            .track_upload(&ctx, FileDescriptor::new("fuel.csv", 512), UploadMethod::File)
            .await;

        shared
            .record_processing_notes(&ctx, doc.id, vec![], vec!["Low contrast".into()])
            .await
            .expect("notes");
        let updated = shared
            .update_source(
                &ctx,
                doc.id,
                SourcePatch {
                    provider: Some("Fleet Management System".into()),
                    ..SourcePatch::default()
                },
            )
            .await
            .expect("source");
        assert_eq!(updated.source.provider, "Fleet Management System");
        assert_eq!(updated.processing.warnings, vec!["Low contrast".to_string()]);

        let documents = shared
            .query_documents(&DocumentQuery {
                search: Some("fleet".into()),
                ..DocumentQuery::default()
            })
            .await;
        assert_eq!(documents.total_items, 1);
        assert_eq!(documents.items[0].id, doc.id);

        let entries = shared
            .search_audit_trail(&AuditQuery {
                document_id: Some(doc.id),
                ..AuditQuery::default()
            })
            .await;
        assert_eq!(entries.total_items, 3);
    }

    #[tokio::test]
    async fn test_unknown_id_through_handle() {
        let shared = SharedRegistry::from(DocumentRegistry::default());
        let err = shared
            .update_processing_status(
                &RequestContext::system(),
                DocumentId::new(),
                DocumentStatus::Completed,
                None,
            )
            .await
            .expect_err("unknown id");
        assert!(err.is_not_found());
        assert!(shared.full_audit_trail().await.is_empty());
    }
}
