//! Integration tests for the document registry.

mod helpers;

use std::collections::HashSet;

use greentrace_core::NotFoundExt;
use greentrace_core::error::ErrorKind;
use greentrace_core::types::{DocumentId, PageRequest};
use greentrace_entity::audit::{AuditAction, AuditChange};
use greentrace_entity::compliance::ComplianceRecord;
use greentrace_entity::document::{
    DocumentStatus, EmissionScope, ExtractedDataPatch, FileDescriptor, FileType, UploadMethod,
    VerificationStatus,
};
use greentrace_service::{AuditQuery, DocumentQuery, DocumentSort};

use helpers::TestRegistry;

#[test]
fn test_issued_ids_are_distinct() {
    let mut app = TestRegistry::new();
    let mut seen = HashSet::new();

    for i in 0..200 {
        seen.insert(app.registry.generate_document_id());
        seen.insert(app.upload(&format!("bill-{i}.pdf")));
        seen.insert(
            app.registry
                .track_camera_capture(&app.ctx, &format!("scan-{i}.jpg"))
                .id,
        );
    }

    assert_eq!(seen.len(), 600);
}

#[test]
fn test_one_audit_entry_per_mutation() {
    let mut app = TestRegistry::new();
    let a = app.upload("energy.pdf");
    let b = app
        .registry
        .track_camera_capture(&app.ctx, "waste.jpg")
        .id;

    app.set_status(a, DocumentStatus::Processing);
    app.registry
        .map_to_compliance(&app.ctx, a, "Energy Consumption", None)
        .expect("map");
    app.registry
        .update_verification_status(&app.ctx, b, VerificationStatus::Flagged, None)
        .expect("verify");

    let snapshot: Vec<_> = app
        .registry
        .full_audit_trail()
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(snapshot.len(), 5);

    app.set_status(a, DocumentStatus::Completed);
    let after = app.registry.full_audit_trail();
    assert_eq!(after.len(), 6);

    // Earlier entries are untouched; the new one is first.
    for (old, new) in snapshot.iter().zip(after.iter().skip(1)) {
        assert_eq!(old, *new);
    }
}

#[test]
fn test_completed_stamps_are_ordered() {
    let mut app = TestRegistry::new();
    let id = app.completed("bill.pdf", 2.1);
    let doc = app.registry.get_document(id).expect("document");

    let uploaded = doc.upload_timestamp.expect("upload stamp");
    let started = doc.processing_timestamp.expect("processing stamp");
    let finished = doc.completion_timestamp.expect("completion stamp");
    assert!(uploaded <= started);
    assert!(started <= finished);
}

#[test]
fn test_stamps_ordered_when_clock_steps_back() {
    let mut app = TestRegistry::new();
    let id = app.upload("bill.pdf");
    app.tick(-60_000);
    app.set_status(id, DocumentStatus::Processing);
    app.tick(-60_000);
    let doc = app.set_status(id, DocumentStatus::Completed);

    assert!(doc.upload_timestamp <= doc.processing_timestamp);
    assert!(doc.processing_timestamp <= doc.completion_timestamp);

    let trail = app.registry.document_audit_trail(id);
    assert!(trail.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn test_compliance_mapping_replaces() {
    let mut app = TestRegistry::new();
    let id = app.upload("bill.pdf");

    let doc = app
        .registry
        .map_to_compliance(&app.ctx, id, "Energy Consumption", None)
        .expect("first mapping");
    assert!(!doc.compliance.is_empty());

    let doc = app
        .registry
        .map_to_compliance(&app.ctx, id, "Unknown Category", None)
        .expect("second mapping");
    assert_eq!(doc.compliance, ComplianceRecord::default());
    assert_eq!(doc.extracted_data.category, "Unknown Category");

    let entry = app.registry.full_audit_trail()[0];
    assert_eq!(
        entry.change,
        Some(AuditChange::Compliance {
            previous_value: "Energy Consumption".to_string(),
            new_value: "Unknown Category".to_string(),
        })
    );
}

#[test]
fn test_total_impact_is_signed_sum() {
    let mut app = TestRegistry::new();
    app.completed("energy.pdf", 2.1);
    app.completed("fleet.csv", 1.8);
    app.completed("waste.jpg", -0.3);
    let still_running = app.upload("survey.csv");
    app.set_status(still_running, DocumentStatus::Processing);

    let metrics = app.registry.aggregate_metrics();
    assert!((metrics.total_carbon_impact - 3.6).abs() < 1e-9);
    assert_eq!(metrics.total_documents, 4);
    assert_eq!(metrics.processed_documents, 3);
}

#[test]
fn test_unknown_id_changes_nothing() {
    let mut app = TestRegistry::new();
    app.upload("bill.pdf");
    let docs_before: Vec<_> = app.registry.all_documents().into_iter().cloned().collect();
    let trail_before = app.registry.full_audit_trail().len();

    let missing = DocumentId::new();
    let err = app
        .registry
        .update_processing_status(&app.ctx, missing, DocumentStatus::Completed, None)
        .expect_err("unknown id");
    assert_eq!(err.kind, ErrorKind::NotFound);

    assert!(
        app.registry
            .update_verification_status(&app.ctx, missing, VerificationStatus::Verified, None)
            .ignore_not_found()
            .expect("not found is ignored")
            .is_none()
    );
    assert!(
        app.registry
            .map_to_compliance(&app.ctx, missing, "Water Usage", None)
            .ignore_not_found()
            .expect("not found is ignored")
            .is_none()
    );

    let docs_after: Vec<_> = app.registry.all_documents().into_iter().cloned().collect();
    assert_eq!(docs_before, docs_after);
    assert_eq!(app.registry.full_audit_trail().len(), trail_before);
}

#[test]
fn test_energy_bill_end_to_end() {
    let mut app = TestRegistry::new();

    let doc = app.registry.track_upload(
        &app.ctx,
        FileDescriptor::new("bill.pdf", 2_400_000),
        UploadMethod::File,
    );
    assert_eq!(doc.status, DocumentStatus::Pending);
    assert_eq!(doc.file_type, FileType::Pdf);
    let id = doc.id;

    app.tick(250);
    let doc = app.set_status(id, DocumentStatus::Processing);
    assert!(doc.processing_timestamp.is_some());

    let doc = app
        .registry
        .map_to_compliance(&app.ctx, id, "Energy Consumption", Some("€234.50".into()))
        .expect("map");
    assert_eq!(doc.compliance.csrd_categories, vec!["E1-1", "E1-6"]);
    assert_eq!(doc.compliance.gri_standards, vec!["GRI 302-1", "GRI 302-3"]);
    assert_eq!(doc.compliance.issb_topics, vec!["S2 Climate-related Disclosures"]);
    assert!(doc.compliance.eu_taxonomy_aligned);
    assert_eq!(doc.extracted_data.amount.as_deref(), Some("€234.50"));

    app.tick(2_000);
    let doc = app
        .registry
        .update_processing_status(
            &app.ctx,
            id,
            DocumentStatus::Completed,
            Some(ExtractedDataPatch::default().co2_impact(2.1).confidence(92.0)),
        )
        .expect("complete");
    assert!(doc.completion_timestamp.is_some());
    assert_eq!(doc.extracted_data.co2_impact, 2.1);
    assert_eq!(doc.extracted_data.confidence.value(), 92.0);
    assert_eq!(doc.processing.processing_duration, Some(2_000));

    let metrics = app.registry.aggregate_metrics();
    assert_eq!(metrics.total_carbon_impact, 2.1);
    assert_eq!(metrics.average_processing_time, 2_000.0);
    assert!((metrics.compliance_coverage.csrd - 200.0 / 19.0).abs() < 1e-9);
    assert!((metrics.compliance_coverage.gri - 200.0 / 15.0).abs() < 1e-9);
    assert!((metrics.compliance_coverage.issb - 100.0 / 8.0).abs() < 1e-9);

    let actions: Vec<AuditAction> = app
        .registry
        .document_audit_trail(id)
        .iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(
        actions,
        vec![AuditAction::Upload, AuditAction::Process, AuditAction::Process, AuditAction::Process]
    );
}

#[test]
fn test_patch_keeps_unset_fields() {
    let mut app = TestRegistry::new();
    let id = app.upload("fleet.csv");
    app.registry
        .update_processing_status(
            &app.ctx,
            id,
            DocumentStatus::Processing,
            Some(
                ExtractedDataPatch::default()
                    .period("Q3 2024")
                    .scope(EmissionScope::Scope1),
            ),
        )
        .expect("processing");
    let doc = app
        .registry
        .update_processing_status(
            &app.ctx,
            id,
            DocumentStatus::Completed,
            Some(ExtractedDataPatch::default().co2_impact(1.8).confidence(250.0)),
        )
        .expect("complete");

    assert_eq!(doc.extracted_data.period, "Q3 2024");
    assert_eq!(doc.extracted_data.scope, EmissionScope::Scope1);
    assert_eq!(doc.extracted_data.co2_impact, 1.8);
    assert_eq!(doc.extracted_data.confidence.value(), 100.0);
}

#[test]
fn test_strict_policy_refuses_skipped_steps() {
    let mut app = TestRegistry::strict();
    let id = app.upload("bill.pdf");

    let err = app
        .registry
        .update_processing_status(&app.ctx, id, DocumentStatus::Archived, None)
        .expect_err("pending -> archived");
    assert_eq!(err.kind, ErrorKind::InvalidTransition);
    assert_eq!(
        app.registry.get_document(id).map(|d| d.status),
        Some(DocumentStatus::Pending)
    );
    assert_eq!(app.registry.full_audit_trail().len(), 1);

    app.set_status(id, DocumentStatus::Processing);
    app.set_status(id, DocumentStatus::Error);
    app.set_status(id, DocumentStatus::Processing);
    app.set_status(id, DocumentStatus::Completed);
    let doc = app.set_status(id, DocumentStatus::Archived);
    assert_eq!(doc.status, DocumentStatus::Archived);
    assert_eq!(app.registry.full_audit_trail()[0].action, AuditAction::Archive);
}

#[test]
fn test_permissive_policy_accepts_any_write() {
    let mut app = TestRegistry::new();
    let id = app.upload("bill.pdf");
    let doc = app.set_status(id, DocumentStatus::Completed);

    // No processing stamp, so no duration.
    assert!(doc.processing_timestamp.is_none());
    assert!(doc.completion_timestamp.is_some());
    assert_eq!(doc.processing.processing_duration, None);
    assert_eq!(app.registry.aggregate_metrics().average_processing_time, 0.0);

    let doc = app.set_status(id, DocumentStatus::Pending);
    assert_eq!(doc.status, DocumentStatus::Pending);
}

#[test]
fn test_retry_after_error_restamps_processing() {
    let mut app = TestRegistry::strict();
    let id = app.upload("bill.pdf");
    app.tick(100);
    let first = app.set_status(id, DocumentStatus::Processing);
    app.tick(100);
    app.set_status(id, DocumentStatus::Error);
    app.tick(5_000);
    let retry = app.set_status(id, DocumentStatus::Processing);
    app.tick(300);
    let done = app.set_status(id, DocumentStatus::Completed);

    assert!(retry.processing_timestamp > first.processing_timestamp);
    assert_eq!(done.processing.processing_duration, Some(300));
}

#[test]
fn test_document_query_filters_and_sorts() {
    let mut app = TestRegistry::new();
    let energy = app.completed("energy-bill.pdf", 2.1);
    let _waste = app.completed("waste.jpg", -3.0);
    let survey = app.upload("commute-survey.csv");
    app.registry
        .map_to_compliance(&app.ctx, energy, "Energy Consumption", None)
        .expect("map");

    let by_impact = app.registry.query_documents(&DocumentQuery {
        sort: DocumentSort::Impact,
        ..DocumentQuery::default()
    });
    let names: Vec<&str> = by_impact
        .items
        .iter()
        .map(|d| d.original_name.as_str())
        .collect();
    assert_eq!(names, vec!["waste.jpg", "energy-bill.pdf", "commute-survey.csv"]);

    let completed = app.registry.query_documents(&DocumentQuery {
        status: Some(DocumentStatus::Completed),
        ..DocumentQuery::default()
    });
    assert_eq!(completed.total_items, 2);

    let search = app.registry.query_documents(&DocumentQuery {
        search: Some("ENERGY".into()),
        ..DocumentQuery::default()
    });
    assert_eq!(search.items.len(), 1);
    assert_eq!(search.items[0].id, energy);

    let csv = app.registry.query_documents(&DocumentQuery {
        file_type: Some(FileType::Csv),
        page: PageRequest::new(1, 10),
        ..DocumentQuery::default()
    });
    assert_eq!(csv.items[0].id, survey);
}

#[test]
fn test_audit_search_pages_newest_first() {
    let mut app = TestRegistry::new();
    let a = app.completed("a.pdf", 1.0);
    let _b = app.completed("b.pdf", 1.0);

    let page = app.registry.search_audit_trail(&AuditQuery {
        document_id: Some(a),
        action: None,
        page: PageRequest::new(1, 2),
    });
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 2);
    assert!(page.items[0].timestamp >= page.items[1].timestamp);
    assert!(page.items.iter().all(|e| e.document_id == a));

    let uploads = app.registry.search_audit_trail(&AuditQuery {
        document_id: None,
        action: Some(AuditAction::Upload),
        page: PageRequest::default(),
    });
    assert_eq!(uploads.total_items, 2);
}

#[test]
fn test_verified_count() {
    let mut app = TestRegistry::new();
    let a = app.completed("a.pdf", 1.0);
    let b = app.completed("b.pdf", 1.0);
    app.registry
        .update_verification_status(&app.ctx, a, VerificationStatus::Verified, None)
        .expect("verify");
    app.registry
        .update_verification_status(&app.ctx, b, VerificationStatus::Rejected, Some("Duplicate".into()))
        .expect("reject");

    assert_eq!(app.registry.aggregate_metrics().verified_documents, 1);
    assert_eq!(app.registry.full_audit_trail()[0].action, AuditAction::Reject);
}

#[test]
fn test_deserialized_queries_with_extreme_paging() {
    let mut app = TestRegistry::new();
    app.completed("a.pdf", 1.0);
    app.upload("b.pdf");

    let query: DocumentQuery =
        serde_json::from_str(r#"{"page":{"page":1,"pageSize":0}}"#).expect("document query");
    let page = app.registry.query_documents(&query);
    assert_eq!(page.page_size, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_pages, 2);

    let query: AuditQuery =
        serde_json::from_str(r#"{"page":{"page":18446744073709551615,"pageSize":25}}"#)
            .expect("audit query");
    let page = app.registry.search_audit_trail(&query);
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 4);
    assert!(!page.has_next);
}
