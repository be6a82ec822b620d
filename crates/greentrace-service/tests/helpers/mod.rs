//! Shared helpers for registry integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use greentrace_core::config::{AppConfig, TransitionPolicy};
use greentrace_core::traits::ManualClock;
use greentrace_core::types::DocumentId;
use greentrace_entity::document::{
    Document, DocumentStatus, ExtractedDataPatch, FileDescriptor, UploadMethod,
};
use greentrace_service::{DocumentRegistry, RequestContext};

/// A registry on a manual clock.
pub struct TestRegistry {
    /// The registry under test.
    pub registry: DocumentRegistry,
    /// Clock the registry stamps with.
    pub clock: Arc<ManualClock>,
    /// Context used for every call.
    pub ctx: RequestContext,
}

impl TestRegistry {
    /// Fresh registry with the default (permissive) policy.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Fresh registry with the strict transition policy.
    pub fn strict() -> Self {
        let mut config = AppConfig::default();
        config.registry.transition_policy = TransitionPolicy::Strict;
        Self::with_config(config)
    }

    /// Fresh registry with a custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(ManualClock::new(start_time()));
        let registry = DocumentRegistry::with_clock(&config, clock.clone());
        Self {
            registry,
            clock,
            ctx: RequestContext::actor("analyst@example.com"),
        }
    }

    /// Advance the clock by `millis`.
    pub fn tick(&self, millis: i64) {
        self.clock.advance(Duration::milliseconds(millis));
    }

    /// Upload a file and return its id.
    pub fn upload(&mut self, name: &str) -> DocumentId {
        self.registry
            .track_upload(&self.ctx, FileDescriptor::new(name, 1_024), UploadMethod::File)
            .id
    }

    /// Move a document to `status`, panicking on error.
    pub fn set_status(&mut self, id: DocumentId, status: DocumentStatus) -> Document {
        self.registry
            .update_processing_status(&self.ctx, id, status, None)
            .expect("status update")
    }

    /// Upload, process, and complete a document with the given impact.
    pub fn completed(&mut self, name: &str, co2_impact: f64) -> DocumentId {
        let id = self.upload(name);
        self.tick(100);
        self.set_status(id, DocumentStatus::Processing);
        self.tick(1_000);
        self.registry
            .update_processing_status(
                &self.ctx,
                id,
                DocumentStatus::Completed,
                Some(ExtractedDataPatch::default().co2_impact(co2_impact)),
            )
            .expect("complete");
        id
    }
}

/// Fixed starting instant for deterministic stamps.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 15, 9, 0, 0)
        .single()
        .expect("valid start time")
}
