//! Append-only audit log.

use greentrace_core::types::{DocumentId, PageResponse};
use greentrace_entity::audit::AuditTrailEntry;

use crate::query::AuditQuery;

/// Append-only sequence of audit entries.
///
/// Entries can be appended and read but never modified or removed.
/// Timestamps are kept non-decreasing in append order, so reverse append
/// order is also newest-first order.
#[derive(Debug, Default)]
pub struct AuditTrail {
    entries: Vec<AuditTrailEntry>,
}

impl AuditTrail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, lifting its timestamp to the previous entry's if the clock went backwards.
    pub fn append(&mut self, mut entry: AuditTrailEntry) -> &AuditTrailEntry {
        if let Some(last) = self.entries.last() {
            if entry.timestamp < last.timestamp {
                entry.timestamp = last.timestamp;
            }
        }
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in append order (oldest first).
    pub fn entries(&self) -> &[AuditTrailEntry] {
        &self.entries
    }

    /// Entries for one document, in append order.
    pub fn for_document(&self, document_id: DocumentId) -> Vec<&AuditTrailEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.document_id == document_id)
            .collect()
    }

    /// All entries, newest first.
    pub fn newest_first(&self) -> Vec<&AuditTrailEntry> {
        let mut sorted: Vec<&AuditTrailEntry> = self.entries.iter().rev().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }

    /// Filter and page the newest-first trail.
    pub fn search(&self, query: &AuditQuery) -> PageResponse<&AuditTrailEntry> {
        let matching: Vec<&AuditTrailEntry> = self
            .newest_first()
            .into_iter()
            .filter(|entry| query.matches(entry))
            .collect();
        query.page.paginate(matching)
    }
}
