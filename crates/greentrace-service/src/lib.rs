//! # greentrace-service
//!
//! Business logic for GreenTrace. The [`DocumentRegistry`] is the single
//! authoritative store of tracked documents and their append-only audit
//! trail; the reporting types turn that state into aggregate metrics and
//! the compliance export payload.
//!
//! The registry is an explicit value owned by the composition root. Wrap it
//! in a [`SharedRegistry`] when more than one task needs access.

pub mod context;
pub mod query;
pub mod registry;
pub mod report;

pub use context::RequestContext;
pub use query::{AuditQuery, DocumentQuery, DocumentSort};
pub use registry::{AuditTrail, DocumentRegistry, SharedRegistry};
pub use report::{AggregateMetrics, AuditExport, ComplianceCoverage};
