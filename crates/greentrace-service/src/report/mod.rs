//! Reporting views computed from registry state.

pub mod export;
pub mod metrics;

pub use export::AuditExport;
pub use metrics::{AggregateMetrics, ComplianceCoverage};
