//! Audit trail entities.

pub mod model;

pub use model::{AuditAction, AuditChange, AuditTrailEntry};
