//! Read-side queries over the registry.

pub mod audit;
pub mod document;

pub use audit::AuditQuery;
pub use document::{DocumentQuery, DocumentSort};
