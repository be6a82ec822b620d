//! The document registry and its audit trail.

pub mod audit;
pub mod service;
pub mod shared;
pub mod transition;

pub use audit::AuditTrail;
pub use service::DocumentRegistry;
pub use shared::SharedRegistry;
