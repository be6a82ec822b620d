//! Status transition rules and the audit action each write records.

use greentrace_core::config::TransitionPolicy;
use greentrace_core::error::AppError;
use greentrace_core::types::DocumentId;
use greentrace_entity::audit::AuditAction;
use greentrace_entity::document::{DocumentStatus, VerificationStatus};

/// Check a status write against the active policy.
pub fn check_transition(
    policy: TransitionPolicy,
    document_id: DocumentId,
    from: DocumentStatus,
    to: DocumentStatus,
) -> Result<(), AppError> {
    match policy {
        TransitionPolicy::Permissive => Ok(()),
        TransitionPolicy::Strict if from.can_transition_to(to) => Ok(()),
        TransitionPolicy::Strict => Err(AppError::invalid_transition(format!(
            "Document {document_id} cannot move from {from} to {to}"
        ))),
    }
}

/// Audit action recorded for a processing-status write.
pub fn status_action(to: DocumentStatus) -> AuditAction {
    match to {
        DocumentStatus::Archived => AuditAction::Archive,
        _ => AuditAction::Process,
    }
}

/// Audit action recorded for a verification-status write.
pub fn verification_action(to: VerificationStatus) -> AuditAction {
    match to {
        VerificationStatus::Verified => AuditAction::Approve,
        VerificationStatus::Rejected => AuditAction::Reject,
        VerificationStatus::Pending | VerificationStatus::Flagged => AuditAction::Verify,
    }
}
