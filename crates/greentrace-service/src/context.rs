//! Request context carrying the acting identity and client provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who is acting, and from where.
///
/// Passed into every registry mutator so the resulting audit entry records
/// the actor and client details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    /// Identity of the actor (user name, reviewer id, service name).
    pub user_id: Option<String>,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: Option<DateTime<Utc>>,
}

impl RequestContext {
    /// Creates a context for a named actor.
    pub fn new(
        user_id: impl Into<String>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ip_address,
            user_agent,
            request_time: Some(Utc::now()),
        }
    }

    /// Context for internal callers with no actor or client.
    pub fn system() -> Self {
        Self::default()
    }

    /// Context for a named actor without network provenance.
    pub fn actor(user_id: impl Into<String>) -> Self {
        Self::new(user_id, None, None)
    }
}
