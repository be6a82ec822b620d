//! Document registry configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the registry treats document status writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Any status may be written at any time.
    #[default]
    Permissive,
    /// Only the documented lifecycle edges are accepted.
    Strict,
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Registry behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Status transition policy.
    #[serde(default)]
    pub transition_policy: TransitionPolicy,
    /// Extraction model version stamped on completed documents that lack one.
    #[serde(default = "default_model_version")]
    pub default_model_version: String,
    /// Actor recorded on audit entries when the caller supplies none.
    #[serde(default)]
    pub audit_actor: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            transition_policy: TransitionPolicy::default(),
            default_model_version: default_model_version(),
            audit_actor: None,
        }
    }
}

fn default_model_version() -> String {
    "greentrace-extract-1".to_string()
}
