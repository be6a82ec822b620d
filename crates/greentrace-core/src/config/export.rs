//! Audit export configuration.

use serde::{Deserialize, Serialize};

/// Settings for the audit trail export payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pretty-print the JSON payload.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Directory export files are written to.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            directory: default_directory(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

fn default_directory() -> String {
    "data/exports".to_string()
}
