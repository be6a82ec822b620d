//! Compliance coverage configuration.

use serde::{Deserialize, Serialize};

/// Number of disclosure items per framework used as the coverage denominator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// CSRD main disclosure requirements.
    #[serde(default = "default_csrd_total")]
    pub csrd_total: u32,
    /// Relevant GRI standards.
    #[serde(default = "default_gri_total")]
    pub gri_total: u32,
    /// ISSB topic areas.
    #[serde(default = "default_issb_total")]
    pub issb_total: u32,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            csrd_total: default_csrd_total(),
            gri_total: default_gri_total(),
            issb_total: default_issb_total(),
        }
    }
}

fn default_csrd_total() -> u32 {
    19
}

fn default_gri_total() -> u32 {
    15
}

fn default_issb_total() -> u32 {
    8
}
