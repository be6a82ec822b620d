//! Processing metadata.

use serde::{Deserialize, Serialize};

/// How a document was processed and what went wrong along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingInfo {
    /// Whether text was recovered by OCR.
    pub ocr_used: bool,
    /// Extraction model that produced the data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model_version: Option<String>,
    /// Milliseconds between processing start and completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_duration: Option<u64>,
    /// Extraction errors.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Extraction warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
}
