//! File-type tag derived from a file name's extension.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of document file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document.
    Pdf,
    /// Comma-separated values.
    Csv,
    /// Excel workbook (`xls`, `xlsx`).
    Spreadsheet,
    /// Raster image (`jpg`, `jpeg`, `png`).
    Image,
    /// Anything else.
    Other,
}

/// Extension to file-type lookup. Extensions are matched lowercase.
static EXTENSION_TABLE: &[(&str, FileType)] = &[
    ("pdf", FileType::Pdf),
    ("csv", FileType::Csv),
    ("xls", FileType::Spreadsheet),
    ("xlsx", FileType::Spreadsheet),
    ("jpg", FileType::Image),
    ("jpeg", FileType::Image),
    ("png", FileType::Image),
];

impl FileType {
    /// Classify a file by the extension of its name.
    ///
    /// Names without an extension classify as [`FileType::Other`].
    pub fn from_file_name(name: &str) -> Self {
        name.rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .and_then(|ext| {
                EXTENSION_TABLE
                    .iter()
                    .find(|(known, _)| *known == ext)
                    .map(|(_, file_type)| *file_type)
            })
            .unwrap_or(Self::Other)
    }

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Spreadsheet => "spreadsheet",
            Self::Image => "image",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
