//! Document listing query: search, filter, sort, page.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use greentrace_core::types::{PageRequest, SortDirection};
use greentrace_entity::document::{Document, DocumentStatus, FileType};

/// Field a document listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSort {
    /// Upload time, newest first by default.
    #[default]
    Date,
    /// Absolute CO₂ impact, largest first by default.
    Impact,
    /// Original file name, A to Z by default.
    Name,
}

impl DocumentSort {
    /// Direction used when the query does not specify one.
    pub fn natural_direction(&self) -> SortDirection {
        match self {
            Self::Date | Self::Impact => SortDirection::Desc,
            Self::Name => SortDirection::Asc,
        }
    }

    fn compare(&self, a: &Document, b: &Document) -> Ordering {
        match self {
            Self::Date => a.upload_timestamp.cmp(&b.upload_timestamp),
            Self::Impact => a
                .extracted_data
                .co2_impact
                .abs()
                .total_cmp(&b.extracted_data.co2_impact.abs()),
            Self::Name => a
                .original_name
                .to_lowercase()
                .cmp(&b.original_name.to_lowercase()),
        }
    }
}

/// Criteria for listing documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQuery {
    /// Case-insensitive substring matched against name, provider, and category.
    #[serde(default)]
    pub search: Option<String>,
    /// Only documents in this status.
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    /// Only documents of this file type.
    #[serde(default)]
    pub file_type: Option<FileType>,
    /// Ordering field.
    #[serde(default)]
    pub sort: DocumentSort,
    /// Ordering direction; defaults to the field's natural direction.
    #[serde(default)]
    pub direction: Option<SortDirection>,
    /// Page to return.
    #[serde(default)]
    pub page: PageRequest,
}

impl DocumentQuery {
    /// Whether `document` passes every filter.
    pub fn matches(&self, document: &Document) -> bool {
        if self.status.is_some_and(|s| s != document.status) {
            return false;
        }
        if self.file_type.is_some_and(|t| t != document.file_type) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    document.original_name.as_str(),
                    document.source.provider.as_str(),
                    document.extracted_data.category.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            }
        }
    }

    /// Order two matching documents.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let direction = self
            .direction
            .unwrap_or_else(|| self.sort.natural_direction());
        direction.apply(self.sort.compare(a, b))
    }
}
