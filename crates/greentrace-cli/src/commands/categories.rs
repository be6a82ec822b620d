//! Compliance category table listing.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use greentrace_core::error::AppError;
use greentrace_entity::compliance::known_categories;

/// Category display row
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct CategoryRow {
    /// Category label
    category: String,
    /// CSRD codes
    csrd: String,
    /// GRI codes
    gri: String,
    /// ISSB topics
    issb: String,
    /// EU-Taxonomy alignment
    #[tabled(rename = "eu taxonomy")]
    eu_taxonomy_aligned: bool,
}

/// Print the category table
pub fn execute(format: OutputFormat) -> Result<(), AppError> {
    let rows: Vec<CategoryRow> = known_categories()
        .iter()
        .map(|row| CategoryRow {
            category: row.category.to_string(),
            csrd: row.csrd.join(", "),
            gri: row.gri.join(", "),
            issb: row.issb.join(", "),
            eu_taxonomy_aligned: row.eu_taxonomy_aligned,
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
