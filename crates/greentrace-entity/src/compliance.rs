//! Mapping from a document category to the regulatory framework codes it evidences.

use serde::{Deserialize, Serialize};

/// Framework codes a document contributes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    /// CSRD (ESRS) disclosure requirement codes.
    pub csrd_categories: Vec<String>,
    /// GRI standard codes.
    pub gri_standards: Vec<String>,
    /// ISSB topic labels.
    pub issb_topics: Vec<String>,
    /// Whether the activity is EU-Taxonomy aligned.
    pub eu_taxonomy_aligned: bool,
}

/// One row of the category table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryMapping {
    /// Category label the row applies to.
    pub category: &'static str,
    /// CSRD codes.
    pub csrd: &'static [&'static str],
    /// GRI codes.
    pub gri: &'static [&'static str],
    /// ISSB topics.
    pub issb: &'static [&'static str],
    /// EU-Taxonomy alignment.
    pub eu_taxonomy_aligned: bool,
}

const CLIMATE_DISCLOSURES: &str = "S2 Climate-related Disclosures";

static CATEGORY_TABLE: &[CategoryMapping] = &[
    CategoryMapping {
        category: "Energy Consumption",
        csrd: &["E1-1", "E1-6"],
        gri: &["GRI 302-1", "GRI 302-3"],
        issb: &[CLIMATE_DISCLOSURES],
        eu_taxonomy_aligned: true,
    },
    CategoryMapping {
        category: "Transportation",
        csrd: &["E1-6"],
        gri: &["GRI 305-1", "GRI 305-2"],
        issb: &[CLIMATE_DISCLOSURES],
        eu_taxonomy_aligned: true,
    },
    CategoryMapping {
        category: "Supply Chain",
        csrd: &["E1-6", "S2-1"],
        gri: &["GRI 305-3", "GRI 308-1"],
        issb: &[CLIMATE_DISCLOSURES],
        eu_taxonomy_aligned: false,
    },
    CategoryMapping {
        category: "Water Usage",
        csrd: &["E3-1", "E3-4"],
        gri: &["GRI 303-1", "GRI 303-3"],
        issb: &[CLIMATE_DISCLOSURES],
        eu_taxonomy_aligned: true,
    },
    CategoryMapping {
        category: "Waste Management",
        csrd: &["E5-1", "E5-5"],
        gri: &["GRI 306-1", "GRI 306-2"],
        issb: &[CLIMATE_DISCLOSURES],
        eu_taxonomy_aligned: true,
    },
];

impl CategoryMapping {
    /// Materialize the row as an owned record.
    pub fn to_record(&self) -> ComplianceRecord {
        ComplianceRecord {
            csrd_categories: owned(self.csrd),
            gri_standards: owned(self.gri),
            issb_topics: owned(self.issb),
            eu_taxonomy_aligned: self.eu_taxonomy_aligned,
        }
    }
}

fn owned(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| (*c).to_string()).collect()
}

impl ComplianceRecord {
    /// Look up the full record for a category.
    ///
    /// Matching is exact. Categories outside the table yield the empty record.
    pub fn for_category(category: &str) -> Self {
        CATEGORY_TABLE
            .iter()
            .find(|row| row.category == category)
            .map(CategoryMapping::to_record)
            .unwrap_or_default()
    }

    /// Whether the record maps to no framework at all.
    pub fn is_empty(&self) -> bool {
        self.csrd_categories.is_empty()
            && self.gri_standards.is_empty()
            && self.issb_topics.is_empty()
            && !self.eu_taxonomy_aligned
    }
}

/// The fixed category table, in declaration order.
pub fn known_categories() -> &'static [CategoryMapping] {
    CATEGORY_TABLE
}
