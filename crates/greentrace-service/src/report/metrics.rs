//! Aggregate metrics over the full document collection.
//!
//! Computed on every call; nothing is cached.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use greentrace_core::config::ComplianceConfig;
use greentrace_entity::document::{Document, VerificationStatus};

/// Percentage of each framework's disclosure items evidenced by completed documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCoverage {
    /// CSRD coverage, 0–100.
    pub csrd: f64,
    /// GRI coverage, 0–100.
    pub gri: f64,
    /// ISSB coverage, 0–100.
    pub issb: f64,
}

/// Summary statistics for the reporting surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    /// All tracked documents.
    pub total_documents: usize,
    /// Documents in `completed`.
    pub processed_documents: usize,
    /// Signed sum of CO₂ impact over completed documents; offsets net against emissions.
    pub total_carbon_impact: f64,
    /// Documents whose verification status is `verified`.
    pub verified_documents: usize,
    /// Mean processing time in milliseconds over documents with both stamps.
    pub average_processing_time: f64,
    /// Framework coverage over completed documents.
    pub compliance_coverage: ComplianceCoverage,
}

impl AggregateMetrics {
    /// Compute metrics for `documents`.
    pub fn compute<'a, I>(documents: I, totals: &ComplianceConfig) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let docs: Vec<&Document> = documents.into_iter().collect();
        let completed: Vec<&Document> = docs.iter().copied().filter(|d| d.is_completed()).collect();

        Self {
            total_documents: docs.len(),
            processed_documents: completed.len(),
            total_carbon_impact: completed.iter().map(|d| d.extracted_data.co2_impact).sum(),
            verified_documents: docs
                .iter()
                .filter(|d| d.verification.status == VerificationStatus::Verified)
                .count(),
            average_processing_time: average_processing_time(&docs),
            compliance_coverage: compliance_coverage(&completed, totals),
        }
    }
}

fn average_processing_time(docs: &[&Document]) -> f64 {
    let durations: Vec<i64> = docs.iter().filter_map(|d| d.processing_millis()).collect();
    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().sum::<i64>() as f64 / durations.len() as f64
}

fn compliance_coverage(completed: &[&Document], totals: &ComplianceConfig) -> ComplianceCoverage {
    if completed.is_empty() {
        return ComplianceCoverage::default();
    }

    let mut csrd = HashSet::new();
    let mut gri = HashSet::new();
    let mut issb = HashSet::new();

    for doc in completed {
        csrd.extend(doc.compliance.csrd_categories.iter());
        gri.extend(doc.compliance.gri_standards.iter());
        issb.extend(doc.compliance.issb_topics.iter());
    }

    ComplianceCoverage {
        csrd: percentage(csrd.len(), totals.csrd_total),
        gri: percentage(gri.len(), totals.gri_total),
        issb: percentage(issb.len(), totals.issb_total),
    }
}

fn percentage(observed: usize, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (observed as f64 / f64::from(total) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_clamps() {
        assert_eq!(percentage(0, 19), 0.0);
        assert_eq!(percentage(40, 8), 100.0);
        assert!((percentage(4, 8) - 50.0).abs() < f64::EPSILON);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_empty_collection() {
        let metrics = AggregateMetrics::compute(std::iter::empty(), &ComplianceConfig::default());
        assert_eq!(metrics.total_documents, 0);
        assert_eq!(metrics.total_carbon_impact, 0.0);
        assert_eq!(metrics.average_processing_time, 0.0);
        assert_eq!(metrics.compliance_coverage, ComplianceCoverage::default());
    }
}
