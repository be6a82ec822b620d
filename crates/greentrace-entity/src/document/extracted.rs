//! Data extracted from a document's content.

use serde::{Deserialize, Deserializer, Serialize};

/// Greenhouse-gas accounting scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EmissionScope {
    /// Direct emissions.
    #[default]
    #[serde(rename = "1")]
    Scope1,
    /// Purchased-energy emissions.
    #[serde(rename = "2")]
    Scope2,
    /// Value-chain emissions.
    #[serde(rename = "3")]
    Scope3,
    /// Unclassified mix.
    #[serde(rename = "mixed")]
    Mixed,
}

/// Extraction confidence, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Lowest possible confidence.
    pub const MIN: f64 = 0.0;
    /// Highest possible confidence.
    pub const MAX: f64 = 100.0;

    /// Create a confidence score, clamping into range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(Self::MIN)
        } else {
            Self(value.clamp(Self::MIN, Self::MAX))
        }
    }

    /// Return the score.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::new)
    }
}

/// Extraction results for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    /// Currency-tagged monetary amount, e.g. `"€234.50"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// ISO currency code, when known separately from `amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Category label; keys the compliance table.
    pub category: String,
    /// Optional finer-grained label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Reporting period label, e.g. `"November 2024"`.
    pub period: String,
    /// tCO₂e; positive is an emission, negative an offset or reduction.
    pub co2_impact: f64,
    /// Emissions scope.
    pub scope: EmissionScope,
    /// Extraction confidence.
    pub confidence: Confidence,
    /// Raw text recovered from the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl ExtractedData {
    /// Placeholder record for a document that has not been processed yet.
    pub fn placeholder(category: impl Into<String>) -> Self {
        Self {
            amount: None,
            currency: None,
            category: category.into(),
            subcategory: None,
            period: "TBD".to_string(),
            co2_impact: 0.0,
            scope: EmissionScope::default(),
            confidence: Confidence::default(),
            raw_text: None,
        }
    }

    /// Shallow-merge a patch: present fields overwrite, absent fields are kept.
    pub fn apply(&mut self, patch: ExtractedDataPatch) {
        if let Some(amount) = patch.amount {
            self.amount = Some(amount);
        }
        if let Some(currency) = patch.currency {
            self.currency = Some(currency);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(subcategory) = patch.subcategory {
            self.subcategory = Some(subcategory);
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
        if let Some(co2_impact) = patch.co2_impact {
            self.co2_impact = co2_impact;
        }
        if let Some(scope) = patch.scope {
            self.scope = scope;
        }
        if let Some(confidence) = patch.confidence {
            self.confidence = confidence;
        }
        if let Some(raw_text) = patch.raw_text {
            self.raw_text = Some(raw_text);
        }
    }
}

/// Partial update for [`ExtractedData`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDataPatch {
    /// New amount.
    #[serde(default)]
    pub amount: Option<String>,
    /// New currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New subcategory.
    #[serde(default)]
    pub subcategory: Option<String>,
    /// New period label.
    #[serde(default)]
    pub period: Option<String>,
    /// New CO₂ impact.
    #[serde(default)]
    pub co2_impact: Option<f64>,
    /// New scope.
    #[serde(default)]
    pub scope: Option<EmissionScope>,
    /// New confidence.
    #[serde(default)]
    pub confidence: Option<Confidence>,
    /// New raw text.
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl ExtractedDataPatch {
    /// Set the CO₂ impact.
    pub fn co2_impact(mut self, value: f64) -> Self {
        self.co2_impact = Some(value);
        self
    }

    /// Set the confidence (clamped).
    pub fn confidence(mut self, value: f64) -> Self {
        self.confidence = Some(Confidence::new(value));
        self
    }

    /// Set the reporting period.
    pub fn period(mut self, value: impl Into<String>) -> Self {
        self.period = Some(value.into());
        self
    }

    /// Set the emissions scope.
    pub fn scope(mut self, value: EmissionScope) -> Self {
        self.scope = Some(value);
        self
    }

    /// Set the amount.
    pub fn amount(mut self, value: impl Into<String>) -> Self {
        self.amount = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamps() {
        assert_eq!(Confidence::new(150.0).value(), 100.0);
        assert_eq!(Confidence::new(-3.0).value(), 0.0);
        assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
        let parsed: Confidence = serde_json::from_str("250").expect("deserialize");
        assert_eq!(parsed.value(), 100.0);
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut data = ExtractedData::placeholder("Energy Consumption");
        data.amount = Some("€234.50".to_string());

        data.apply(ExtractedDataPatch::default().co2_impact(2.1).confidence(92.0));

        assert_eq!(data.amount.as_deref(), Some("€234.50"));
        assert_eq!(data.category, "Energy Consumption");
        assert_eq!(data.period, "TBD");
        assert_eq!(data.co2_impact, 2.1);
        assert_eq!(data.confidence.value(), 92.0);
    }

    #[test]
    fn test_scope_wire_names() {
        assert_eq!(serde_json::to_string(&EmissionScope::Scope2).expect("ser"), "\"2\"");
        let mixed: EmissionScope = serde_json::from_str("\"mixed\"").expect("de");
        assert_eq!(mixed, EmissionScope::Mixed);
    }
}
