//! Suitability Assessment Types
//!
//! Output structures of the scoring engine: composite score, tier,
//! per-factor sub-scores and the ordered alert/recommendation lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Score every factor starts from before penalties
pub const MAX_SCORE: f64 = 10.0;

/// Qualitative suitability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SuitabilityTier {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl SuitabilityTier {
    /// Map a composite score to its tier (inclusive lower bounds)
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            SuitabilityTier::VeryHigh
        } else if score >= 6.5 {
            SuitabilityTier::High
        } else if score >= 5.0 {
            SuitabilityTier::Medium
        } else {
            SuitabilityTier::Low
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            SuitabilityTier::Low => "Low",
            SuitabilityTier::Medium => "Medium",
            SuitabilityTier::High => "High",
            SuitabilityTier::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for SuitabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

/// Per-factor sub-scores, each in `[0, 10]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub soil_score: f64,
    pub climate_score: f64,
    pub water_score: f64,
}

impl ScoreDetails {
    /// Weighted composite: 40% soil, 40% climate, 20% water, one decimal
    pub fn composite(&self) -> f64 {
        round_one_decimal(0.4 * self.soil_score + 0.4 * self.climate_score + 0.2 * self.water_score)
    }
}

/// Result of matching one crop against one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingResult {
    /// Composite score in `[0, 10]`, one decimal
    pub score: f64,

    pub suitability: SuitabilityTier,

    /// Problems found, soil checks first, then climate, then water
    pub alerts: Vec<String>,

    /// Interventions, same ordering as `alerts`
    pub recommendations: Vec<String>,

    pub details: ScoreDetails,
}

impl MatchingResult {
    pub fn from_details(details: ScoreDetails, alerts: Vec<String>, recommendations: Vec<String>) -> Self {
        let score = details.composite();
        Self {
            score,
            suitability: SuitabilityTier::from_score(score),
            alerts,
            recommendations,
            details,
        }
    }
}

/// Accumulates penalties and messages for one factor
#[derive(Debug, Clone)]
pub(crate) struct FactorScore {
    value: f64,
}

impl FactorScore {
    pub(crate) fn new() -> Self {
        Self { value: MAX_SCORE }
    }

    pub(crate) fn penalize(&mut self, amount: f64) {
        self.value -= amount;
    }

    /// Clamp to `[0, 10]`
    pub(crate) fn finish(self) -> f64 {
        self.value.clamp(0.0, MAX_SCORE)
    }
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
