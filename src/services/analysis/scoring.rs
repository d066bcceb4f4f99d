// Scoring and Classification
// Tier counts -> 0..=100 score -> risk level

use serde::Serialize;

use crate::models::RiskLevel;

/// Inclusive lower bound of the High band.
pub const HIGH_THRESHOLD: f64 = 70.0;
/// Inclusive lower bound of the Medium band.
pub const MEDIUM_THRESHOLD: f64 = 30.0;
/// Score given to categories with only general-tier matches.
pub const GENERAL_ONLY_SCORE: f64 = 50.0;

const HIGH_WEIGHT: f64 = 100.0;
const MEDIUM_WEIGHT: f64 = 50.0;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub general: usize,
}

impl TierCounts {
    /// h + m + l (general matches are a fallback signal and not part of it).
    pub fn risk_total(&self) -> usize {
        self.high.saturating_add(self.medium).saturating_add(self.low)
    }

    pub fn is_empty(&self) -> bool {
        self.risk_total() == 0 && self.general == 0
    }

    /// Count of the tier that corresponds to `level`.
    pub fn dominant(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        }
    }
}

/// Weighted average of the tiered matches: high counts 100, medium 50, low 0.
///
/// Falls back to 50 when only general patterns matched, and to 0 without any match.
/// Counts are widened to `f64` before arithmetic, so neither overflow nor a zero
/// divisor can occur.
pub fn score(counts: &TierCounts) -> f64 {
    if counts.risk_total() > 0 {
        let (h, m, l) = (counts.high as f64, counts.medium as f64, counts.low as f64);
        (h * HIGH_WEIGHT + m * MEDIUM_WEIGHT) / (h + m + l)
    } else if counts.general > 0 {
        GENERAL_ONLY_SCORE
    } else {
        0.0
    }
}

pub fn classify(score: f64) -> RiskLevel {
    if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
