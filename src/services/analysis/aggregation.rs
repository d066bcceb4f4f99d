// Aggregation Logic
// Combines per-category results into the document-level result

use std::collections::BTreeMap;

use super::scoring::classify;
use crate::models::{AnalysisResult, Category, CategoryResult};

/// Unweighted mean of category scores, classified with the category thresholds.
/// An empty map yields 0 / Low.
pub fn aggregate_categories(categories: BTreeMap<Category, CategoryResult>) -> AnalysisResult {
    let overall_score = if categories.is_empty() {
        0.0
    } else {
        categories.values().map(|r| r.score).sum::<f64>() / categories.len() as f64
    };

    AnalysisResult {
        overall_risk_level: classify(overall_score),
        overall_score,
        categories,
    }
}
