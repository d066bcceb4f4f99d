// Analysis Module
// Risk analysis core organized into specialized submodules:
// - patterns: Static (category, tier) pattern table compiled once
// - matcher: Per-sentence, per-tier matching with first-pattern short-circuit
// - scoring: Weighted tier score and risk-level thresholds
// - findings: Narrative findings per category
// - clauses: Representative clause selection
// - aggregation: Document-level score and level

pub mod aggregation;
pub mod clauses;
pub mod findings;
pub mod matcher;
pub mod patterns;
pub mod scoring;

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::models::{AnalysisResult, Category, CategoryResult};
use crate::services::sentence_segmenter::{segment_sentences, Sentence};

pub use aggregation::aggregate_categories;
pub use clauses::{select_clauses, MAX_EXTRACTED_CLAUSES};
pub use findings::{explanation, synthesize_findings};
pub use matcher::{match_category, MatchSet};
pub use patterns::{CategoryPatterns, CategorySpec, Pattern, PatternSpec, PatternTable, Tier, BUILTIN_PATTERNS};
pub use scoring::{classify, score, TierCounts};

/// Runs the full pipeline over a read-only pattern table.
///
/// The analyzer holds no mutable state, so one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct RiskAnalyzer<'t> {
    table: &'t PatternTable,
    parallel: bool,
}

impl Default for RiskAnalyzer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskAnalyzer<'static> {
    pub fn new() -> Self {
        Self::with_table(PatternTable::builtin())
    }
}

impl<'t> RiskAnalyzer<'t> {
    pub fn with_table(table: &'t PatternTable) -> Self {
        Self { table, parallel: true }
    }

    /// Evaluate categories on the rayon pool (default) or one after another.
    /// Results are identical either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let sentences = segment_sentences(text);
        info!(
            "[ANALYZER] Analyzing {} chars, {} sentences (parallel: {})",
            text.chars().count(),
            sentences.len(),
            self.parallel
        );

        let categories: BTreeMap<Category, CategoryResult> = if self.parallel {
            self.table
                .categories()
                .par_iter()
                .map(|patterns| (patterns.category, evaluate_category(patterns, &sentences)))
                .collect()
        } else {
            self.table
                .categories()
                .iter()
                .map(|patterns| (patterns.category, evaluate_category(patterns, &sentences)))
                .collect()
        };

        let result = aggregate_categories(categories);
        info!(
            "[ANALYZER] Overall score {:.1} ({})",
            result.overall_score, result.overall_risk_level
        );
        result
    }
}

/// Match, score, classify and summarize a single category.
pub fn evaluate_category(patterns: &CategoryPatterns, sentences: &[Sentence<'_>]) -> CategoryResult {
    let matches = match_category(patterns, sentences);
    let counts = matches.counts();
    let score = score(&counts);
    let risk_level = classify(score);

    debug!(
        category = %patterns.category,
        high = counts.high,
        medium = counts.medium,
        low = counts.low,
        general = counts.general,
        score,
        "[ANALYZER] Category evaluated"
    );

    CategoryResult {
        score,
        risk_level,
        findings: synthesize_findings(patterns.category, risk_level, &counts),
        extracted_clauses: select_clauses(&matches),
    }
}

/// Analyze `text` with the built-in pattern table.
pub fn analyze(text: &str) -> AnalysisResult {
    RiskAnalyzer::new().analyze(text)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any input produces six categories with bounded scores and at most three clauses
        #[test]
        fn result_shape_holds(text in "[A-Za-z .,!?\n]{0,300}") {
            let result = analyze(&text);
            prop_assert_eq!(result.categories.len(), 6);
            prop_assert!((0.0..=100.0).contains(&result.overall_score));
            for r in result.categories.values() {
                prop_assert!((0.0..=100.0).contains(&r.score));
                prop_assert!(r.extracted_clauses.len() <= MAX_EXTRACTED_CLAUSES);
                prop_assert!(!r.findings.is_empty());
                prop_assert_eq!(r.risk_level, classify(r.score));
            }
        }
    }
}
