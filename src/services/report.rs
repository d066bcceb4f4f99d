// Report Builder
// Wraps an analysis run with metadata, key findings and a plain-text rendering

use std::fmt::Write as _;

use crate::models::{
    AnalysisReport, AnalysisResult, BatchItemResult, BatchSummary, DocumentStatistics, KeyFinding, KeyFindings,
    RiskLevel,
};

/// Assemble a report for one document.
pub fn build_report(source: Option<String>, result: AnalysisResult, statistics: DocumentStatistics) -> AnalysisReport {
    let key_findings = key_findings(&result);
    AnalysisReport {
        request_id: uuid::Uuid::new_v4().to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        source,
        version: env!("CARGO_PKG_VERSION").to_string(),
        result,
        statistics,
        key_findings,
    }
}

/// Group categories by level, each headed by its first finding.
pub fn key_findings(result: &AnalysisResult) -> KeyFindings {
    let group = |level: RiskLevel| -> Vec<KeyFinding> {
        result
            .categories_at(level)
            .map(|(category, r)| KeyFinding {
                category,
                display_name: category.display_name().to_string(),
                headline: r.findings.first().cloned().unwrap_or_default(),
            })
            .collect()
    };

    KeyFindings {
        high: group(RiskLevel::High),
        medium: group(RiskLevel::Medium),
        low: group(RiskLevel::Low),
    }
}

pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    let _ = writeln!(out, "Terms of Service Risk Analysis");
    if let Some(source) = &report.source {
        let _ = writeln!(out, "Source: {}", source);
    }
    let _ = writeln!(out, "Generated: {}", report.generated_at);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Overall risk: {} ({:.1}/100)",
        result.overall_risk_level, result.overall_score
    );
    let _ = writeln!(out, "{}", result.overall_risk_level.description());

    for (category, r) in &result.categories {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ==", category.display_name());
        let _ = writeln!(out, "Risk: {} ({:.1}/100)", r.risk_level, r.score);
        for finding in &r.findings {
            let _ = writeln!(out, "  - {}", finding);
        }
        if !r.extracted_clauses.is_empty() {
            let _ = writeln!(out, "  Clauses:");
            for clause in &r.extracted_clauses {
                let _ = writeln!(out, "    > {}", clause);
            }
        }
    }

    let stats = &report.statistics;
    let _ = writeln!(out);
    let _ = writeln!(out, "== Document Statistics ==");
    let _ = writeln!(
        out,
        "Characters: {}  Words: {}  Sentences: {}",
        stats.char_count, stats.word_count, stats.sentence_count
    );
    let _ = writeln!(out, "Average sentence length: {:.1} words", stats.avg_sentence_length);
    if stats.long_sentences {
        let _ = writeln!(out, "Warning: sentences are long on average, which may hurt readability.");
    }
    if !stats.top_terms.is_empty() {
        let terms: Vec<String> = stats
            .top_terms
            .iter()
            .map(|t| format!("{} ({})", t.term, t.count))
            .collect();
        let _ = writeln!(out, "Top terms: {}", terms.join(", "));
    }

    out
}

/// Summary over the successful items; failures only count toward `fail_count`.
pub fn summarize_batch(items: &[BatchItemResult]) -> BatchSummary {
    let reports: Vec<&AnalysisReport> = items.iter().filter_map(|i| i.report.as_ref()).collect();
    let avg_overall_score = if reports.is_empty() {
        0.0
    } else {
        reports.iter().map(|r| r.result.overall_score).sum::<f64>() / reports.len() as f64
    };

    BatchSummary {
        count: items.len(),
        fail_count: items.len() - reports.len(),
        avg_overall_score,
        high_risk_count: reports
            .iter()
            .filter(|r| r.result.overall_risk_level == RiskLevel::High)
            .count(),
    }
}
