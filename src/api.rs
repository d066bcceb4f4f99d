// Command Layer
// Entry points shared by the CLI and library callers

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::{AnalyzerError, Result};
use crate::models::{AnalysisReport, AnalysisResult, BatchItemResult, BatchReport, DocumentStatistics};
use crate::services::{
    build_report, compute_statistics, normalize_text, read_document, summarize_batch, AppConfig, ConfigStore,
    InputSource, RiskAnalyzer,
};

/// Normalize already-loaded text and analyze it with the built-in table.
/// Extracted clauses quote the normalized text.
pub fn analyze_text(text: &str, config: &AppConfig) -> AnalysisResult {
    RiskAnalyzer::new()
        .parallel(config.analysis.parallel)
        .analyze(&normalize_text(text))
}

/// Report on `text` as read. Statistics describe the document as written; the
/// analysis runs on the normalized text.
pub fn build_document_report(text: &str, source: Option<String>, config: &AppConfig) -> AnalysisReport {
    let result = analyze_text(text, config);
    let statistics = compute_statistics(text, config.report.top_terms, config.report.long_sentence_words);
    build_report(source, result, statistics)
}

/// Read and report on a single source.
pub async fn analyze_source(source: &InputSource, config: &AppConfig) -> Result<AnalysisReport> {
    let text = read_document(source).await?;
    let label = source.label();
    let config = config.clone();
    tokio::task::spawn_blocking(move || build_document_report(&text, Some(label), &config))
        .await
        .map_err(|e| AnalyzerError::Task(e.to_string()))
}

/// Analyze every source concurrently. Items come back in input order and a failing
/// source does not abort the others.
pub async fn analyze_sources(sources: Vec<InputSource>, config: &AppConfig) -> BatchReport {
    info!("[BATCH] Analyzing {} documents", sources.len());

    let mut slots: Vec<Option<BatchItemResult>> = vec![None; sources.len()];
    let labels: Vec<String> = sources.iter().map(InputSource::label).collect();

    let mut tasks = JoinSet::new();
    for (index, source) in sources.into_iter().enumerate() {
        let config = config.clone();
        tasks.spawn(async move {
            let label = source.label();
            let item = match analyze_source(&source, &config).await {
                Ok(report) => BatchItemResult {
                    source: label,
                    report: Some(report),
                    error: None,
                },
                Err(e) => {
                    warn!("[BATCH] {} failed: {}", label, e);
                    BatchItemResult {
                        source: label,
                        report: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            (index, item)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, item)) => slots[index] = Some(item),
            Err(e) => warn!("[BATCH] Task aborted: {}", e),
        }
    }

    let items: Vec<BatchItemResult> = slots
        .into_iter()
        .zip(labels)
        .map(|(slot, label)| {
            slot.unwrap_or_else(|| BatchItemResult {
                source: label,
                report: None,
                error: Some("Analysis task aborted".to_string()),
            })
        })
        .collect();

    let summary = summarize_batch(&items);
    info!(
        "[BATCH] Done: {} documents, {} failed, avg score {:.1}",
        summary.count, summary.fail_count, summary.avg_overall_score
    );
    BatchReport { items, summary }
}

pub async fn document_statistics(source: &InputSource, config: &AppConfig) -> Result<DocumentStatistics> {
    let text = read_document(source).await?;
    Ok(compute_statistics(&text, config.report.top_terms, config.report.long_sentence_words))
}

pub fn get_config(store: &ConfigStore) -> Result<AppConfig> {
    store.load()
}

pub fn save_config(store: &ConfigStore, config: &AppConfig) -> Result<()> {
    store.save(config)?;
    info!("[CONFIG] Saved {}", store.config_file().display());
    Ok(())
}

/// Write the default config unless a config file already exists. Returns whether
/// a file was written.
pub fn init_config(store: &ConfigStore) -> Result<bool> {
    if store.config_file().exists() {
        return Ok(false);
    }
    save_config(store, &AppConfig::default())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, RiskLevel};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_analyze_text_respects_parallel_flag() {
        let mut config = AppConfig::default();
        let text = "We may sell your personal data. You can manage preferences at any time.";
        let parallel = analyze_text(text, &config);
        config.analysis.parallel = false;
        assert_eq!(analyze_text(text, &config), parallel);
    }

    #[test]
    fn test_build_document_report_uses_report_config() {
        let mut config = AppConfig::default();
        config.report.top_terms = 1;
        let report = build_document_report("We share data. We share more. Privacy matters.", None, &config);
        assert_eq!(report.statistics.top_terms.len(), 1);
        assert_eq!(report.statistics.top_terms[0].term, "share");
        assert!(report.source.is_none());
    }

    #[test]
    fn test_report_statistics_use_text_as_written() {
        let raw = "  We   collect your personal information.\r\n\r\nWe use cookies\u{2014}always.  ";
        let report = build_document_report(raw, None, &AppConfig::default());

        assert_eq!(report.statistics.char_count, raw.chars().count());
        assert_eq!(report.statistics.word_count, 8);
        let collection = report.result.get(Category::DataCollection).unwrap();
        assert_eq!(collection.extracted_clauses[0], "We collect your personal information.");
        assert_eq!(collection.extracted_clauses[1], "We use cookies-always.");
    }

    #[tokio::test]
    async fn test_analyze_sources_keeps_order_and_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        fs::write(&good, "We may sell your personal data to third parties without notice.").unwrap();
        fs::write(&bad, [0xC3, 0x28]).unwrap();

        let sources = vec![
            InputSource::File(bad.clone()),
            InputSource::File(good.clone()),
            InputSource::File(dir.path().join("missing.txt")),
        ];
        let batch = analyze_sources(sources, &AppConfig::default()).await;

        assert_eq!(batch.items.len(), 3);
        assert_eq!(batch.items[0].source, bad.display().to_string());
        assert!(batch.items[0].error.as_deref().unwrap().contains("not valid UTF-8"));
        let report = batch.items[1].report.as_ref().unwrap();
        assert_eq!(
            report.result.get(Category::DataSharing).unwrap().risk_level,
            RiskLevel::High
        );
        assert!(batch.items[2].error.is_some());
        assert_eq!(batch.summary.count, 3);
        assert_eq!(batch.summary.fail_count, 2);
    }

    #[tokio::test]
    async fn test_document_statistics() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("terms.txt");
        fs::write(&path, "We collect cookies.\n\nWe respect your privacy.").unwrap();
        let stats = document_statistics(&InputSource::File(path), &AppConfig::default())
            .await
            .unwrap();
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.word_count, 7);
    }

    #[test]
    fn test_init_config_only_once() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().to_path_buf());
        assert!(init_config(&store).unwrap());
        assert!(!init_config(&store).unwrap());
        assert_eq!(get_config(&store).unwrap(), AppConfig::default());
    }
}
