use tos_analyzer_lib::api::{analyze_sources, build_document_report};
use tos_analyzer_lib::models::{AnalysisResult, Category, RiskLevel};
use tos_analyzer_lib::services::{decode_document, normalize_text, AppConfig, InputSource};
use tos_analyzer_lib::{analyze, AnalyzerError};

const POLICY: &str = "\
1. DATA COLLECTION

We collect your personal information, including your IP address, when you use the Service. \
We use cookies and analytics to improve our products.

2. SHARING

We may share your data with our business partners and affiliates. \
We never sell personal data.

3. SECURITY

We use advanced encryption and conduct regular audits. \
However, we cannot guarantee the security of your information.

4. YOUR RIGHTS

You have the right to access and the right to delete your data under the GDPR.

5. LIABILITY

To the extent permitted by law, the Company is not liable for indirect damages.

6. CHANGES

We may modify these terms at any time without notice.";

#[test]
fn full_policy_produces_all_categories() {
    let text = normalize_text(&decode_document(POLICY.as_bytes().to_vec(), "policy.txt").unwrap());
    let result = analyze(&text);

    assert_eq!(result.categories.len(), 6);
    let keys: Vec<Category> = result.categories.keys().copied().collect();
    assert_eq!(keys, Category::ALL.to_vec());

    assert_eq!(result.get(Category::PolicyChanges).unwrap().risk_level, RiskLevel::High);
    assert_eq!(result.get(Category::UserRights).unwrap().risk_level, RiskLevel::Low);
    for r in result.categories.values() {
        assert!(r.extracted_clauses.len() <= 3);
        assert!(!r.findings.is_empty());
    }
}

#[test]
fn headings_are_not_glued_to_clauses() {
    let result = analyze(POLICY);
    let rights = result.get(Category::UserRights).unwrap();
    assert_eq!(
        rights.extracted_clauses[0],
        "You have the right to access and the right to delete your data under the GDPR."
    );
}

#[test]
fn json_shape_matches_wire_format() {
    let result = analyze("We collect your personal information.");
    let value = serde_json::to_value(&result).unwrap();

    let collection = &value["categories"]["data_collection"];
    assert_eq!(collection["score"], 50.0);
    assert_eq!(collection["riskLevel"], "Medium");
    assert!(collection["findings"].is_array());
    assert!(collection["extractedClauses"].is_array());
    assert!(value["overallScore"].is_number());
    assert!(value["overallRiskLevel"].is_string());

    let round_trip: AnalysisResult = serde_json::from_value(value).unwrap();
    assert_eq!(round_trip, result);
}

#[test]
fn non_utf8_input_is_rejected() {
    let err = decode_document(vec![0x80, 0x81], "latin1.txt").unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidUtf8 { .. }));
}

#[test]
fn report_wraps_result() {
    let config = AppConfig::default();
    let report = build_document_report(POLICY, Some("policy.txt".to_string()), &config);
    assert_eq!(report.result, analyze(&normalize_text(POLICY)));
    assert_eq!(report.statistics.char_count, POLICY.chars().count());
    let total = report.key_findings.high.len() + report.key_findings.medium.len() + report.key_findings.low.len();
    assert_eq!(total, 6);
    assert!(report.statistics.sentence_count >= 10);
}

#[tokio::test]
async fn batch_over_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    std::fs::write(&a, POLICY).unwrap();
    std::fs::write(&b, "").unwrap();

    let batch = analyze_sources(vec![InputSource::File(a), InputSource::File(b)], &AppConfig::default()).await;
    assert_eq!(batch.summary.count, 2);
    assert_eq!(batch.summary.fail_count, 0);

    let empty = batch.items[1].report.as_ref().unwrap();
    assert_eq!(empty.result.overall_score, 0.0);
    assert_eq!(empty.result.overall_risk_level, RiskLevel::Low);
}
