// TOS Analyzer Data Models
// Wire types shared by the analysis engine, the report layer and the CLI

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============ Risk Level ============

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Lower-case form used inside finding sentences ("high-risk clauses").
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RiskLevel::High => "Major privacy or security concerns that could impact user data.",
            RiskLevel::Medium => "Potential concerns that should be reviewed carefully.",
            RiskLevel::Low => "Generally acceptable practices with minimal concerns.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Category ============

/// The six fixed risk dimensions. Variant order is declaration order, which is
/// also the iteration order of every per-category map in this crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DataCollection,
    DataSharing,
    DataSecurity,
    UserRights,
    Liability,
    PolicyChanges,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::DataCollection,
        Category::DataSharing,
        Category::DataSecurity,
        Category::UserRights,
        Category::Liability,
        Category::PolicyChanges,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Category::DataCollection => "data_collection",
            Category::DataSharing => "data_sharing",
            Category::DataSecurity => "data_security",
            Category::UserRights => "user_rights",
            Category::Liability => "liability",
            Category::PolicyChanges => "policy_changes",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::DataCollection => "Data Collection",
            Category::DataSharing => "Data Sharing",
            Category::DataSecurity => "Data Security",
            Category::UserRights => "User Rights",
            Category::Liability => "Liability",
            Category::PolicyChanges => "Policy Changes",
        }
    }

    /// Phrase used in narrative findings, e.g. "data collection".
    pub fn phrase(self) -> &'static str {
        match self {
            Category::DataCollection => "data collection",
            Category::DataSharing => "data sharing",
            Category::DataSecurity => "data security",
            Category::UserRights => "user rights",
            Category::Liability => "liability",
            Category::PolicyChanges => "policy changes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============ Analysis Result ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub score: f64,
    pub risk_level: RiskLevel,
    pub findings: Vec<String>,
    pub extracted_clauses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Always holds exactly the entries of `Category::ALL`.
    pub categories: BTreeMap<Category, CategoryResult>,
    pub overall_score: f64,
    pub overall_risk_level: RiskLevel,
}

impl AnalysisResult {
    pub fn get(&self, category: Category) -> Option<&CategoryResult> {
        self.categories.get(&category)
    }

    pub fn categories_at(&self, level: RiskLevel) -> impl Iterator<Item = (Category, &CategoryResult)> {
        self.categories
            .iter()
            .filter(move |(_, r)| r.risk_level == level)
            .map(|(c, r)| (*c, r))
    }
}

// ============ Document Statistics ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatistics {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub long_sentences: bool,
    #[serde(default)]
    pub top_terms: Vec<TermCount>,
}

// ============ Report ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFinding {
    pub category: Category,
    pub display_name: String,
    pub headline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyFindings {
    #[serde(default)]
    pub high: Vec<KeyFinding>,
    #[serde(default)]
    pub medium: Vec<KeyFinding>,
    #[serde(default)]
    pub low: Vec<KeyFinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub request_id: String,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub version: String,
    pub result: AnalysisResult,
    pub statistics: DocumentStatistics,
    pub key_findings: KeyFindings,
}

// ============ Batch Analysis ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub count: usize,
    pub fail_count: usize,
    pub avg_overall_score: f64,
    pub high_risk_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub items: Vec<BatchItemResult>,
    pub summary: BatchSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_serialize_in_declaration_order() {
        let mut categories = BTreeMap::new();
        for category in Category::ALL.iter().rev() {
            categories.insert(
                *category,
                CategoryResult {
                    score: 0.0,
                    risk_level: RiskLevel::Low,
                    findings: vec![],
                    extracted_clauses: vec![],
                },
            );
        }
        let result = AnalysisResult {
            categories,
            overall_score: 0.0,
            overall_risk_level: RiskLevel::Low,
        };

        let json = serde_json::to_string(&result).unwrap();
        let positions: Vec<usize> = Category::ALL
            .iter()
            .map(|c| json.find(&format!("\"{}\"", c.id())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\"riskLevel\":\"Low\""));
        assert!(json.contains("\"extractedClauses\":[]"));
        assert!(json.contains("\"overallRiskLevel\":\"Low\""));

        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::UserRights.id(), "user_rights");
        assert_eq!(Category::UserRights.display_name(), "User Rights");
        assert_eq!(Category::PolicyChanges.phrase(), "policy changes");
        assert_eq!(Category::Liability.to_string(), "liability");
    }
}
