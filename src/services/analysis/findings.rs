// Finding Synthesizer
// Narrative statements per category from tier counts and the assigned level

use super::scoring::TierCounts;
use crate::models::{Category, RiskLevel};

/// Fixed explanatory sentence for a (category, level) pair.
pub fn explanation(category: Category, level: RiskLevel) -> &'static str {
    use Category::*;
    use RiskLevel::*;
    match (category, level) {
        (DataCollection, High) => "Extensive data collection with limited transparency.",
        (DataCollection, Medium) => "Standard data collection practices with some transparency.",
        (DataCollection, Low) => "Minimal data collection or strong transparency practices.",
        (DataSharing, High) => "Broad rights to share data with third parties.",
        (DataSharing, Medium) => "Some data sharing with third parties with partial limitations.",
        (DataSharing, Low) => "Restrictive data sharing policies or strong user controls.",
        (DataSecurity, High) => "Limited security guarantees or disclaimers of responsibility.",
        (DataSecurity, Medium) => "Standard security measures mentioned but with limitations.",
        (DataSecurity, Low) => "Strong security measures and commitments.",
        (UserRights, High) => "Limited user control over personal data.",
        (UserRights, Medium) => "Some user rights acknowledged but may be limited.",
        (UserRights, Low) => "Strong user rights and control over personal data.",
        (Liability, High) => "Broad liability disclaimers and limitations.",
        (Liability, Medium) => "Some liability limitations but not overly broad.",
        (Liability, Low) => "Reasonable liability terms with user protections.",
        (PolicyChanges, High) => "Changes can be made without explicit notification.",
        (PolicyChanges, Medium) => "Changes may be made with some form of notification.",
        (PolicyChanges, Low) => "Clear notification process for policy changes.",
    }
}

/// Build the findings for one category. Exactly one branch applies:
/// - the level's own tier matched: a count statement plus the explanation;
/// - other tiers matched and averaged into this level: the explanation only;
/// - only general patterns matched: an "undetermined" statement;
/// - nothing matched: a "none identified" statement.
pub fn synthesize_findings(category: Category, level: RiskLevel, counts: &TierCounts) -> Vec<String> {
    let phrase = category.phrase();
    let dominant = counts.dominant(level);

    if dominant > 0 {
        vec![
            format!("Found {} {}-risk clauses related to {}.", dominant, level.label(), phrase),
            explanation(category, level).to_string(),
        ]
    } else if counts.risk_total() > 0 {
        vec![explanation(category, level).to_string()]
    } else if counts.general > 0 {
        vec![format!(
            "Found general clauses related to {} but couldn't determine specific risk level.",
            phrase
        )]
    } else {
        vec![format!("No specific clauses related to {} were identified.", phrase)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(high: usize, medium: usize, low: usize, general: usize) -> TierCounts {
        TierCounts { high, medium, low, general }
    }

    #[test]
    fn test_count_statement_uses_dominant_tier() {
        let findings = synthesize_findings(Category::DataSharing, RiskLevel::High, &counts(2, 0, 0, 5));
        assert_eq!(
            findings,
            vec![
                "Found 2 high-risk clauses related to data sharing.".to_string(),
                "Broad rights to share data with third parties.".to_string(),
            ]
        );
    }

    #[test]
    fn test_medium_statement() {
        let findings = synthesize_findings(Category::DataCollection, RiskLevel::Medium, &counts(0, 1, 0, 1));
        assert_eq!(findings[0], "Found 1 medium-risk clauses related to data collection.");
        assert_eq!(findings[1], "Standard data collection practices with some transparency.");
    }

    #[test]
    fn test_mixed_tiers_without_dominant_matches() {
        // h=1, l=1 averages to 50 (Medium) with no medium-tier match of its own.
        let findings = synthesize_findings(Category::Liability, RiskLevel::Medium, &counts(1, 0, 1, 0));
        assert_eq!(findings, vec!["Some liability limitations but not overly broad.".to_string()]);
    }

    #[test]
    fn test_general_only_fallback() {
        let findings = synthesize_findings(Category::UserRights, RiskLevel::Medium, &counts(0, 0, 0, 3));
        assert_eq!(
            findings,
            vec!["Found general clauses related to user rights but couldn't determine specific risk level.".to_string()]
        );
    }

    #[test]
    fn test_no_match_fallback() {
        let findings = synthesize_findings(Category::PolicyChanges, RiskLevel::Low, &counts(0, 0, 0, 0));
        assert_eq!(
            findings,
            vec!["No specific clauses related to policy changes were identified.".to_string()]
        );
    }

    #[test]
    fn test_every_pair_has_an_explanation() {
        for category in Category::ALL {
            for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
                assert!(explanation(category, level).ends_with('.'));
            }
        }
    }
}
