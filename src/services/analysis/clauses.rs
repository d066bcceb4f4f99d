// Clause Selector
// Representative sentences per category, highest tier first

use super::matcher::MatchSet;
use super::patterns::Tier;

pub const MAX_EXTRACTED_CLAUSES: usize = 3;

/// Fill up to `MAX_EXTRACTED_CLAUSES` slots from the high, medium, low and general
/// lists in that order, document order within each list.
///
/// Lists are not deduplicated against each other: a sentence recorded by two tiers
/// fills two slots.
pub fn select_clauses(matches: &MatchSet<'_>) -> Vec<String> {
    let mut clauses = Vec::with_capacity(MAX_EXTRACTED_CLAUSES);

    for tier in Tier::ALL {
        let remaining = MAX_EXTRACTED_CLAUSES - clauses.len();
        if remaining == 0 {
            break;
        }
        clauses.extend(matches.tier(tier).iter().take(remaining).map(|s| s.text.to_string()));
    }

    clauses
}
