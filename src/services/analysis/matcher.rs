// Pattern Matcher
// Records, per tier, the sentences a category's patterns fire on

use super::patterns::{CategoryPatterns, Tier};
use super::scoring::TierCounts;
use crate::services::sentence_segmenter::Sentence;

/// Per-category match lists for one analysis run, each in document order.
#[derive(Debug, Clone, Default)]
pub struct MatchSet<'a> {
    pub high: Vec<Sentence<'a>>,
    pub medium: Vec<Sentence<'a>>,
    pub low: Vec<Sentence<'a>>,
    pub general: Vec<Sentence<'a>>,
}

impl<'a> MatchSet<'a> {
    pub fn tier(&self, tier: Tier) -> &[Sentence<'a>] {
        match tier {
            Tier::High => &self.high,
            Tier::Medium => &self.medium,
            Tier::Low => &self.low,
            Tier::General => &self.general,
        }
    }

    fn tier_mut(&mut self, tier: Tier) -> &mut Vec<Sentence<'a>> {
        match tier {
            Tier::High => &mut self.high,
            Tier::Medium => &mut self.medium,
            Tier::Low => &mut self.low,
            Tier::General => &mut self.general,
        }
    }

    pub fn counts(&self) -> TierCounts {
        TierCounts {
            high: self.high.len(),
            medium: self.medium.len(),
            low: self.low.len(),
            general: self.general.len(),
        }
    }
}

/// Match every sentence against each tier of `patterns`.
///
/// Tiers are checked independently, so one sentence can land in several tiers,
/// but a tier records a sentence at most once no matter how many of its patterns match.
pub fn match_category<'a>(patterns: &CategoryPatterns, sentences: &[Sentence<'a>]) -> MatchSet<'a> {
    let mut matches = MatchSet::default();
    for sentence in sentences {
        for tier in Tier::ALL {
            if patterns.first_match(tier, sentence.text).is_some() {
                matches.tier_mut(tier).push(*sentence);
            }
        }
    }
    matches
}
