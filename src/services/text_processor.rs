// Text Processing Service
// Input normalization and document statistics

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

use crate::models::{DocumentStatistics, TermCount};
use crate::services::sentence_segmenter::segment_sentences;

/// Privacy vocabulary counted in document statistics, in report tie-break order.
pub const COMMON_PRIVACY_TERMS: [&str; 16] = [
    "personal data",
    "information",
    "consent",
    "cookies",
    "third party",
    "partners",
    "security",
    "rights",
    "access",
    "delete",
    "share",
    "collect",
    "process",
    "privacy",
    "breach",
    "notification",
];

pub const DEFAULT_TOP_TERMS: usize = 10;
pub const DEFAULT_LONG_SENTENCE_WORDS: f64 = 25.0;

static SPACE_RE: OnceLock<Regex> = OnceLock::new();
static HORIZONTAL_WS_RE: OnceLock<Regex> = OnceLock::new();
static TERM_RES: OnceLock<Vec<Regex>> = OnceLock::new();

fn space_re() -> &'static Regex {
    SPACE_RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}\u{2007}\u{202F}]").expect("valid regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    HORIZONTAL_WS_RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B]+").expect("valid regex"))
}

fn term_res() -> &'static [Regex] {
    TERM_RES.get_or_init(|| {
        COMMON_PRIVACY_TERMS
            .iter()
            .map(|term| {
                RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
                    .case_insensitive(true)
                    .build()
                    .expect("valid term regex")
            })
            .collect()
    })
}

/// Normalize punctuation and whitespace before analysis.
///
/// Smart quotes become ASCII quotes, dashes become '-', exotic spaces become ' ',
/// line endings become '\n', runs of horizontal whitespace collapse and each line
/// is trimmed. Blank lines survive so paragraph breaks stay visible to the segmenter.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text
        .trim_start_matches('\u{FEFF}')
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{2013}', '\u{2014}'], "-");

    s = space_re().replace_all(&s, " ").into_owned();
    s = s.replace("\r\n", "\n").replace('\r', "\n");
    s = horizontal_ws_re().replace_all(&s, " ").into_owned();

    s.lines().map(str::trim).collect::<Vec<_>>().join("\n").trim().to_string()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Occurrences of each privacy term on word boundaries, zero counts dropped,
/// highest count first (ties keep list order), at most `limit` entries.
pub fn count_privacy_terms(text: &str, limit: usize) -> Vec<TermCount> {
    let mut counts: Vec<TermCount> = COMMON_PRIVACY_TERMS
        .iter()
        .zip(term_res())
        .map(|(term, re)| TermCount {
            term: term.to_string(),
            count: re.find_iter(text).count(),
        })
        .filter(|t| t.count > 0)
        .collect();

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

pub fn compute_statistics(text: &str, top_terms: usize, long_sentence_words: f64) -> DocumentStatistics {
    let word_count = count_words(text);
    let sentence_count = segment_sentences(text).len();
    let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

    DocumentStatistics {
        char_count: text.chars().count(),
        word_count,
        sentence_count,
        avg_sentence_length,
        long_sentences: avg_sentence_length > long_sentence_words,
        top_terms: count_privacy_terms(text, top_terms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation() {
        let input = "We \u{201c}may\u{201d} share\u{2014}sometimes\u{00A0}widely. It\u{2019}s fine.";
        assert_eq!(normalize_text(input), "We \"may\" share-sometimes widely. It's fine.");
    }

    #[test]
    fn test_normalize_keeps_paragraph_breaks() {
        let input = "  First line.\r\n\r\nSecond\t\tline.  \r";
        assert_eq!(normalize_text(input), "First line.\n\nSecond line.");
    }

    #[test]
    fn test_normalize_strips_bom() {
        assert_eq!(normalize_text("\u{FEFF}Terms."), "Terms.");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("We  collect\nyour data."), 4);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn test_term_counts_use_word_boundaries() {
        let text = "We share data. Sharing is caring. We SHARE with a third party, and a third-party vendor.";
        let terms = count_privacy_terms(text, 10);
        assert_eq!(
            terms,
            vec![
                TermCount { term: "share".to_string(), count: 2 },
                TermCount { term: "third party".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_term_counts_sorted_with_stable_ties() {
        let text = "privacy consent privacy cookies consent privacy";
        let terms = count_privacy_terms(text, 10);
        let names: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["privacy", "consent", "cookies"]);
        assert_eq!(count_privacy_terms(text, 1).len(), 1);
    }

    #[test]
    fn test_compute_statistics() {
        let text = "We collect your information. We protect your privacy.";
        let stats = compute_statistics(text, DEFAULT_TOP_TERMS, DEFAULT_LONG_SENTENCE_WORDS);
        assert_eq!(stats.char_count, text.chars().count());
        assert_eq!(stats.word_count, 8);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.avg_sentence_length, 4.0);
        assert!(!stats.long_sentences);
        assert_eq!(stats.top_terms.len(), 3);
    }

    #[test]
    fn test_long_sentence_warning() {
        let text = format!("{}.", vec!["word"; 30].join(" "));
        let stats = compute_statistics(&text, DEFAULT_TOP_TERMS, DEFAULT_LONG_SENTENCE_WORDS);
        assert_eq!(stats.sentence_count, 1);
        assert!(stats.long_sentences);
    }

    #[test]
    fn test_statistics_of_empty_text() {
        let stats = compute_statistics("", DEFAULT_TOP_TERMS, DEFAULT_LONG_SENTENCE_WORDS);
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.avg_sentence_length, 0.0);
        assert!(stats.top_terms.is_empty());
    }
}
