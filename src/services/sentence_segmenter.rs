// Sentence Segmenter
// Splits plain document text into ordered sentence views (punctuation + case heuristics)

use serde::Serialize;

/// Abbreviations whose trailing dot never ends a sentence (compared lower-case, without the final dot).
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "cf", "approx", "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "inc",
    "ltd", "corp", "co", "llc", "u.s", "u.k", "a.m", "p.m", "st", "dept", "fig", "sec", "art",
];

const CLOSING_CHARS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}', '\u{00bb}'];

/// A sentence borrowed from the analyzed document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence<'a> {
    pub index: usize,
    /// UTF-8 byte offset (0-based) into the analyzed text.
    pub start: usize,
    /// UTF-8 byte offset (0-based, end-exclusive) into the analyzed text.
    pub end: usize,
    pub text: &'a str,
}

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '\u{2026}')
}

fn is_closing(ch: char) -> bool {
    CLOSING_CHARS.contains(&ch)
}

/// `true` when the newline at `pos` starts a blank line (paragraph break).
fn is_paragraph_break(text: &str, pos: usize) -> bool {
    text[pos + 1..]
        .trim_start_matches([' ', '\t', '\r'])
        .starts_with('\n')
}

/// Last whitespace-separated token before `pos`, stripped of opening punctuation.
fn token_before(text: &str, seg_start: usize, pos: usize) -> &str {
    let head = &text[seg_start..pos];
    let token = head.rsplit(char::is_whitespace).next().unwrap_or("");
    token.trim_start_matches(|c: char| !c.is_alphanumeric())
}

fn is_abbreviation(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let lower = token.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    // Single-letter initials ("J. Smith").
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// Decide whether the terminal run `[punct_pos, run_end)` closes the current sentence.
fn is_boundary(text: &str, seg_start: usize, punct_pos: usize, run_end: usize) -> bool {
    let rest = &text[run_end..];
    match rest.chars().next() {
        None => return true,
        // "example.com", "3.5", "e.g.x" keep going.
        Some(c) if !c.is_whitespace() => return false,
        _ => {}
    }

    let next_word = rest.trim_start();
    let Some(next) = next_word.chars().next() else {
        return true;
    };

    if text[punct_pos..].starts_with('.') {
        if is_abbreviation(token_before(text, seg_start, punct_pos)) {
            return false;
        }
        // Leading list markers ("1.", "2.3.") belong to the heading that follows.
        let head = text[seg_start..punct_pos].trim();
        if !head.is_empty() && head.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return false;
        }
    }

    !next.is_lowercase()
}

fn push_span<'a>(text: &'a str, start: usize, end: usize, out: &mut Vec<Sentence<'a>>) {
    if end <= start {
        return;
    }
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = raw.len() - raw.trim_start().len();
    let s = start + lead;
    out.push(Sentence {
        index: out.len(),
        start: s,
        end: s + trimmed.len(),
        text: trimmed,
    });
}

/// Split `text` into sentences in document order.
///
/// Boundaries are terminal punctuation (optionally followed by closing quotes or
/// brackets) that is followed by whitespace and a word not starting in lower case,
/// excluding known abbreviations and initials. A blank line always ends a sentence.
/// Empty or whitespace-only input yields no sentences.
pub fn segment_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    if text.trim().is_empty() {
        return sentences;
    }

    let mut seg_start = 0usize;
    let mut iter = text.char_indices().peekable();

    while let Some((pos, ch)) = iter.next() {
        if ch == '\n' {
            if is_paragraph_break(text, pos) {
                push_span(text, seg_start, pos, &mut sentences);
                seg_start = pos + 1;
            }
            continue;
        }

        if !is_terminal(ch) {
            continue;
        }

        let mut run_end = pos + ch.len_utf8();
        while let Some(&(next_pos, next)) = iter.peek() {
            if is_terminal(next) || is_closing(next) {
                run_end = next_pos + next.len_utf8();
                iter.next();
            } else {
                break;
            }
        }

        if is_boundary(text, seg_start, pos, run_end) {
            push_span(text, seg_start, run_end, &mut sentences);
            seg_start = run_end;
        }
    }

    push_span(text, seg_start, text.len(), &mut sentences);
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        segment_sentences(input).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(segment_sentences("").is_empty());
        assert!(segment_sentences("   \n\t  \n").is_empty());
    }

    #[test]
    fn test_basic_split() {
        assert_eq!(
            texts("We collect data. We share it! Do we sell it? No."),
            vec!["We collect data.", "We share it!", "Do we sell it?", "No."]
        );
    }

    #[test]
    fn test_single_sentence_without_terminal() {
        assert_eq!(texts("  Terms of Service  "), vec!["Terms of Service"]);
    }

    #[test]
    fn test_abbreviations_and_initials_do_not_split() {
        assert_eq!(
            texts("We share data with partners, e.g. Acme Inc. and others. J. Smith is our officer."),
            vec![
                "We share data with partners, e.g. Acme Inc. and others.",
                "J. Smith is our officer."
            ]
        );
    }

    #[test]
    fn test_decimals_and_domains_do_not_split() {
        assert_eq!(
            texts("Version 2.5 applies to example.com users. It starts today."),
            vec!["Version 2.5 applies to example.com users.", "It starts today."]
        );
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        assert_eq!(texts("See sec. five below. Then stop."), vec!["See sec. five below.", "Then stop."]);
        assert_eq!(texts("Hello... and goodbye."), vec!["Hello... and goodbye."]);
    }

    #[test]
    fn test_closing_quotes_stay_with_sentence() {
        assert_eq!(
            texts("The service is provided \"as is.\" We disclaim warranties."),
            vec!["The service is provided \"as is.\"", "We disclaim warranties."]
        );
    }

    #[test]
    fn test_blank_line_is_boundary() {
        assert_eq!(
            texts("1. DATA COLLECTION\n\nWe collect your email\naddress when you register."),
            vec!["1. DATA COLLECTION", "We collect your email\naddress when you register."]
        );
    }

    #[test]
    fn test_offsets_point_into_original_text() {
        let text = "  First one.   Second one?\n\n  Third ☃ one!";
        let sentences = segment_sentences(text);
        assert_eq!(sentences.len(), 3);
        for (i, s) in sentences.iter().enumerate() {
            assert_eq!(s.index, i);
            assert_eq!(&text[s.start..s.end], s.text);
        }
        assert_eq!(sentences[2].text, "Third ☃ one!");
    }
}
