//! Rule-based sentence boundary detection.
//!
//! A boundary is placed after a run of `.`, `!` or `?` (plus any closing
//! quotes or brackets) that is followed by whitespace, unless the break
//! would land inside a known construction:
//!
//! - honorifics and common abbreviations (Mr., Gov., Inc., Sept.);
//! - dotted abbreviations (U.S., e.g., p.m.);
//! - "et al.";
//! - numbering abbreviations before a number (No. 5, Fig. 2);
//! - single-letter initials (Jerome H. Powell);
//! - suspension points (...);
//! - a continuation that starts in lowercase.
//!
//! Decimals such as `2.5` never qualify because no whitespace follows the dot.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens that end in a period without ending a sentence (compared lowercase).
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "gov", "st", "jr", "sr", "vs", "inc", "corp", "ltd", "dept",
    "approx", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

/// Abbreviations that are also plain words; they only hold before a number.
const NUMBERING_ABBREVIATIONS: &[&str] = &["no", "nos", "fig", "vol"];

// "Smith et al. (2019)"
static COMPOSITE_ABBREV: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bet\s+al$").unwrap());

// "U.S", "e.g", "a.m" (the final period is not part of the token)
static DOTTED_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z]\.)+[A-Za-z]$").unwrap());

#[inline]
fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

#[inline]
fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '"' | '\'' | '\u{2019}' | '\u{201D}')
}

/// Splits text into sentences.
///
/// # Example
/// ```
/// use fedtone::text::sentence::split_sentences;
///
/// let text = "Gov. Smith spoke at 2.5 p.m. today. The U.S. economy is strong.";
/// let sentences = split_sentences(text);
/// assert_eq!(sentences.len(), 2);
/// ```
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |&(pos, _)| pos);

    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !is_terminator(c) {
            i += 1;
            continue;
        }

        let mut j = i;
        while j < chars.len() && is_terminator(chars[j].1) {
            j += 1;
        }
        let run = &text[pos..byte_at(j)];

        while j < chars.len() && is_closer(chars[j].1) {
            j += 1;
        }
        let end = byte_at(j);

        let followed_by_space = chars.get(j).map_or(true, |&(_, next)| next.is_whitespace());
        if followed_by_space {
            let next = chars[j..]
                .iter()
                .map(|&(_, ch)| ch)
                .find(|ch| !ch.is_whitespace());
            if is_boundary(&text[start..pos], run, next) {
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
        }

        i = j;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

/// Decides whether the terminator `run`, preceded by `preceding` and
/// followed by the character `next`, ends a sentence.
fn is_boundary(preceding: &str, run: &str, next: Option<char>) -> bool {
    if next.is_some_and(char::is_lowercase) {
        return false;
    }

    // Suspension points
    if run.len() > 1 && run.chars().all(|c| c == '.') {
        return false;
    }

    if run == "." {
        if COMPOSITE_ABBREV.is_match(preceding) {
            return false;
        }

        let token = preceding
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        if is_abbreviation(token) {
            return false;
        }
        if next.is_some_and(|c| c.is_ascii_digit())
            && NUMBERING_ABBREVIATIONS.contains(&token.to_lowercase().as_str())
        {
            return false;
        }
    }

    true
}

fn is_abbreviation(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(c), None) => c.is_uppercase(),
        _ => {
            ABBREVIATIONS.contains(&token.to_lowercase().as_str())
                || DOTTED_ABBREVIATION.is_match(token)
        }
    }
}

fn push_trimmed(sentences: &mut Vec<String>, span: &str) {
    let span = span.trim();
    if !span.is_empty() {
        sentences.push(span.to_string());
    }
}
