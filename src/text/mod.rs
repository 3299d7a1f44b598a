//! Text processing: noise filtering, layout cleaning, paragraph chunking and
//! sentence segmentation.

mod cleaner;
mod noise;
mod preprocess;
mod segmenter;
pub mod sentence;

pub use cleaner::NoiseCleaner;
pub use noise::NoiseFilter;
pub use preprocess::ContentPreprocessor;
pub use segmenter::SentenceSegmenter;

/// Number of whitespace-separated words.
#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of characters (Unicode scalar values).
#[inline]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Splits after any of `enders` when the next character is whitespace.
///
/// The punctuation stays with the left part; parts are trimmed and empty
/// parts dropped.
pub(crate) fn split_after<'a>(text: &'a str, enders: &[char]) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !enders.contains(&c) {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if next.is_whitespace() {
                let end = i + c.len_utf8();
                parts.push(text[start..end].trim());
                start = end;
            }
        }
    }
    parts.push(text[start..].trim());

    parts.retain(|part| !part.is_empty());
    parts
}
