//! Paragraph chunking ahead of sentence segmentation.

use super::{split_after, word_count};
use crate::config::PreprocessConfig;
use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Breaks raw content into paragraph-sized segments.
///
/// Short paragraphs pass through whole. Long ones are cut into sentences,
/// and long sentences into clauses. Anything still over the limit is chunked
/// by a fixed word window.
#[derive(Debug, Clone, Default)]
pub struct ContentPreprocessor {
    config: PreprocessConfig,
}

impl ContentPreprocessor {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Returns segments of `min_segment_words..=max_paragraph_words` words.
    pub fn preprocess(&self, content: &str) -> Vec<String> {
        let mut candidates = Vec::new();

        for paragraph in PARAGRAPH_BREAK.split(content) {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }

            if word_count(paragraph) <= self.config.max_paragraph_words {
                candidates.push(paragraph.to_string());
                continue;
            }

            for sentence in split_after(paragraph, &['.', '!', '?']) {
                if word_count(sentence) > self.config.clause_split_words {
                    candidates.extend(
                        split_after(sentence, &[';', ':', ','])
                            .into_iter()
                            .filter(|clause| word_count(clause) >= self.config.min_segment_words)
                            .map(str::to_string),
                    );
                } else {
                    candidates.push(sentence.to_string());
                }
            }
        }

        let mut segments = Vec::new();
        for candidate in candidates {
            let words = word_count(&candidate);
            if words > self.config.max_paragraph_words {
                segments.extend(self.force_split(&candidate));
            } else if words >= self.config.min_segment_words {
                segments.push(candidate);
            }
        }
        segments
    }

    /// Chunks text into consecutive `window_words` windows.
    pub fn force_split(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        words
            .chunks(self.config.window_words.max(1))
            .filter(|chunk| chunk.len() >= self.config.min_segment_words)
            .map(|chunk| chunk.join(" "))
            .collect()
    }
}
