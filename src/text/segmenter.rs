//! Sentence segmentation with length control.
//!
//! Sentences are cut by [`split_sentences`], filtered for length and noise,
//! and overlong sentences are broken up again so that every emitted record
//! fits a classifier's input window.

use super::noise::NoiseFilter;
use super::sentence::split_sentences;
use super::{char_count, split_after, word_count};
use crate::config::SegmenterConfig;

/// Splits text blocks into well-formed sentences.
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    config: SegmenterConfig,
    noise: NoiseFilter,
}

impl SentenceSegmenter {
    /// Creates a segmenter with the given configuration and noise filter.
    pub fn new(config: SegmenterConfig, noise: NoiseFilter) -> Self {
        Self { config, noise }
    }

    /// Creates a segmenter with default thresholds and noise phrases.
    pub fn default_config() -> Self {
        Self::new(SegmenterConfig::default(), NoiseFilter::default())
    }

    /// Segments a text block into sentences, in source order.
    ///
    /// Sentences under the word or character minimum and noise are dropped.
    /// Sentences above `max_words` are replaced by the parts returned from
    /// [`split_long`](Self::split_long).
    pub fn segment(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() || char_count(text) < self.config.min_text_chars {
            return Vec::new();
        }

        let mut sentences = Vec::new();
        for candidate in split_sentences(text) {
            if !self.is_substantive(&candidate) {
                continue;
            }
            if word_count(&candidate) > self.config.max_words {
                sentences.extend(self.split_long(&candidate));
            } else {
                sentences.push(candidate);
            }
        }
        sentences
    }

    /// Breaks an overlong sentence into smaller parts.
    ///
    /// The sentence is split after `.`, `!`, `?` or `;`. Parts over
    /// `comma_split_words` are split again on commas. When no part survives
    /// filtering the original sentence is returned unsplit, so content is
    /// never dropped entirely.
    pub fn split_long(&self, sentence: &str) -> Vec<String> {
        let mut parts = Vec::new();

        for part in split_after(sentence, &['.', '!', '?', ';']) {
            if !self.is_substantive(part) {
                continue;
            }

            if word_count(part) > self.config.comma_split_words {
                let clauses: Vec<String> = split_after(part, &[','])
                    .into_iter()
                    .filter(|clause| {
                        word_count(clause) >= self.config.min_words
                            && char_count(clause) >= self.config.min_clause_chars
                    })
                    .map(str::to_string)
                    .collect();

                if clauses.is_empty() {
                    parts.push(part.to_string());
                } else {
                    parts.extend(clauses);
                }
            } else {
                parts.push(part.to_string());
            }
        }

        if parts.is_empty() {
            return vec![sentence.trim().to_string()];
        }
        parts
    }

    fn is_substantive(&self, sentence: &str) -> bool {
        word_count(sentence) >= self.config.min_words
            && char_count(sentence) >= self.config.min_chars
            && !self.noise.is_noise(sentence)
    }
}
