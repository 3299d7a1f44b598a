//! Configuration for the fedtone structuring pipeline.
//!
//! Numeric thresholds live here; the phrase and pattern tables live in
//! [`crate::rules::RuleSet`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sentence segmentation thresholds.
    pub segmenter: SegmenterConfig,

    /// Paragraph chunking thresholds.
    pub preprocess: PreprocessConfig,

    /// Press-conference transcript settings.
    pub transcript: TranscriptConfig,

    /// Speech corpus settings.
    pub speech: SpeechConfig,
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Sentence segmentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Inputs with fewer stripped characters yield no sentences.
    /// Default: 10.
    pub min_text_chars: usize,

    /// Minimum words per emitted sentence.
    /// Default: 5.
    pub min_words: usize,

    /// Minimum characters per emitted sentence.
    /// Default: 30.
    pub min_chars: usize,

    /// Sentences above this word count are re-split.
    /// Default: 30.
    pub max_words: usize,

    /// Re-split parts above this word count are split again on commas.
    /// Default: 40.
    pub comma_split_words: usize,

    /// Minimum characters of a comma-delimited piece.
    /// Default: 20.
    pub min_clause_chars: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 10,
            min_words: 5,
            min_chars: 30,
            max_words: 30,
            comma_split_words: 40,
            min_clause_chars: 20,
        }
    }
}

/// Paragraph chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Paragraphs up to this many words are kept whole, and no emitted
    /// segment exceeds it.
    /// Default: 100.
    pub max_paragraph_words: usize,

    /// Sentences of an overlong paragraph above this word count are split
    /// on clause punctuation.
    /// Default: 15.
    pub clause_split_words: usize,

    /// Minimum words per emitted segment.
    /// Default: 3.
    pub min_segment_words: usize,

    /// Window size used when a segment has no usable punctuation.
    /// Default: 50.
    pub window_words: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            max_paragraph_words: 100,
            clause_split_words: 15,
            min_segment_words: 3,
            window_words: 50,
        }
    }
}

/// Press-conference transcript configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Turns with fewer content characters are discarded.
    /// Default: 10.
    pub min_turn_chars: usize,

    /// A "Transcript of" marker within this many leading characters of a
    /// turn truncates the turn there.
    /// Default: 100.
    pub boilerplate_window: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            min_turn_chars: 10,
            boilerplate_window: 100,
        }
    }
}

/// Speech corpus configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Skip speeches whose title mentions none of the policy keywords.
    /// Default: false.
    pub require_title_keyword: bool,
}
