//! Conversational and administrative noise detection.

use super::char_count;
use crate::rules::RuleSet;

/// Spans shorter than this are always noise.
const MIN_CHARS: usize = 5;

/// Spans shorter than this are noise when they merely contain a phrase.
const SHORT_SPAN_CHARS: usize = 30;

/// Classifies short spans as procedural noise ("Thank you.", "So moved.").
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    phrases: Vec<String>,
}

impl NoiseFilter {
    /// Creates a filter from a phrase list; matching is case-insensitive.
    pub fn new(phrases: &[String]) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|phrase| fold_apostrophes(&phrase.trim().to_lowercase()))
                .filter(|phrase| !phrase.is_empty())
                .collect(),
        }
    }

    /// Creates a filter from the noise phrases of a rule set.
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self::new(&rules.noise_phrases)
    }

    /// Returns true if `text` carries no substantive content.
    ///
    /// A span is noise when it is under 5 characters, when it equals a noise
    /// phrase once lowercased and trimmed of periods, commas and whitespace,
    /// or when it is under 30 characters and contains a noise phrase. Longer
    /// spans that only mention a phrase are kept.
    pub fn is_noise(&self, text: &str) -> bool {
        let len = char_count(text);
        if len < MIN_CHARS {
            return true;
        }

        let lowered = fold_apostrophes(&text.to_lowercase());
        let trimmed = lowered.trim_matches(|c: char| c == '.' || c == ',' || c.is_whitespace());

        self.phrases.iter().any(|phrase| {
            trimmed == phrase.as_str() || (len < SHORT_SPAN_CHARS && trimmed.contains(phrase.as_str()))
        })
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::from_rules(&RuleSet::default())
    }
}

fn fold_apostrophes(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'")
}
