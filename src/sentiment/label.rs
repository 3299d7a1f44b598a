//! Model-family label tables.
//!
//! General-purpose sentiment models describe economic conditions, not policy
//! stance. Bad news about the economy points toward easing, so a model's
//! "negative" reads as dovish and "positive" reads as hawkish. Each family
//! keeps its own table because the numeric label orderings differ between
//! families and must never be merged into one rule.

use crate::error::FedToneError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Monetary-policy stance of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    /// Tightening stance.
    Hawkish,
    /// Easing stance.
    Dovish,
    /// No policy signal.
    Neutral,
}

impl Sentiment {
    /// Returns the canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Hawkish => "Hawkish",
            Sentiment::Dovish => "Dovish",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported classifier families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    /// FinBERT fine-tuned on FOMC text.
    FinBertFomc,
    /// Three-class RoBERTa sentiment model (negative / neutral / positive).
    Roberta3Class,
}

impl ModelFamily {
    /// All supported families.
    pub const ALL: [ModelFamily; 2] = [ModelFamily::FinBertFomc, ModelFamily::Roberta3Class];

    /// Returns the built-in label table of this family.
    pub fn table(self) -> &'static LabelTable {
        match self {
            ModelFamily::FinBertFomc => &FINBERT_FOMC,
            ModelFamily::Roberta3Class => &ROBERTA_3CLASS,
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFamily::FinBertFomc => f.write_str("finbert-fomc"),
            ModelFamily::Roberta3Class => f.write_str("roberta"),
        }
    }
}

impl FromStr for ModelFamily {
    type Err = FedToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "finbert-fomc" | "finbert_fomc" | "finbert" => Ok(ModelFamily::FinBertFomc),
            "roberta" | "roberta-3class" | "roberta_3class" => Ok(ModelFamily::Roberta3Class),
            other => Err(FedToneError::InvalidInput(format!(
                "unknown model family '{}' (expected finbert-fomc or roberta)",
                other
            ))),
        }
    }
}

/// A substring rule of a label table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelKeyword {
    /// Case-insensitive substring to look for in the raw label.
    pub pattern: String,
    /// Stance assigned when the substring is present.
    pub sentiment: Sentiment,
}

impl LabelKeyword {
    fn new(pattern: &str, sentiment: Sentiment) -> Self {
        Self {
            pattern: pattern.to_string(),
            sentiment,
        }
    }
}

/// A total mapping from one family's raw labels to [`Sentiment`].
///
/// Raw labels are upper-cased and stripped of a `LABEL_` prefix. Numeric
/// codes are looked up exactly in `codes`; anything else is matched against
/// `keywords` in order. Labels matching neither map to [`Sentiment::Neutral`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelTable {
    /// Exact label codes (e.g. `"0"`, `"1"`).
    pub codes: BTreeMap<String, Sentiment>,
    /// Ordered substring rules; the first match wins.
    pub keywords: Vec<LabelKeyword>,
}

impl LabelTable {
    /// Maps a raw label to a stance.
    pub fn classify(&self, raw_label: &str) -> Sentiment {
        let upper = raw_label.trim().to_uppercase();
        let cleaned = upper.strip_prefix("LABEL_").unwrap_or(&upper);

        if let Some(sentiment) = self.codes.get(cleaned) {
            return *sentiment;
        }

        self.keywords
            .iter()
            .find(|rule| !rule.pattern.is_empty() && cleaned.contains(&rule.pattern.to_uppercase()))
            .map(|rule| rule.sentiment)
            .unwrap_or(Sentiment::Neutral)
    }
}

fn codes(entries: &[(&str, Sentiment)]) -> BTreeMap<String, Sentiment> {
    entries.iter().map(|(code, s)| (code.to_string(), *s)).collect()
}

// Codes: 0 = Neutral, 1 = Hawkish, 2 = Dovish.
static FINBERT_FOMC: Lazy<LabelTable> = Lazy::new(|| LabelTable {
    codes: codes(&[
        ("0", Sentiment::Neutral),
        ("1", Sentiment::Hawkish),
        ("2", Sentiment::Dovish),
    ]),
    keywords: vec![
        LabelKeyword::new("NEGATIVE", Sentiment::Dovish),
        LabelKeyword::new("POSITIVE", Sentiment::Hawkish),
        LabelKeyword::new("NEUTRAL", Sentiment::Neutral),
        LabelKeyword::new("HAWK", Sentiment::Hawkish),
        LabelKeyword::new("DOV", Sentiment::Dovish),
    ],
});

// Codes: 0 = negative, 1 = neutral, 2 = positive.
static ROBERTA_3CLASS: Lazy<LabelTable> = Lazy::new(|| LabelTable {
    codes: codes(&[
        ("0", Sentiment::Dovish),
        ("1", Sentiment::Neutral),
        ("2", Sentiment::Hawkish),
    ]),
    keywords: vec![
        LabelKeyword::new("NEGATIVE", Sentiment::Dovish),
        LabelKeyword::new("POSITIVE", Sentiment::Hawkish),
        LabelKeyword::new("NEUTRAL", Sentiment::Neutral),
    ],
});

/// Normalizes a raw label using the built-in table of `family`.
pub fn normalize(raw_label: &str, family: ModelFamily) -> Sentiment {
    family.table().classify(raw_label)
}

/// One classifier output for one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    /// Label exactly as emitted by the model.
    pub raw_label: String,
    /// Model confidence for the label.
    pub score: f64,
}

impl SentimentPrediction {
    /// Creates a prediction.
    pub fn new(raw_label: impl Into<String>, score: f64) -> Self {
        Self {
            raw_label: raw_label.into(),
            score,
        }
    }

    /// Normalizes the label with the given table.
    pub fn sentiment(&self, table: &LabelTable) -> Sentiment {
        table.classify(&self.raw_label)
    }
}
