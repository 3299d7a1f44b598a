//! Sentiment harmonization and period aggregation.
//!
//! External classifiers emit labels in their own vocabularies (`LABEL_n`
//! tokens, numeric codes, free text). The label tables map each model family's
//! vocabulary onto the shared Hawkish / Dovish / Neutral taxonomy and
//! the index module reduces labeled sentences to per-period net sentiment.

mod index;
mod label;

pub use index::{aggregate, build_indices, GroupKey, IndexTotals, PeriodIndex, ScoredSentence};
pub use label::{normalize, LabelKeyword, LabelTable, ModelFamily, Sentiment, SentimentPrediction};
