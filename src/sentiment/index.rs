//! Net sentiment indices.
//!
//! Two formulas are computed side by side:
//!
//! - **count**: `(hawkish - dovish) / total`, robust to score miscalibration;
//! - **score**: `(Σ hawkish scores - Σ dovish scores) / (hawkish + dovish)`,
//!   which favors confident predictions. Neutral sentences stay out of both
//!   its numerator and denominator.
//!
//! Positive values are net hawkish. Empty denominators yield 0.

use super::label::Sentiment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Class counts and both indices for one group of sentences.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndexTotals {
    /// Count-based net sentiment in `[-1, 1]`.
    pub net_sentiment_count: f64,
    /// Score-weighted net sentiment.
    pub net_sentiment_score: f64,
    /// Hawkish sentences.
    pub hawkish_count: usize,
    /// Dovish sentences.
    pub dovish_count: usize,
    /// Neutral sentences.
    pub neutral_count: usize,
    /// All sentences.
    pub total: usize,
}

/// Reduces labeled sentences to an [`IndexTotals`].
///
/// A record without a score counts toward the class counts and adds nothing
/// to the score sums.
pub fn aggregate<I>(records: I) -> IndexTotals
where
    I: IntoIterator<Item = (Sentiment, Option<f64>)>,
{
    let mut totals = IndexTotals::default();
    let mut hawkish_score = 0.0;
    let mut dovish_score = 0.0;

    for (sentiment, score) in records {
        let score = score.unwrap_or(0.0);
        match sentiment {
            Sentiment::Hawkish => {
                totals.hawkish_count += 1;
                hawkish_score += score;
            }
            Sentiment::Dovish => {
                totals.dovish_count += 1;
                dovish_score += score;
            }
            Sentiment::Neutral => totals.neutral_count += 1,
        }
        totals.total += 1;
    }

    if totals.total > 0 {
        totals.net_sentiment_count =
            (totals.hawkish_count as f64 - totals.dovish_count as f64) / totals.total as f64;
    }

    let polar = totals.hawkish_count + totals.dovish_count;
    if polar > 0 {
        totals.net_sentiment_score = (hawkish_score - dovish_score) / polar as f64;
    }

    totals
}

/// A normalized prediction keyed for grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    /// Period key (usually the document date).
    pub period: String,
    /// Source type label, used by [`GroupKey::PeriodAndSource`].
    pub source: Option<String>,
    /// Normalized stance.
    pub sentiment: Sentiment,
    /// Model confidence, if available.
    pub score: Option<f64>,
}

/// How sentences are grouped into index rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupKey {
    /// One row per period.
    #[default]
    Period,
    /// One row per (period, source type).
    PeriodAndSource,
}

/// One row of the index table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodIndex {
    /// Period key.
    pub period: String,
    /// Source type, when grouped by source.
    pub source: Option<String>,
    /// Count-based net sentiment.
    pub net_sentiment_count: f64,
    /// Score-weighted net sentiment.
    pub net_sentiment_score: f64,
    /// Hawkish sentences.
    pub hawkish_count: usize,
    /// Dovish sentences.
    pub dovish_count: usize,
    /// Neutral sentences.
    pub neutral_count: usize,
    /// All sentences.
    pub total: usize,
}

impl PeriodIndex {
    /// Builds a row from a group key and its totals.
    pub fn new(period: String, source: Option<String>, totals: IndexTotals) -> Self {
        Self {
            period,
            source,
            net_sentiment_count: totals.net_sentiment_count,
            net_sentiment_score: totals.net_sentiment_score,
            hawkish_count: totals.hawkish_count,
            dovish_count: totals.dovish_count,
            neutral_count: totals.neutral_count,
            total: totals.total,
        }
    }
}

/// Groups sentences and aggregates each group, in ascending key order.
pub fn build_indices(sentences: &[ScoredSentence], key: GroupKey) -> Vec<PeriodIndex> {
    let mut groups: BTreeMap<(String, Option<String>), Vec<(Sentiment, Option<f64>)>> =
        BTreeMap::new();

    for sentence in sentences {
        let source = match key {
            GroupKey::Period => None,
            GroupKey::PeriodAndSource => sentence.source.clone(),
        };
        groups
            .entry((sentence.period.clone(), source))
            .or_default()
            .push((sentence.sentiment, sentence.score));
    }

    groups
        .into_iter()
        .map(|((period, source), records)| PeriodIndex::new(period, source, aggregate(records)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(period: &str, source: &str, sentiment: Sentiment, score: f64) -> ScoredSentence {
        ScoredSentence {
            period: period.to_string(),
            source: Some(source.to_string()),
            sentiment,
            score: Some(score),
        }
    }

    #[test]
    fn test_empty_group_is_zero() {
        let totals = aggregate(Vec::new());
        assert_eq!(totals.total, 0);
        assert_eq!(totals.net_sentiment_count, 0.0);
        assert_eq!(totals.net_sentiment_score, 0.0);
    }

    #[test]
    fn test_count_index() {
        let totals = aggregate(vec![
            (Sentiment::Hawkish, Some(0.9)),
            (Sentiment::Hawkish, Some(0.8)),
            (Sentiment::Dovish, Some(0.7)),
            (Sentiment::Neutral, Some(0.99)),
        ]);
        assert_eq!(totals.hawkish_count, 2);
        assert_eq!(totals.dovish_count, 1);
        assert_eq!(totals.neutral_count, 1);
        assert_eq!(totals.total, 4);
        assert!((totals.net_sentiment_count - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_score_index_ignores_neutral() {
        let totals = aggregate(vec![
            (Sentiment::Hawkish, Some(0.9)),
            (Sentiment::Dovish, Some(0.5)),
            (Sentiment::Neutral, Some(1.0)),
        ]);
        // (0.9 - 0.5) / 2
        assert!((totals.net_sentiment_score - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_only_neutral_scores_zero() {
        let totals = aggregate(vec![(Sentiment::Neutral, Some(0.8)); 3]);
        assert_eq!(totals.net_sentiment_count, 0.0);
        assert_eq!(totals.net_sentiment_score, 0.0);
        assert_eq!(totals.total, 3);
    }

    #[test]
    fn test_missing_score_counts_but_adds_nothing() {
        let totals = aggregate(vec![(Sentiment::Hawkish, None), (Sentiment::Dovish, Some(0.6))]);
        assert_eq!(totals.net_sentiment_count, 0.0);
        assert!((totals.net_sentiment_score + 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_count_index_bounds() {
        let all_hawkish = aggregate(vec![(Sentiment::Hawkish, Some(1.0)); 5]);
        let all_dovish = aggregate(vec![(Sentiment::Dovish, Some(1.0)); 5]);
        assert_eq!(all_hawkish.net_sentiment_count, 1.0);
        assert_eq!(all_dovish.net_sentiment_count, -1.0);

        for mix in 0..=6 {
            let records: Vec<_> = (0..6)
                .map(|i| match (i + mix) % 3 {
                    0 => (Sentiment::Hawkish, Some(0.5)),
                    1 => (Sentiment::Dovish, Some(0.5)),
                    _ => (Sentiment::Neutral, Some(0.5)),
                })
                .take(mix)
                .collect();
            let index = aggregate(records).net_sentiment_count;
            assert!((-1.0..=1.0).contains(&index));
        }
    }

    #[test]
    fn test_build_indices_by_period() {
        let sentences = vec![
            scored("2023-03-22", "Q&A", Sentiment::Hawkish, 0.9),
            scored("2022-12-14", "Minutes", Sentiment::Dovish, 0.8),
            scored("2023-03-22", "Opening Statement", Sentiment::Dovish, 0.6),
            scored("2023-03-22", "Q&A", Sentiment::Hawkish, 0.7),
        ];

        let rows = build_indices(&sentences, GroupKey::Period);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, "2022-12-14");
        assert_eq!(rows[0].net_sentiment_count, -1.0);
        assert_eq!(rows[1].period, "2023-03-22");
        assert_eq!(rows[1].total, 3);
        assert!(rows[1].source.is_none());
        assert!((rows[1].net_sentiment_count - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_build_indices_by_source() {
        let sentences = vec![
            scored("2023-03-22", "Q&A", Sentiment::Hawkish, 0.9),
            scored("2023-03-22", "Opening Statement", Sentiment::Dovish, 0.6),
            scored("2023-03-22", "Q&A", Sentiment::Neutral, 0.7),
        ];

        let rows = build_indices(&sentences, GroupKey::PeriodAndSource);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source.as_deref(), Some("Opening Statement"));
        assert_eq!(rows[1].source.as_deref(), Some("Q&A"));
        assert_eq!(rows[1].total, 2);
        assert!((rows[1].net_sentiment_score - 0.9).abs() < 1e-12);
    }
}
