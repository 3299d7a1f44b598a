//! Sentence, prediction and index tables.

use crate::date::DocumentDate;
use crate::document::SentenceRecord;
use crate::error::{FedToneError, Result};
use crate::sentiment::{LabelTable, PeriodIndex, ScoredSentence};
use crate::text::word_count;
use csv::{QuoteStyle, WriterBuilder};
use log::{info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a sentence table with every field quoted.
pub fn write_sentences(path: &Path, records: &[SentenceRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_sentences_to(file, records)?;
    info!("Wrote {} sentences to {}", records.len(), path.display());
    Ok(())
}

/// Writes a sentence table to any writer.
pub fn write_sentences_to<W: Write>(writer: W, records: &[SentenceRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    writer.write_record(["date", "source_type", "section", "speaker", "text", "origin"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a sentence table written by [`write_sentences`].
pub fn read_sentences(path: &Path) -> Result<Vec<SentenceRecord>> {
    if !path.exists() {
        return Err(FedToneError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize::<SentenceRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    info!("Loaded {} sentences from {}", records.len(), path.display());
    Ok(records)
}

/// Merges sentence tables into one corpus ordered by date.
///
/// Missing tables are skipped with a warning. Undated sentences and
/// sentences of fewer than `min_words` words are dropped. Sentences sharing
/// a date keep their table order.
pub fn merge_corpora(paths: &[PathBuf], min_words: usize) -> Result<Vec<SentenceRecord>> {
    let mut corpus = Vec::new();
    for path in paths {
        if !path.exists() {
            warn!("Sentence table {} not found; skipping", path.display());
            continue;
        }
        corpus.extend(read_sentences(path)?);
    }

    let loaded = corpus.len();
    corpus.retain(|record| record.date.is_known() && word_count(&record.text) >= min_words);
    corpus.sort_by_key(|record| record.date.first_day());

    info!("Merged {} of {} sentences", corpus.len(), loaded);
    Ok(corpus)
}

#[derive(Debug, Deserialize)]
struct PredictionRow {
    date: String,
    #[serde(default)]
    source_type: Option<String>,
    #[serde(alias = "raw_label")]
    label: String,
    #[serde(default, alias = "confidence")]
    score: Option<f64>,
}

/// Reads model predictions and normalizes their labels with `table`.
///
/// Required columns are `date` and `label` (or `raw_label`); `source_type`
/// and `score` (or `confidence`) are optional. Dates are normalized to
/// `YYYY-MM-DD` where possible.
pub fn read_predictions(path: &Path, table: &LabelTable) -> Result<Vec<ScoredSentence>> {
    if !path.exists() {
        return Err(FedToneError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut sentences = Vec::new();
    for result in reader.deserialize::<PredictionRow>() {
        let row = result?;
        sentences.push(ScoredSentence {
            period: DocumentDate::parse(&row.date).to_string(),
            source: row.source_type.filter(|s| !s.trim().is_empty()),
            sentiment: table.classify(&row.label),
            score: row.score,
        });
    }

    info!("Loaded {} predictions from {}", sentences.len(), path.display());
    Ok(sentences)
}

/// Writes an index table; the period key goes in the `date` column.
pub fn write_indices(path: &Path, rows: &[PeriodIndex]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "date",
        "source",
        "net_sentiment_count",
        "net_sentiment_score",
        "hawkish_count",
        "dovish_count",
        "neutral_count",
        "total",
    ])?;
    for row in rows {
        writer.write_record([
            row.period.clone(),
            row.source.clone().unwrap_or_default(),
            format!("{:.6}", row.net_sentiment_count),
            format!("{:.6}", row.net_sentiment_score),
            row.hawkish_count.to_string(),
            row.dovish_count.to_string(),
            row.neutral_count.to_string(),
            row.total.to_string(),
        ])?;
    }
    writer.flush()?;

    info!("Wrote {} index rows to {}", rows.len(), path.display());
    Ok(())
}
