//! # fedtone - Federal Reserve communication structuring
//!
//! fedtone turns Federal Reserve communications (speeches, FOMC minutes,
//! press-conference and conference-call transcripts) into a labeled
//! sentence corpus, and turns classifier output on that corpus back into
//! hawkish/dovish sentiment indices.
//!
//! ## Overview
//!
//! Structuring runs in stages:
//!
//! 1. **Cleaning** strips page furniture left over from PDF and HTML
//!    extraction ([`text::NoiseCleaner`]).
//! 2. **Structuring** recovers minutes sections or transcript speaker turns
//!    ([`structure`]).
//! 3. **Chunking and segmentation** produce length-controlled sentences with
//!    procedural noise removed ([`text::ContentPreprocessor`],
//!    [`text::SentenceSegmenter`]).
//!
//! Model inference happens elsewhere. Its raw labels are mapped back onto a
//! single three-class stance taxonomy, per model family, and aggregated into
//! count-based and score-weighted indices ([`sentiment`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use fedtone::{Document, DocumentDate, DocumentKind, Pipeline};
//!
//! let pipeline = Pipeline::with_defaults()?;
//! let doc = Document::new(
//!     "FOMCpresconf20230322.txt",
//!     DocumentDate::from_reference("FOMCpresconf20230322.txt"),
//!     DocumentKind::PressConference,
//!     "CHAIR POWELL. Good afternoon. Inflation remains well above our longer-run goal of 2 percent.",
//! );
//!
//! let records = pipeline.process(&doc);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].date.to_string(), "2023-03-22");
//! # Ok::<(), fedtone::FedToneError>(())
//! ```
//!
//! ## Scoring
//!
//! ```rust
//! use fedtone::sentiment::{aggregate, normalize, ModelFamily};
//!
//! let labels = [("LABEL_2", 0.9), ("LABEL_0", 0.6), ("LABEL_1", 0.8)];
//! let totals = aggregate(
//!     labels
//!         .iter()
//!         .map(|&(label, score)| (normalize(label, ModelFamily::Roberta3Class), Some(score))),
//! );
//! assert_eq!(totals.net_sentiment_count, 0.0);
//! assert!((totals.net_sentiment_score - 0.15).abs() < 1e-12);
//! ```
//!
//! ## Rule tables
//!
//! Phrase lists, layout patterns, section aliases, transition markers and
//! label tables live in a [`RuleSet`]. The built-in defaults can be dumped
//! to JSON, edited and loaded back with [`RuleSet::from_file`].

#![warn(clippy::all)]

pub mod config;
pub mod date;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod rules;
pub mod sentiment;
pub mod storage;
pub mod structure;
pub mod text;

// Re-export commonly used types
pub use config::{Config, PreprocessConfig, SegmenterConfig, SpeechConfig, TranscriptConfig};
pub use date::DocumentDate;
pub use document::{Document, DocumentKind, SentenceRecord, SourceType};
pub use error::{FedToneError, Result};
pub use pipeline::Pipeline;
pub use rules::{LabelTables, RuleSet, SectionRule};
pub use sentiment::{
    aggregate, build_indices, normalize, GroupKey, IndexTotals, ModelFamily, PeriodIndex,
    ScoredSentence, Sentiment, SentimentPrediction,
};
pub use structure::{Passage, Section, SectionExtractor, SpeakerLabel, SpeakerTurn, TranscriptStructurer};
pub use text::{ContentPreprocessor, NoiseCleaner, NoiseFilter, SentenceSegmenter};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
