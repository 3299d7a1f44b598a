//! End-to-end structuring: documents in, sentence records out.

use crate::config::Config;
use crate::document::{Document, DocumentKind, SentenceRecord, SourceType};
use crate::error::Result;
use crate::rules::RuleSet;
use crate::structure::{Passage, SectionExtractor, SpeechFilter, TranscriptStructurer};
use crate::text::{ContentPreprocessor, NoiseCleaner, NoiseFilter, SentenceSegmenter};
use log::{debug, warn};
use rayon::prelude::*;

/// Compiled structuring pipeline.
///
/// Holds every compiled rule table; it is immutable after construction and
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    cleaner: NoiseCleaner,
    sections: SectionExtractor,
    transcripts: TranscriptStructurer,
    speeches: SpeechFilter,
    preprocessor: ContentPreprocessor,
    segmenter: SentenceSegmenter,
    minutes_exclusions: Vec<String>,
}

impl Pipeline {
    /// Compiles a pipeline from thresholds and rule tables.
    pub fn new(config: Config, rules: &RuleSet) -> Result<Self> {
        Ok(Self {
            cleaner: NoiseCleaner::from_rules(rules)?,
            sections: SectionExtractor::from_rules(rules)?,
            transcripts: TranscriptStructurer::new(config.transcript, rules)?,
            speeches: SpeechFilter::from_rules(rules, config.speech.require_title_keyword),
            preprocessor: ContentPreprocessor::new(config.preprocess),
            segmenter: SentenceSegmenter::new(config.segmenter, NoiseFilter::from_rules(rules)),
            minutes_exclusions: rules
                .minutes_exclusions
                .iter()
                .map(|phrase| phrase.trim().to_lowercase())
                .filter(|phrase| !phrase.is_empty())
                .collect(),
        })
    }

    /// Pipeline with default configuration and built-in rules.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Config::default(), &RuleSet::default())
    }

    /// Splits a document into labeled passages.
    ///
    /// An unusable document (minutes without a known section, a filtered
    /// speech) yields no passages.
    pub fn structure(&self, doc: &Document) -> Vec<Passage> {
        match doc.kind {
            DocumentKind::Speech => {
                if !self.speeches.accepts(doc.title.as_deref()) {
                    debug!("Skipping speech {}: title has no policy keyword", doc.id);
                    return Vec::new();
                }
                let text = self.cleaner.clean(&doc.text);
                if text.is_empty() {
                    return Vec::new();
                }
                vec![self.speeches.passage(text)]
            }
            DocumentKind::Minutes => {
                let text = self.cleaner.clean(&doc.text);
                let sections = self.sections.extract_sections(&text);
                if sections.is_empty() {
                    warn!("No minutes sections found in {}; skipping", doc.id);
                }
                sections
                    .into_iter()
                    .filter(|section| !section.text.is_empty())
                    .map(|section| Passage::new(SourceType::Minutes, section.name, section.text))
                    .collect()
            }
            DocumentKind::PressConference => {
                let text = self.cleaner.clean(&doc.text);
                self.transcripts.press_conference(&text)
            }
            DocumentKind::ConferenceCall => {
                let text = self.cleaner.clean(&doc.text);
                self.transcripts.conference_call(&text)
            }
        }
    }

    /// Preprocesses and segments one passage into sentences.
    ///
    /// Administrative minutes sentences and speech footnote sentences are
    /// dropped.
    pub fn sentences(&self, passage: &Passage) -> Vec<String> {
        self.preprocessor
            .preprocess(&passage.text)
            .iter()
            .flat_map(|segment| self.segmenter.segment(segment))
            .filter(|sentence| match passage.source_type {
                SourceType::Minutes => !self.is_administrative(sentence),
                SourceType::Speech => !self.speeches.is_reference_segment(sentence),
                _ => true,
            })
            .collect()
    }

    /// Runs one document through the whole pipeline.
    pub fn process(&self, doc: &Document) -> Vec<SentenceRecord> {
        let records: Vec<SentenceRecord> = self
            .structure(doc)
            .iter()
            .flat_map(|passage| {
                self.sentences(passage).into_iter().map(move |text| SentenceRecord {
                    date: doc.date,
                    source_type: passage.source_type,
                    section: passage.section.clone(),
                    speaker: passage.speaker.clone(),
                    text,
                    origin: doc.id.clone(),
                })
            })
            .collect();

        debug!("{} ({}): {} sentences", doc.id, doc.kind, records.len());
        records
    }

    /// Processes documents in parallel; records keep input order.
    pub fn process_batch(&self, docs: &[Document]) -> Vec<SentenceRecord> {
        docs.par_iter()
            .map(|doc| self.process(doc))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    fn is_administrative(&self, sentence: &str) -> bool {
        let lowered = sentence.to_lowercase();
        self.minutes_exclusions
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
    }
}
