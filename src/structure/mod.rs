//! Document structuring.
//!
//! Each document kind has its own path from cleaned text to labeled
//! [`Passage`]s:
//!
//! - [`minutes`] - canonical sections located by header aliases;
//! - [`transcript`] - speaker turns of press conferences and conference calls;
//! - [`speech`] - title filtering for the speech corpus.

pub mod minutes;
pub mod speech;
pub mod transcript;

pub use minutes::{Section, SectionExtractor};
pub use speech::SpeechFilter;
pub use transcript::{SpeakerLabel, SpeakerTurn, TranscriptStructurer};

use crate::document::SourceType;

/// A labeled span of a document, ready for preprocessing and segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    /// Record origin.
    pub source_type: SourceType,
    /// Section or part label.
    pub section: String,
    /// Speaker, when it is kept on the records.
    pub speaker: Option<String>,
    /// Passage content.
    pub text: String,
}

impl Passage {
    /// Creates a passage without a speaker.
    pub fn new(source_type: SourceType, section: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_type,
            section: section.into(),
            speaker: None,
            text: text.into(),
        }
    }

    /// Attaches a speaker.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }
}
