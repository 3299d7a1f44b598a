//! Source documents and the sentence records produced from them.

use crate::date::DocumentDate;
use crate::error::FedToneError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a source document, which selects its structuring path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DocumentKind {
    /// Speech by a Board member or Reserve Bank president.
    Speech,
    /// FOMC meeting minutes.
    Minutes,
    /// Post-meeting press conference transcript.
    PressConference,
    /// FOMC conference call transcript.
    ConferenceCall,
}

impl DocumentKind {
    /// Returns the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Speech => "speech",
            DocumentKind::Minutes => "minutes",
            DocumentKind::PressConference => "press-conference",
            DocumentKind::ConferenceCall => "conference-call",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = FedToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "speech" | "speeches" => Ok(DocumentKind::Speech),
            "minutes" => Ok(DocumentKind::Minutes),
            "pressconference" | "pressconf" | "presconf" => Ok(DocumentKind::PressConference),
            "conferencecall" | "confcall" => Ok(DocumentKind::ConferenceCall),
            _ => Err(FedToneError::InvalidInput(format!("unknown document kind '{}'", s))),
        }
    }
}

impl TryFrom<String> for DocumentKind {
    type Error = FedToneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentKind> for String {
    fn from(kind: DocumentKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Origin of a sentence record.
///
/// Press conferences yield opening-statement, Q&A or full-text records;
/// conference calls yield conference-call records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceType {
    Speech,
    Minutes,
    PressConfOpeningStatement,
    PressConfQa,
    PressConfConfCall,
    PressConfFullText,
}

impl SourceType {
    /// All source types, in table order.
    pub const ALL: [SourceType; 6] = [
        SourceType::Speech,
        SourceType::Minutes,
        SourceType::PressConfOpeningStatement,
        SourceType::PressConfQa,
        SourceType::PressConfConfCall,
        SourceType::PressConfFullText,
    ];

    /// Label written to sentence tables.
    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Speech => "Speech",
            SourceType::Minutes => "Minutes",
            SourceType::PressConfOpeningStatement => "Opening Statement",
            SourceType::PressConfQa => "Q&A",
            SourceType::PressConfConfCall => "Conference Call",
            SourceType::PressConfFullText => "Full Text",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SourceType {
    type Err = FedToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SourceType::ALL
            .into_iter()
            .find(|source| source.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| FedToneError::InvalidInput(format!("unknown source type '{}'", s)))
    }
}

impl TryFrom<String> for SourceType {
    type Error = FedToneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceType> for String {
    fn from(source: SourceType) -> Self {
        source.label().to_string()
    }
}

/// A raw source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Origin reference (URL, file name or row id).
    pub id: String,
    pub date: DocumentDate,
    pub kind: DocumentKind,
    /// Extracted plain text.
    pub text: String,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl Document {
    /// Creates a document with no title or URL.
    pub fn new(id: impl Into<String>, date: DocumentDate, kind: DocumentKind, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date,
            kind,
            text: text.into(),
            title: None,
            url: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// One row of the labeled sentence corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub date: DocumentDate,
    pub source_type: SourceType,
    /// Canonical section name (minutes) or part label (transcripts).
    pub section: String,
    /// Speaker label; kept only for conference calls.
    pub speaker: Option<String>,
    pub text: String,
    /// Id of the document the sentence came from.
    pub origin: String,
}
