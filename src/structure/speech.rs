//! Speech corpus filters.

use super::Passage;
use crate::document::SourceType;
use crate::rules::RuleSet;
use once_cell::sync::Lazy;
use regex::Regex;

const SPEECH: &str = "Speech";
const RETURN_TO_TEXT: &str = "return to text";

// "1. Bernanke, Ben S. (2004) ..."
static CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+[A-Z].*\(\d{4}\)").unwrap());

/// Decides which speeches and speech segments enter the corpus.
#[derive(Debug, Clone)]
pub struct SpeechFilter {
    keywords: Vec<String>,
    require_title_keyword: bool,
}

impl SpeechFilter {
    /// Creates a filter over lowercase title keywords.
    pub fn new(keywords: &[String], require_title_keyword: bool) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            require_title_keyword,
        }
    }

    pub fn from_rules(rules: &RuleSet, require_title_keyword: bool) -> Self {
        Self::new(&rules.speech_keywords, require_title_keyword)
    }

    /// Returns true if the title mentions a policy keyword.
    pub fn title_matches(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.keywords.iter().any(|keyword| title.contains(keyword.as_str()))
    }

    /// Returns true if a speech with this title should be processed.
    ///
    /// Without title filtering every speech is accepted. With it, a speech
    /// with no title is rejected.
    pub fn accepts(&self, title: Option<&str>) -> bool {
        !self.require_title_keyword || title.is_some_and(|t| self.title_matches(t))
    }

    /// Returns true if a speech segment is a footnote or reference entry.
    pub fn is_reference_segment(&self, text: &str) -> bool {
        let text = text.trim();
        text.to_lowercase().contains(RETURN_TO_TEXT) || CITATION.is_match(text)
    }

    /// Wraps cleaned speech text in a passage.
    pub fn passage(&self, text: impl Into<String>) -> Passage {
        Passage::new(SourceType::Speech, SPEECH, text)
    }
}
