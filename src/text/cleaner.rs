//! Layout-artifact removal for extracted PDF and HTML text.

use crate::error::Result;
use crate::rules::RuleSet;
use regex::{RegexSet, RegexSetBuilder};
use unicode_normalization::UnicodeNormalization;

/// Drops page headers, footers, date lines and citation lines.
///
/// Text is processed line by line: blank and page-number lines are dropped,
/// surviving lines are NFKC-normalized, and lines matching any layout
/// pattern are removed. The rest is joined with single spaces.
#[derive(Debug, Clone)]
pub struct NoiseCleaner {
    patterns: RegexSet,
}

impl NoiseCleaner {
    /// Compiles the layout patterns (case-insensitive).
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = RegexSetBuilder::new(patterns)
            .case_insensitive(true)
            .build()?;
        Ok(Self { patterns })
    }

    pub fn from_rules(rules: &RuleSet) -> Result<Self> {
        Self::new(&rules.layout_patterns)
    }

    /// Removes layout lines and flattens the text onto one line.
    pub fn clean(&self, text: &str) -> String {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.chars().all(|c| c.is_ascii_digit()))
            .map(|line| line.nfkc().collect::<String>())
            .filter(|line| !self.is_layout_line(line))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns true if `line` matches a layout pattern.
    pub fn is_layout_line(&self, line: &str) -> bool {
        self.patterns.is_match(line.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> NoiseCleaner {
        NoiseCleaner::from_rules(&RuleSet::default()).unwrap()
    }

    #[test]
    fn test_drops_page_artifacts() {
        let text = "Page 3 of 27\nInflation has eased somewhat.\n14\n\nFINAL\nThe labor market remains tight.";
        assert_eq!(
            cleaner().clean(text),
            "Inflation has eased somewhat. The labor market remains tight."
        );
    }

    #[test]
    fn test_drops_running_headers_and_date_lines() {
        let text = "Chair Powell's Press Conference\nMarch 22, 2023\nTranscript of Chair Powell's Press Conference\nWe raised rates today.";
        assert_eq!(cleaner().clean(text), "We raised rates today.");
    }

    #[test]
    fn test_typographic_apostrophe_header() {
        assert!(cleaner().is_layout_line("CHAIR POWELL’S PRESS CONFERENCE"));
    }

    #[test]
    fn test_drops_citation_lines() {
        let text = "Demand has moderated.\n1. Bernanke, Ben S. (2004). \"Gradualism.\"\nReturn to text";
        assert_eq!(cleaner().clean(text), "Demand has moderated.");
    }

    #[test]
    fn test_date_inside_sentence_is_kept() {
        let text = "On March 22, 2023 the Committee raised rates.";
        assert_eq!(cleaner().clean(text), text);
    }

    #[test]
    fn test_nfkc_normalization() {
        assert_eq!(cleaner().clean("ﬁnancial conditions tightened"), "financial conditions tightened");
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(NoiseCleaner::new(&["(unclosed".to_string()]).is_err());
    }
}
