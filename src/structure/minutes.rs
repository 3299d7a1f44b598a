//! Section extraction for FOMC minutes.
//!
//! Minutes have no markup once extracted, so sections are recovered from
//! their header phrasing. Each canonical section carries a priority-ordered
//! alias list; the first alias found anywhere in the document locates the
//! section. Content runs from the end of the header to the start of the next
//! located section, or to the end of the document.

use crate::error::Result;
use crate::rules::{RuleSet, SectionRule};
use log::debug;
use regex::{Regex, RegexBuilder};

/// A located minutes section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Canonical section name.
    pub name: String,
    /// Byte offset of the header.
    pub start: usize,
    /// Byte length of the matched header.
    pub header_len: usize,
    /// Byte offset where the content ends (exclusive).
    pub end: usize,
    /// Trimmed content, header excluded.
    pub text: String,
}

#[derive(Debug, Clone)]
struct CompiledSection {
    name: String,
    aliases: Vec<Regex>,
}

/// Locates canonical sections in minutes text.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    sections: Vec<CompiledSection>,
}

impl SectionExtractor {
    /// Compiles section aliases.
    ///
    /// Aliases match case-insensitively and tolerate any whitespace run
    /// between their words. Empty aliases are ignored.
    pub fn new(rules: &[SectionRule]) -> Result<Self> {
        let sections = rules
            .iter()
            .map(|rule| {
                let aliases = rule
                    .aliases
                    .iter()
                    .filter_map(|alias| alias_pattern(alias))
                    .map(|pattern| RegexBuilder::new(&pattern).case_insensitive(true).build())
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(CompiledSection {
                    name: rule.name.clone(),
                    aliases,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { sections })
    }

    pub fn from_rules(rules: &RuleSet) -> Result<Self> {
        Self::new(&rules.minutes_sections)
    }

    /// Extracts the sections present in `text`, ordered by position.
    ///
    /// Returns an empty list when no header is found; such a document is
    /// not structurally usable.
    pub fn extract_sections(&self, text: &str) -> Vec<Section> {
        let mut found: Vec<(usize, usize, &str)> = self
            .sections
            .iter()
            .filter_map(|section| {
                section
                    .aliases
                    .iter()
                    .find_map(|alias| alias.find(text))
                    .map(|m| (m.start(), m.end(), section.name.as_str()))
            })
            .collect();

        found.sort_by_key(|&(start, _, _)| start);
        debug!("Located {} of {} minutes sections", found.len(), self.sections.len());

        found
            .iter()
            .enumerate()
            .map(|(i, &(start, header_end, name))| {
                let end = found.get(i + 1).map_or(text.len(), |&(next, _, _)| next);
                let content_start = header_end.min(end);
                Section {
                    name: name.to_string(),
                    start,
                    header_len: header_end - start,
                    end,
                    text: text[content_start..end].trim().to_string(),
                }
            })
            .collect()
    }
}

/// Builds a whitespace-tolerant pattern from an alias; `None` if it is blank.
fn alias_pattern(alias: &str) -> Option<String> {
    let words: Vec<String> = alias.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(r"\s+"))
    }
}
