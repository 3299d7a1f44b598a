//! Speaker-turn structuring of press-conference and conference-call
//! transcripts.
//!
//! Press conferences are split once into an opening statement and a Q&A
//! part at the earliest transition marker, and only the target speaker's
//! turns are kept. Conference calls have no such split; every genuine
//! speaker is kept and named on the records.

use super::Passage;
use crate::config::TranscriptConfig;
use crate::document::SourceType;
use crate::error::Result;
use crate::rules::RuleSet;
use crate::text::{char_count, NoiseFilter};
use log::debug;
use regex::{Regex, RegexBuilder};

const OPENING_STATEMENT: &str = "Opening Statement";
const QA: &str = "Q&A";
const FULL_TEXT: &str = "Full Text";
const CONFERENCE_CALL: &str = "Conference Call";

/// Who a turn is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakerLabel {
    /// Upper-cased label found in the text.
    Named(String),
    /// No speaker label was found; the turn is the whole span.
    WholeText,
}

/// A (speaker, content) pair in transcript order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerTurn {
    pub speaker: SpeakerLabel,
    pub content: String,
}

/// Turns transcripts into labeled passages.
#[derive(Debug, Clone)]
pub struct TranscriptStructurer {
    config: TranscriptConfig,
    speaker: Regex,
    qa_markers: Vec<Regex>,
    target: String,
    preamble_labels: Vec<String>,
    false_labels: Vec<String>,
    boilerplate_marker: String,
    noise: NoiseFilter,
}

impl TranscriptStructurer {
    /// Compiles the speaker pattern and transition markers of `rules`.
    pub fn new(config: TranscriptConfig, rules: &RuleSet) -> Result<Self> {
        let speaker = Regex::new(&rules.speaker_pattern)?;
        let qa_markers = rules
            .qa_markers
            .iter()
            .filter(|marker| !marker.trim().is_empty())
            .map(|marker| {
                RegexBuilder::new(&regex::escape(marker))
                    .case_insensitive(true)
                    .build()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            speaker,
            qa_markers,
            target: rules.target_speaker.trim().to_uppercase(),
            preamble_labels: upper(&rules.preamble_labels),
            false_labels: upper(&rules.false_speaker_labels),
            boilerplate_marker: rules.boilerplate_marker.clone(),
            noise: NoiseFilter::from_rules(rules),
        })
    }

    /// Splits `text` into speaker turns.
    ///
    /// Text before the first label is not attributed to anyone and is
    /// dropped. When no label is found the whole span becomes a single
    /// [`SpeakerLabel::WholeText`] turn.
    pub fn split_turns(&self, text: &str) -> Vec<SpeakerTurn> {
        let mut labels: Vec<(usize, usize, String)> = Vec::new();
        for caps in self.speaker.captures_iter(text) {
            let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = label.as_str().trim().to_uppercase();
            if !name.chars().any(char::is_alphabetic) {
                continue;
            }
            labels.push((whole.start(), whole.end(), name));
        }

        if labels.is_empty() {
            let content = text.trim();
            if content.is_empty() {
                return Vec::new();
            }
            return vec![SpeakerTurn {
                speaker: SpeakerLabel::WholeText,
                content: content.to_string(),
            }];
        }

        labels
            .iter()
            .enumerate()
            .map(|(i, (_, content_start, name))| {
                let end = labels.get(i + 1).map_or(text.len(), |(next, _, _)| *next);
                SpeakerTurn {
                    speaker: SpeakerLabel::Named(name.clone()),
                    content: text[*content_start..end].trim().to_string(),
                }
            })
            .collect()
    }

    /// Byte offset of the earliest transition marker, if any.
    ///
    /// Every marker is searched; the lowest position wins regardless of the
    /// marker's place in the list.
    pub fn find_qa_split(&self, text: &str) -> Option<usize> {
        let earliest = self
            .qa_markers
            .iter()
            .filter_map(|marker| marker.find(text).map(|m| (m.start(), marker.as_str())))
            .min_by_key(|&(start, _)| start);

        if let Some((start, marker)) = earliest {
            debug!("Q&A split at byte {} (marker /{}/)", start, marker);
        }
        earliest.map(|(start, _)| start)
    }

    /// Returns true if `label` names the target speaker or a preamble.
    pub fn is_target(&self, label: &str) -> bool {
        let label = label.to_uppercase();
        (!self.target.is_empty() && label.contains(&self.target))
            || self.preamble_labels.iter().any(|preamble| label.contains(preamble.as_str()))
    }

    /// Cuts trailing boilerplate that starts near the beginning of a turn.
    pub fn strip_boilerplate<'a>(&self, content: &'a str) -> &'a str {
        if self.boilerplate_marker.is_empty() {
            return content;
        }
        match content.find(&self.boilerplate_marker) {
            Some(pos)
                if char_count(&content[..pos + self.boilerplate_marker.len()])
                    <= self.config.boilerplate_window =>
            {
                &content[..pos]
            }
            _ => content,
        }
    }

    /// Structures a press-conference transcript.
    ///
    /// Text before the earliest marker is the opening statement and the rest
    /// is Q&A; with no marker the whole text is a single full-text part.
    pub fn press_conference(&self, text: &str) -> Vec<Passage> {
        match self.find_qa_split(text) {
            Some(split) => {
                let mut passages = self.target_turns(
                    &text[..split],
                    SourceType::PressConfOpeningStatement,
                    OPENING_STATEMENT,
                    true,
                );
                passages.extend(self.target_turns(&text[split..], SourceType::PressConfQa, QA, false));
                passages
            }
            None => {
                debug!("No Q&A marker found; treating transcript as full text");
                self.target_turns(text, SourceType::PressConfFullText, FULL_TEXT, true)
            }
        }
    }

    /// Structures a conference-call transcript, keeping every genuine speaker.
    pub fn conference_call(&self, text: &str) -> Vec<Passage> {
        self.split_turns(text)
            .into_iter()
            .filter_map(|turn| {
                let SpeakerLabel::Named(speaker) = turn.speaker else {
                    return None;
                };
                if self.false_labels.iter().any(|label| speaker.contains(label.as_str())) {
                    return None;
                }
                if self.noise.is_noise(&turn.content) {
                    return None;
                }
                Some(
                    Passage::new(SourceType::PressConfConfCall, CONFERENCE_CALL, turn.content)
                        .with_speaker(speaker),
                )
            })
            .collect()
    }

    fn target_turns(
        &self,
        span: &str,
        source_type: SourceType,
        section: &str,
        keep_whole_text: bool,
    ) -> Vec<Passage> {
        self.split_turns(span)
            .into_iter()
            .filter_map(|turn| {
                let content = match &turn.speaker {
                    SpeakerLabel::Named(label) if self.is_target(label) => {
                        self.strip_boilerplate(&turn.content)
                    }
                    SpeakerLabel::Named(_) => return None,
                    SpeakerLabel::WholeText if keep_whole_text => turn.content.as_str(),
                    SpeakerLabel::WholeText => return None,
                };
                let content = content.trim();
                if self.noise.is_noise(content) || char_count(content) < self.config.min_turn_chars {
                    return None;
                }
                Some(Passage::new(source_type, section, content))
            })
            .collect()
    }
}

fn upper(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim().to_uppercase())
        .filter(|item| !item.is_empty())
        .collect()
}
