//! Versionable rule tables.
//!
//! Source documents have no formal grammar, so structure is recovered with
//! phrase lists and patterns. They are data, not code: a [`RuleSet`] ships
//! with built-in defaults tuned to Federal Reserve documents and can be
//! loaded from (or dumped to) JSON, so new phrasings, sections and label
//! tables are additive edits.

use crate::error::Result;
use crate::sentiment::{LabelKeyword, LabelTable, ModelFamily, Sentiment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Canonical section name with its header aliases, highest priority first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRule {
    /// Canonical section name.
    pub name: String,
    /// Header phrasings, including legacy and typographic-quote variants.
    pub aliases: Vec<String>,
}

impl SectionRule {
    fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: strings(aliases),
        }
    }
}

/// Label tables per model family.
///
/// When loaded from JSON, a table given with only `codes` or only
/// `keywords` takes the other half from the family's built-in table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LabelTablesFile")]
pub struct LabelTables {
    /// FinBERT-FOMC table.
    pub finbert_fomc: LabelTable,
    /// Three-class RoBERTa table.
    pub roberta: LabelTable,
}

impl LabelTables {
    /// Returns the table of `family`.
    pub fn table(&self, family: ModelFamily) -> &LabelTable {
        match family {
            ModelFamily::FinBertFomc => &self.finbert_fomc,
            ModelFamily::Roberta3Class => &self.roberta,
        }
    }
}

impl Default for LabelTables {
    fn default() -> Self {
        Self {
            finbert_fomc: ModelFamily::FinBertFomc.table().clone(),
            roberta: ModelFamily::Roberta3Class.table().clone(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LabelTablesFile {
    finbert_fomc: PartialLabelTable,
    roberta: PartialLabelTable,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PartialLabelTable {
    codes: Option<BTreeMap<String, Sentiment>>,
    keywords: Option<Vec<LabelKeyword>>,
}

impl PartialLabelTable {
    fn complete(self, family: ModelFamily) -> LabelTable {
        let builtin = family.table();
        LabelTable {
            codes: self.codes.unwrap_or_else(|| builtin.codes.clone()),
            keywords: self.keywords.unwrap_or_else(|| builtin.keywords.clone()),
        }
    }
}

impl From<LabelTablesFile> for LabelTables {
    fn from(file: LabelTablesFile) -> Self {
        Self {
            finbert_fomc: file.finbert_fomc.complete(ModelFamily::FinBertFomc),
            roberta: file.roberta.complete(ModelFamily::Roberta3Class),
        }
    }
}

/// All heuristic tables used by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Procedural transcript phrases treated as noise.
    pub noise_phrases: Vec<String>,

    /// Case-insensitive patterns of layout-artifact lines.
    pub layout_patterns: Vec<String>,

    /// Minutes sections, in any order.
    pub minutes_sections: Vec<SectionRule>,

    /// Administrative phrases; minutes sentences containing one are dropped.
    pub minutes_exclusions: Vec<String>,

    /// Phrases that open the Q&A part of a press conference.
    pub qa_markers: Vec<String>,

    /// Speaker label pattern; capture group 1 is the label.
    pub speaker_pattern: String,

    /// Surname identifying the target speaker of press conferences.
    pub target_speaker: String,

    /// Labels of transcript preambles attributed to the target speaker.
    pub preamble_labels: Vec<String>,

    /// Substrings marking a speaker label as a false positive.
    pub false_speaker_labels: Vec<String>,

    /// Marker of trailing transcript boilerplate inside a turn.
    pub boilerplate_marker: String,

    /// Speech titles must mention one of these when title filtering is on.
    pub speech_keywords: Vec<String>,

    /// Model-family label tables.
    pub labels: LabelTables,
}

impl RuleSet {
    /// Loads a rule set from a JSON file.
    ///
    /// Tables missing from the file keep their defaults, down to the two
    /// halves of each label table.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rules: Self = serde_json::from_str(&content)?;
        Ok(rules)
    }

    /// Writes the rule set as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            noise_phrases: strings(&[
                "thank you",
                "thanks",
                "you're on mute",
                "can you hear me",
                "[no response]",
                "(no response)",
                "hearing no objection",
                "so moved",
                "second",
                "all in favor",
                "aye",
                "return to text",
            ]),
            layout_patterns: strings(&[
                r"Page \d+ of \d+",
                r"^FINAL$",
                r"Chair(?:man)? Powell['’]?s? Press Conference",
                r"Transcript of .* Press Conference",
                r"^[A-Z][a-z]+ \d{1,2}, (?:19|20)\d{2}$",
                r"Return to text",
                r"^\d+\.\s+[A-Z].*\(\d{4}\)",
            ]),
            minutes_sections: vec![
                SectionRule::new(
                    "Developments in Financial Markets",
                    &["Developments in Financial Markets and Open Market Operations"],
                ),
                SectionRule::new("Inflation Analysis", &["Inflation Analysis and Forecasting"]),
                SectionRule::new(
                    "Staff Review of Economic Situation",
                    &["Staff Review of the Economic Situation", "The information reviewed for the"],
                ),
                SectionRule::new(
                    "Staff Review of Financial Situation",
                    &["Staff Review of the Financial Situation"],
                ),
                SectionRule::new("Staff Economic Outlook", &["Staff Economic Outlook"]),
                SectionRule::new(
                    "Participants' Views",
                    &[
                        "Participants' Views on Current Conditions and the Economic Outlook",
                        "Participants' Views on Current Conditions",
                        "Participants’ Views on Current Conditions",
                        "Discussion of Monetary Policy",
                    ],
                ),
                SectionRule::new("Committee Policy Action", &["Committee Policy Action"]),
            ],
            minutes_exclusions: strings(&[
                "meeting adjourned",
                "vote against",
                "voting for this action",
                "voting against this action",
            ]),
            qa_markers: strings(&[
                "I will now take your questions",
                "I am happy to take your questions",
                "I'm happy to take your questions",
                "happy to take your questions",
                "happy to respond to your questions",
                "We will now take questions",
                "Q & A",
                "MICHELLE SMITH. Thank you",
                "MICHELLE SMITH. We will now go to",
                "MICHELLE SMITH. We'll go to",
                "MICHELLE SMITH. Let's go to",
                "MICHELLE SMITH. Our first question",
                "I'll be happy to take your questions",
                "I will be happy to take your questions",
                "we'll be happy to take your questions",
                "MICHELLE SMITH.",
                "look forward to your questions",
                "I look forward to your questions",
                "I look forward to taking your questions",
                "I would be happy to take your questions",
            ]),
            speaker_pattern: r"(?:^|\s)([A-Z\s.'’\-]{3,}|Transcript of the Federal Open Market Committee Conference Call)\s*[.:]"
                .to_string(),
            target_speaker: "POWELL".to_string(),
            preamble_labels: strings(&["TRANSCRIPT OF THE FEDERAL"]),
            false_speaker_labels: strings(&["TRANSCRIPT OF", "PAGE"]),
            boilerplate_marker: "Transcript of".to_string(),
            speech_keywords: strings(&[
                "inflation expectation",
                "interest rate",
                "bank rate",
                "fund rate",
                "price",
                "economic activity",
                "inflation",
                "employment",
                "unemployment",
                "growth",
                "exchange rate",
                "productivity",
                "deficit",
                "demand",
                "job",
                "market",
                "monetary policy",
            ]),
            labels: LabelTables::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;
    use std::io::Write;

    #[test]
    fn test_default_tables_are_populated() {
        let rules = RuleSet::default();
        assert_eq!(rules.noise_phrases.len(), 12);
        assert_eq!(rules.minutes_sections.len(), 7);
        assert_eq!(rules.qa_markers.len(), 20);
        assert_eq!(rules.target_speaker, "POWELL");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");

        let rules = RuleSet::default();
        rules.save(&path).unwrap();
        let loaded = RuleSet::from_file(&path).unwrap();

        assert_eq!(loaded, rules);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"target_speaker": "YELLEN", "labels": {{"roberta": {{"codes": {{"0": "Hawkish"}}}}}}}}"#
        )
        .unwrap();

        let rules = RuleSet::from_file(file.path()).unwrap();
        assert_eq!(rules.target_speaker, "YELLEN");
        assert_eq!(rules.qa_markers.len(), 20);
        assert_eq!(rules.labels.table(ModelFamily::Roberta3Class).classify("LABEL_0"), Sentiment::Hawkish);
        assert_eq!(rules.labels.table(ModelFamily::FinBertFomc).classify("LABEL_1"), Sentiment::Hawkish);
    }

    #[test]
    fn test_codes_only_table_keeps_builtin_keywords() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"labels": {{"roberta": {{"codes": {{"0": "Hawkish"}}}}}}}}"#).unwrap();

        let rules = RuleSet::from_file(file.path()).unwrap();
        let roberta = rules.labels.table(ModelFamily::Roberta3Class);
        assert_eq!(roberta.classify("LABEL_0"), Sentiment::Hawkish);
        assert_eq!(roberta.classify("LABEL_2"), Sentiment::Neutral);
        assert_eq!(roberta.classify("positive"), Sentiment::Hawkish);
        assert_eq!(roberta.classify("Negative"), Sentiment::Dovish);
    }

    #[test]
    fn test_explicit_empty_keywords_are_kept() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"labels": {{"finbert_fomc": {{"keywords": []}}}}}}"#).unwrap();

        let rules = RuleSet::from_file(file.path()).unwrap();
        let finbert = rules.labels.table(ModelFamily::FinBertFomc);
        assert_eq!(finbert.classify("hawkish"), Sentiment::Neutral);
        assert_eq!(finbert.classify("LABEL_2"), Sentiment::Dovish);
    }
}
