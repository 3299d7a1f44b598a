//! Integration tests for the fedtone structuring pipeline.

use fedtone::sentiment::LabelTable;
use fedtone::{
    build_indices, storage, Config, Document, DocumentDate, DocumentKind, GroupKey, ModelFamily,
    Pipeline, RuleSet, Sentiment, SentenceRecord, SourceType, TranscriptStructurer,
};
use std::fs;
use tempfile::tempdir;

const PRESS_CONFERENCE: &str = "CHAIR POWELL. Good afternoon. My colleagues and I remain squarely \
    focused on achieving our dual mandate goals of maximum employment and stable prices. \
    I will now take your questions. CHAIR POWELL. Inflation remains elevated and we are \
    committed to our mandate. MICHELLE SMITH. Thank you. Our first question comes from the \
    wire services.";

fn press_conference_doc(text: &str) -> Document {
    Document::new(
        "FOMCpresconf20230322.txt",
        DocumentDate::from_reference("FOMCpresconf20230322.txt"),
        DocumentKind::PressConference,
        text,
    )
}

fn by_source(records: &[SentenceRecord], source: SourceType) -> Vec<&SentenceRecord> {
    records.iter().filter(|r| r.source_type == source).collect()
}

#[test]
fn test_press_conference_end_to_end() {
    let pipeline = Pipeline::with_defaults().unwrap();
    let records = pipeline.process(&press_conference_doc(PRESS_CONFERENCE));

    let opening = by_source(&records, SourceType::PressConfOpeningStatement);
    assert_eq!(opening.len(), 1);
    assert!(opening[0].text.starts_with("My colleagues and I remain squarely focused"));
    assert_eq!(opening[0].section, "Opening Statement");

    let qa = by_source(&records, SourceType::PressConfQa);
    assert_eq!(qa.len(), 1);
    assert_eq!(qa[0].text, "Inflation remains elevated and we are committed to our mandate.");
    assert_eq!(qa[0].section, "Q&A");

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| !r.text.contains("Thank you")));
    assert!(records.iter().all(|r| !r.text.contains("first question")));
    assert!(records.iter().all(|r| r.speaker.is_none()));
    assert!(records.iter().all(|r| r.date.to_string() == "2023-03-22"));
}

#[test]
fn test_press_conference_with_page_furniture() {
    let text = "Chair Powell's Press Conference\n\
                FINAL\n\
                March 22, 2023\n\
                CHAIR POWELL. Good afternoon. Inflation remains well above our longer-run goal\n\
                of 2 percent.\n\
                Page 1 of 20\n\
                I am happy to take your questions.\n\
                CHAIR POWELL. We are prepared to do more if the data call for it.";
    let pipeline = Pipeline::with_defaults().unwrap();
    let records = pipeline.process(&press_conference_doc(text));

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].text,
        "Inflation remains well above our longer-run goal of 2 percent."
    );
    assert_eq!(records[0].source_type, SourceType::PressConfOpeningStatement);
    assert_eq!(records[1].source_type, SourceType::PressConfQa);
}

#[test]
fn test_earliest_marker_across_list() {
    let structurer =
        TranscriptStructurer::new(Default::default(), &RuleSet::default()).unwrap();
    let text = format!(
        "{}I will now take your questions.{}",
        "a".repeat(50),
        "b".repeat(50)
    );
    let text = format!("{}MICHELLE SMITH. Next.{}", &text[..120], &text[120..]);

    // "I will now take your questions" is first in the list and first in the
    // text; "MICHELLE SMITH." appears later in both.
    assert_eq!(structurer.find_qa_split(&text), Some(50));

    let reordered = format!("{}MICHELLE SMITH. Next.{}", "c".repeat(50), "I will now take your questions.");
    assert_eq!(structurer.find_qa_split(&reordered), Some(50));
}

#[test]
fn test_minutes_end_to_end() {
    let text = "Minutes of the Federal Open Market Committee\n\
                March 21-22, 2023\n\
                Developments in Financial Markets and Open Market Operations\n\
                The manager turned first to a review of developments in financial markets over the intermeeting period.\n\
                14\n\
                Participants' Views on Current Conditions and the Economic Outlook\n\
                Participants agreed that inflation remained well above the Committee's longer-run goal of 2 percent.\n\
                Voting against this action: None.\n\
                The meeting adjourned at 10:15 a.m. on March 22, 2023.";
    let doc = Document::new(
        "fomcminutes20230322.htm",
        DocumentDate::from_reference("fomcminutes20230322.htm"),
        DocumentKind::Minutes,
        text,
    );

    let records = Pipeline::with_defaults().unwrap().process(&doc);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].section, "Developments in Financial Markets");
    assert!(records[0].text.starts_with("The manager turned first"));
    assert_eq!(records[1].section, "Participants' Views");
    assert!(records[1].text.starts_with("Participants agreed"));
    assert!(records
        .iter()
        .all(|r| !r.text.contains("Open Market Operations") && !r.text.contains("Economic Outlook")));
}

#[test]
fn test_conference_call_preserves_speakers() {
    let text = "Transcript of the Federal Open Market Committee Conference Call on March 15, 2020. \
                CHAIR POWELL. Thank you. I propose that we lower the target range to zero today. \
                MR. WILLIAMS. I strongly support the proposal and the forward guidance language. \
                PAGE TWO. Second. \
                MS. MESTER. Thank you.";
    let doc = Document::new(
        "fomc20200315confcall.txt",
        DocumentDate::from_reference("fomc20200315confcall.txt"),
        DocumentKind::ConferenceCall,
        text,
    );

    let records = Pipeline::with_defaults().unwrap().process(&doc);
    let speakers: Vec<&str> = records.iter().filter_map(|r| r.speaker.as_deref()).collect();

    assert_eq!(speakers, vec!["CHAIR POWELL", "MR. WILLIAMS"]);
    assert!(records.iter().all(|r| r.source_type == SourceType::PressConfConfCall));
    assert_eq!(records[0].text, "I propose that we lower the target range to zero today.");
}

#[test]
fn test_segment_invariants_hold_across_pipeline() {
    let long = "Participants observed that supply chains had improved considerably over the past year, \
        that labor force participation among prime-age workers had risen noticeably since the spring, \
        that wage growth had moderated somewhat across most sectors, and that inflation expectations \
        remained well anchored over longer horizons.";
    let text = format!("CHAIR POWELL. Thanks. {} So moved. {}", long, long);
    let records = Pipeline::with_defaults().unwrap().process(&press_conference_doc(&text));

    assert!(!records.is_empty());
    for record in &records {
        let words = record.text.split_whitespace().count();
        assert!(words >= 5, "too few words: {:?}", record.text);
        assert!(record.text.chars().count() >= 30, "too short: {:?}", record.text);
        assert!(words <= 40, "not re-split: {:?}", record.text);
    }
}

#[test]
fn test_corpus_to_indices_round_trip() {
    let dir = tempdir().unwrap();
    let corpus_path = dir.path().join("sentences.csv");

    let pipeline = Pipeline::with_defaults().unwrap();
    let records = pipeline.process_batch(&[press_conference_doc(PRESS_CONFERENCE)]);
    storage::write_sentences(&corpus_path, &records).unwrap();

    let written = fs::read_to_string(&corpus_path).unwrap();
    assert!(written.starts_with("\"date\",\"source_type\""));
    assert_eq!(written.lines().count(), records.len() + 1);

    // Stand-in for external inference: attach labels to the corpus.
    let predictions_path = dir.path().join("predictions.csv");
    fs::write(
        &predictions_path,
        "date,source_type,text,label,score\n\
         2023-03-22,Opening Statement,a,LABEL_0,0.80\n\
         2023-03-22,Q&A,b,LABEL_1,0.95\n\
         2023-03-22,Q&A,c,LABEL_1,0.55\n\
         2023-01-31,Q&A,d,LABEL_2,0.70\n",
    )
    .unwrap();

    let table = ModelFamily::FinBertFomc.table();
    let sentences = storage::read_predictions(&predictions_path, table).unwrap();
    assert_eq!(sentences[0].sentiment, Sentiment::Neutral);
    assert_eq!(sentences[1].sentiment, Sentiment::Hawkish);
    assert_eq!(sentences[3].sentiment, Sentiment::Dovish);

    let rows = build_indices(&sentences, GroupKey::Period);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].period, "2023-01-31");
    assert_eq!(rows[0].net_sentiment_count, -1.0);
    assert_eq!(rows[1].hawkish_count, 2);
    assert!((rows[1].net_sentiment_count - 2.0 / 3.0).abs() < 1e-12);
    assert!((rows[1].net_sentiment_score - 0.75).abs() < 1e-12);

    let index_path = dir.path().join("index.csv");
    storage::write_indices(&index_path, &rows).unwrap();
    assert_eq!(fs::read_to_string(&index_path).unwrap().lines().count(), 3);
}

#[test]
fn test_families_map_same_code_differently() {
    let finbert = ModelFamily::FinBertFomc.table();
    let roberta = ModelFamily::Roberta3Class.table();
    assert_eq!(finbert.classify("LABEL_2"), Sentiment::Dovish);
    assert_eq!(roberta.classify("LABEL_2"), Sentiment::Hawkish);
    for table in [finbert, roberta] {
        assert_eq!(table.classify("Negative"), Sentiment::Dovish);
        assert_eq!(table.classify("positive"), Sentiment::Hawkish);
        assert_eq!(table.classify("??"), Sentiment::Neutral);
    }
}

#[test]
fn test_custom_rules_from_file() {
    let dir = tempdir().unwrap();
    let rules_path = dir.path().join("rules.json");

    let mut rules = RuleSet::default();
    rules.target_speaker = "YELLEN".to_string();
    rules.labels.roberta = LabelTable::default();
    rules.save(&rules_path).unwrap();

    let loaded = RuleSet::from_file(&rules_path).unwrap();
    assert_eq!(loaded.labels.roberta.classify("LABEL_2"), Sentiment::Neutral);

    let pipeline = Pipeline::new(Config::default(), &loaded).unwrap();
    let text = "CHAIR YELLEN. The Committee judged that the labor market continued to strengthen. \
                CHAIR POWELL. Inflation has moved up over the past several months.";
    let records = pipeline.process(&press_conference_doc(text));
    assert_eq!(records.len(), 1);
    assert!(records[0].text.starts_with("The Committee judged"));
}

#[test]
fn test_transcript_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("FOMCpresconf20230322.txt"), PRESS_CONFERENCE).unwrap();
    fs::write(
        dir.path().join("fomc20200315confcall.txt"),
        "MR. WILLIAMS. I strongly support the proposal and the forward guidance language.",
    )
    .unwrap();

    let documents = storage::read_transcripts(dir.path()).unwrap();
    let records = Pipeline::with_defaults().unwrap().process_batch(&documents);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].origin, "FOMCpresconf20230322.txt");
    assert_eq!(records[2].source_type, SourceType::PressConfConfCall);
    assert_eq!(records[2].date.to_string(), "2020-03-15");
}

#[test]
fn test_master_corpus_from_sentence_tables() {
    let dir = tempdir().unwrap();
    let pipeline = Pipeline::with_defaults().unwrap();

    let press_path = dir.path().join("press.csv");
    let press = pipeline.process(&press_conference_doc(PRESS_CONFERENCE));
    storage::write_sentences(&press_path, &press).unwrap();

    let speech_path = dir.path().join("speeches.csv");
    let speech = Document::new(
        "https://www.federalreserve.gov/newsevents/speech/powell20190604a.htm",
        DocumentDate::from_reference("powell20190604a.htm"),
        DocumentKind::Speech,
        "The economy is in a good place and we will act as appropriate to sustain the expansion.\n\
         1. See the Committee's statement on longer-run goals. Return to text",
    );
    storage::write_sentences(&speech_path, &pipeline.process(&speech)).unwrap();

    let corpus = storage::merge_corpora(&[press_path, speech_path], 5).unwrap();
    assert_eq!(corpus.len(), press.len() + 1);
    assert_eq!(corpus[0].source_type, SourceType::Speech);
    assert_eq!(corpus[0].date.to_string(), "2019-06-04");
    assert!(corpus[1..].iter().all(|r| r.date.to_string() == "2023-03-22"));

    let corpus_path = dir.path().join("corpus.csv");
    storage::write_sentences(&corpus_path, &corpus).unwrap();
    assert_eq!(storage::read_sentences(&corpus_path).unwrap(), corpus);
}
