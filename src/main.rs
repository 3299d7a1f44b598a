//! fedtone CLI - Federal Reserve communication structuring
//!
//! Command-line interface for building sentence corpora from speeches,
//! minutes and press-conference transcripts, and for aggregating
//! classifier predictions into sentiment indices.

use clap::{Parser, Subcommand};
use fedtone::{
    build_indices, storage, Config, Document, DocumentKind, FedToneError, GroupKey, ModelFamily,
    Pipeline, Result, RuleSet, SentenceRecord, SourceType,
};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::error;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fedtone")]
#[command(author = "fedtone Contributors")]
#[command(version)]
#[command(about = "Federal Reserve communication structuring and sentiment indices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Threshold configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Rule tables (JSON); built-in rules when omitted
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Structure FOMC minutes into section-labeled sentences
    Minutes {
        /// Input document table (CSV with a text column)
        #[arg(short, long)]
        input: PathBuf,

        /// Output sentence table
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Structure press-conference and conference-call transcripts
    PressConf {
        /// Directory of extracted transcript .txt files
        #[arg(short, long)]
        input: PathBuf,

        /// Output sentence table
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Segment speeches into sentences
    Speeches {
        /// Input document table (CSV with a text or text_segment column)
        #[arg(short, long)]
        input: PathBuf,

        /// Output sentence table
        #[arg(short, long)]
        output: PathBuf,

        /// Keep only speeches whose title mentions a policy keyword
        #[arg(long)]
        filter_titles: bool,
    },

    /// Merge sentence tables into one date-ordered corpus
    Corpus {
        /// Sentence tables written by minutes, press-conf or speeches
        #[arg(short, long, num_args = 1.., required = true)]
        inputs: Vec<PathBuf>,

        /// Output corpus table
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Aggregate model predictions into period sentiment indices
    Index {
        /// Prediction table (date, label, optional source_type and score)
        #[arg(short, long)]
        predictions: PathBuf,

        /// Model family that produced the labels (finbert-fomc, roberta)
        #[arg(short, long, default_value = "finbert-fomc")]
        family: ModelFamily,

        /// Output index table
        #[arg(short, long)]
        output: PathBuf,

        /// One row per (period, source type) instead of per period
        #[arg(long)]
        by_source: bool,
    },

    /// Write the built-in rule tables as JSON
    Rules {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Minutes { input, output } => {
            load_pipeline(cli.config.as_deref(), cli.rules.as_deref(), false)
                .and_then(|pipeline| structure_minutes(&pipeline, &input, &output))
        }

        Commands::PressConf { input, output } => {
            load_pipeline(cli.config.as_deref(), cli.rules.as_deref(), false)
                .and_then(|pipeline| structure_transcripts(&pipeline, &input, &output))
        }

        Commands::Speeches {
            input,
            output,
            filter_titles,
        } => load_pipeline(cli.config.as_deref(), cli.rules.as_deref(), filter_titles)
            .and_then(|pipeline| structure_speeches(&pipeline, &input, &output)),

        Commands::Corpus { inputs, output } => {
            merge_corpus(cli.config.as_deref(), &inputs, &output)
        }

        Commands::Index {
            predictions,
            family,
            output,
            by_source,
        } => build_index(cli.rules.as_deref(), &predictions, family, &output, by_source),

        Commands::Rules { output } => dump_rules(&output),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => RuleSet::from_file(path),
        None => Ok(RuleSet::default()),
    }
}

fn load_pipeline(config: Option<&Path>, rules: Option<&Path>, filter_titles: bool) -> Result<Pipeline> {
    let mut config = match config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if filter_titles {
        config.speech.require_title_keyword = true;
    }
    Pipeline::new(config, &load_rules(rules)?)
}

fn bar_style() -> Result<ProgressStyle> {
    ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .map(|style| style.progress_chars("█▓▒░  "))
        .map_err(|e| FedToneError::Config(format!("progress template: {}", e)))
}

/// Runs documents through the pipeline with a progress bar.
fn process_documents(pipeline: &Pipeline, documents: &[Document]) -> Result<Vec<SentenceRecord>> {
    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(bar_style()?);
    pb.set_message("Structuring documents...");

    let per_document: Vec<Vec<SentenceRecord>> = documents
        .par_iter()
        .map(|doc| {
            let records = pipeline.process(doc);
            pb.inc(1);
            records
        })
        .collect();

    pb.finish_and_clear();

    let skipped = per_document.iter().filter(|records| records.is_empty()).count();
    if skipped > 0 {
        println!("  {} documents produced no sentences", format_number(skipped));
    }

    Ok(per_document.into_iter().flatten().collect())
}

fn write_corpus(records: &[SentenceRecord], output: &Path) -> Result<()> {
    let mut by_source: BTreeMap<SourceType, usize> = BTreeMap::new();
    for record in records {
        *by_source.entry(record.source_type).or_default() += 1;
    }

    println!("✓ Extracted {} sentences", format_number(records.len()));
    for (source, count) in &by_source {
        println!("  {:<20} {}", source.label(), format_number(*count));
    }

    storage::write_sentences(output, records)?;
    println!("✓ Saved sentences to {}", output.display());
    Ok(())
}

fn structure_minutes(pipeline: &Pipeline, input: &Path, output: &Path) -> Result<()> {
    let start_time = Instant::now();

    println!("fedtone - FOMC minutes");
    println!("   Input: {}", input.display());
    println!();

    let documents = storage::read_documents(input, DocumentKind::Minutes)?;
    println!("✓ Loaded {} documents", format_number(documents.len()));

    let records = process_documents(pipeline, &documents)?;
    write_corpus(&records, output)?;

    println!("Completed in {}", HumanDuration(start_time.elapsed()));
    Ok(())
}

fn structure_transcripts(pipeline: &Pipeline, input: &Path, output: &Path) -> Result<()> {
    let start_time = Instant::now();

    println!("fedtone - press conference transcripts");
    println!("   Input: {}", input.display());
    println!();

    let documents = storage::read_transcripts(input)?;
    let calls = documents
        .iter()
        .filter(|doc| doc.kind == DocumentKind::ConferenceCall)
        .count();
    println!(
        "✓ Loaded {} transcripts ({} conference calls)",
        format_number(documents.len()),
        format_number(calls)
    );

    let records = process_documents(pipeline, &documents)?;
    write_corpus(&records, output)?;

    println!("Completed in {}", HumanDuration(start_time.elapsed()));
    Ok(())
}

fn structure_speeches(pipeline: &Pipeline, input: &Path, output: &Path) -> Result<()> {
    let start_time = Instant::now();

    println!("fedtone - speeches");
    println!("   Input: {}", input.display());
    println!();

    let documents = storage::read_documents(input, DocumentKind::Speech)?;
    println!("✓ Loaded {} speech segments", format_number(documents.len()));

    let records = process_documents(pipeline, &documents)?;
    write_corpus(&records, output)?;

    println!("Completed in {}", HumanDuration(start_time.elapsed()));
    Ok(())
}

fn merge_corpus(config: Option<&Path>, inputs: &[PathBuf], output: &Path) -> Result<()> {
    let config = match config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    println!("fedtone - master corpus");
    println!("   Inputs: {}", format_number(inputs.len()));
    println!();

    let corpus = storage::merge_corpora(inputs, config.segmenter.min_words)?;
    let first = corpus.first().and_then(|record| record.date.year());
    let last = corpus.last().and_then(|record| record.date.year());
    if let (Some(first), Some(last)) = (first, last) {
        println!("  Years: {}-{}", first, last);
    }

    write_corpus(&corpus, output)
}

fn build_index(
    rules: Option<&Path>,
    predictions: &Path,
    family: ModelFamily,
    output: &Path,
    by_source: bool,
) -> Result<()> {
    let rules = load_rules(rules)?;
    let table = rules.labels.table(family);

    let sentences = storage::read_predictions(predictions, table)?;
    println!(
        "✓ Loaded {} predictions ({} labels)",
        format_number(sentences.len()),
        family
    );

    let key = if by_source {
        GroupKey::PeriodAndSource
    } else {
        GroupKey::Period
    };
    let rows = build_indices(&sentences, key);

    println!();
    println!("  {:<12} {:<20} {:>8} {:>8} {:>6}", "Period", "Source", "Count", "Score", "N");
    for row in &rows {
        println!(
            "  {:<12} {:<20} {:>8.3} {:>8.3} {:>6}",
            row.period,
            row.source.as_deref().unwrap_or("-"),
            row.net_sentiment_count,
            row.net_sentiment_score,
            row.total
        );
    }
    println!();

    storage::write_indices(output, &rows)?;
    println!("✓ Saved {} index rows to {}", format_number(rows.len()), output.display());
    Ok(())
}

fn dump_rules(output: &Path) -> Result<()> {
    RuleSet::default().save(output)?;
    println!("✓ Saved built-in rules to {}", output.display());
    Ok(())
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
