//! Document loading.

use crate::date::DocumentDate;
use crate::document::{Document, DocumentKind};
use crate::error::{FedToneError, Result};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DocumentRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(alias = "text_segment")]
    text: Option<String>,
}

/// Reads a document table.
///
/// Columns: `text` (or `text_segment`) and optionally `id`, `date`, `kind`,
/// `title`, `url`; other columns are ignored. A full date embedded in the
/// URL takes precedence over the `date` column. Rows without a `kind` get
/// `default_kind`, and rows without text are skipped.
pub fn read_documents(path: &Path, default_kind: DocumentKind) -> Result<Vec<Document>> {
    if !path.exists() {
        return Err(FedToneError::FileNotFound(path.to_path_buf()));
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut reader = csv::Reader::from_path(path)?;
    let mut documents = Vec::new();
    let mut skipped = 0;

    for (row_number, result) in reader.deserialize::<DocumentRow>().enumerate() {
        let row = result?;
        let text = match row.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let kind = match row.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            Some(kind) => kind.parse()?,
            None => default_kind,
        };

        let date = match row.url.as_deref().map(DocumentDate::from_reference) {
            Some(date @ DocumentDate::Exact(_)) => date,
            _ => row.date.as_deref().map(DocumentDate::parse).unwrap_or_default(),
        };

        let id = row
            .id
            .clone()
            .or_else(|| row.url.clone())
            .unwrap_or_else(|| format!("{}#{}", stem, row_number));

        let mut document = Document::new(id, date, kind, text);
        document.title = row.title;
        document.url = row.url;
        documents.push(document);
    }

    if skipped > 0 {
        debug!("Skipped {} rows without text in {}", skipped, path.display());
    }
    info!("Loaded {} documents from {}", documents.len(), path.display());
    Ok(documents)
}

/// Reads a directory of extracted transcript `.txt` files, sorted by name.
///
/// The date comes from the file name. A name containing `confcall` marks a
/// conference call; anything else is a press conference.
pub fn read_transcripts(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Err(FedToneError::FileNotFound(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_text = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if path.is_file() && is_text {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = if name.to_lowercase().contains("confcall") {
            DocumentKind::ConferenceCall
        } else {
            DocumentKind::PressConference
        };
        let text = std::fs::read_to_string(&path)?;
        documents.push(Document::new(name.clone(), DocumentDate::from_reference(&name), kind, text));
    }

    info!("Loaded {} transcripts from {}", documents.len(), dir.display());
    Ok(documents)
}
