//! Tabular storage for documents, sentence corpora, predictions and indices.
//!
//! All tables are CSV with a header row. Sentence tables are written with
//! every field quoted, since sentence text routinely contains commas and
//! quotes.

mod documents;
mod table;

pub use documents::{read_documents, read_transcripts};
pub use table::{
    merge_corpora, read_predictions, read_sentences, write_indices, write_sentences,
    write_sentences_to,
};
