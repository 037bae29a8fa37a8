//! Relation ingestion.
//!
//! A dependency parser emits one grammatical relation per line, shaped like
//! `nn(family-3, Bush-2)`. This module turns those lines into
//! [`RelationTriple`]s, dropping the `root` anchor relation and counting lines
//! that look like relations but cannot be read as one.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::error::Result;

/// Label of the parse-tree anchor relation; it carries no semantic context.
pub const ROOT_RELATION: &str = "root";

/// One grammatical relation between two lower-cased words.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RelationTriple {
    pub relation: String,
    pub word_a: String,
    pub word_b: String,
}

impl RelationTriple {
    pub fn new(relation: &str, word_a: &str, word_b: &str) -> Self {
        Self {
            relation: relation.to_owned(),
            word_a: word_a.to_owned(),
            word_b: word_b.to_owned(),
        }
    }
}

/// The text of one relation file together with the name it was loaded under.
#[derive(Clone, Debug)]
pub struct RelationDocument {
    pub name: String,
    pub text: String,
}

impl RelationDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Anything able to hand over the complete set of relation documents.
///
/// Producers (a directory of parser output, an external parser run, an
/// in-memory fixture) are drained fully before ingestion starts.
pub trait RelationSource {
    fn documents(&self) -> Result<Vec<RelationDocument>>;
}

impl RelationSource for Vec<RelationDocument> {
    fn documents(&self) -> Result<Vec<RelationDocument>> {
        Ok(self.clone())
    }
}

/// Why a relation-looking line was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("invalid relation label '{0}'")]
    BadLabel(String),
    #[error("relation has a single argument")]
    MissingArgument,
    #[error("argument '{0}' has no positional index")]
    MissingIndex(String),
    #[error("argument has an empty word")]
    EmptyWord,
}

/// Parses one line of parser output.
///
/// `Ok(None)` means the line is not a relation (no `(`) or is a `root`
/// relation; both are ignored without counting as errors.
pub fn parse_line(line: &str) -> std::result::Result<Option<RelationTriple>, LineError> {
    let Some((label, args)) = line.split_once('(') else {
        return Ok(None);
    };

    let label = label.trim();
    if label.is_empty() || label.contains(char::is_whitespace) {
        return Err(LineError::BadLabel(label.to_owned()));
    }
    if label == ROOT_RELATION {
        return Ok(None);
    }

    let mut args = args.split(',');
    let first = args.next().unwrap_or_default();
    let second = args.next().ok_or(LineError::MissingArgument)?;

    Ok(Some(RelationTriple {
        relation: label.to_owned(),
        word_a: strip_index(first)?,
        word_b: strip_index(second)?,
    }))
}

// `Bush-2)` -> `bush`
fn strip_index(arg: &str) -> std::result::Result<String, LineError> {
    let (word, _index) = arg
        .split_once('-')
        .ok_or_else(|| LineError::MissingIndex(arg.trim().to_owned()))?;
    let word = word.trim();
    if word.is_empty() {
        return Err(LineError::EmptyWord);
    }
    Ok(word.to_lowercase())
}

/// Triples read from a batch of documents plus the number of rejected lines.
#[derive(Debug, Default)]
pub struct Ingestion {
    pub triples: Vec<RelationTriple>,
    pub skipped_lines: usize,
}

impl Ingestion {
    fn merge(mut self, other: Ingestion) -> Ingestion {
        self.triples.extend(other.triples);
        self.skipped_lines += other.skipped_lines;
        self
    }
}

pub struct Relations {}

impl Relations {

    fn ingest_document(document: &RelationDocument) -> Ingestion {

        let mut ingestion = Ingestion::default();
        for (line_no, line) in document.text.lines().enumerate() {
            match parse_line(line) {
                Ok(Some(triple)) => ingestion.triples.push(triple),
                Ok(None) => {}
                Err(e) => {
                    tracing::trace!(
                        document = %document.name,
                        line = line_no + 1,
                        error = %e,
                        "skipping relation line"
                    );
                    ingestion.skipped_lines += 1;
                }
            }
        }
        ingestion
    }

    /// Reads every document in parallel, one shard per document, and
    /// concatenates the shards once all of them are done.
    pub fn ingest(documents: &[RelationDocument]) -> Ingestion {
        documents
            .par_iter()
            .map(Relations::ingest_document)
            .reduce(Ingestion::default, Ingestion::merge)
    }

}
