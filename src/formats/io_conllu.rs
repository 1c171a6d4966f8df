//! Reader for CoNLL-U-like token/tag files.
//!
//! Only the token form (column 2) and the universal POS tag (column 4) are
//! kept. The reader is lenient: malformed lines are dropped instead of
//! failing the whole file.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use super::model::TaggedSentence;
use crate::error::UaDatasetsError;

const MIN_FIELDS: usize = 4;

/// How a single (trimmed) line is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line: ends the current sentence.
    Boundary,
    /// `#` comment: ignored, does not end the sentence.
    Comment,
    /// A regular token line.
    Token { form: &'a str, tag: &'a str },
    /// Too few fields, a multiword range id, an empty-node id, etc.
    Skipped,
}

/// Classifies one line of input.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Boundary;
    }
    if line.starts_with('#') {
        return LineKind::Comment;
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return LineKind::Skipped;
    }

    let id = fields[0];
    if id.is_empty() || id.contains('-') || !id.bytes().all(|b| b.is_ascii_digit()) {
        return LineKind::Skipped;
    }

    LineKind::Token {
        form: fields[1],
        tag: fields[3],
    }
}

/// Accumulates sentences from lines fed in order.
#[derive(Debug, Default)]
pub struct SentenceCollector {
    sentences: Vec<TaggedSentence>,
    current: TaggedSentence,
}

impl SentenceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) {
        match classify_line(line) {
            LineKind::Boundary => self.flush(),
            LineKind::Token { form, tag } => self.current.push(form, tag),
            LineKind::Comment | LineKind::Skipped => {}
        }
    }

    /// Flushes an unterminated final sentence and returns everything read.
    pub fn finish(mut self) -> Vec<TaggedSentence> {
        self.flush();
        self.sentences
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.sentences.push(std::mem::take(&mut self.current));
        }
    }
}

/// Reads tagged sentences from a file.
///
/// # Errors
/// Returns [`UaDatasetsError::Parse`] if the file is not valid UTF-8, and an
/// IO error if it cannot be read.
pub fn read_conllu(path: &Path) -> Result<Vec<TaggedSentence>, UaDatasetsError> {
    let file = File::open(path).map_err(UaDatasetsError::Io)?;
    let reader = BufReader::new(file);

    let mut collector = SentenceCollector::new();
    for line in reader.lines() {
        let line = line.map_err(|source| match source.kind() {
            ErrorKind::InvalidData => UaDatasetsError::Parse {
                path: path.to_path_buf(),
                message: format!("file is not valid UTF-8: {source}"),
            },
            _ => UaDatasetsError::Io(source),
        })?;
        collector.feed(&line);
    }
    Ok(collector.finish())
}

/// Reads tagged sentences from a string.
pub fn from_conllu_str(text: &str) -> Vec<TaggedSentence> {
    let mut collector = SentenceCollector::new();
    for line in text.lines() {
        collector.feed(line);
    }
    collector.finish()
}
