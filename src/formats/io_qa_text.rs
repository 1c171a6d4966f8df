//! Line-oriented keyword text format for hand-editing QA data.
//!
//! Every line starts with one of three keywords:
//!
//! ```text
//! Контекст: <context>
//! Питання: <question>
//! Відповідь: <answer>
//! Питання: <another question on the same context>
//! Відповідь: <its answer>
//! Контекст: <next context>
//! ...
//! ```
//!
//! Use [`crate::validation::validate_qa_text`] to check a file before
//! converting it back with [`from_qa_text`].

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::model::{FlatQaRecord, QaExample};
use crate::error::UaDatasetsError;

pub const CONTEXT_KEYWORD: &str = "Контекст:";
pub const QUESTION_KEYWORD: &str = "Питання:";
pub const ANSWER_KEYWORD: &str = "Відповідь:";

pub const KEYWORDS: [&str; 3] = [CONTEXT_KEYWORD, QUESTION_KEYWORD, ANSWER_KEYWORD];

/// Renders examples in the keyword text format.
///
/// A context line is written only when the context differs from the previous
/// example's. Impossible examples get an empty answer line. Line breaks inside
/// fields are collapsed to spaces so every field stays on one line.
pub fn to_qa_text(examples: &[QaExample]) -> String {
    let mut out = String::new();
    let mut current_context: Option<&str> = None;

    for example in examples {
        if current_context != Some(example.context.as_str()) {
            push_line(&mut out, CONTEXT_KEYWORD, &example.context);
            current_context = Some(example.context.as_str());
        }
        push_line(&mut out, QUESTION_KEYWORD, &example.question);
        let answer = example
            .answers
            .text
            .first()
            .map(String::as_str)
            .unwrap_or_default();
        push_line(&mut out, ANSWER_KEYWORD, answer);
    }

    out
}

/// Writes examples to a file in the keyword text format.
pub fn write_qa_text(path: &Path, examples: &[QaExample]) -> Result<(), UaDatasetsError> {
    fs::write(path, to_qa_text(examples))?;
    Ok(())
}

/// Reads flat QA records back from the keyword text format.
///
/// A record is emitted on every answer line, pairing it with the most recent
/// context and question. Lines without a keyword are ignored; run the
/// validator first to find them.
pub fn from_qa_text(text: &str) -> Vec<FlatQaRecord> {
    let mut records = Vec::new();
    let mut context = "";
    let mut question = "";

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(CONTEXT_KEYWORD) {
            context = rest.trim();
        } else if let Some(rest) = line.strip_prefix(QUESTION_KEYWORD) {
            question = rest.trim();
        } else if let Some(rest) = line.strip_prefix(ANSWER_KEYWORD) {
            records.push(FlatQaRecord {
                question: question.to_string(),
                context: context.to_string(),
                answer: rest.trim().to_string(),
            });
        }
    }

    records
}

/// Reads flat QA records from a keyword text file.
pub fn read_qa_text(path: &Path) -> Result<Vec<FlatQaRecord>, UaDatasetsError> {
    let text = fs::read_to_string(path)?;
    Ok(from_qa_text(&text))
}

#[derive(Serialize)]
struct FlatDocument<'a> {
    data: &'a [FlatQaRecord],
}

/// Serializes flat records as `{"data": [...]}`, readable by the QA parser.
pub fn to_flat_json_string(records: &[FlatQaRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FlatDocument { data: records })
}

/// Writes flat records to a JSON file readable by the QA parser.
pub fn write_flat_json(path: &Path, records: &[FlatQaRecord]) -> Result<(), UaDatasetsError> {
    let json = to_flat_json_string(records).map_err(|source| UaDatasetsError::QaJsonWrite {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json)?;
    Ok(())
}

fn push_line(out: &mut String, keyword: &str, text: &str) {
    out.push_str(keyword);
    out.push(' ');
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    if let Some(first) = lines.next() {
        out.push_str(first);
        for line in lines {
            out.push(' ');
            out.push_str(line);
        }
    }
    out.push('\n');
}
