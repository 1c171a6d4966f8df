//! UA-SQuAD JSON reader and writer.
//!
//! Two input schemas are accepted under a top-level `data` list:
//!
//! - **Nested** (SQuAD / SQuAD v2): `data` is a non-empty list whose first
//!   element has a `paragraphs` key. Each article holds paragraphs, each
//!   paragraph a `context` and a list of `qas` with `answers`.
//! - **Flat**: `data` is a list of `{question, context, answer}` objects with
//!   a single answer per question.
//!
//! Both are normalized into [`QaExample`] records. Answer offsets are
//! character offsets into the trimmed context.
//!
//! # Answer alignment
//!
//! Nested answers keep the provided `answer_start` when it aligns with the
//! context, fall back to the first occurrence of the text otherwise, and are
//! dropped when the text does not occur at all. Flat answers that cannot be
//! found in the context are kept with offset `-1`.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::model::{Answers, QaExample};
use crate::error::UaDatasetsError;

/// Options for normalizing QA JSON.
#[derive(Clone, Debug)]
pub struct SquadParseOptions {
    /// Drop flat-schema examples with a blank answer on the `train` split.
    pub ignore_empty_answer: bool,
    /// Split being parsed; only `"train"` enables empty-answer filtering.
    pub split: Option<String>,
}

impl Default for SquadParseOptions {
    fn default() -> Self {
        Self {
            ignore_empty_answer: true,
            split: None,
        }
    }
}

impl SquadParseOptions {
    fn drops_empty_answers(&self) -> bool {
        self.ignore_empty_answer && self.split.as_deref() == Some("train")
    }
}

/// Reads QA examples from a JSON file.
///
/// # Errors
/// Returns [`UaDatasetsError::QaJsonParse`] if the file is not valid JSON and
/// [`UaDatasetsError::Parse`] if it is not UTF-8 or has an unusable shape.
pub fn read_squad_json(
    path: &Path,
    opts: &SquadParseOptions,
) -> Result<Vec<QaExample>, UaDatasetsError> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| UaDatasetsError::Parse {
        path: path.to_path_buf(),
        message: format!("file is not valid UTF-8: {e}"),
    })?;
    parse_squad_str(&text, opts, path)
}

/// Reads QA examples from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_squad_json_str(
    json: &str,
    opts: &SquadParseOptions,
) -> Result<Vec<QaExample>, UaDatasetsError> {
    parse_squad_str(json, opts, Path::new("<string>"))
}

/// Reads QA examples from raw JSON bytes.
///
/// Useful for fuzzing and processing raw bytes.
pub fn from_squad_json_slice(
    bytes: &[u8],
    opts: &SquadParseOptions,
) -> Result<Vec<QaExample>, UaDatasetsError> {
    let path = Path::new("<bytes>");
    let root: Value = serde_json::from_slice(bytes).map_err(|source| {
        UaDatasetsError::QaJsonParse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    examples_from_value(&root, opts, path)
}

/// Serializes examples as a pretty JSON list of HF `squad_v2` rows.
pub fn to_squad_rows_json_string(examples: &[QaExample]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(examples)
}

/// Writes examples to a file as a pretty JSON list of HF `squad_v2` rows.
pub fn write_squad_rows_json(path: &Path, examples: &[QaExample]) -> Result<(), UaDatasetsError> {
    let json =
        to_squad_rows_json_string(examples).map_err(|source| UaDatasetsError::QaJsonWrite {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, json)?;
    Ok(())
}

/// Deterministic identifier for an example without an explicit id.
///
/// First 16 hex characters of the SHA-256 of `question + "\n" + context`.
pub fn example_id(question: &str, context: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(question.as_bytes());
    hasher.update(b"\n");
    hasher.update(context.as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(16);
    id
}

/// Character offset of the first occurrence of `needle` in `haystack`.
pub fn find_char_offset(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

/// True if `text` occurs in `context` starting at character offset `start`.
pub fn is_aligned(context: &str, start: usize, text: &str) -> bool {
    !text.is_empty()
        && context
            .char_indices()
            .nth(start)
            .is_some_and(|(byte_idx, _)| context[byte_idx..].starts_with(text))
}

fn parse_squad_str(
    json: &str,
    opts: &SquadParseOptions,
    path: &Path,
) -> Result<Vec<QaExample>, UaDatasetsError> {
    let root: Value = serde_json::from_str(json).map_err(|source| UaDatasetsError::QaJsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    examples_from_value(&root, opts, path)
}

fn examples_from_value(
    root: &Value,
    opts: &SquadParseOptions,
    path: &Path,
) -> Result<Vec<QaExample>, UaDatasetsError> {
    let obj = root.as_object().ok_or_else(|| UaDatasetsError::Parse {
        path: path.to_path_buf(),
        message: "top-level JSON value must be an object with a 'data' list".to_string(),
    })?;

    let data = match obj.get("data") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(UaDatasetsError::Parse {
                path: path.to_path_buf(),
                message: "'data' must be a list".to_string(),
            })
        }
    };

    let nested = data
        .first()
        .and_then(Value::as_object)
        .is_some_and(|first| first.contains_key("paragraphs"));

    if nested {
        Ok(nested_examples(data))
    } else {
        Ok(flat_examples(data, opts))
    }
}

fn nested_examples(data: &[Value]) -> Vec<QaExample> {
    let mut examples = Vec::new();

    for article in data.iter().filter_map(Value::as_object) {
        let title = article.get("title").and_then(scalar_text);

        for para in list_field(article, "paragraphs").filter_map(Value::as_object) {
            let Some(context) = trimmed_field(para, "context") else {
                continue;
            };

            for qa in list_field(para, "qas").filter_map(Value::as_object) {
                let Some(question) = trimmed_field(qa, "question") else {
                    continue;
                };

                let mut answers = Answers::none();
                for cand in list_field(qa, "answers").filter_map(Value::as_object) {
                    let text = cand
                        .get("text")
                        .and_then(scalar_text)
                        .map(|t| t.trim().to_string())
                        .unwrap_or_default();
                    if text.is_empty() {
                        continue;
                    }

                    let given = cand
                        .get("answer_start")
                        .and_then(Value::as_i64)
                        .and_then(|start| usize::try_from(start).ok());
                    let start = match given {
                        Some(start) if is_aligned(&context, start, &text) => Some(start),
                        _ => find_char_offset(&context, &text),
                    };

                    if let Some(start) = start {
                        answers.push(text, start as i64);
                    }
                }

                let flagged = qa.get("is_impossible").is_some_and(truthy);
                let is_impossible = flagged || answers.is_empty();
                if is_impossible {
                    answers = Answers::none();
                }

                let id = qa
                    .get("id")
                    .and_then(scalar_text)
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| example_id(&question, &context));

                examples.push(QaExample {
                    id,
                    title: title.clone(),
                    context: context.clone(),
                    question,
                    answers,
                    is_impossible,
                });
            }
        }
    }

    examples
}

fn flat_examples(data: &[Value], opts: &SquadParseOptions) -> Vec<QaExample> {
    let mut examples = Vec::new();

    for item in data.iter().filter_map(Value::as_object) {
        let (Some(question), Some(context)) =
            (trimmed_field(item, "question"), trimmed_field(item, "context"))
        else {
            continue;
        };

        let (answers, is_impossible) = match item.get("answer").and_then(scalar_text) {
            None => (Answers::none(), true),
            Some(raw) => {
                let text = raw.trim();
                if text.is_empty() {
                    if opts.drops_empty_answers() {
                        continue;
                    }
                    (Answers::none(), true)
                } else {
                    // Unlocatable answers are kept with an unknown offset.
                    let start = find_char_offset(&context, text).map_or(-1, |s| s as i64);
                    (Answers::single(text, start), false)
                }
            }
        };

        examples.push(QaExample {
            id: example_id(&question, &context),
            title: None,
            context,
            question,
            answers,
            is_impossible,
        });
    }

    examples
}

fn list_field<'a>(obj: &'a Map<String, Value>, key: &str) -> std::slice::Iter<'a, Value> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .unwrap_or_default()
}

/// Non-blank trimmed text of a field.
fn trimmed_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(scalar_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Text of a JSON value; strings verbatim, other non-null values as JSON.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
