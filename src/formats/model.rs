//! Typed records produced by the format parsers.

use serde::{Deserialize, Serialize};

/// Answer spans of a QA example, in the HF `squad_v2` column layout.
///
/// `text` and `answer_start` are parallel; offsets count characters (not
/// bytes) into the context, and `-1` marks an answer whose position is
/// unknown.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub text: Vec<String>,
    pub answer_start: Vec<i64>,
}

impl Answers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(text: impl Into<String>, start: i64) -> Self {
        Self {
            text: vec![text.into()],
            answer_start: vec![start],
        }
    }

    pub fn push(&mut self, text: impl Into<String>, start: i64) {
        self.text.push(text.into());
        self.answer_start.push(start);
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A SQuAD v2 style question answering example.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaExample {
    pub id: String,
    pub title: Option<String>,
    pub context: String,
    pub question: String,
    pub answers: Answers,
    pub is_impossible: bool,
}

/// A flat `{question, context, answer}` record as stored in the simplified
/// training JSON schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatQaRecord {
    pub question: String,
    pub context: String,
    pub answer: String,
}

/// One news article as seen through a dataset: borrowed fields plus tags
/// when they were requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewsSample<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub target: &'a str,
    pub tags: Option<&'a [String]>,
}

/// A POS-tagged sentence. Tokens and tags always have equal length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSentence {
    tokens: Vec<String>,
    tags: Vec<String>,
}

impl TaggedSentence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sentence from parallel vectors, or `None` if lengths differ.
    pub fn from_parts(tokens: Vec<String>, tags: Vec<String>) -> Option<Self> {
        (tokens.len() == tags.len()).then_some(Self { tokens, tags })
    }

    pub fn push(&mut self, token: impl Into<String>, tag: impl Into<String>) {
        self.tokens.push(token.into());
        self.tags.push(tag.into());
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Iterates `(token, tag)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens
            .iter()
            .zip(&self.tags)
            .map(|(token, tag)| (token.as_str(), tag.as_str()))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.tokens, self.tags)
    }
}
