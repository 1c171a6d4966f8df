#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A Cyrillic or Latin word without separators or whitespace.
pub fn word_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex("[а-яієїґА-ЯІЄЇҐa-z0-9]{1,10}")
        .expect("valid word regex")
        .boxed()
}

/// A short phrase of words joined by single spaces.
pub fn phrase_strategy(max_words: usize) -> BoxedStrategy<String> {
    proptest::collection::vec(word_strategy(), 1..=max_words)
        .prop_map(|words| words.join(" "))
        .boxed()
}

/// A CSV cell that may contain commas, quotes and newlines.
pub fn cell_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex("[а-яa-z ,\"\n]{0,12}")
        .expect("valid cell regex")
        .boxed()
}

pub fn quote_csv(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// One CoNLL-U token line: either a regular token or a line the reader drops.
#[derive(Clone, Debug)]
pub enum ConlluLine {
    Token { form: String, tag: String },
    Range { form: String },
    Short { form: String },
    Comment(String),
}

pub fn conllu_line_strategy() -> BoxedStrategy<ConlluLine> {
    prop_oneof![
        6 => (word_strategy(), "[A-Z]{2,5}")
            .prop_map(|(form, tag)| ConlluLine::Token { form, tag }),
        1 => word_strategy().prop_map(|form| ConlluLine::Range { form }),
        1 => word_strategy().prop_map(|form| ConlluLine::Short { form }),
        1 => phrase_strategy(3).prop_map(ConlluLine::Comment),
    ]
    .boxed()
}

/// Sentences of CoNLL-U lines.
pub fn conllu_doc_strategy(max_sentences: usize) -> BoxedStrategy<Vec<Vec<ConlluLine>>> {
    proptest::collection::vec(
        proptest::collection::vec(conllu_line_strategy(), 0..8),
        0..=max_sentences,
    )
    .boxed()
}

/// Renders sentences, numbering token lines and separating sentences by a
/// blank line. The last sentence is left without a trailing newline when
/// `trailing_newline` is false.
pub fn render_conllu(doc: &[Vec<ConlluLine>], trailing_newline: bool) -> String {
    let mut blocks = Vec::new();
    for sentence in doc {
        let mut lines = Vec::new();
        let mut id = 1;
        for line in sentence {
            match line {
                ConlluLine::Token { form, tag } => {
                    lines.push(format!("{id}\t{form}\t_\t{tag}\t_\t_"));
                    id += 1;
                }
                ConlluLine::Range { form } => {
                    lines.push(format!("{id}-{}\t{form}\t_\t_\t_\t_", id + 1));
                }
                ConlluLine::Short { form } => lines.push(format!("{id}\t{form}")),
                ConlluLine::Comment(text) => lines.push(format!("# {text}")),
            }
        }
        blocks.push(lines.join("\n"));
    }
    let mut out = blocks.join("\n\n");
    if trailing_newline {
        out.push('\n');
    }
    out
}

/// Expected `(tokens, tags)` per non-empty sentence.
pub fn expected_sentences(doc: &[Vec<ConlluLine>]) -> Vec<(Vec<String>, Vec<String>)> {
    doc.iter()
        .map(|sentence| {
            sentence
                .iter()
                .filter_map(|line| match line {
                    ConlluLine::Token { form, tag } => Some((form.clone(), tag.clone())),
                    _ => None,
                })
                .unzip::<_, _, Vec<_>, Vec<_>>()
        })
        .filter(|(tokens, _)| !tokens.is_empty())
        .collect()
}
