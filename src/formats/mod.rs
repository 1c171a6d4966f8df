//! On-disk formats and the typed records they parse into.
//!
//! Each reader follows the same shape: `read_*` takes a path, while
//! `from_*_str` / `from_*_slice` work on in-memory input for tests and
//! fuzzing.

pub mod io_conllu;
pub mod io_news_csv;
pub mod io_qa_text;
pub mod io_squad_json;
pub mod model;

pub use io_conllu::{from_conllu_str, read_conllu};
pub use io_news_csv::{from_news_csv_slice, from_news_csv_str, parse_tags, read_news_csv, NewsTable};
pub use io_qa_text::{from_qa_text, to_flat_json_string, to_qa_text};
pub use io_squad_json::{
    from_squad_json_slice, from_squad_json_str, read_squad_json, SquadParseOptions,
};
pub use model::{Answers, FlatQaRecord, NewsSample, QaExample, TaggedSentence};
