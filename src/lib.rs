//! ua-datasets: loaders for Ukrainian NLP corpora.
//!
//! Each loader resolves a split in a local cache directory (downloading it
//! with retries and integrity checks when missing), parses it into typed
//! records, and exposes indexed and iterable access plus label statistics.
//!
//! Supported corpora:
//! - UA-SQuAD question answering ([`UaSquadDataset`])
//! - Ukrainian news classification ([`NewsClassificationDataset`])
//! - Mova Institute part-of-speech tagging ([`MovaInstitutePosDataset`])
//!
//! # Modules
//!
//! - [`datasets`]: Dataset facades and the [`Corpus`] access trait
//! - [`formats`]: Parsers for QA JSON, news CSV, CoNLL-U and the QA text format
//! - [`cache`]: Split resolution and atomic cache writes
//! - [`remote`]: Retrying downloads behind a pluggable [`remote::Transport`]
//! - [`validation`]: Checks for the QA keyword text format
//! - [`stats`]: Label frequency histograms
//! - [`error`]: Error types for ua-datasets operations
//!
//! # Example
//! ```no_run
//! use ua_datasets::{Corpus, NewsClassificationDataset, NewsOptions};
//!
//! let news = NewsClassificationDataset::new("./data/news", NewsOptions::for_split("test"))?;
//! println!("{news}");
//! for sample in news.iter().take(5) {
//!     println!("{} [{}]", sample.title, sample.target);
//! }
//! # Ok::<(), ua_datasets::UaDatasetsError>(())
//! ```

pub mod cache;
pub mod datasets;
pub mod error;
pub mod formats;
pub mod remote;
pub mod stats;
pub mod validation;

pub use cache::DownloadOptions;
pub use datasets::{
    load_ua_squad_v2, Corpus, MovaInstitutePosDataset, NewsClassificationDataset, NewsOptions,
    PosOptions, QaOptions, UaSquadDataset, UaSquadSplits,
};
pub use error::UaDatasetsError;
pub use formats::{Answers, NewsSample, QaExample, TaggedSentence};
