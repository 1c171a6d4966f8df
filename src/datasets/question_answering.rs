//! UA-SQuAD question answering dataset.
//!
//! Splits are JSON files in either the nested SQuAD v2 layout or the flat
//! `{question, context, answer}` layout; both normalize to [`QaExample`].
//!
//! ```no_run
//! use ua_datasets::datasets::{Corpus, QaOptions, UaSquadDataset};
//!
//! let ds = UaSquadDataset::new("./data/ua_squad", QaOptions::for_split("val"))?;
//! for example in ds.iter().take(3) {
//!     println!("{} -> {:?}", example.question, example.answers.text);
//! }
//! # Ok::<(), ua_datasets::UaDatasetsError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{count_labels, Corpus};
use crate::cache::{resolve_split, DownloadOptions, Resolution, SplitFiles};
use crate::error::UaDatasetsError;
use crate::formats::io_squad_json::{
    read_squad_json, to_squad_rows_json_string, write_squad_rows_json, SquadParseOptions,
};
use crate::formats::QaExample;
use crate::remote::{Transport, UreqTransport};
use crate::stats::{label_histogram, LabelHistogram, StatsOptions};

pub const UA_SQUAD_BASE_URL: &str =
    "https://huggingface.co/datasets/FIdo-AI/ua-squad/resolve/main/";

/// Default split to candidate file names, in lookup order.
pub fn default_file_map() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        ("train".to_string(), vec!["train.json".to_string()]),
        (
            "val".to_string(),
            vec![
                "val.json".to_string(),
                "validation.json".to_string(),
                "dev.json".to_string(),
            ],
        ),
    ])
}

/// Options for [`UaSquadDataset`].
#[derive(Clone, Debug)]
pub struct QaOptions {
    /// Split name; must be a key of `file_map`.
    pub split: String,
    /// Prefix joined with a file name to form its download URL.
    pub base_url: String,
    pub file_map: BTreeMap<String, Vec<String>>,
    /// Drop flat-format training examples whose answer is blank.
    pub ignore_empty_answer: bool,
    pub download: DownloadOptions,
}

impl Default for QaOptions {
    fn default() -> Self {
        Self {
            split: "train".to_string(),
            base_url: UA_SQUAD_BASE_URL.to_string(),
            file_map: default_file_map(),
            ignore_empty_answer: true,
            download: DownloadOptions::default(),
        }
    }
}

impl QaOptions {
    pub fn for_split(split: &str) -> Self {
        Self {
            split: split.to_string(),
            ..Self::default()
        }
    }
}

/// Accepts text that looks like a JSON document.
fn looks_like_json(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('{' | '['))
}

/// A loaded UA-SQuAD split.
///
/// Unlike the other datasets, a split that cannot be found or downloaded
/// loads as an empty dataset rather than an error.
#[derive(Clone, Debug)]
pub struct UaSquadDataset {
    split: String,
    dataset_path: Option<PathBuf>,
    examples: Vec<QaExample>,
    unique_answers: BTreeSet<String>,
    answer_frequencies: BTreeMap<String, usize>,
}

impl UaSquadDataset {
    /// Loads a split, downloading it over HTTPS if needed.
    pub fn new(root: impl AsRef<Path>, opts: QaOptions) -> Result<Self, UaDatasetsError> {
        let transport = UreqTransport::new().with_progress(opts.download.show_progress);
        Self::with_transport(root, opts, &transport)
    }

    /// Loads a split using the given transport for any downloads.
    pub fn with_transport(
        root: impl AsRef<Path>,
        opts: QaOptions,
        transport: &dyn Transport,
    ) -> Result<Self, UaDatasetsError> {
        let root = root.as_ref();
        let file_names =
            opts.file_map
                .get(&opts.split)
                .ok_or_else(|| UaDatasetsError::UnsupportedSplit {
                    split: opts.split.clone(),
                    expected: opts
                        .file_map
                        .keys()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                })?;

        let files = SplitFiles::from_base(&opts.split, &opts.base_url, file_names.as_slice());
        let validate: &dyn Fn(&str) -> bool = &looks_like_json;
        let resolution = resolve_split(root, &files, &opts.download, transport, Some(validate))?;

        let path = match resolution {
            Resolution::Cached(path) | Resolution::Downloaded(path) => path,
            Resolution::Unavailable { last_error } => {
                info!(
                    split = %opts.split,
                    root = %root.display(),
                    error = ?last_error.map(|e| e.to_string()),
                    "QA split unavailable, loading empty dataset"
                );
                return Ok(Self::from_examples(&opts.split, None, Vec::new()));
            }
        };

        let parse_opts = SquadParseOptions {
            ignore_empty_answer: opts.ignore_empty_answer,
            split: Some(opts.split.clone()),
        };
        let examples = read_squad_json(&path, &parse_opts)?;
        if examples.is_empty() {
            return Err(UaDatasetsError::Parse {
                path,
                message: "parsed zero QA examples; file may be malformed".to_string(),
            });
        }

        debug!(split = %opts.split, examples = examples.len(), "loaded QA split");
        Ok(Self::from_examples(&opts.split, Some(path), examples))
    }

    fn from_examples(split: &str, dataset_path: Option<PathBuf>, examples: Vec<QaExample>) -> Self {
        let answer_frequencies = count_labels(
            examples
                .iter()
                .filter(|ex| !ex.is_impossible)
                .flat_map(|ex| ex.answers.text.iter())
                .map(String::as_str)
                .filter(|text| !text.is_empty()),
        );
        let unique_answers = answer_frequencies.keys().cloned().collect();

        Self {
            split: split.to_string(),
            dataset_path,
            examples,
            unique_answers,
            answer_frequencies,
        }
    }

    pub fn split(&self) -> &str {
        &self.split
    }

    /// The file the examples were read from; `None` for an empty,
    /// unavailable split.
    pub fn dataset_path(&self) -> Option<&Path> {
        self.dataset_path.as_deref()
    }

    pub fn examples(&self) -> &[QaExample] {
        &self.examples
    }

    /// Distinct non-empty answer texts of answerable examples.
    pub fn unique_answers(&self) -> &BTreeSet<String> {
        &self.unique_answers
    }

    /// Occurrence count of each non-empty answer text of answerable examples.
    pub fn answer_frequencies(&self) -> &BTreeMap<String, usize> {
        &self.answer_frequencies
    }

    pub fn label_stats(&self, opts: &StatsOptions) -> LabelHistogram {
        label_histogram("Answers", &self.answer_frequencies, opts)
    }

    /// Examples as a pretty JSON list of HF `squad_v2` rows.
    pub fn to_json_string(&self) -> Result<String, UaDatasetsError> {
        to_squad_rows_json_string(&self.examples).map_err(|source| UaDatasetsError::QaJsonWrite {
            path: PathBuf::from("<string>"),
            source,
        })
    }

    /// Writes the examples as HF `squad_v2` rows to `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), UaDatasetsError> {
        write_squad_rows_json(path, &self.examples)
    }
}

impl Corpus for UaSquadDataset {
    type Item<'a> = &'a QaExample;

    fn len(&self) -> usize {
        self.examples.len()
    }

    fn get(&self, index: usize) -> Option<&QaExample> {
        self.examples.get(index)
    }
}

impl<'a> IntoIterator for &'a UaSquadDataset {
    type Item = &'a QaExample;
    type IntoIter = std::slice::Iter<'a, QaExample>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

impl fmt::Display for UaSquadDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UaSquadDataset(split='{}', examples={}, unique_answers={})",
            self.split,
            self.examples.len(),
            self.unique_answers.len()
        )
    }
}

/// Both UA-SQuAD splits, named as in HF `squad_v2`.
#[derive(Clone, Debug)]
pub struct UaSquadSplits {
    pub train: UaSquadDataset,
    pub validation: UaSquadDataset,
}

/// Loads the `train` and `val` splits from `root`.
pub fn load_ua_squad_v2(
    root: impl AsRef<Path>,
    download: bool,
    force_download: bool,
) -> Result<UaSquadSplits, UaDatasetsError> {
    let transport = UreqTransport::new().with_progress(true);
    load_ua_squad_v2_with_transport(root, download, force_download, &transport)
}

pub fn load_ua_squad_v2_with_transport(
    root: impl AsRef<Path>,
    download: bool,
    force_download: bool,
    transport: &dyn Transport,
) -> Result<UaSquadSplits, UaDatasetsError> {
    let root = root.as_ref();
    let opts_for = |split: &str| QaOptions {
        download: DownloadOptions {
            download,
            force_download,
            ..DownloadOptions::default()
        },
        ..QaOptions::for_split(split)
    };

    Ok(UaSquadSplits {
        train: UaSquadDataset::with_transport(root, opts_for("train"), transport)?,
        validation: UaSquadDataset::with_transport(root, opts_for("val"), transport)?,
    })
}
