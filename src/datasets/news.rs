//! Ukrainian news classification dataset.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use super::{check_split, count_labels, require_file, Corpus};
use crate::cache::{resolve_split, DownloadOptions, SplitFiles};
use crate::error::UaDatasetsError;
use crate::formats::io_news_csv::{parse_tags, read_news_csv, NewsTable};
use crate::formats::NewsSample;
use crate::remote::{Transport, UreqTransport};
use crate::stats::{label_histogram, LabelHistogram, StatsOptions};

pub const NEWS_BASE_URL: &str = "https://github.com/fido-ai/ua-datasets/releases/download/v0.0.1/";
pub const NEWS_SPLITS: [&str; 2] = ["train", "test"];

/// Options for [`NewsClassificationDataset`].
#[derive(Clone, Debug)]
pub struct NewsOptions {
    /// `"train"` or `"test"`; cached as `<split>.csv`.
    pub split: String,
    /// Include parsed tags in every sample.
    pub return_tags: bool,
    pub base_url: String,
    pub download: DownloadOptions,
}

impl Default for NewsOptions {
    fn default() -> Self {
        Self {
            split: "train".to_string(),
            return_tags: false,
            base_url: NEWS_BASE_URL.to_string(),
            download: DownloadOptions::default(),
        }
    }
}

impl NewsOptions {
    pub fn for_split(split: &str) -> Self {
        Self {
            split: split.to_string(),
            ..Self::default()
        }
    }
}

/// A loaded news classification split.
#[derive(Debug)]
pub struct NewsClassificationDataset {
    split: String,
    return_tags: bool,
    dataset_path: PathBuf,
    table: NewsTable,
    labels: BTreeSet<String>,
    label_frequencies: BTreeMap<String, usize>,
    tags: OnceLock<Vec<Vec<String>>>,
}

impl NewsClassificationDataset {
    /// Loads a split, downloading it over HTTPS if needed.
    pub fn new(root: impl AsRef<Path>, opts: NewsOptions) -> Result<Self, UaDatasetsError> {
        let transport = UreqTransport::new().with_progress(opts.download.show_progress);
        Self::with_transport(root, opts, &transport)
    }

    /// Loads a split using the given transport for any downloads.
    ///
    /// # Errors
    /// - [`UaDatasetsError::UnsupportedSplit`] for splits other than train/test
    /// - [`UaDatasetsError::NotFound`] if the file is missing and downloads are disabled
    /// - [`UaDatasetsError::Download`] if every download attempt failed
    /// - a parse error for malformed CSV, missing columns or zero rows
    pub fn with_transport(
        root: impl AsRef<Path>,
        opts: NewsOptions,
        transport: &dyn Transport,
    ) -> Result<Self, UaDatasetsError> {
        let root = root.as_ref();
        check_split(&opts.split, &NEWS_SPLITS)?;

        let file_name = format!("{}.csv", opts.split);
        let files = SplitFiles::from_base(&opts.split, &opts.base_url, &[file_name.as_str()]);
        let resolution = resolve_split(root, &files, &opts.download, transport, None)?;
        let path = require_file(resolution, root.join(&file_name))?;

        let table = read_news_csv(&path)?;
        if table.is_empty() {
            return Err(UaDatasetsError::Parse {
                path,
                message: "loaded zero rows; file may be empty or malformed".to_string(),
            });
        }

        let label_frequencies =
            count_labels((0..table.len()).filter_map(|row| table.target(row)));
        let labels = label_frequencies.keys().cloned().collect();

        debug!(split = %opts.split, rows = table.len(), "loaded news split");
        Ok(Self {
            split: opts.split,
            return_tags: opts.return_tags,
            dataset_path: path,
            table,
            labels,
            label_frequencies,
            tags: OnceLock::new(),
        })
    }

    pub fn split(&self) -> &str {
        &self.split
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// Header names in file order.
    pub fn column_names(&self) -> &[String] {
        &self.table.header
    }

    /// Distinct `target` values.
    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// Occurrence count of each `target`; sums to `len()`.
    pub fn label_frequencies(&self) -> &BTreeMap<String, usize> {
        &self.label_frequencies
    }

    /// Tags of every row, parsed on first use and cached.
    pub fn parsed_tags(&self) -> &[Vec<String>] {
        self.tags.get_or_init(|| {
            (0..self.table.len())
                .map(|row| parse_tags(self.table.raw_tags(row).unwrap_or_default()))
                .collect()
        })
    }

    pub fn label_stats(&self, opts: &StatsOptions) -> LabelHistogram {
        label_histogram("Targets", &self.label_frequencies, opts)
    }
}

impl Corpus for NewsClassificationDataset {
    type Item<'a> = NewsSample<'a>;

    fn len(&self) -> usize {
        self.table.len()
    }

    fn get(&self, index: usize) -> Option<NewsSample<'_>> {
        let tags = if self.return_tags {
            Some(self.parsed_tags().get(index)?.as_slice())
        } else {
            None
        };
        Some(NewsSample {
            title: self.table.title(index)?,
            text: self.table.text(index)?,
            target: self.table.target(index)?,
            tags,
        })
    }
}

impl<'a> IntoIterator for &'a NewsClassificationDataset {
    type Item = NewsSample<'a>;
    type IntoIter = super::CorpusIter<'a, NewsClassificationDataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for NewsClassificationDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NewsClassificationDataset(split='{}', n_rows={}, n_labels={}, return_tags={})",
            self.split,
            self.table.len(),
            self.labels.len(),
            self.return_tags
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::TransportError;
    use std::fs;
    use std::time::Duration;

    struct Offline;

    impl Transport for Offline {
        fn get(&self, _url: &str, _timeout: Duration) -> Result<Vec<u8>, TransportError> {
            Err(TransportError::Network("offline".into()))
        }
    }

    fn offline(split: &str, return_tags: bool) -> NewsOptions {
        NewsOptions {
            return_tags,
            download: DownloadOptions::offline(),
            ..NewsOptions::for_split(split)
        }
    }

    fn load(dir: &Path, opts: NewsOptions) -> Result<NewsClassificationDataset, UaDatasetsError> {
        NewsClassificationDataset::with_transport(dir, opts, &Offline)
    }

    fn write_train(dir: &Path, csv: &str) {
        fs::write(dir.join("train.csv"), csv).expect("write");
    }

    #[test]
    fn samples_follow_column_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_train(dir.path(), "title,text,tags,target\nT1,X1,a|b,sport\nT2,X2,,politics");

        let ds = load(dir.path(), offline("train", true)).expect("load");
        assert_eq!(ds.len(), 2);
        let first = ds.item_at(0).expect("row 0");
        assert_eq!(first.title, "T1");
        assert_eq!(first.target, "sport");
        assert_eq!(first.tags, Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(ds.item_at(1).expect("row 1").tags, Some(&[][..]));
        assert_eq!(ds.column_names(), ["title", "text", "tags", "target"]);
    }

    #[test]
    fn tags_hidden_unless_requested() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_train(dir.path(), "title,text,tags,target\nT1,X1,a|b,sport\n");

        let ds = load(dir.path(), offline("train", false)).expect("load");
        assert_eq!(ds.item_at(0).expect("row").tags, None);
        assert_eq!(ds.parsed_tags()[0], vec!["a", "b"]);
    }

    #[test]
    fn label_frequencies_sum_to_len() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_train(dir.path(), "title,text,target\na,b,x\nc,d,y\ne,f,x\n");

        let ds = load(dir.path(), offline("train", false)).expect("load");
        assert_eq!(ds.label_frequencies().values().sum::<usize>(), ds.len());
        assert_eq!(ds.labels().len(), 2);
        assert_eq!(
            ds.to_string(),
            "NewsClassificationDataset(split='train', n_rows=3, n_labels=2, return_tags=false)"
        );
    }

    #[test]
    fn header_only_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_train(dir.path(), "title,text,target\n");

        let err = load(dir.path(), offline("train", false)).expect_err("no rows");
        assert!(err.is_parse());
    }

    #[test]
    fn missing_file_offline_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load(dir.path(), offline("test", false)).expect_err("missing");
        assert!(matches!(err, UaDatasetsError::NotFound { path } if path.ends_with("test.csv")));
    }

    #[test]
    fn unsupported_split() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load(dir.path(), offline("val", false)).expect_err("unsupported");
        assert!(matches!(err, UaDatasetsError::UnsupportedSplit { .. }));
    }
}
