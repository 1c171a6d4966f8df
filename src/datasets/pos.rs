//! Mova Institute part-of-speech tagging dataset.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{count_labels, require_file, Corpus};
use crate::cache::{resolve_split, DownloadOptions, SplitFiles};
use crate::error::UaDatasetsError;
use crate::formats::io_conllu::read_conllu;
use crate::formats::TaggedSentence;
use crate::remote::{Transport, UreqTransport};
use crate::stats::{label_histogram, LabelHistogram, StatsOptions};

pub const MOVA_POS_URL: &str = "https://lab.mova.institute/files/robochyi_tb.conllu.txt";
pub const MOVA_POS_FILE_NAME: &str = "mova_institute_pos_dataset.txt";

/// Options for [`MovaInstitutePosDataset`].
#[derive(Clone, Debug)]
pub struct PosOptions {
    /// Cache file name under the root directory.
    pub file_name: String,
    /// Where to download the corpus from.
    pub data_url: String,
    pub download: DownloadOptions,
}

impl Default for PosOptions {
    fn default() -> Self {
        Self {
            file_name: MOVA_POS_FILE_NAME.to_string(),
            data_url: MOVA_POS_URL.to_string(),
            download: DownloadOptions::default(),
        }
    }
}

/// A loaded POS corpus: sentences of `(token, tag)` pairs.
#[derive(Clone, Debug)]
pub struct MovaInstitutePosDataset {
    dataset_path: PathBuf,
    sentences: Vec<TaggedSentence>,
    label_frequencies: BTreeMap<String, usize>,
    unique_labels: BTreeSet<String>,
}

impl MovaInstitutePosDataset {
    /// Loads the corpus, downloading it over HTTPS if needed.
    pub fn new(root: impl AsRef<Path>, opts: PosOptions) -> Result<Self, UaDatasetsError> {
        let transport = UreqTransport::new().with_progress(opts.download.show_progress);
        Self::with_transport(root, opts, &transport)
    }

    /// Loads the corpus using the given transport for any downloads.
    ///
    /// Fails like the news dataset: `NotFound` when offline without a cached
    /// file, `Download` when fetching failed, `Parse` for zero sentences.
    pub fn with_transport(
        root: impl AsRef<Path>,
        opts: PosOptions,
        transport: &dyn Transport,
    ) -> Result<Self, UaDatasetsError> {
        let root = root.as_ref();
        let files = SplitFiles::single("all", &opts.file_name, &opts.data_url);
        let resolution = resolve_split(root, &files, &opts.download, transport, None)?;
        let path = require_file(resolution, root.join(&opts.file_name))?;

        let sentences = read_conllu(&path)?;
        if sentences.is_empty() {
            return Err(UaDatasetsError::Parse {
                path,
                message: "parsed zero sentences; file may be empty or malformed".to_string(),
            });
        }

        let label_frequencies = count_labels(
            sentences
                .iter()
                .flat_map(|sent| sent.tags())
                .map(String::as_str),
        );
        let unique_labels = label_frequencies.keys().cloned().collect();

        debug!(path = %path.display(), sentences = sentences.len(), "loaded POS corpus");
        Ok(Self {
            dataset_path: path,
            sentences,
            label_frequencies,
            unique_labels,
        })
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn sentences(&self) -> &[TaggedSentence] {
        &self.sentences
    }

    pub fn unique_labels(&self) -> &BTreeSet<String> {
        &self.unique_labels
    }

    /// Occurrence count of each tag over the whole corpus.
    pub fn label_frequencies(&self) -> &BTreeMap<String, usize> {
        &self.label_frequencies
    }

    pub fn label_stats(&self, opts: &StatsOptions) -> LabelHistogram {
        label_histogram("POS tags", &self.label_frequencies, opts)
    }
}

impl Corpus for MovaInstitutePosDataset {
    type Item<'a> = &'a TaggedSentence;

    fn len(&self) -> usize {
        self.sentences.len()
    }

    fn get(&self, index: usize) -> Option<&TaggedSentence> {
        self.sentences.get(index)
    }
}

impl<'a> IntoIterator for &'a MovaInstitutePosDataset {
    type Item = &'a TaggedSentence;
    type IntoIter = std::slice::Iter<'a, TaggedSentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

impl fmt::Display for MovaInstitutePosDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MovaInstitutePosDataset(n_sentences={}, unique_labels={})",
            self.sentences.len(),
            self.unique_labels.len()
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

    fn offline() -> PosOptions {
        PosOptions {
            download: DownloadOptions::offline(),
            ..PosOptions::default()
        }
    }

    #[test]
    fn loads_sentences_and_counts_tags() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(MOVA_POS_FILE_NAME),
            "# sent_id = 1\n1\tЯ\tя\tPRON\n2\tбачу\tбачити\tVERB\n\n1\tТи\tти\tPRON\n",
        )
        .expect("write");

        let ds = MovaInstitutePosDataset::with_transport(dir.path(), offline(), &Offline)
            .expect("load");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.label_frequencies().get("PRON"), Some(&2));
        assert_eq!(ds.unique_labels().len(), 2);
        assert_eq!(ds.item_at(1).expect("second").tokens(), ["Ти"]);
        assert_eq!(
            ds.to_string(),
            "MovaInstitutePosDataset(n_sentences=2, unique_labels=2)"
        );
    }

    #[test]
    fn comment_only_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(MOVA_POS_FILE_NAME), "# nothing\n").expect("write");

        let err = MovaInstitutePosDataset::with_transport(dir.path(), offline(), &Offline)
            .expect_err("empty");
        assert!(err.is_parse());
    }

    #[test]
    fn custom_file_name_missing_offline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let opts = PosOptions {
            file_name: "custom.conllu".into(),
            ..offline()
        };
        let err = MovaInstitutePosDataset::with_transport(dir.path(), opts, &Offline)
            .expect_err("missing");
        assert!(matches!(err, UaDatasetsError::NotFound { path } if path.ends_with("custom.conllu")));
    }
}
