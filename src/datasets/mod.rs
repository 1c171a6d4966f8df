//! Dataset facades: resolve a split, parse it, expose typed records.
//!
//! Every dataset is built eagerly by its constructor, which returns
//! `Result<Self>`: a value either exists fully parsed or not at all.
//! Records and derived statistics are immutable afterwards.

pub mod news;
pub mod pos;
pub mod question_answering;

pub use news::{NewsClassificationDataset, NewsOptions};
pub use pos::{MovaInstitutePosDataset, PosOptions};
pub use question_answering::{
    load_ua_squad_v2, load_ua_squad_v2_with_transport, QaOptions, UaSquadDataset, UaSquadSplits,
};

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cache::Resolution;
use crate::error::UaDatasetsError;

/// Indexed, ordered access to a loaded dataset.
pub trait Corpus {
    /// What indexing yields; usually a borrow of one record.
    type Item<'a>
    where
        Self: 'a;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<Self::Item<'_>>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like [`Corpus::get`], but out-of-range access is an error.
    fn item_at(&self, index: usize) -> Result<Self::Item<'_>, UaDatasetsError> {
        self.get(index).ok_or(UaDatasetsError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Iterates items in load order.
    fn iter(&self) -> CorpusIter<'_, Self>
    where
        Self: Sized,
    {
        CorpusIter {
            corpus: self,
            next: 0,
            end: self.len(),
        }
    }
}

/// Iterator over a [`Corpus`].
pub struct CorpusIter<'a, C> {
    corpus: &'a C,
    next: usize,
    end: usize,
}

impl<'a, C: Corpus + 'a> Iterator for CorpusIter<'a, C> {
    type Item = C::Item<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let item = self.corpus.get(self.next);
        self.next += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a, C: Corpus + 'a> ExactSizeIterator for CorpusIter<'a, C> {}

/// Turns a resolution into a readable path for loaders that require a file.
///
/// A failed download surfaces as that download error; a missing file with
/// downloads disabled is [`UaDatasetsError::NotFound`] at `expected`.
pub(crate) fn require_file(
    resolution: Resolution,
    expected: PathBuf,
) -> Result<PathBuf, UaDatasetsError> {
    match resolution {
        Resolution::Cached(path) | Resolution::Downloaded(path) => Ok(path),
        Resolution::Unavailable {
            last_error: Some(err),
        } => Err(err),
        Resolution::Unavailable { last_error: None } => {
            Err(UaDatasetsError::NotFound { path: expected })
        }
    }
}

/// Counts occurrences of each label.
pub(crate) fn count_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Rejects splits outside `expected`.
pub(crate) fn check_split(split: &str, expected: &[&str]) -> Result<(), UaDatasetsError> {
    if expected.contains(&split) {
        Ok(())
    } else {
        Err(UaDatasetsError::UnsupportedSplit {
            split: split.to_string(),
            expected: expected.join(", "),
        })
    }
}
