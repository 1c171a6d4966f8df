//! Label statistics shared by every dataset.

mod report;

pub use report::{LabelCount, LabelHistogram};

use std::collections::BTreeMap;

/// Options for label statistics.
#[derive(Clone, Debug)]
pub struct StatsOptions {
    /// Number of top labels to show in the histogram.
    pub top_labels: usize,
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top_labels: 10,
            bar_width: 20,
        }
    }
}

/// Builds a histogram from a label frequency table.
///
/// Entries are sorted by count descending, ties broken by label, and
/// everything past `top_labels` is folded into `other_count`.
pub fn label_histogram(
    title: &str,
    frequencies: &BTreeMap<String, usize>,
    opts: &StatsOptions,
) -> LabelHistogram {
    let mut sorted: Vec<(&String, usize)> =
        frequencies.iter().map(|(label, count)| (label, *count)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total_distinct = sorted.len();
    let total_count = sorted.iter().map(|(_, count)| count).sum();

    let top_n = opts.top_labels;
    let entries: Vec<LabelCount> = sorted
        .iter()
        .take(top_n)
        .map(|(label, count)| LabelCount {
            label: (*label).clone(),
            count: *count,
        })
        .collect();
    let other_count = sorted.iter().skip(top_n).map(|(_, count)| count).sum();

    LabelHistogram {
        title: title.to_string(),
        top_n,
        total_distinct,
        total_count,
        entries,
        other_count,
        bar_width: opts.bar_width,
    }
}
