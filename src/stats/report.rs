//! Label histogram report types.
//!
//! The report is a plain serializable value with a box-drawn terminal
//! rendering via `Display`.

use std::fmt;

use serde::Serialize;

/// Frequency summary of a dataset's labels.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LabelHistogram {
    /// What is being counted ("Targets", "POS tags", "Answers").
    pub title: String,
    /// How many top labels to show.
    pub top_n: usize,
    /// Total distinct labels.
    pub total_distinct: usize,
    /// Sum of all counts.
    pub total_count: usize,
    /// Top entries, sorted by count descending then label ascending.
    pub entries: Vec<LabelCount>,
    /// Sum of counts for labels not in the top N.
    pub other_count: usize,
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// A single label with its count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

const INNER_WIDTH: usize = 59;
const LABEL_WIDTH: usize = 16;

impl fmt::Display for LabelHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = if self.total_distinct > self.top_n {
            format!("{} (top {} of {})", self.title, self.top_n, self.total_distinct)
        } else {
            format!("{} ({})", self.title, self.total_distinct)
        };

        writeln!(
            f,
            "┌─ {} {}┐",
            header,
            "─".repeat((INNER_WIDTH - 2).saturating_sub(header.chars().count()))
        )?;
        writeln!(f, "│{}│", " ".repeat(INNER_WIDTH))?;

        if self.entries.is_empty() {
            writeln!(f, "│   {:<56}│", "No labels found.")?;
        } else {
            let max_count = self.entries.iter().map(|e| e.count).max().unwrap_or(1);

            for entry in &self.entries {
                self.fmt_row(f, &truncate_label(&entry.label, LABEL_WIDTH), entry.count, max_count)?;
            }
            if self.other_count > 0 {
                self.fmt_row(f, "(other)", self.other_count, max_count)?;
            }
        }

        writeln!(f, "│{}│", " ".repeat(INNER_WIDTH))?;
        writeln!(f, "└{}┘", "─".repeat(INNER_WIDTH))?;

        Ok(())
    }
}

impl LabelHistogram {
    fn fmt_row(
        &self,
        f: &mut fmt::Formatter<'_>,
        label: &str,
        count: usize,
        max_count: usize,
    ) -> fmt::Result {
        let pct = if self.total_count > 0 {
            (count as f64 / self.total_count as f64) * 100.0
        } else {
            0.0
        };
        let bar = render_bar(count, max_count, self.bar_width);
        writeln!(
            f,
            "│   {:<16} {:>7} {:>5.1}%  {}│",
            label,
            format_number(count),
            pct,
            pad_bar(&bar, self.bar_width)
        )
    }
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let filled = (count * width) / max_count;
    let filled = filled.min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Pad a bar string to ensure consistent column alignment.
fn pad_bar(bar: &str, width: usize) -> String {
    let visual_len = bar.chars().count();
    let padding = (width + 2).saturating_sub(visual_len);
    format!("{}{}", bar, " ".repeat(padding))
}

/// Truncate a label to `max_len` characters, marking the cut with `…`.
fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        label.to_string()
    } else {
        let kept: String = label.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
