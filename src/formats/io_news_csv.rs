//! News classification CSV reader.
//!
//! The file is a header row followed by one article per row. Columns are
//! looked up by (trimmed) header name, so their order does not matter:
//! - `title`, `text`, `target`: required
//! - `tags`: optional, `|`-separated
//!
//! Extra columns are kept in [`NewsTable::header`] but otherwise ignored.
//! Rows whose cells are all empty are skipped and rows shorter than the
//! header are padded with empty cells. Empty lines are ignored everywhere,
//! including before the header, so the header is the first non-empty line.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::UaDatasetsError;

pub const REQUIRED_COLUMNS: [&str; 3] = ["title", "text", "target"];
pub const TAGS_COLUMN: &str = "tags";

/// Positions of the known columns within a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewsColumns {
    pub title: usize,
    pub text: usize,
    pub target: usize,
    pub tags: Option<usize>,
}

/// Parsed contents of a news CSV file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsTable {
    /// Trimmed header names in file order.
    pub header: Vec<String>,
    pub columns: NewsColumns,
    /// Data rows, each padded to at least `header.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl NewsTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn title(&self, row: usize) -> Option<&str> {
        self.cell(row, self.columns.title)
    }

    pub fn text(&self, row: usize) -> Option<&str> {
        self.cell(row, self.columns.text)
    }

    pub fn target(&self, row: usize) -> Option<&str> {
        self.cell(row, self.columns.target)
    }

    /// Raw tags cell; empty when the file has no `tags` column.
    pub fn raw_tags(&self, row: usize) -> Option<&str> {
        match self.columns.tags {
            Some(col) => self.cell(row, col),
            None => self.rows.get(row).map(|_| ""),
        }
    }

    fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .map(|cells| cells.get(col).map(String::as_str).unwrap_or_default())
    }
}

/// Splits a raw tags cell on `|`, dropping empty segments.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split('|')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a news CSV file.
///
/// # Errors
/// Returns [`UaDatasetsError::NewsCsvParse`] for malformed CSV (including
/// invalid UTF-8) and [`UaDatasetsError::Parse`] when the header is missing
/// or lacks a required column.
pub fn read_news_csv(path: &Path) -> Result<NewsTable, UaDatasetsError> {
    let file = File::open(path).map_err(UaDatasetsError::Io)?;
    parse_news_reader(BufReader::new(file), path)
}

/// Reads a news table from a CSV string.
pub fn from_news_csv_str(csv: &str) -> Result<NewsTable, UaDatasetsError> {
    parse_news_reader(csv.as_bytes(), Path::new("<string>"))
}

/// Reads a news table from raw CSV bytes.
pub fn from_news_csv_slice(bytes: &[u8]) -> Result<NewsTable, UaDatasetsError> {
    parse_news_reader(bytes, Path::new("<bytes>"))
}

fn parse_news_reader<R: Read>(reader: R, path: &Path) -> Result<NewsTable, UaDatasetsError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let csv_error = |source: csv::Error| UaDatasetsError::NewsCsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut records = csv_reader.records();

    let header: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(csv_error)?
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
            .collect(),
        None => {
            return Err(UaDatasetsError::Parse {
                path: path.to_path_buf(),
                message: "CSV has no header row".to_string(),
            })
        }
    };

    let columns = locate_columns(&header, path)?;

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(csv_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.len() < header.len() {
            cells.resize(header.len(), String::new());
        }
        rows.push(cells);
    }

    Ok(NewsTable {
        header,
        columns,
        rows,
    })
}

fn locate_columns(header: &[String], path: &Path) -> Result<NewsColumns, UaDatasetsError> {
    let position = |name: &str| header.iter().position(|h| h == name);

    match (position("title"), position("text"), position("target")) {
        (Some(title), Some(text), Some(target)) => Ok(NewsColumns {
            title,
            text,
            target,
            tags: position(TAGS_COLUMN),
        }),
        (title, text, target) => {
            let mut missing: Vec<&str> = REQUIRED_COLUMNS
                .into_iter()
                .zip([title, text, target])
                .filter_map(|(name, found)| found.is_none().then_some(name))
                .collect();
            missing.sort_unstable();
            Err(UaDatasetsError::Parse {
                path: path.to_path_buf(),
                message: format!("CSV missing required columns: {}", missing.join(", ")),
            })
        }
    }
}
