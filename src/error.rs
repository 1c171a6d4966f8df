use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ua-datasets operations.
#[derive(Debug, Error)]
pub enum UaDatasetsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to download {url} after {attempts} attempt(s): {message}")]
    Download {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("Failed to decode QA JSON from {path}: {source}")]
    QaJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write QA JSON to {path}: {source}")]
    QaJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse news CSV from {path}: {source}")]
    NewsCsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Dataset not found at {path}. Enable download or ensure the file exists.")]
    NotFound { path: PathBuf },

    #[error("Unsupported split '{split}' (expected one of: {expected})")]
    UnsupportedSplit { split: String, expected: String },

    #[error("Index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl UaDatasetsError {
    /// True for structurally invalid or semantically empty content.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            UaDatasetsError::Parse { .. }
                | UaDatasetsError::QaJsonParse { .. }
                | UaDatasetsError::NewsCsvParse { .. }
        )
    }

    /// True when a remote fetch failed after exhausting its retries.
    pub fn is_download(&self) -> bool {
        matches!(self, UaDatasetsError::Download { .. })
    }
}
