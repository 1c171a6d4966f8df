use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::write_atomic;
use crate::error::UaDatasetsError;
use crate::remote::{fetch_text, FetchOptions, Transport};

/// Download and cache behaviour shared by every dataset loader.
///
/// Deserializable so it can be read from a config file; missing fields take
/// their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DownloadOptions {
    /// Fetch the split if no local candidate exists.
    pub download: bool,
    /// Re-download even when a local candidate exists.
    pub force_download: bool,
    /// Maximum download attempts per candidate URL.
    pub max_retries: u32,
    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,
    /// Linear backoff factor in seconds.
    pub backoff_factor: f64,
    /// Hex SHA-256 digest the downloaded bytes must match.
    pub expected_sha256: Option<String>,
    /// Print a progress line to stderr while downloading.
    pub show_progress: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            download: true,
            force_download: false,
            max_retries: 3,
            timeout_secs: 20,
            backoff_factor: 0.5,
            expected_sha256: None,
            show_progress: true,
        }
    }
}

impl DownloadOptions {
    /// Options for loading strictly from an existing cache.
    pub fn offline() -> Self {
        Self {
            download: false,
            ..Self::default()
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            backoff_factor: self.backoff_factor,
            expected_sha256: self.expected_sha256.clone(),
        }
    }
}

/// One acceptable cache file for a split and where to fetch it from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitFile {
    pub file_name: String,
    pub url: String,
}

/// Ordered candidate files for a split; earlier entries win.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitFiles {
    pub split: String,
    pub candidates: Vec<SplitFile>,
}

impl SplitFiles {
    /// Candidates whose remote URL is `base_url + file_name`.
    pub fn from_base<S: AsRef<str>>(split: &str, base_url: &str, file_names: &[S]) -> Self {
        Self {
            split: split.to_string(),
            candidates: file_names
                .iter()
                .map(|name| SplitFile {
                    file_name: name.as_ref().to_string(),
                    url: format!("{base_url}{}", name.as_ref()),
                })
                .collect(),
        }
    }

    /// A single cache file fetched from an explicit URL.
    pub fn single(split: &str, file_name: &str, url: &str) -> Self {
        Self {
            split: split.to_string(),
            candidates: vec![SplitFile {
                file_name: file_name.to_string(),
                url: url.to_string(),
            }],
        }
    }

    /// Where the primary candidate lives (or would live) under `root`.
    pub fn primary_path(&self, root: &Path) -> Option<PathBuf> {
        self.candidates
            .first()
            .map(|candidate| root.join(&candidate.file_name))
    }
}

/// Result of resolving a split to a local file.
#[derive(Debug)]
pub enum Resolution {
    /// An existing local candidate was used without network access.
    Cached(PathBuf),
    /// A candidate was downloaded and written atomically.
    Downloaded(PathBuf),
    /// No file is available. Carries the last download error if one was
    /// attempted; `None` means downloading was disabled.
    Unavailable { last_error: Option<UaDatasetsError> },
}

impl Resolution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Resolution::Cached(path) | Resolution::Downloaded(path) => Some(path),
            Resolution::Unavailable { .. } => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Resolution::Cached(path) | Resolution::Downloaded(path) => Some(path),
            Resolution::Unavailable { .. } => None,
        }
    }
}

/// Locates the cache file for a split, downloading it when needed.
///
/// - Creates `root` (and parents) if missing.
/// - Without `force_download`, the first existing candidate wins and no
///   network access happens.
/// - With downloading disabled an existing candidate is still used, even
///   when `force_download` is set; otherwise the split is unavailable.
/// - Otherwise candidates are fetched in order and the first success is
///   written atomically. Failed downloads move on to the next candidate.
///
/// # Errors
/// Download failures are folded into [`Resolution::Unavailable`]; only local
/// IO failures (creating `root`, writing the cache file) are returned.
pub fn resolve_split(
    root: &Path,
    files: &SplitFiles,
    opts: &DownloadOptions,
    transport: &dyn Transport,
    validate: Option<&dyn Fn(&str) -> bool>,
) -> Result<Resolution, UaDatasetsError> {
    fs::create_dir_all(root)?;

    let existing = files
        .candidates
        .iter()
        .map(|candidate| root.join(&candidate.file_name))
        .find(|path| path.exists());

    if let Some(path) = existing {
        if !opts.force_download || !opts.download {
            debug!(split = %files.split, path = %path.display(), "cache hit");
            return Ok(Resolution::Cached(path));
        }
    }

    if !opts.download {
        debug!(split = %files.split, root = %root.display(), "no cached split and download disabled");
        return Ok(Resolution::Unavailable { last_error: None });
    }

    let fetch_opts = opts.fetch_options();
    let mut last_error = None;

    for candidate in &files.candidates {
        let path = root.join(&candidate.file_name);
        match fetch_text(transport, &candidate.url, &fetch_opts, validate) {
            Ok(text) => {
                write_atomic(&path, &text)?;
                info!(
                    split = %files.split,
                    url = %candidate.url,
                    path = %path.display(),
                    bytes = text.len(),
                    "downloaded split"
                );
                return Ok(Resolution::Downloaded(path));
            }
            Err(err) if err.is_download() => {
                warn!(split = %files.split, url = %candidate.url, error = %err, "candidate download failed");
                last_error = Some(err);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(Resolution::Unavailable { last_error })
}
