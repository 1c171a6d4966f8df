//! Local cache directory handling.
//!
//! Split files are materialized under a root directory with
//! [`write_atomic`], and located (or downloaded) by [`resolve::resolve_split`].

pub mod resolve;

pub use resolve::{resolve_split, DownloadOptions, Resolution, SplitFile, SplitFiles};

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::UaDatasetsError;

/// Writes `text` to `path` so readers never observe a partial file.
///
/// The content goes to a uniquely named temporary file in the same directory,
/// which is then persisted over `path` in one rename. Concurrent writers each
/// get their own temporary file; the last rename wins.
///
/// # Errors
/// Returns an IO error if the temporary file cannot be created, written or
/// persisted. The temporary file is removed on failure.
pub fn write_atomic(path: &Path, text: &str) -> Result<(), UaDatasetsError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
