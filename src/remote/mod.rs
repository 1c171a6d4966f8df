//! Remote retrieval with retries and integrity checks.
//!
//! This module owns network-specific concerns. The byte transport sits
//! behind the [`Transport`] trait so loaders can run against a fake in tests;
//! [`fetch_text`] layers retry, backoff, checksum and decoding policy on top.

mod transport;

pub use transport::{progress_bar, UreqTransport};

use std::time::Duration;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::UaDatasetsError;

/// A failure reported by a [`Transport`]. Every variant is retryable.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Network(String),
}

/// Capability to fetch the raw bytes behind a URL.
pub trait Transport {
    /// Performs a single attempt with the given per-attempt timeout.
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, TransportError>;
}

/// Retry and integrity policy for [`fetch_text`].
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Maximum number of attempts (0 is treated as 1).
    pub max_retries: u32,
    /// Linear backoff: sleep `backoff_factor * attempt` seconds between attempts.
    pub backoff_factor: f64,
    /// Hex SHA-256 digest the raw bytes must match (case-insensitive).
    pub expected_sha256: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            max_retries: 3,
            backoff_factor: 0.5,
            expected_sha256: None,
        }
    }
}

impl FetchOptions {
    /// Delay to wait after the given (1-based) failed attempt.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let secs = self.backoff_factor * f64::from(attempt);
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Outcome of one failed attempt.
enum AttemptFailure {
    /// Worth another attempt (network, checksum, empty body, validator).
    Transient(String),
    /// Retrying cannot help (malformed URL, payload is not UTF-8).
    Fatal(String),
}

/// Downloads `url` and returns its content decoded as UTF-8.
///
/// Transient failures are retried up to `opts.max_retries` attempts in total,
/// sleeping between attempts. A payload that is not valid UTF-8 aborts
/// immediately. The optional `validate` predicate runs on the decoded text and
/// a rejection counts as a transient failure.
///
/// # Errors
/// Returns [`UaDatasetsError::Download`] once attempts are exhausted or on a
/// fatal decode failure. Partial content is never returned.
pub fn fetch_text(
    transport: &dyn Transport,
    url: &str,
    opts: &FetchOptions,
    validate: Option<&dyn Fn(&str) -> bool>,
) -> Result<String, UaDatasetsError> {
    let max_attempts = opts.max_retries.max(1);
    let mut last_failure = String::new();

    for attempt in 1..=max_attempts {
        debug!(url, attempt, max_attempts, "fetching");
        match fetch_once(transport, url, opts, validate) {
            Ok(text) => return Ok(text),
            Err(AttemptFailure::Fatal(message)) => {
                return Err(UaDatasetsError::Download {
                    url: url.to_string(),
                    attempts: attempt,
                    message,
                });
            }
            Err(AttemptFailure::Transient(message)) => {
                if attempt < max_attempts {
                    let delay = opts.backoff_for(attempt);
                    warn!(
                        url,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %message,
                        "download attempt failed; retrying"
                    );
                    std::thread::sleep(delay);
                } else {
                    warn!(url, attempt, error = %message, "download attempt failed; giving up");
                }
                last_failure = message;
            }
        }
    }

    Err(UaDatasetsError::Download {
        url: url.to_string(),
        attempts: max_attempts,
        message: last_failure,
    })
}

fn fetch_once(
    transport: &dyn Transport,
    url: &str,
    opts: &FetchOptions,
    validate: Option<&dyn Fn(&str) -> bool>,
) -> Result<String, AttemptFailure> {
    let bytes = transport
        .get(url, opts.timeout)
        .map_err(|source| match source {
            TransportError::InvalidUrl { .. } => AttemptFailure::Fatal(source.to_string()),
            _ => AttemptFailure::Transient(source.to_string()),
        })?;

    if let Some(expected) = opts.expected_sha256.as_deref() {
        let digest = sha256_hex(&bytes);
        if !digest.eq_ignore_ascii_case(expected.trim()) {
            return Err(AttemptFailure::Transient(format!(
                "SHA256 mismatch: expected {} got {}",
                expected, digest
            )));
        }
    }

    let text = String::from_utf8(bytes).map_err(|source| {
        AttemptFailure::Fatal(format!("content is not valid UTF-8: {source}"))
    })?;

    if text.trim().is_empty() {
        return Err(AttemptFailure::Transient(
            "downloaded content is empty or whitespace".to_string(),
        ));
    }

    if let Some(validate) = validate {
        if !validate(&text) {
            return Err(AttemptFailure::Transient(
                "validation predicate rejected content".to_string(),
            ));
        }
    }

    Ok(text)
}

/// Lowercase hex SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
