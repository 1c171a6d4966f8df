use std::io::Read;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::{Transport, TransportError};

const CHUNK_SIZE: usize = 8192;

/// HTTP(S) transport backed by a `ureq` agent.
#[derive(Clone, Debug, Default)]
pub struct UreqTransport {
    show_progress: bool,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an `indicatif` progress bar on stderr while downloading.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let parsed = url::Url::parse(url).map_err(|source| TransportError::InvalidUrl {
            url: url.to_string(),
            message: source.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl {
                url: url.to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: ureq::Agent = config.into();

        let mut response = agent.get(parsed.as_str()).call().map_err(map_ureq_error)?;

        let total = response
            .headers()
            .get("content-length")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let mut reader = response.body_mut().as_reader();
        read_body(&mut reader, url, total, self.show_progress)
            .map_err(|source| TransportError::Network(source.to_string()))
    }
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match &err {
        ureq::Error::StatusCode(code) => TransportError::Status(*code),
        ureq::Error::Timeout(_) => TransportError::Timeout(err.to_string()),
        _ => TransportError::Network(err.to_string()),
    }
}

fn read_body(
    reader: &mut dyn Read,
    url: &str,
    total: Option<u64>,
    show_progress: bool,
) -> std::io::Result<Vec<u8>> {
    if !show_progress {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        return Ok(buf);
    }

    let pb = progress_bar(url, total);
    let mut buf = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(err) => {
                pb.abandon();
                return Err(err);
            }
        };
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        pb.inc(n as u64);
    }
    pb.finish_and_clear();
    Ok(buf)
}

/// Builds the stderr progress indicator for one download.
///
/// A bar when the content length is known, a byte-counting spinner otherwise.
pub fn progress_bar(url: &str, total: Option<u64>) -> ProgressBar {
    let (pb, template) = match total {
        Some(total) if total > 0 => (
            ProgressBar::new(total),
            "{msg} [{bar:30}] {percent:>3}% ({bytes}/{total_bytes})",
        ),
        _ => (ProgressBar::new_spinner(), "{spinner} {msg} {bytes}"),
    };
    if let Ok(style) = ProgressStyle::with_template(template) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(format!("Downloading {url}"));
    pb
}
