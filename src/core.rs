use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use reqwest::StatusCode;
use thiserror::Error;

/// Represents errors that can occur while downloading or mirroring
///
/// Per-asset failures inside a mirror run never surface as this type;
/// they are logged and turned into an empty `FetchOutcome` instead.
#[derive(Debug, Error)]
pub enum WgetError {
    /// Missing or contradictory command-line input
    #[error("{0}")]
    Usage(String),

    /// Directory or file creation/write failure
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Connection failure or timeout
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body broke off while being read
    #[error("reading the body of {url} failed: {source}")]
    Stream {
        url: String,
        #[source]
        source: io::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("invalid URL \"{url}\": {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// An environment variable holds a value that can't be used
    #[error("environment variable '{variable}': {message}")]
    Config { variable: String, message: String },
}

impl WgetError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WgetError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        WgetError::Transport {
            url: url.into(),
            source,
        }
    }
}

pub type WgetResult<T> = Result<T, WgetError>;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("wget-rs/", env!("CARGO_PKG_VERSION"));

/// Configuration options shared by every request of one run
///
/// Values come from CLI flags first, then `WGET_*` environment variables,
/// then the defaults above.
#[derive(Clone, Debug)]
pub struct WgetOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for WgetOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Parses Content-Type header value
///
/// Returns `(media_type, charset)`; either is empty when absent.
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut media_type = String::new();
    let mut charset = String::new();

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("charset=") {
            charset = value.trim_matches('"').to_string();
        }
    }

    (media_type, charset)
}

/// Local wall-clock time in the format used by the download report
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Human-readable size in decimal megabytes, rounded to two places
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1_000_000.0)
}
