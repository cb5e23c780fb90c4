use std::path::PathBuf;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::mirror::path_mapper::MirrorTarget;
use crate::network::download::write_response_to_file;
use crate::network::rate_limit::{RateLimit, RateLimitedStreamer};
use crate::network::session::Session;

/// Chunk size used when persisting mirrored assets
pub const ASSET_CHUNK_SIZE: usize = 8192;

/// Result of one fetch attempt
///
/// `local_path` is `None` for every failure; the caller then leaves the
/// original reference untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub local_path: Option<PathBuf>,
    pub status: Option<StatusCode>,
}

impl FetchOutcome {
    pub fn none() -> Self {
        FetchOutcome::default()
    }

    pub fn saved(local_path: PathBuf, status: StatusCode) -> Self {
        FetchOutcome {
            local_path: Some(local_path),
            status: Some(status),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.local_path.is_some()
    }
}

/// Persists one remote resource at its mirror target
///
/// Implementations never fail outward: problems are logged and reported as
/// an empty outcome.
pub trait AssetFetcher {
    fn fetch(&mut self, target: &MirrorTarget) -> FetchOutcome;
}

/// Fetches assets over HTTP with the run's session
pub struct HttpFetcher<'a> {
    session: &'a Session,
    streamer: RateLimitedStreamer,
}

impl<'a> HttpFetcher<'a> {
    pub fn new(session: &'a Session) -> Self {
        HttpFetcher {
            session,
            streamer: RateLimitedStreamer::new(RateLimit::unlimited())
                .with_chunk_size(ASSET_CHUNK_SIZE),
        }
    }
}

impl AssetFetcher for HttpFetcher<'_> {
    fn fetch(&mut self, target: &MirrorTarget) -> FetchOutcome {
        let url = &target.remote_url;

        let mut response = match self.session.get(url) {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to download {url}: {e}");
                return FetchOutcome::none();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Failed to download {url}: HTTP {status}");
            return FetchOutcome {
                local_path: None,
                status: Some(status),
            };
        }

        if let Err(e) = target.ensure_directory() {
            warn!("Failed to download {url}: {e}");
            return FetchOutcome {
                local_path: None,
                status: Some(status),
            };
        }

        let path = target.local_path();
        match write_response_to_file(&mut response, &path, &self.streamer) {
            Ok(stats) => {
                debug!("Saved {url} to {} ({} bytes)", path.display(), stats.bytes);
                FetchOutcome::saved(path, status)
            }
            Err(e) => {
                warn!("Failed to download {url}: {e}");
                FetchOutcome {
                    local_path: None,
                    status: Some(status),
                }
            }
        }
    }
}
