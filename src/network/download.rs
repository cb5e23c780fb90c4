//! 单文件 / 批量下载
//!
//! 目标文件只在确认 2xx 状态之后才会被打开；
//! 若正文读取中途失败，已写入的部分文件会被删除。

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use reqwest::blocking::Response;
use reqwest::header::CONTENT_LENGTH;
use tracing::{error, info, warn};

use crate::core::{format_megabytes, timestamp_now, WgetError, WgetResult};
use crate::network::rate_limit::{RateLimit, RateLimitedStreamer, StreamError, StreamStats};
use crate::network::session::Session;
use crate::utils::url::{file_name_from_url, parse_url, Url};

/// Name used when neither a rename nor the URL provides one
pub const DEFAULT_FILE_NAME: &str = "default_filename.ext";

/// Parameters of a single-file download, shared by every URL of a batch
#[derive(Clone, Debug, Default)]
pub struct DownloadRequest {
    pub rename: Option<String>,
    pub destination: Option<String>,
    pub rate_limit: RateLimit,
}

#[derive(Clone, Debug)]
pub struct DownloadReport {
    pub url: Url,
    pub path: PathBuf,
    pub content_length: Option<u64>,
    pub stats: StreamStats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Works out where a download of `url` lands on disk
///
/// Filename: rename > last URL path segment > `DEFAULT_FILE_NAME`.
/// Directory: destination (with `~` expanded) or the working directory.
/// If the result is an existing directory the file goes inside it under
/// `DEFAULT_FILE_NAME`.
pub fn resolve_destination(url: &Url, rename: Option<&str>, destination: Option<&str>) -> PathBuf {
    let file_name = match rename.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => file_name_from_url(url).unwrap_or_else(|| {
            warn!("No file name found in {url}");
            DEFAULT_FILE_NAME.to_string()
        }),
    };

    let path = match destination.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(shellexpand::tilde(dir).into_owned()).join(&file_name),
        None => PathBuf::from(&file_name),
    };

    if path.is_dir() {
        warn!(
            "File path points to a directory, not a file: {}",
            path.display()
        );
        return path.join(DEFAULT_FILE_NAME);
    }

    path
}

/// Streams a successful response into `path`, truncating any existing file
///
/// On a broken body stream the partially written file is removed.
pub fn write_response_to_file(
    response: &mut Response,
    path: &Path,
    streamer: &RateLimitedStreamer,
) -> WgetResult<StreamStats> {
    let url = response.url().to_string();
    let file = File::create(path).map_err(|e| WgetError::filesystem(path, e))?;
    let mut writer = BufWriter::new(file);

    match streamer.copy(response, &mut writer) {
        Ok(stats) => Ok(stats),
        Err(e) => {
            drop(writer);
            let _ = fs::remove_file(path);
            Err(match e {
                StreamError::Read(source) => WgetError::Stream { url, source },
                StreamError::Write(source) => WgetError::filesystem(path, source),
            })
        }
    }
}

/// Downloads one URL to its resolved destination and reports progress
pub fn download_file(
    session: &Session,
    target: &str,
    request: &DownloadRequest,
) -> WgetResult<DownloadReport> {
    let url = parse_url(target)?;
    let path = resolve_destination(&url, request.rename.as_deref(), request.destination.as_deref());
    info!("start at: {}", timestamp_now());

    let mut response = match session.get_success(&url) {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to download file: {e}");
            return Err(e);
        }
    };

    let status = response.status();
    info!(
        "sending request, awaiting response... {} [ {} ]",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );

    let content_length = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    match content_length {
        Some(len) => info!("content size: {} [~{} MB]", len, format_megabytes(len)),
        None => info!("content size: Unknown"),
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| WgetError::filesystem(parent, e))?;
    }

    let streamer = RateLimitedStreamer::new(request.rate_limit);
    let stats = match write_response_to_file(&mut response, &path, &streamer) {
        Ok(stats) => stats,
        Err(e) => {
            error!("Failed to download file: {e}");
            return Err(e);
        }
    };

    let shown = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
    info!("saving file to: {}", shown.display());
    info!("Downloaded [{url}]");
    info!("finished at: {}", timestamp_now());

    Ok(DownloadReport {
        url,
        path,
        content_length,
        stats,
    })
}

/// Reads URLs from a newline-delimited list; blanks and `#` comments are skipped
pub fn read_url_list(input_file: &Path) -> WgetResult<Vec<String>> {
    let contents =
        fs::read_to_string(input_file).map_err(|e| WgetError::filesystem(input_file, e))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Downloads every URL of the list in order; one failure doesn't stop the rest
pub fn download_batch(
    session: &Session,
    input_file: &Path,
    request: &DownloadRequest,
) -> WgetResult<BatchSummary> {
    let urls = read_url_list(input_file)?;
    let mut summary = BatchSummary::default();

    for url in urls {
        match download_file(session, &url, request) {
            Ok(_) => summary.succeeded += 1,
            Err(e) => {
                warn!("Skipping {url}: {e}");
                summary.failed += 1;
            }
        }
    }

    info!(
        "Batch finished: {} downloaded, {} failed",
        summary.succeeded, summary.failed
    );

    Ok(summary)
}
