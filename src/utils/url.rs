use percent_encoding::percent_decode_str;
pub use url::Url;

use crate::core::{WgetError, WgetResult};

/// Characters that never make it into a local file name
const UNSAFE_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

pub fn parse_url(input: &str) -> WgetResult<Url> {
    Url::parse(input.trim()).map_err(|source| WgetError::InvalidUrl {
        url: input.to_string(),
        source,
    })
}

/// Resolves a reference found in a document against that document's URL
///
/// Handles absolute (`https://cdn/x.js`), protocol-relative (`//cdn/x.js`)
/// and relative (`x.js`, `/x.js`, `../x.js`) forms. Returns `None` when the
/// reference can't be turned into a URL at all.
pub fn resolve_url(from: &Url, to: &str) -> Option<Url> {
    match Url::parse(to) {
        Ok(parsed) => Some(parsed),
        Err(_) => from.join(to).ok(),
    }
}

pub fn is_http_url(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}

/// `host[:port]` of the URL, the default name of a mirror root
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Percent-decodes one path segment and strips characters that are unsafe in file names
pub fn sanitize_path_segment(segment: &str) -> String {
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    decoded
        .chars()
        .filter(|c| !UNSAFE_FILE_NAME_CHARS.contains(c) && !c.is_control())
        .collect()
}

/// Last non-empty path segment of the URL, ready to be used as a file name
pub fn file_name_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.last()?;
    let name = sanitize_path_segment(last);

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}
