//! URL 到本地路径的映射
//!
//! 本地目录结构与 URL 路径结构一一对应：
//! `https://host/a/b.png` 在镜像根目录下对应 `a/b.png`

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::core::{WgetError, WgetResult};
use crate::utils::url::{sanitize_path_segment, Url};

/// File name used for the root page and for directory-style URLs
pub const INDEX_FILE_NAME: &str = "index.html";

/// Characters escaped when a local path goes back into an HTML attribute
const REFERENCE_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Resolved local location of one remote resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MirrorTarget {
    pub remote_url: Url,
    pub local_directory: PathBuf,
    pub local_filename: String,
    /// Directory segments below the mirror root, already sanitised
    directory_segments: Vec<String>,
}

impl MirrorTarget {
    pub fn local_path(&self) -> PathBuf {
        self.local_directory.join(&self.local_filename)
    }

    /// Path of the local copy relative to the mirror root, as written into the document
    pub fn relative_reference(&self) -> String {
        self.directory_segments
            .iter()
            .chain(std::iter::once(&self.local_filename))
            .map(|segment| utf8_percent_encode(segment, REFERENCE_SEGMENT_ENCODE_SET).to_string())
            .collect::<Vec<String>>()
            .join("/")
    }

    /// Creates the target directory and every missing parent
    pub fn ensure_directory(&self) -> WgetResult<()> {
        ensure_directory(&self.local_directory)
    }
}

/// Idempotent `mkdir -p`; an already existing directory is not an error
pub fn ensure_directory(path: &Path) -> WgetResult<()> {
    fs::create_dir_all(path).map_err(|e| WgetError::filesystem(path, e))
}

/// Maps remote URLs onto paths below one mirror root
#[derive(Clone, Debug)]
pub struct PathMapper {
    root: PathBuf,
}

impl PathMapper {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn map(&self, url: &Url) -> MirrorTarget {
        let mut segments: Vec<String> = url
            .path_segments()
            .map(|segments| segments.map(sanitize_path_segment).collect())
            .unwrap_or_default();

        // The last segment is the file name even when it is empty ("/dir/")
        let last = segments.pop().unwrap_or_default();
        let local_filename = if is_traversable(&last) {
            last
        } else {
            INDEX_FILE_NAME.to_string()
        };

        let directory_segments: Vec<String> = segments
            .into_iter()
            .filter(|segment| is_traversable(segment))
            .collect();

        let local_directory = directory_segments
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment));

        MirrorTarget {
            remote_url: url.clone(),
            local_directory,
            local_filename,
            directory_segments,
        }
    }
}

/// Segments that would be empty or step outside their parent are dropped
fn is_traversable(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".."
}
