use std::fs;
use std::path::PathBuf;

use tracing::{error, info};

use crate::core::{WgetError, WgetResult};
use crate::mirror::fetcher::{AssetFetcher, HttpFetcher};
use crate::mirror::filter::FilterEngine;
use crate::mirror::path_mapper::{ensure_directory, PathMapper, INDEX_FILE_NAME};
use crate::mirror::rewriter::{DocumentRewriter, RewriteReport};
use crate::network::session::Session;
use crate::utils::url::{network_location, Url};

#[derive(Clone, Debug, Default)]
pub struct MirrorOptions {
    /// Overrides the mirror root (`~` is expanded)
    pub destination: Option<String>,
    pub filter: FilterEngine,
}

#[derive(Clone, Debug)]
pub struct MirrorReport {
    pub root: PathBuf,
    pub index_path: PathBuf,
    pub rewrite: RewriteReport,
}

/// Mirror root for `url`: the destination when given, else `host[:port]`
pub fn mirror_root_for(url: &Url, destination: Option<&str>) -> WgetResult<PathBuf> {
    if let Some(dir) = destination {
        return Ok(PathBuf::from(shellexpand::tilde(dir).into_owned()));
    }

    network_location(url)
        .map(PathBuf::from)
        .ok_or_else(|| WgetError::Usage(format!("{url} has no host to mirror")))
}

/// Mirrors one page and its direct embedded resources
pub fn mirror(session: &Session, url: &Url, options: &MirrorOptions) -> WgetResult<MirrorReport> {
    let mut fetcher = HttpFetcher::new(session);
    mirror_with(session, &mut fetcher, url, options)
}

/// Same as [`mirror`], with the asset fetches going through `fetcher`
///
/// The root page itself is always retrieved through `session`; a failure there
/// aborts the run before anything is written under the root.
pub fn mirror_with(
    session: &Session,
    fetcher: &mut dyn AssetFetcher,
    url: &Url,
    options: &MirrorOptions,
) -> WgetResult<MirrorReport> {
    let root = mirror_root_for(url, options.destination.as_deref())?;
    ensure_directory(&root)?;
    info!("Mirroring {url} into {}", root.display());

    let document = session.retrieve_document(url).map_err(|e| {
        error!("Failed to retrieve {url}: {e}");
        e
    })?;

    let mapper = PathMapper::new(root.clone());
    let rewriter = DocumentRewriter::new(&mapper, &options.filter);
    let charset = Some(document.charset.as_str()).filter(|c| !c.is_empty());
    let (html, rewrite) = rewriter.rewrite(fetcher, &document.data, &document.final_url, charset);

    let index_path = root.join(INDEX_FILE_NAME);
    fs::write(&index_path, html).map_err(|e| {
        let e = WgetError::filesystem(&index_path, e);
        error!("{e}");
        e
    })?;

    info!(
        "Saved {} ({} rewritten, {} filtered, {} failed)",
        index_path.display(),
        rewrite.rewritten,
        rewrite.filtered,
        rewrite.failed
    );

    Ok(MirrorReport {
        root,
        index_path,
        rewrite,
    })
}
