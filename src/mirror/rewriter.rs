//! 文档重写器
//!
//! 解析一个 HTML 文档，按固定顺序（link → img → script，同类按文档顺序）
//! 枚举嵌入资源引用，经过过滤后下载，并把引用改写为镜像根目录下的相对路径。
//! 单个资源失败不会中断整个页面。

use encoding_rs::Encoding;
use markup5ever_rcdom::{Handle, RcDom};
use tracing::{debug, info, warn};

use crate::mirror::fetcher::AssetFetcher;
use crate::mirror::filter::FilterEngine;
use crate::mirror::path_mapper::PathMapper;
use crate::parsers::html::{
    find_nodes, get_base_url, get_charset, get_node_attr, html_to_dom, parse_link_type,
    remove_base_url, serialize_document, set_node_attr, LinkType,
};
use crate::utils::url::{is_http_url, resolve_url, Url};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    Stylesheet,
    Script,
    Image,
}

/// One embedded-resource reference found in the document
#[derive(Clone, Debug)]
pub struct RemoteResource {
    pub url: Url,
    pub kind: ReferenceKind,
    pub attr_name: &'static str,
    node: Handle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// References now pointing at a local copy
    pub rewritten: usize,
    /// Excluded or rejected by the filter, never requested
    pub filtered: usize,
    /// Requested but not saved
    pub failed: usize,
}

/// Tag name → attribute that carries the reference, in processing order
const REFERENCE_ATTRIBUTES: [(&str, &str); 3] = [("link", "href"), ("img", "src"), ("script", "src")];

pub struct DocumentRewriter<'a> {
    mapper: &'a PathMapper,
    filter: &'a FilterEngine,
}

impl<'a> DocumentRewriter<'a> {
    pub fn new(mapper: &'a PathMapper, filter: &'a FilterEngine) -> Self {
        DocumentRewriter { mapper, filter }
    }

    /// Rewrites one document and returns its serialized bytes
    ///
    /// `charset` is the encoding announced by the server, if any; a valid
    /// `<meta charset>` in the document overrides it. Any `<base href>` is
    /// used for resolving and then dropped from the output.
    pub fn rewrite(
        &self,
        fetcher: &mut dyn AssetFetcher,
        data: &[u8],
        page_url: &Url,
        charset: Option<&str>,
    ) -> (Vec<u8>, RewriteReport) {
        let (dom, document_encoding) = parse_with_encoding(data, charset);
        let base_url = document_base_url(&dom, page_url);

        let mut report = RewriteReport::default();
        for resource in collect_references(&dom.document, &base_url) {
            self.process(fetcher, &resource, &mut report);
        }

        if remove_base_url(&dom.document) > 0 {
            debug!("Removed <base href> from {page_url}");
        }

        (serialize_document(dom, &document_encoding), report)
    }

    fn process(
        &self,
        fetcher: &mut dyn AssetFetcher,
        resource: &RemoteResource,
        report: &mut RewriteReport,
    ) {
        let url = &resource.url;

        let verdict = self.filter.check(url);
        if !verdict.is_pass() {
            info!("Skipped {url} because it {verdict}");
            report.filtered += 1;
            return;
        }

        let target = self.mapper.map(url);
        let outcome = fetcher.fetch(&target);

        if outcome.is_saved() {
            let reference = target.relative_reference();
            debug!("{:?} {url} -> {reference}", resource.kind);
            set_node_attr(&resource.node, resource.attr_name, Some(reference));
            report.rewritten += 1;
        } else {
            warn!("Keeping the original reference to {url}");
            report.failed += 1;
        }
    }
}

/// Decodes the document, honouring a valid in-document charset declaration
fn parse_with_encoding(data: &[u8], charset: Option<&str>) -> (RcDom, String) {
    let mut document_encoding = charset
        .filter(|c| Encoding::for_label_no_replacement(c.as_bytes()).is_some())
        .unwrap_or("utf-8")
        .to_string();

    let mut dom = html_to_dom(data, &document_encoding);

    if let Some(html_charset) = get_charset(&dom.document) {
        if let Some(declared) = Encoding::for_label_no_replacement(html_charset.as_bytes()) {
            let current = Encoding::for_label(document_encoding.as_bytes());
            if current != Some(declared) {
                document_encoding = html_charset;
                dom = html_to_dom(data, declared.name());
            }
        }
    }

    (dom, document_encoding)
}

/// Page URL, refined by the first `<base href>` when it resolves to HTTP(S)
fn document_base_url(dom: &RcDom, page_url: &Url) -> Url {
    get_base_url(&dom.document)
        .and_then(|href| resolve_url(page_url, href.trim()))
        .filter(is_http_url)
        .unwrap_or_else(|| page_url.clone())
}

/// Enumerates the references to mirror, kinds in fixed order, document order within a kind
pub fn collect_references(document: &Handle, base_url: &Url) -> Vec<RemoteResource> {
    let mut resources = Vec::new();

    for (tag, attr_name) in REFERENCE_ATTRIBUTES {
        for node in find_nodes(document, vec![tag]) {
            let Some(kind) = reference_kind(tag, &node) else {
                continue;
            };

            let Some(value) = get_node_attr(&node, attr_name) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match resolve_url(base_url, value) {
                Some(url) if is_http_url(&url) => resources.push(RemoteResource {
                    url,
                    kind,
                    attr_name,
                    node,
                }),
                _ => debug!("Ignoring non-HTTP reference {value:?}"),
            }
        }
    }

    resources
}

fn reference_kind(tag: &str, node: &Handle) -> Option<ReferenceKind> {
    match tag {
        "link" => {
            let rel = get_node_attr(node, "rel").unwrap_or_default();
            let types = parse_link_type(&rel);
            if types.contains(&LinkType::Stylesheet) {
                Some(ReferenceKind::Stylesheet)
            } else if types.iter().any(|t| t.is_embedded_asset()) {
                Some(ReferenceKind::Image)
            } else {
                None
            }
        }
        "img" => Some(ReferenceKind::Image),
        "script" => Some(ReferenceKind::Script),
        _ => None,
    }
}
