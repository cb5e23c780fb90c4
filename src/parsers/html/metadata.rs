//! HTML 文档元数据处理模块
//!
//! - 获取和移除 base URL（`<base href>`）
//! - 处理字符编码声明（`<meta charset>` 与 `http-equiv="content-type"`）

use markup5ever_rcdom::Handle;

use crate::core::parse_content_type;

use super::dom::{find_nodes, get_node_attr, set_node_attr};

/// 获取文档的 base URL
///
/// 只有第一个 `<base>` 标签起作用
pub fn get_base_url(handle: &Handle) -> Option<String> {
    find_nodes(handle, vec!["html", "head", "base"])
        .first()
        .and_then(|base_node| get_node_attr(base_node, "href"))
        .filter(|href| !href.trim().is_empty())
}

/// 移除文档中所有 `<base>` 的 href
///
/// Once references point at local copies they must resolve against the
/// saved file itself. Returns how many elements were changed.
pub fn remove_base_url(document: &Handle) -> usize {
    let mut removed = 0;
    for base_node in find_nodes(document, vec!["base"]) {
        if get_node_attr(&base_node, "href").is_some() {
            set_node_attr(&base_node, "href", None);
            removed += 1;
        }
    }
    removed
}

/// 获取文档字符编码
///
/// 支持两种格式：
/// 1. HTML5 格式：`<meta charset="utf-8">`
/// 2. HTML4 格式：`<meta http-equiv="content-type" content="text/html; charset=utf-8">`
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, vec!["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                let (_media_type, charset) =
                    parse_content_type(&meta_content_type_node_attr_value);
                return Some(charset);
            }
        }
    }

    None
}
