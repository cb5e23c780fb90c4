//! HTML 解析器模块
//!
//! 解析 `<link>` 元素的 `rel` 属性，识别哪些链接指向可镜像的嵌入资源。
//!
//! ```rust
//! use wget::parsers::html::parser::{parse_link_type, LinkType};
//!
//! let link_types = parse_link_type("stylesheet preload");
//! assert_eq!(link_types, vec![LinkType::Stylesheet, LinkType::Preload]);
//! ```

use super::utils::is_favicon;

/// HTML链接类型枚举
///
/// 表示HTML `<link>` 元素中 `rel` 属性的不同类型值。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkType {
    /// 备用版本链接 - 指向文档的替代版本（如不同语言版本）
    Alternate,
    /// Apple设备触摸图标
    AppleTouchIcon,
    /// DNS预取 - 只是域名，没有可下载的内容
    DnsPrefetch,
    /// 网站图标
    Favicon,
    /// 预加载资源
    Preload,
    /// CSS样式表
    Stylesheet,
}

impl LinkType {
    /// Whether the link's `href` points at something the page embeds
    pub fn is_embedded_asset(&self) -> bool {
        matches!(
            self,
            LinkType::Stylesheet | LinkType::Favicon | LinkType::AppleTouchIcon
        )
    }
}

/// 解析HTML链接的rel属性值
///
/// 支持多个空格分隔的rel值，不区分大小写；不支持的rel值会被忽略。
pub fn parse_link_type(link_attr_rel_value: &str) -> Vec<LinkType> {
    let mut types: Vec<LinkType> = vec![];

    for link_attr_rel_type in link_attr_rel_value.split_whitespace() {
        if link_attr_rel_type.eq_ignore_ascii_case("alternate") {
            types.push(LinkType::Alternate);
        } else if link_attr_rel_type.eq_ignore_ascii_case("dns-prefetch") {
            types.push(LinkType::DnsPrefetch);
        } else if link_attr_rel_type.eq_ignore_ascii_case("preload") {
            types.push(LinkType::Preload);
        } else if link_attr_rel_type.eq_ignore_ascii_case("stylesheet") {
            types.push(LinkType::Stylesheet);
        } else if is_favicon(link_attr_rel_type) {
            types.push(LinkType::Favicon);
        } else if link_attr_rel_type.eq_ignore_ascii_case("apple-touch-icon") {
            types.push(LinkType::AppleTouchIcon);
        }
    }

    types
}
