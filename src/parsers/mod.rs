//! # 解析器模块
//!
//! - `html` - HTML文档解析、DOM操作、元数据处理、序列化

pub mod html;

// Re-export commonly used items for convenience
pub use html::{
    find_nodes, get_base_url, get_charset, get_node_attr, html_to_dom, serialize_document,
    set_node_attr,
};
