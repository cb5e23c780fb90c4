//! HTML解析和处理模块
//!
//! - `utils`: 基础工具函数和常量
//! - `parser`: `rel` 链接类型解析
//! - `dom`: 基础DOM操作
//! - `metadata`: 文档元数据处理
//! - `serializer`: 序列化功能

pub mod dom;
pub mod metadata;
pub mod parser;
pub mod serializer;
pub mod utils;

pub use dom::{find_nodes, get_node_attr, html_to_dom, set_node_attr};
pub use metadata::{get_base_url, get_charset, remove_base_url};
pub use parser::{parse_link_type, LinkType};
pub use serializer::serialize_document;
pub use utils::is_favicon;
