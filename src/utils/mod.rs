//! # 工具模块
//!
//! - `url` - URL解析、相对引用解析、文件名推导等工具函数

pub mod url;

// Re-export commonly used items for convenience
pub use url::{
    file_name_from_url, is_http_url, network_location, parse_url, resolve_url,
    sanitize_path_segment, Url,
};
