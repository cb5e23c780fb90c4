//! # wget
//!
//! 下载单个文件、按列表批量下载，或把单个网页及其嵌入资源（样式表、脚本、图片）
//! 镜像到本地并改写页面中的引用。
//!
//! ## 模块组织
//!
//! - `core` - 错误类型、运行选项与通用工具
//! - `env` - 环境变量配置
//! - `logging` - 日志初始化
//! - `mirror` - 单页镜像（路径映射、过滤、下载、改写）
//! - `network` - HTTP 会话、限速与单文件 / 批量下载
//! - `parsers` - HTML 解析与序列化
//! - `utils` - URL 工具函数

pub mod core;
pub mod env;
pub mod logging;
pub mod mirror;
pub mod network;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use crate::core::*;
pub use mirror::{FilterEngine, MirrorOptions, MirrorReport};
pub use network::*;
pub use utils::*;
