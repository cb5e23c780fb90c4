//! # 单页镜像模块
//!
//! - `path_mapper` - URL → 本地路径映射
//! - `filter` - 排除 / 拒绝规则
//! - `fetcher` - 资源下载
//! - `rewriter` - 文档引用改写
//! - `orchestrator` - 镜像流程编排

pub mod fetcher;
pub mod filter;
pub mod orchestrator;
pub mod path_mapper;
pub mod rewriter;

pub use fetcher::{AssetFetcher, FetchOutcome, HttpFetcher};
pub use filter::{FilterEngine, FilterVerdict};
pub use orchestrator::{mirror, mirror_root_for, mirror_with, MirrorOptions, MirrorReport};
pub use path_mapper::{MirrorTarget, PathMapper, INDEX_FILE_NAME};
pub use rewriter::{DocumentRewriter, ReferenceKind, RemoteResource, RewriteReport};
