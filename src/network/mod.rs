//! # 网络模块
//!
//! - `session` - HTTP会话管理（阻塞客户端、超时、User-Agent）
//! - `rate_limit` - 分块限速写入
//! - `download` - 单文件与批量下载

pub mod download;
pub mod rate_limit;
pub mod session;

// Re-export commonly used items for convenience
pub use download::{download_batch, download_file, BatchSummary, DownloadReport, DownloadRequest};
pub use rate_limit::{RateLimit, RateLimitedStreamer};
pub use session::{Document, Session};
