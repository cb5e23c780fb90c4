//! 统一的环境变量管理系统
//!
//! 类型安全、可验证的环境变量访问；命令行参数优先于这里的值

use std::env;
use std::fmt;
use std::time::Duration;

use crate::core::{
    WgetError, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

impl From<EnvError> for WgetError {
    fn from(e: EnvError) -> Self {
        WgetError::Config {
            variable: e.variable,
            message: e.message,
        }
    }
}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn default_value() -> Option<T>;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::default_value().ok_or_else(|| EnvError {
                variable: Self::NAME.to_string(),
                message: "Required environment variable not set".to_string(),
            }),
        }
    }
}

/// 请求总超时（秒）
pub struct Timeout;
impl EnvVar<Duration> for Timeout {
    const NAME: &'static str = "WGET_TIMEOUT";
    const DESCRIPTION: &'static str = "Whole-request timeout in seconds (1-3600)";

    fn default_value() -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }

    fn parse(value: &str) -> EnvResult<Duration> {
        parse_seconds(value, Self::NAME, 1, 3600)
    }
}

/// 连接超时（秒）
pub struct ConnectTimeout;
impl EnvVar<Duration> for ConnectTimeout {
    const NAME: &'static str = "WGET_CONNECT_TIMEOUT";
    const DESCRIPTION: &'static str = "Connect timeout in seconds (1-600)";

    fn default_value() -> Option<Duration> {
        Some(DEFAULT_CONNECT_TIMEOUT)
    }

    fn parse(value: &str) -> EnvResult<Duration> {
        parse_seconds(value, Self::NAME, 1, 600)
    }
}

pub struct UserAgent;
impl EnvVar<String> for UserAgent {
    const NAME: &'static str = "WGET_USER_AGENT";
    const DESCRIPTION: &'static str = "User-Agent header sent with every request";

    fn default_value() -> Option<String> {
        Some(DEFAULT_USER_AGENT.to_string())
    }

    fn parse(value: &str) -> EnvResult<String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(EnvError {
                variable: Self::NAME.to_string(),
                message: "User agent must not be empty".to_string(),
            });
        }
        Ok(value.to_string())
    }
}

/// 日志级别
pub struct LogLevel;
impl EnvVar<String> for LogLevel {
    const NAME: &'static str = "WGET_LOG_LEVEL";
    const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

    fn default_value() -> Option<String> {
        Some("info".to_string())
    }

    fn parse(value: &str) -> EnvResult<String> {
        match value.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
            _ => Err(EnvError {
                variable: Self::NAME.to_string(),
                message: format!(
                    "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                    value
                ),
            }),
        }
    }
}

/// 禁用颜色输出
pub struct NoColor;
impl EnvVar<bool> for NoColor {
    const NAME: &'static str = "NO_COLOR";
    const DESCRIPTION: &'static str = "Disable colored output when set to any value";

    fn default_value() -> Option<bool> {
        Some(false)
    }

    fn parse(value: &str) -> EnvResult<bool> {
        // NO_COLOR 遵循标准：任何非空值都表示禁用颜色
        Ok(!value.is_empty())
    }
}

fn parse_seconds(value: &str, var_name: &str, min: u64, max: u64) -> EnvResult<Duration> {
    let num: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number of seconds".to_string(),
    })?;

    if num < min || num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is outside the range {}..={}", num, min, max),
        });
    }

    Ok(Duration::from_secs(num))
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    pub log_level: String,
    pub no_color: bool,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            timeout: Timeout::get()?,
            connect_timeout: ConnectTimeout::get()?,
            user_agent: UserAgent::get()?,
            log_level: LogLevel::get()?,
            no_color: NoColor::get()?,
        })
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    let rows = [
        (Timeout::NAME, Timeout::DESCRIPTION),
        (ConnectTimeout::NAME, ConnectTimeout::DESCRIPTION),
        (UserAgent::NAME, UserAgent::DESCRIPTION),
        (LogLevel::NAME, LogLevel::DESCRIPTION),
        (NoColor::NAME, NoColor::DESCRIPTION),
    ];

    for (name, description) in rows {
        docs.push_str(&format!("- `{}`: {}\n", name, description));
    }

    docs
}
