//! 排除 / 拒绝规则
//!
//! 两组规则相互独立，均可为空（为空即不过滤）。
//! 判定顺序固定：先排除（URL 路径前缀），再拒绝（完整 URL 后缀）。

use std::fmt;

use crate::utils::url::Url;

/// Result of gating one candidate URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterVerdict {
    Pass,
    /// The URL path starts with this exclusion prefix
    Excluded(String),
    /// The absolute URL ends with this rejection suffix
    Rejected(String),
}

impl FilterVerdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, FilterVerdict::Pass)
    }
}

impl fmt::Display for FilterVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterVerdict::Pass => write!(f, "pass"),
            FilterVerdict::Excluded(rule) => {
                write!(f, "matches the exclusion pattern: {rule}")
            }
            FilterVerdict::Rejected(rule) => write!(f, "matches the rejected suffix: {rule}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterEngine {
    exclude: Vec<String>,
    reject: Vec<String>,
}

impl FilterEngine {
    /// Builds the engine from rule lists; empty rules are dropped
    pub fn new<E, R>(exclude: E, reject: R) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            exclude: non_empty(exclude),
            reject: non_empty(reject),
        }
    }

    /// Builds the engine from the comma-separated CLI form (`"/a,/b"`)
    pub fn from_lists(exclude: Option<&str>, reject: Option<&str>) -> Self {
        Self::new(split_list(exclude), split_list(reject))
    }

    pub fn check(&self, url: &Url) -> FilterVerdict {
        let path = url.path();
        if let Some(rule) = self.exclude.iter().find(|rule| path.starts_with(rule.as_str())) {
            return FilterVerdict::Excluded(rule.clone());
        }

        let absolute = url.as_str();
        if let Some(rule) = self.reject.iter().find(|rule| absolute.ends_with(rule.as_str())) {
            return FilterVerdict::Rejected(rule.clone());
        }

        FilterVerdict::Pass
    }
}

fn non_empty<I>(rules: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    rules
        .into_iter()
        .map(Into::into)
        .filter(|rule| !rule.is_empty())
        .collect()
}

fn split_list(list: Option<&str>) -> Vec<String> {
    list.map(|l| l.split(',').map(|rule| rule.trim().to_string()).collect())
        .unwrap_or_default()
}
