/// Favicon 相关的 rel 值
const FAVICON_VALUES: &[&str] = &["icon", "shortcut icon"];

/// 检查是否为 favicon
pub fn is_favicon(attr_value: &str) -> bool {
    FAVICON_VALUES.contains(&attr_value.to_lowercase().as_str())
}
