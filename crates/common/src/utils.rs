//! 通用工具函数

/// 规范化可选文本：去除首尾空白，空串视为 None
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
