//! 权限编码与通配匹配
//!
//! 权限编码形如 `{resource}.{action}`，如 `materials.read`。
//! `*` 授予全部权限，`materials.*` 授予该资源下全部动作。

/// 全部权限
pub const WILDCARD: &str = "*";

/// 判断已授予的权限是否覆盖所需权限
pub fn permission_matches(granted: &str, required: &str) -> bool {
    if granted == WILDCARD || granted == required {
        return true;
    }
    match granted.strip_suffix(".*") {
        Some(resource) => required
            .strip_prefix(resource)
            .is_some_and(|rest| rest.starts_with('.')),
        None => false,
    }
}

/// 拼接权限编码
pub fn permission_code(resource: &str, action: &str) -> String {
    format!("{}.{}", resource, action)
}

/// 校验权限编码格式：`*`、`res.*` 或 `res.action`
pub fn is_valid_permission_code(code: &str) -> bool {
    if code == WILDCARD {
        return true;
    }
    let Some((resource, action)) = code.split_once('.') else {
        return false;
    };
    let valid_part = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    };
    valid_part(resource) && (action == "*" || valid_part(action))
}
