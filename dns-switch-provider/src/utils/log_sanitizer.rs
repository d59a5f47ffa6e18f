//! 日志脱敏工具
//!
//! 响应体可能很长，凭证和机器人 key 不能原样进日志。

/// 日志中保留的最大字节数
const TRUNCATE_LIMIT: usize = 256;

/// 掩码时首尾各保留的字符数
const MASK_KEEP: usize = 4;

/// 向下取到最近的 char 边界（`str::floor_char_boundary` 在 MSRV 上不可用）
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Truncates a response body for logging, keeping at most 256 bytes.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    format!(
        "{}... [truncated, total {} bytes]",
        &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
        s.len()
    )
}

/// Masks an identifier such as an access key id: `LTAI5tAb****9xYz`.
///
/// Short values are fully masked.
pub fn mask_identifier(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= MASK_KEEP * 2 {
        return "*".repeat(chars.len().max(1));
    }
    let head: String = chars[..MASK_KEEP].iter().collect();
    let tail: String = chars[chars.len() - MASK_KEEP..].iter().collect();
    format!("{head}****{tail}")
}
