use crate::source::strip_sigil;

/// 无法确定公司时的占位名称
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// 解析 Tally 返回的公司名称: 去掉一个前导标记符，空名称返回 None
pub fn parse_company_name(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(strip_sigil(raw).to_string())
}
