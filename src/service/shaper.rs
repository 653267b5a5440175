use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;

use crate::models::{FieldValue, Record, COMPANY_FIELD};
use crate::source::{strip_sigil, ResultSet};

/// 将原始结果集整形为记录列表。
///
/// 空结果集直接返回空列表；`numeric_columns` 中存在的列转换为金额 (无法解析视为 0)；
/// 每条记录追加 Company 字段。
pub fn shape(result: &ResultSet, numeric_columns: &[&str], company: &str) -> Vec<Record> {
    if result.is_empty() {
        return Vec::new();
    }

    let columns: Vec<&str> = result.columns.iter().map(|c| strip_sigil(c)).collect();
    let numeric: Vec<bool> = columns.iter().map(|c| numeric_columns.contains(c)).collect();

    result
        .rows
        .iter()
        .map(|row| {
            let mut record = Record::new();
            for (idx, column) in columns.iter().enumerate() {
                let raw = row.get(idx).cloned().flatten();
                let value = if numeric[idx] {
                    let amount = raw
                        .as_deref()
                        .map(parse_amount)
                        .unwrap_or_else(BigDecimal::zero);
                    FieldValue::Amount(amount)
                } else {
                    FieldValue::from(raw)
                };
                record.insert(*column, value);
            }
            record.insert(COMPANY_FIELD, FieldValue::Text(company.to_string()));
            record
        })
        .collect()
}

/// 解析金额文本，失败返回 0。
///
/// 支持千分位 (`1,234.50`) 和印度分组 (`1,23,456.00`)，逗号只允许出现在整数部分的数字之间。
pub fn parse_amount(raw: &str) -> BigDecimal {
    try_parse_amount(raw).unwrap_or_else(BigDecimal::zero)
}

fn try_parse_amount(raw: &str) -> Option<BigDecimal> {
    let text = raw.trim();
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    // 只允许一个符号
    if body.is_empty() || body.starts_with(['+', '-']) {
        return None;
    }

    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };

    if int_part.contains(',') {
        let groups: Vec<&str> = int_part.split(',').collect();
        if groups.iter().any(|g| g.is_empty() || !g.bytes().all(|b| b.is_ascii_digit())) {
            return None;
        }
        if groups.last().map(|g| g.len()) != Some(3) {
            return None;
        }
    }
    if frac_part.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let digits = int_part.replace(',', "");
    let normalized = match frac_part {
        Some(f) => format!("{}{}.{}", sign, digits, f),
        None => format!("{}{}", sign, digits),
    };
    // BigDecimal 接受指数形式，这里只允许普通十进制
    if !normalized
        .bytes()
        .all(|b| b.is_ascii_digit() || b == b'.' || b == b'-')
    {
        return None;
    }
    BigDecimal::from_str(&normalized).ok()
}
