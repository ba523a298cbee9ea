//! 行の正規化
//!
//! RawRow（列名 → 文字列）を KeywordRecord に変換する。
//! 失敗はせず、欠損・不正な値はすべてデフォルト値に落とす。

use crate::types::{Competition, KeywordRecord, RawRow, DEFAULT_CURRENCY};

/// 認識する列名
pub mod columns {
    pub const KEYWORD: &str = "Keyword";
    pub const SEARCHES: &str = "Avg. monthly searches";
    pub const IN_ACCOUNT: &str = "In account?";
    pub const COMPETITION: &str = "Competition";
    pub const COMPETITION_INDEX: &str = "Competition (indexed value)";
    pub const CURRENCY: &str = "Currency";
    pub const TOP_BID_LOW: &str = "Top of page bid (low range)";
    pub const TOP_BID_HIGH: &str = "Top of page bid (high range)";
}

/// 1行を KeywordRecord に変換
pub fn normalize_row(row: &RawRow) -> KeywordRecord {
    let currency = row
        .get(columns::CURRENCY)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY);

    KeywordRecord {
        text: row.get(columns::KEYWORD).unwrap_or_default().trim().to_string(),
        searches: row.get(columns::SEARCHES).map(parse_searches).unwrap_or(0),
        in_account: matches!(row.get(columns::IN_ACCOUNT), Some("Y") | Some("Yes")),
        competition: Competition::from_label(row.get(columns::COMPETITION).unwrap_or_default()),
        competition_index: row
            .get(columns::COMPETITION_INDEX)
            .and_then(parse_leading_integer)
            .map(|v| v.min(100) as u8)
            .unwrap_or(0),
        currency: currency.to_string(),
        top_bid_low: row.get(columns::TOP_BID_LOW).and_then(parse_bid),
        top_bid_high: row.get(columns::TOP_BID_HIGH).and_then(parse_bid),
        score: None,
    }
}

/// 検索数をパース（桁区切りカンマを除去、数値でなければ0）
pub fn parse_searches(value: &str) -> u64 {
    parse_leading_integer(&value.replace(',', "")).unwrap_or(0)
}

/// 先頭の数字列を整数として読む（"1200.5" → 1200、"abc" → None）
fn parse_leading_integer(value: &str) -> Option<u64> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// 入札単価をパース（負数・非数値・非有限値はNone）
fn parse_bid(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
