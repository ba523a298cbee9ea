//! キーワード解析の型定義
//!
//! CLIと共通ライブラリで共有される型:
//! - RawRow: 表形式データの1行（列名 → 値）
//! - KeywordRecord: 正規化済みキーワード
//! - FilterConfig: ユーザー指定の絞り込み条件
//! - AnalysisResult: 解析結果（集計値とバケット）

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 通貨コードが無い場合のデフォルト
pub const DEFAULT_CURRENCY: &str = "AUD";

/// 表形式データの1行（ヘッダー名 → セル値）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// 列の値を取得（列が無ければNone）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// 競合度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competition {
    Low,
    Medium,
    High,
    #[default]
    Unknown,
}

impl Competition {
    /// ソースのラベルから変換（大文字小文字を無視、該当なしはUnknown）
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Competition::Low,
            "medium" => Competition::Medium,
            "high" => Competition::High,
            _ => Competition::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Competition::Low => "low",
            Competition::Medium => "medium",
            Competition::High => "high",
            Competition::Unknown => "unknown",
        }
    }

    /// 先頭大文字の表記（レポート用）
    pub fn title(&self) -> &'static str {
        match self {
            Competition::Low => "Low",
            Competition::Medium => "Medium",
            Competition::High => "High",
            Competition::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ページ上部入札単価の推定レンジ（両端とも正の値）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidRange {
    pub low: f64,
    pub high: f64,
}

impl BidRange {
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// 正規化済みキーワード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordRecord {
    pub text: String,
    pub searches: u64,
    pub in_account: bool,
    pub competition: Competition,
    pub competition_index: u8,
    pub currency: String,
    pub top_bid_low: Option<f64>,
    pub top_bid_high: Option<f64>,
    /// スコア（採点前はNone）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl KeywordRecord {
    /// 入札レンジ
    ///
    /// 下限・上限の両方が存在し、かつ0でない場合のみSome。
    /// 片方でも欠けていれば「推定なし」として扱う。
    pub fn bid_range(&self) -> Option<BidRange> {
        match (self.top_bid_low, self.top_bid_high) {
            (Some(low), Some(high)) if low > 0.0 && high > 0.0 => Some(BidRange { low, high }),
            _ => None,
        }
    }

    /// 単語数（前後の空白を除き、連続する空白で区切る）
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// キーワード長（単語数）の絞り込み
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeywordLength {
    #[default]
    Any,
    /// 1〜5語の完全一致
    Exact(u8),
    /// 6語以上
    SixOrMore,
}

impl KeywordLength {
    pub fn matches(&self, word_count: usize) -> bool {
        match self {
            KeywordLength::Any => true,
            KeywordLength::Exact(n) => word_count == usize::from(*n),
            KeywordLength::SixOrMore => word_count >= 6,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, KeywordLength::Any)
    }

    /// 表示用ラベル（"3 words", "6+ words" など）
    pub fn label(&self) -> String {
        match self {
            KeywordLength::Any => "any length".to_string(),
            KeywordLength::Exact(1) => "1 word".to_string(),
            KeywordLength::Exact(n) => format!("{} words", n),
            KeywordLength::SixOrMore => "6+ words".to_string(),
        }
    }
}

impl FromStr for KeywordLength {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "" | "any" => Ok(KeywordLength::Any),
            "6" | "6+" => Ok(KeywordLength::SixOrMore),
            other => match other.parse::<u8>() {
                Ok(n @ 1..=5) => Ok(KeywordLength::Exact(n)),
                _ => Err(format!("Unknown keyword length: {}. Use any, 1-5 or 6", s)),
            },
        }
    }
}

impl TryFrom<String> for KeywordLength {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeywordLength> for String {
    fn from(value: KeywordLength) -> Self {
        value.to_string()
    }
}

impl fmt::Display for KeywordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordLength::Any => write!(f, "any"),
            KeywordLength::Exact(n) => write!(f, "{}", n),
            KeywordLength::SixOrMore => write!(f, "6"),
        }
    }
}

/// 絞り込み条件（解析1回ごとに不変）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    /// 含む必要がある語（部分一致、大文字小文字無視）
    pub must_include: String,
    /// 除外語（カンマ区切り）
    pub exclude: String,
    pub keyword_length: KeywordLength,
}

impl FilterConfig {
    /// 解析開始時点のスナップショット（前後の空白を除去したコピー）
    pub fn snapshot(&self) -> Self {
        Self {
            must_include: self.must_include.trim().to_string(),
            exclude: self.exclude.trim().to_string(),
            keyword_length: self.keyword_length,
        }
    }

    /// 絞り込みが1つでも有効か
    pub fn is_active(&self) -> bool {
        !self.must_include.trim().is_empty()
            || !self.exclude.trim().is_empty()
            || !self.keyword_length.is_any()
    }
}

/// 競合度別の件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub unknown: usize,
}

impl CompetitionBreakdown {
    pub fn add(&mut self, competition: Competition) {
        match competition {
            Competition::Low => self.low += 1,
            Competition::Medium => self.medium += 1,
            Competition::High => self.high += 1,
            Competition::Unknown => self.unknown += 1,
        }
    }

    pub fn count(&self, competition: Competition) -> usize {
        match competition {
            Competition::Low => self.low,
            Competition::Medium => self.medium,
            Competition::High => self.high,
            Competition::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.unknown
    }
}

/// 解析結果
///
/// `in_account_count` と `currency` はフィルタ前の全件から、
/// それ以外はワーキングセット（未登録かつ条件に一致）から算出する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub total_keywords: usize,
    pub in_account_count: usize,
    /// ワーキングセットの件数
    pub new_opportunities: usize,
    pub top_keywords: Vec<KeywordRecord>,
    pub quick_wins: Vec<KeywordRecord>,
    pub difficult_keywords: Vec<KeywordRecord>,
    pub high_volume: Vec<KeywordRecord>,
    pub long_tail: Vec<KeywordRecord>,
    pub competition_breakdown: CompetitionBreakdown,
    pub avg_low_bid: f64,
    pub currency: String,
    pub filters: FilterConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_from_label() {
        assert_eq!(Competition::from_label("Low"), Competition::Low);
        assert_eq!(Competition::from_label("MEDIUM"), Competition::Medium);
        assert_eq!(Competition::from_label("high"), Competition::High);
        assert_eq!(Competition::from_label(""), Competition::Unknown);
        assert_eq!(Competition::from_label("n/a"), Competition::Unknown);
    }

    #[test]
    fn test_bid_range_requires_both_non_zero() {
        let mut record = KeywordRecord {
            top_bid_low: Some(0.0),
            top_bid_high: Some(4.5),
            ..Default::default()
        };
        assert!(record.bid_range().is_none());

        record.top_bid_low = None;
        assert!(record.bid_range().is_none());

        record.top_bid_low = Some(1.5);
        let range = record.bid_range().unwrap();
        assert_eq!(range.midpoint(), 3.0);
    }

    #[test]
    fn test_word_count() {
        let record = KeywordRecord {
            text: "  emergency   plumber\tsydney ".to_string(),
            ..Default::default()
        };
        assert_eq!(record.word_count(), 3);
    }

    #[test]
    fn test_keyword_length_parse() {
        assert_eq!("any".parse::<KeywordLength>().unwrap(), KeywordLength::Any);
        assert_eq!("".parse::<KeywordLength>().unwrap(), KeywordLength::Any);
        assert_eq!("3".parse::<KeywordLength>().unwrap(), KeywordLength::Exact(3));
        assert_eq!("6".parse::<KeywordLength>().unwrap(), KeywordLength::SixOrMore);
        assert!("0".parse::<KeywordLength>().is_err());
        assert!("7".parse::<KeywordLength>().is_err());
        assert!("long".parse::<KeywordLength>().is_err());
    }

    #[test]
    fn test_keyword_length_matches() {
        assert!(KeywordLength::Any.matches(0));
        assert!(KeywordLength::Exact(2).matches(2));
        assert!(!KeywordLength::Exact(2).matches(3));
        assert!(KeywordLength::SixOrMore.matches(6));
        assert!(KeywordLength::SixOrMore.matches(10));
        assert!(!KeywordLength::SixOrMore.matches(5));
    }

    #[test]
    fn test_filter_config_json() {
        let json = r#"{"mustInclude": " plumber ", "keywordLength": "6"}"#;
        let filters: FilterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(filters.must_include, " plumber ");
        assert_eq!(filters.exclude, "");
        assert_eq!(filters.keyword_length, KeywordLength::SixOrMore);

        let snapshot = filters.snapshot();
        assert_eq!(snapshot.must_include, "plumber");
        assert!(snapshot.is_active());

        let out = serde_json::to_string(&snapshot).unwrap();
        assert!(out.contains(r#""keywordLength":"6""#));
    }

    #[test]
    fn test_filter_config_default_inactive() {
        assert!(!FilterConfig::default().is_active());
    }

    #[test]
    fn test_breakdown_total() {
        let mut breakdown = CompetitionBreakdown::default();
        breakdown.add(Competition::Low);
        breakdown.add(Competition::Low);
        breakdown.add(Competition::Unknown);
        assert_eq!(breakdown.count(Competition::Low), 2);
        assert_eq!(breakdown.total(), 3);
    }
}
