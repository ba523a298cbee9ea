//! Keyword Analyzer Common Library
//!
//! キーワードプランナー出力の読み込みから解析・レポート生成までの共通処理
//!
//! ## 処理フロー
//! バイト列 → 文字コード・区切り文字判定 → 表データ分解 → 正規化
//! → 絞り込み・採点・集計 → Markdownレポート

pub mod types;
pub mod error;
pub mod encoding;
pub mod parser;
pub mod normalizer;
pub mod filter;
pub mod scorer;
pub mod analyzer;
pub mod report;
pub mod export;

pub use types::{
    AnalysisResult, BidRange, Competition, CompetitionBreakdown, FilterConfig, KeywordLength,
    KeywordRecord, RawRow,
};
pub use error::{DecodeError, Error, Result};
pub use encoding::{detect_and_decode, DecodedText, Delimiter, TextEncoding};
pub use parser::{parse_keyword_export, parse_rows};
pub use normalizer::normalize_row;
pub use filter::apply_filters;
pub use scorer::score;
pub use analyzer::analyze_keywords;
pub use report::generate_markdown_report;
