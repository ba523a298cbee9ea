//! kwa - Google Ads キーワードプランナー出力解析ツール
//!
//! 解析処理本体は `keyword_analyzer_common` にあり、
//! このクレートはCLI・設定・ファイル入出力を受け持つ。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filter_prompt;
pub mod reader;
pub mod summary;
