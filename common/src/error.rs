//! エラー型定義
//!
//! パイプラインが失敗するのは3箇所のみ:
//! - バイト列をテキストとして解釈できない（DecodeFailure）
//! - 必須列 "Keyword" がない（MissingColumn）
//! - 有効な行が1件もない（EmptyResult）
//!
//! それ以外の欠損・不正値はデフォルト値で吸収する。

use thiserror::Error;

/// デコード失敗の原因
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no tab or comma delimiter found on the header line (tried UTF-16LE and UTF-8)")]
    NoDelimiter,

    #[error("bytes are not valid UTF-8")]
    InvalidUtf8,

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not read file: {0}")]
    DecodeFailure(#[source] DecodeError),

    #[error(
        "Invalid CSV format: \"{0}\" column not found. Make sure this is a Google Ads Keyword Planner export."
    )]
    MissingColumn(String),

    #[error("no keywords found: the file may not be in the correct Google Ads format")]
    EmptyResult,

    #[cfg(feature = "excel")]
    #[error("Excel error: {0}")]
    Excel(String),
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::DecodeFailure(err)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
