//! キーワードプランナー出力の読み込み
//!
//! ファイル読み込みが唯一の待機点。読み込み失敗は「ファイルを読めない」
//! （DecodeFailure）として扱い、以降の処理は同期的に行う。

use crate::error::{AppError, Result};
use keyword_analyzer_common::{parse_keyword_export, DecodeError, KeywordRecord};
use std::path::Path;

/// 読み込んだ出力ファイル
#[derive(Debug, Clone)]
pub struct LoadedExport {
    /// 元のファイル名（レポート表示用）
    pub file_name: String,
    pub keywords: Vec<KeywordRecord>,
}

/// ファイルのバイト列を非同期に読み込む
pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(AppError::FileNotFound(path.display().to_string()));
    }

    tokio::fs::read(path)
        .await
        .map_err(|e| keyword_analyzer_common::Error::from(DecodeError::Io(e)).into())
}

/// ファイルを読み込み、キーワード一覧に変換
pub async fn load_export(path: &Path) -> Result<LoadedExport> {
    let bytes = read_bytes(path).await?;
    log::debug!("{}: {} bytes", path.display(), bytes.len());

    let keywords = parse_keyword_export(&bytes)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(LoadedExport {
        file_name,
        keywords,
    })
}
