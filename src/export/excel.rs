//! Excel生成（CLI版）
//!
//! ブックの内容は共通ライブラリで生成し、ここではファイルに書き出すだけ

use crate::error::{AppError, Result};
use keyword_analyzer_common::export::excel_core::generate_excel_buffer;
use keyword_analyzer_common::AnalysisResult;
use std::path::Path;

pub fn generate_excel(
    analysis: &AnalysisResult,
    source_file_name: &str,
    output_path: &Path,
) -> Result<()> {
    let buffer = generate_excel_buffer(analysis, source_file_name)?;
    std::fs::write(output_path, buffer)
        .map_err(|e| AppError::Export(format!("Excel保存エラー: {}", e)))?;
    Ok(())
}
