//! Markdownレポート出力

use crate::error::Result;
use chrono::NaiveDate;
use keyword_analyzer_common::{generate_markdown_report, AnalysisResult};
use std::path::Path;

/// レポート本文を生成（生成日はISO形式）
pub fn render_report(analysis: &AnalysisResult, source_file_name: &str, date: NaiveDate) -> String {
    let generated = date.format("%Y-%m-%d").to_string();
    generate_markdown_report(analysis, source_file_name, &generated)
}

pub fn write_report(
    analysis: &AnalysisResult,
    source_file_name: &str,
    output_path: &Path,
    date: NaiveDate,
) -> Result<()> {
    let markdown = render_report(analysis, source_file_name, date);
    std::fs::write(output_path, markdown)?;
    Ok(())
}
