pub mod markdown;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use chrono::NaiveDate;
use keyword_analyzer_common::AnalysisResult;
use std::path::{Path, PathBuf};

/// ダウンロード用ファイル名 `<元ファイル名>-analysis-<YYYY-MM-DD>.<拡張子>`
///
/// 元ファイル名の `.csv` は取り除く。
pub fn analysis_file_name(source_file_name: &str, date: NaiveDate, extension: &str) -> String {
    let base = source_file_name
        .strip_suffix(".csv")
        .unwrap_or(source_file_name);
    format!("{}-analysis-{}.{}", base, date.format("%Y-%m-%d"), extension)
}

/// 出力先の解決（ディレクトリまたは拡張子なしなら既定ファイル名を付与）
pub fn output_path_for_format(output: &Path, default_file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_file_name)
    } else {
        output.to_path_buf()
    }
}

pub fn export_results(
    analysis: &AnalysisResult,
    source_file_name: &str,
    format: &ExportFormat,
    output_dir: &Path,
    date: NaiveDate,
) -> Result<Vec<PathBuf>> {
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)?;
    }

    let mut written = Vec::new();

    if format.includes_markdown() {
        let path = output_dir.join(analysis_file_name(source_file_name, date, "md"));
        println!("- Markdownレポートを生成中...");
        markdown::write_report(analysis, source_file_name, &path, date)?;
        println!("✔ Markdown出力: {}", path.display());
        written.push(path);
    }

    if format.includes_json() {
        let path = output_dir.join(analysis_file_name(source_file_name, date, "json"));
        println!("- JSONを生成中...");
        let json = serde_json::to_string_pretty(analysis)?;
        std::fs::write(&path, json)?;
        println!("✔ JSON出力: {}", path.display());
        written.push(path);
    }

    if format.includes_excel() {
        let path = output_dir.join(analysis_file_name(source_file_name, date, "xlsx"));
        println!("- Excelを生成中...");
        excel::generate_excel(analysis, source_file_name, &path)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
