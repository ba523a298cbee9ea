//! Excel生成（共通ライブラリ）
//!
//! 解析結果を1ブックにまとめる:
//! - Summary: 件数・絞り込み条件・競合度内訳・平均入札単価
//! - バケットごとのシート（Top Keywords / Quick Wins / Difficult / High Volume / Long Tail）

use crate::error::{Error, Result};
use crate::report::{describe_filters, percentage};
use crate::types::{AnalysisResult, Competition, KeywordRecord};
use rust_xlsxwriter::*;

const KEYWORD_COLUMNS: [(&str, f64); 7] = [
    ("Keyword", 42.0),
    ("Searches/mo", 14.0),
    ("Competition", 13.0),
    ("Competition Index", 18.0),
    ("CPC Low", 11.0),
    ("CPC High", 11.0),
    ("Score", 8.0),
];

fn excel_err(context: &str, e: XlsxError) -> Error {
    Error::Excel(format!("{}: {}", context, e))
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `analysis` - 解析結果
/// * `file_name` - 元ファイル名（Summaryシートに記載）
pub fn generate_excel_buffer(analysis: &AnalysisResult, file_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));
    let count_format = Format::new().set_num_format("#,##0");
    let money_format = Format::new().set_num_format("0.00");
    let percent_format = Format::new().set_num_format("0.0%");

    write_summary_sheet(
        &mut workbook,
        analysis,
        file_name,
        &header_format,
        &money_format,
        &percent_format,
    )?;

    let buckets: [(&str, &[KeywordRecord]); 5] = [
        ("Top Keywords", &analysis.top_keywords),
        ("Quick Wins", &analysis.quick_wins),
        ("Difficult", &analysis.difficult_keywords),
        ("High Volume", &analysis.high_volume),
        ("Long Tail", &analysis.long_tail),
    ];

    for (name, records) in buckets {
        write_keyword_sheet(
            &mut workbook,
            name,
            records,
            &header_format,
            &count_format,
            &money_format,
        )?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| excel_err("Excel保存エラー", e))
}

fn write_summary_sheet(
    workbook: &mut Workbook,
    analysis: &AnalysisResult,
    file_name: &str,
    header_format: &Format,
    money_format: &Format,
    percent_format: &Format,
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Summary")
        .map_err(|e| excel_err("シート名設定エラー", e))?;
    sheet
        .set_column_width(0, 34.0)
        .map_err(|e| excel_err("列幅設定エラー", e))?;
    sheet
        .set_column_width(1, 40.0)
        .map_err(|e| excel_err("列幅設定エラー", e))?;

    let filters = describe_filters(&analysis.filters).unwrap_or_else(|| "None".to_string());
    let text_rows: [(&str, &str); 2] = [("Source File", file_name), ("Active Filters", &filters)];
    let count_rows: [(&str, usize); 3] = [
        ("Total Keywords Analyzed", analysis.total_keywords),
        ("Keywords in Account", analysis.in_account_count),
        ("New Opportunities", analysis.new_opportunities),
    ];

    let mut row: u32 = 0;
    for (label, value) in text_rows {
        sheet
            .write_string_with_format(row, 0, label, header_format)
            .map_err(|e| excel_err("ラベル書き込みエラー", e))?;
        sheet
            .write_string(row, 1, value)
            .map_err(|e| excel_err("値書き込みエラー", e))?;
        row += 1;
    }
    for (label, value) in count_rows {
        sheet
            .write_string_with_format(row, 0, label, header_format)
            .map_err(|e| excel_err("ラベル書き込みエラー", e))?;
        sheet
            .write_number(row, 1, value as f64)
            .map_err(|e| excel_err("値書き込みエラー", e))?;
        row += 1;
    }

    sheet
        .write_string_with_format(row, 0, "Average Low Competition CPC", header_format)
        .map_err(|e| excel_err("ラベル書き込みエラー", e))?;
    sheet
        .write_string(row, 2, &analysis.currency)
        .map_err(|e| excel_err("値書き込みエラー", e))?;
    sheet
        .write_number_with_format(row, 1, analysis.avg_low_bid, money_format)
        .map_err(|e| excel_err("値書き込みエラー", e))?;
    row += 2;

    // 競合度内訳
    for (col, title) in ["Competition Level", "Count", "Percentage"].iter().enumerate() {
        sheet
            .write_string_with_format(row, col as u16, *title, header_format)
            .map_err(|e| excel_err("見出し書き込みエラー", e))?;
    }
    row += 1;

    let breakdown = &analysis.competition_breakdown;
    for level in [
        Competition::Low,
        Competition::Medium,
        Competition::High,
        Competition::Unknown,
    ] {
        let count = breakdown.count(level);
        sheet
            .write_string(row, 0, level.title())
            .map_err(|e| excel_err("値書き込みエラー", e))?;
        sheet
            .write_number(row, 1, count as f64)
            .map_err(|e| excel_err("値書き込みエラー", e))?;
        if let Some(pct) = percentage(count, analysis.new_opportunities) {
            sheet
                .write_number_with_format(row, 2, pct / 100.0, percent_format)
                .map_err(|e| excel_err("値書き込みエラー", e))?;
        }
        row += 1;
    }

    Ok(())
}

fn write_keyword_sheet(
    workbook: &mut Workbook,
    name: &str,
    records: &[KeywordRecord],
    header_format: &Format,
    count_format: &Format,
    money_format: &Format,
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(name)
        .map_err(|e| excel_err("シート名設定エラー", e))?;

    for (col, (title, width)) in KEYWORD_COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet
            .set_column_width(col, *width)
            .map_err(|e| excel_err("列幅設定エラー", e))?;
        sheet
            .write_string_with_format(0, col, *title, header_format)
            .map_err(|e| excel_err("見出し書き込みエラー", e))?;
    }

    for (i, k) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet
            .write_string(row, 0, &k.text)
            .map_err(|e| excel_err("値書き込みエラー", e))?;
        sheet
            .write_number_with_format(row, 1, k.searches as f64, count_format)
            .map_err(|e| excel_err("値書き込みエラー", e))?;
        sheet
            .write_string(row, 2, k.competition.title())
            .map_err(|e| excel_err("値書き込みエラー", e))?;
        sheet
            .write_number(row, 3, f64::from(k.competition_index))
            .map_err(|e| excel_err("値書き込みエラー", e))?;
        // 推定なしは空欄
        if let Some(range) = k.bid_range() {
            sheet
                .write_number_with_format(row, 4, range.low, money_format)
                .map_err(|e| excel_err("値書き込みエラー", e))?;
            sheet
                .write_number_with_format(row, 5, range.high, money_format)
                .map_err(|e| excel_err("値書き込みエラー", e))?;
        }
        if let Some(score) = k.score {
            sheet
                .write_number(row, 6, f64::from(score))
                .map_err(|e| excel_err("値書き込みエラー", e))?;
        }
    }

    Ok(())
}
