//! キーワードプランナー出力のパーサー
//!
//! 先頭2行のメタデータを捨て、3行目をヘッダーとして
//! 区切り文字付きの表データを RawRow の列に分解する。

use crate::encoding::{detect_and_decode, Delimiter, METADATA_LINES};
use crate::error::{DecodeError, Error, Result};
use crate::normalizer::{columns, normalize_row};
use crate::types::{KeywordRecord, RawRow};
use csv::{ReaderBuilder, Trim};

/// デコード済みテキストを RawRow の列に分解
///
/// 以下の行はスキップする（エラーにはしない）:
/// - Keyword 列が空・空白のみ
/// - Keyword 列がヘッダー名と同じ（重複ヘッダー行）
///
/// # Errors
/// * `MissingColumn` - ヘッダーに "Keyword" がない
/// * `EmptyResult` - 有効な行が1件もない
pub fn parse_rows(text: &str, delimiter: Delimiter) -> Result<Vec<RawRow>> {
    let body = strip_metadata(text);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(DecodeError::from)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    log::debug!("検出したヘッダー: {:?}", headers);

    if !headers.iter().any(|h| h == columns::KEYWORD) {
        log::debug!("\"{}\" 列が見つかりません", columns::KEYWORD);
        return Err(Error::MissingColumn(columns::KEYWORD.to_string()));
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record.map_err(DecodeError::from)?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.as_str(), v))
            .collect();

        match row.get(columns::KEYWORD) {
            Some(keyword) if !keyword.trim().is_empty() && keyword != columns::KEYWORD => {
                rows.push(row)
            }
            _ => skipped += 1,
        }
    }

    log::debug!("有効行 {} 件 / スキップ {} 件", rows.len(), skipped);

    if rows.is_empty() {
        return Err(Error::EmptyResult);
    }

    Ok(rows)
}

/// 生のバイト列からキーワード一覧を読み込む
///
/// 文字コード判定 → 表データ分解 → 正規化を一括で行う。
pub fn parse_keyword_export(bytes: &[u8]) -> Result<Vec<KeywordRecord>> {
    let decoded = detect_and_decode(bytes)?;
    let rows = parse_rows(&decoded.text, decoded.delimiter)?;
    Ok(rows.iter().map(normalize_row).collect())
}

/// 先頭のメタデータ行を除去
fn strip_metadata(text: &str) -> String {
    text.split('\n')
        .skip(METADATA_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Competition;

    const COMMA_EXPORT: &str = "Keyword Stats 2024-05-01 at 10_00_00\n\
All locations; Jan 1, 2024 - Dec 31, 2024\n\
Keyword,Avg. monthly searches,In account?,Competition,Competition (indexed value),Top of page bid (low range),Top of page bid (high range)\n\
emergency plumber sydney,\"1,200\",N,Low,18,3.10,9.80\n\
plumber,\"5,000\",Y,High,90,4.00,15.00\n";

    #[test]
    fn test_parse_rows_comma() {
        let rows = parse_rows(COMMA_EXPORT, Delimiter::Comma).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Keyword"), Some("emergency plumber sydney"));
        assert_eq!(rows[0].get("Avg. monthly searches"), Some("1,200"));
        assert_eq!(rows[1].get("In account?"), Some("Y"));
    }

    #[test]
    fn test_parse_keyword_export_scenario() {
        let records = parse_keyword_export(COMMA_EXPORT.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.searches, 1200);
        assert!(!first.in_account);
        assert_eq!(first.competition, Competition::Low);
        assert_eq!(first.word_count(), 3);
        assert_eq!(first.currency, "AUD");
    }

    #[test]
    fn test_headers_are_trimmed() {
        let text = "t\nd\n Keyword \t Competition \nplumber\tHigh\n";
        let rows = parse_rows(text, Delimiter::Tab).unwrap();
        assert_eq!(rows[0].get("Competition"), Some("High"));
    }

    #[test]
    fn test_missing_keyword_column() {
        let text = "t\nd\nSearch term,Volume\nplumber,10\n";
        let result = parse_rows(text, Delimiter::Comma);
        assert!(matches!(result, Err(Error::MissingColumn(ref c)) if c == "Keyword"));
    }

    #[test]
    fn test_blank_and_duplicate_header_rows_skipped() {
        let text = "t\nd\nKeyword,Competition\n  ,Low\nKeyword,Competition\nplumber,Low\n\n";
        let rows = parse_rows(text, Delimiter::Comma).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Keyword"), Some("plumber"));
    }

    #[test]
    fn test_empty_result() {
        let text = "t\nd\nKeyword,Competition\n,Low\n   ,High\n";
        let result = parse_rows(text, Delimiter::Comma);
        assert!(matches!(result, Err(Error::EmptyResult)));
    }

    #[test]
    fn test_short_rows_leave_columns_absent() {
        let text = "t\nd\nKeyword,Avg. monthly searches,Competition\nplumber\n";
        let rows = parse_rows(text, Delimiter::Comma).unwrap();
        assert_eq!(rows[0].get("Competition"), None);
        assert_eq!(normalize_row(&rows[0]).competition, Competition::Unknown);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "t\r\nd\r\nKeyword,Competition\r\nplumber,Medium\r\n";
        let records = parse_keyword_export(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].competition, Competition::Medium);
    }

    #[test]
    fn test_unrecognized_columns_ignored() {
        let text = "t\nd\nThree month change,Keyword,YoY change\n10%,plumber,5%\n";
        let records = parse_keyword_export(text.as_bytes()).unwrap();
        assert_eq!(records[0].text, "plumber");
    }
}
