//! 読み込みからレポート生成までの統合テスト

use keyword_analyzer_common::{
    analyze_keywords, detect_and_decode, generate_markdown_report, Competition, Delimiter,
    FilterConfig, KeywordLength, TextEncoding,
};
use keyword_analyzer_rust::reader;
use regex::Regex;
use std::path::PathBuf;
use tempfile::tempdir;

const HEADER: &str = "Keyword\tCurrency\tAvg. monthly searches\tIn account?\tCompetition\tCompetition (indexed value)\tTop of page bid (low range)\tTop of page bid (high range)";

fn export_text() -> String {
    [
        "Keyword Stats 2026-10-01 at 09_00_00",
        "All locations; Oct 1, 2025 - Sep 30, 2026",
        HEADER,
        "emergency plumber sydney\tAUD\t1,200\t\tLow\t18\t3.10\t9.80",
        "plumber near me\tAUD\t9,000\t\tHigh\t92\t6.00\t21.50",
        "plumber\tAUD\t40,000\tY\tHigh\t88\t5.00\t18.00",
        "blocked drain plumber\tAUD\t600\t\tMedium\t45\t2.00\t7.00",
        "cheap plumber jobs\tAUD\t150\t\tLow\t10\t1.00\t3.00",
        "hot water system repair specialists near me now\tAUD\t120\t\tLow\t5\t\t",
        "",
    ]
    .join("\r\n")
}

/// BOM付きUTF-16LEに変換
fn utf16le_bytes(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

fn write_export(bytes: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("Keyword Stats 2026-10-01.csv");
    std::fs::write(&path, bytes).expect("Failed to write export");
    (dir, path)
}

#[test]
fn test_detect_utf16_tab_export() {
    let decoded = detect_and_decode(&utf16le_bytes(&export_text())).unwrap();
    assert_eq!(decoded.encoding, TextEncoding::Utf16Le);
    assert_eq!(decoded.delimiter, Delimiter::Tab);
    assert!(!decoded.text.starts_with('\u{FEFF}'));
}

#[tokio::test]
async fn test_load_utf16_export() {
    let (_dir, path) = write_export(&utf16le_bytes(&export_text()));

    let loaded = reader::load_export(&path).await.unwrap();
    assert_eq!(loaded.file_name, "Keyword Stats 2026-10-01.csv");
    assert_eq!(loaded.keywords.len(), 6);

    let first = &loaded.keywords[0];
    assert_eq!(first.text, "emergency plumber sydney");
    assert_eq!(first.searches, 1200);
    assert_eq!(first.competition, Competition::Low);
    assert_eq!(first.competition_index, 18);
    assert_eq!(first.top_bid_low, Some(3.10));

    assert!(loaded.keywords[2].in_account);
    assert_eq!(loaded.keywords[5].bid_range(), None);
}

#[tokio::test]
async fn test_utf8_and_utf16_give_same_records() {
    let (_dir16, path16) = write_export(&utf16le_bytes(&export_text()));
    let (_dir8, path8) = write_export(export_text().as_bytes());

    let utf16 = reader::load_export(&path16).await.unwrap();
    let utf8 = reader::load_export(&path8).await.unwrap();
    assert_eq!(utf16.keywords, utf8.keywords);
}

#[tokio::test]
async fn test_analysis_properties() {
    let (_dir, path) = write_export(&utf16le_bytes(&export_text()));
    let loaded = reader::load_export(&path).await.unwrap();
    let analysis = analyze_keywords(&loaded.keywords, &FilterConfig::default());

    assert_eq!(analysis.total_keywords, 6);
    assert_eq!(analysis.in_account_count, 1);
    assert_eq!(
        analysis.in_account_count + analysis.new_opportunities,
        analysis.total_keywords
    );
    assert_eq!(
        analysis.competition_breakdown.total(),
        analysis.new_opportunities
    );

    // 推奨は登録済みを含まず、スコア降順
    assert!(analysis.top_keywords.iter().all(|k| !k.in_account));
    let scores: Vec<u8> = analysis
        .top_keywords
        .iter()
        .map(|k| k.score.unwrap_or_default())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(analysis.top_keywords[0].text, "emergency plumber sydney");
    assert_eq!(scores[0], 8);

    assert_eq!(analysis.quick_wins.len(), 1);
    assert_eq!(analysis.difficult_keywords[0].text, "plumber near me");
    assert_eq!(analysis.high_volume[0].text, "plumber near me");

    // 中央値 (6.45, 2.00) の平均。入札なしの行は対象外
    assert!((analysis.avg_low_bid - 4.225).abs() < 1e-9);
    assert_eq!(analysis.currency, "AUD");
}

#[tokio::test]
async fn test_filters_shrink_working_set() {
    let (_dir, path) = write_export(export_text().as_bytes());
    let loaded = reader::load_export(&path).await.unwrap();

    let filters = FilterConfig {
        must_include: "PLUMBER".to_string(),
        exclude: "jobs, near".to_string(),
        keyword_length: KeywordLength::Any,
    };
    let analysis = analyze_keywords(&loaded.keywords, &filters);

    let texts: Vec<&str> = analysis.top_keywords.iter().map(|k| k.text.as_str()).collect();
    assert_eq!(texts, vec!["emergency plumber sydney", "blocked drain plumber"]);
    assert_eq!(analysis.new_opportunities, 2);
    assert_eq!(analysis.total_keywords, 6);

    let long = FilterConfig {
        keyword_length: KeywordLength::SixOrMore,
        ..Default::default()
    };
    let analysis = analyze_keywords(&loaded.keywords, &long);
    assert_eq!(analysis.top_keywords.len(), 1);
    assert!(analysis.top_keywords[0].word_count() >= 6);
}

#[tokio::test]
async fn test_report_counts_match_analysis() {
    let (_dir, path) = write_export(&utf16le_bytes(&export_text()));
    let loaded = reader::load_export(&path).await.unwrap();
    let analysis = analyze_keywords(&loaded.keywords, &FilterConfig::default());
    let md = generate_markdown_report(&analysis, &loaded.file_name, "2026-10-19");

    let count = |label: &str| -> usize {
        let re = Regex::new(&format!(r"\*\*{}:\*\* (\d+)", regex::escape(label))).unwrap();
        re.captures(&md)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or_else(|| panic!("{} not found", label))
    };

    assert_eq!(count("Total Keywords Analyzed"), analysis.total_keywords);
    assert_eq!(count("Keywords in Account"), analysis.in_account_count);
    assert_eq!(count("New Opportunities"), analysis.new_opportunities);
    assert_eq!(count("Low Competition Keywords"), analysis.competition_breakdown.low);
    assert_eq!(count("Medium Competition Keywords"), analysis.competition_breakdown.medium);
    assert_eq!(count("High Competition Keywords"), analysis.competition_breakdown.high);

    assert!(md.contains("**Source File:** Keyword Stats 2026-10-01.csv"));
    assert!(md.contains("**Generated:** 2026-10-19"));
}

#[tokio::test]
async fn test_report_is_deterministic() {
    let (_dir, path) = write_export(export_text().as_bytes());
    let loaded = reader::load_export(&path).await.unwrap();
    let analysis = analyze_keywords(&loaded.keywords, &FilterConfig::default());

    let a = generate_markdown_report(&analysis, &loaded.file_name, "2026-10-19");
    let b = generate_markdown_report(
        &analyze_keywords(&loaded.keywords, &FilterConfig::default()),
        &loaded.file_name,
        "2026-10-19",
    );
    assert_eq!(a, b);
}
