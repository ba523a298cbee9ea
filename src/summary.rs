//! ターミナル向けの解析結果表示

use keyword_analyzer_common::report::{describe_filters, format_cpc, format_money, format_thousands, percentage};
use keyword_analyzer_common::{AnalysisResult, Competition, KeywordRecord};

/// 棒グラフの最大幅（文字数）
const BAR_WIDTH: usize = 30;

/// クイックウィンはターミナルでは上位5件まで
const QUICK_WIN_PREVIEW: usize = 5;

/// 解析結果の要約を文字列で組み立てる
pub fn render_summary(analysis: &AnalysisResult, rows: usize) -> String {
    let mut out = String::new();

    if let Some(filters) = describe_filters(&analysis.filters) {
        out.push_str(&format!("絞り込み: {}\n\n", filters));
    }

    out.push_str(&format!("  キーワード総数:   {}\n", analysis.total_keywords));
    out.push_str(&format!("  アカウント登録済: {}\n", analysis.in_account_count));
    out.push_str(&format!("  新規候補:         {}\n", analysis.new_opportunities));
    out.push_str(&format!("  低競合:           {}\n\n", analysis.competition_breakdown.low));

    if analysis.top_keywords.is_empty() {
        out.push_str("該当するキーワードがありません。絞り込み条件を見直してください。\n\n");
    } else {
        out.push_str("🎯 おすすめキーワード\n");
        push_keyword_lines(&mut out, &analysis.top_keywords, rows, |k| {
            format!(
                "{:>8}/mo  {:<7} {}/8",
                format_thousands(k.searches),
                k.competition.title(),
                k.score.unwrap_or_default()
            )
        });
        out.push('\n');
    }

    if !analysis.quick_wins.is_empty() {
        out.push_str("🚀 クイックウィン（低競合・高ボリューム）\n");
        push_keyword_lines(&mut out, &analysis.quick_wins, rows.min(QUICK_WIN_PREVIEW), |k| {
            format!("{:>8}/mo  {}", format_thousands(k.searches), format_cpc(k))
        });
        out.push('\n');
    }

    if !analysis.difficult_keywords.is_empty() {
        out.push_str("⚔ 難関キーワード（高競合・高ボリューム）\n");
        push_keyword_lines(&mut out, &analysis.difficult_keywords, rows, |k| {
            format!("{:>8}/mo  index {}", format_thousands(k.searches), k.competition_index)
        });
        out.push('\n');
    }

    if analysis.new_opportunities > 0 {
        out.push_str("📊 競合度の内訳\n");
        for level in [Competition::Low, Competition::Medium, Competition::High] {
            let count = analysis.competition_breakdown.count(level);
            let pct = percentage(count, analysis.new_opportunities).unwrap_or_default();
            let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
            out.push_str(&format!(
                "  {:<7} {:<width$} {:>5} ({:.1}%)\n",
                level.title(),
                "█".repeat(filled),
                count,
                pct,
                width = BAR_WIDTH
            ));
        }
        out.push('\n');
    }

    if analysis.avg_low_bid > 0.0 {
        out.push_str(&format!(
            "💰 低競合キーワードの平均CPC: {} {}（推奨日予算 {} {}）\n",
            analysis.currency,
            format_money(analysis.avg_low_bid),
            analysis.currency,
            format_money(analysis.avg_low_bid * keyword_analyzer_common::report::DAILY_CLICKS)
        ));
    }

    out
}

fn push_keyword_lines<F>(out: &mut String, records: &[KeywordRecord], rows: usize, detail: F)
where
    F: Fn(&KeywordRecord) -> String,
{
    for (i, k) in records.iter().take(rows).enumerate() {
        out.push_str(&format!("  {:>2}. {:<40} {}\n", i + 1, k.text, detail(k)));
    }
    if records.len() > rows {
        out.push_str(&format!("      … 他 {} 件\n", records.len() - rows));
    }
}
