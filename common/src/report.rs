//! Markdownレポート生成
//!
//! 同じ AnalysisResult・ファイル名・日付からは常に同じ文字列を生成する。
//! 検索数は桁区切り、金額は小数点以下2桁で表示する。

use crate::analyzer::{HIGH_VOLUME_MIN_SEARCHES, LONG_TAIL_MIN_WORDS};
use crate::scorer::{MAX_SCORE, MIN_SCORE};
use crate::types::{AnalysisResult, Competition, FilterConfig, KeywordRecord};

/// 推奨日予算の算出に使うクリック数/日
pub const DAILY_CLICKS: f64 = 50.0;

/// 検索数を桁区切りで表示（1200 → "1,200"）
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// 金額を小数点以下2桁で表示
pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

/// 入札レンジの表示（推定なしは "N/A"）
pub fn format_cpc(record: &KeywordRecord) -> String {
    match record.bid_range() {
        Some(range) => format!(
            "{} {}-{}",
            record.currency,
            format_money(range.low),
            format_money(range.high)
        ),
        None => "N/A".to_string(),
    }
}

/// 割合（%）。分母0ならNone
pub fn percentage(count: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(count as f64 / total as f64 * 100.0)
    }
}

/// 有効な絞り込み条件の説明（無ければNone）
pub fn describe_filters(filters: &FilterConfig) -> Option<String> {
    let mut parts = Vec::new();
    if !filters.must_include.is_empty() {
        parts.push(format!("Must include: \"{}\"", filters.must_include));
    }
    if !filters.exclude.is_empty() {
        parts.push(format!("Excluding: \"{}\"", filters.exclude));
    }
    if !filters.keyword_length.is_any() {
        parts.push(format!("Length: {}", filters.keyword_length.label()));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

/// 解析結果をMarkdownレポートに変換
///
/// # Arguments
/// * `analysis` - 解析結果
/// * `file_name` - 元ファイル名（表示用）
/// * `generated` - 生成日の表示文字列
pub fn generate_markdown_report(analysis: &AnalysisResult, file_name: &str, generated: &str) -> String {
    let mut md = String::new();

    md.push_str("# Google Ads Keyword Analysis Report\n\n");
    md.push_str(&format!("**Generated:** {}\n\n", generated));
    md.push_str(&format!("**Source File:** {}\n\n", file_name));
    md.push_str(&format!("**Total Keywords Analyzed:** {}\n\n", analysis.total_keywords));
    if let Some(filters) = describe_filters(&analysis.filters) {
        md.push_str(&format!("**Active Filters:** {}\n\n", filters));
    }
    md.push_str("---\n\n");

    write_summary(&mut md, analysis);
    write_top_recommendations(&mut md, analysis);
    write_quick_wins(&mut md, analysis);
    write_high_volume(&mut md, analysis);
    write_long_tail(&mut md, analysis);
    write_competition_breakdown(&mut md, analysis);
    write_strategy(&mut md, analysis);
    write_methodology(&mut md);

    md.push_str("---\n\n");
    md.push_str("*Report generated by Google Ads Keyword Analyzer*\n");

    md
}

fn write_summary(md: &mut String, analysis: &AnalysisResult) {
    let breakdown = &analysis.competition_breakdown;
    md.push_str("## 📊 Executive Summary\n\n");
    md.push_str(&format!("- **Keywords in Account:** {}\n", analysis.in_account_count));
    md.push_str(&format!("- **New Opportunities:** {}\n", analysis.new_opportunities));
    md.push_str(&format!("- **Low Competition Keywords:** {}\n", breakdown.low));
    md.push_str(&format!("- **Medium Competition Keywords:** {}\n", breakdown.medium));
    md.push_str(&format!("- **High Competition Keywords:** {}\n\n", breakdown.high));
}

fn write_top_recommendations(md: &mut String, analysis: &AnalysisResult) {
    md.push_str("---\n\n## 🎯 Top Recommendations\n\n");
    md.push_str("*Keywords not currently in your account, ranked by potential value*\n\n");

    if analysis.top_keywords.is_empty() {
        md.push_str("No keywords match current criteria.\n\n");
        return;
    }

    for (i, k) in analysis.top_keywords.iter().enumerate() {
        md.push_str(&format!("### {}. {}\n\n", i + 1, k.text));
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Monthly Searches | {} |\n", format_thousands(k.searches)));
        md.push_str(&format!("| Competition | {} |\n", k.competition.title()));
        md.push_str(&format!("| Competition Index | {}/100 |\n", k.competition_index));
        if let Some(range) = k.bid_range() {
            md.push_str(&format!(
                "| Est. CPC Range | {} {} - {} |\n",
                k.currency,
                format_money(range.low),
                format_money(range.high)
            ));
        }
        md.push_str(&format!(
            "| Opportunity Score | {}/{} |\n\n",
            k.score.unwrap_or_default(),
            MAX_SCORE
        ));
        md.push_str("---\n\n");
    }
}

fn write_quick_wins(md: &mut String, analysis: &AnalysisResult) {
    if analysis.quick_wins.is_empty() {
        return;
    }

    md.push_str("## 🚀 Quick Wins (Low Competition, High Volume)\n\n");
    md.push_str("| Keyword | Searches/mo | Competition Index | Est. CPC |\n");
    md.push_str("|---------|-------------|-------------------|----------|\n");
    for k in &analysis.quick_wins {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            k.text,
            format_thousands(k.searches),
            k.competition_index,
            format_cpc(k)
        ));
    }
    md.push('\n');
}

fn write_high_volume(md: &mut String, analysis: &AnalysisResult) {
    if analysis.high_volume.is_empty() {
        return;
    }

    md.push_str(&format!(
        "---\n\n## 📈 High Volume Keywords ({}+ searches/mo)\n\n",
        HIGH_VOLUME_MIN_SEARCHES
    ));
    md.push_str("| Keyword | Searches/mo | Competition | Score |\n");
    md.push_str("|---------|-------------|-------------|-------|\n");
    for k in &analysis.high_volume {
        md.push_str(&format!(
            "| {} | {} | {} | {}/{} |\n",
            k.text,
            format_thousands(k.searches),
            k.competition,
            k.score.unwrap_or_default(),
            MAX_SCORE
        ));
    }
    md.push('\n');
}

fn write_long_tail(md: &mut String, analysis: &AnalysisResult) {
    if analysis.long_tail.is_empty() {
        return;
    }

    md.push_str(&format!(
        "---\n\n## 🎣 Long-Tail Keywords ({}+ words, Low Competition)\n\n",
        LONG_TAIL_MIN_WORDS
    ));
    md.push_str("*These typically have higher conversion rates*\n\n");
    md.push_str("| Keyword | Searches/mo | Competition Index |\n");
    md.push_str("|---------|-------------|-------------------|\n");
    for k in &analysis.long_tail {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            k.text,
            format_thousands(k.searches),
            k.competition_index
        ));
    }
    md.push('\n');
}

fn write_competition_breakdown(md: &mut String, analysis: &AnalysisResult) {
    let total = analysis.new_opportunities;
    if total == 0 {
        return;
    }

    md.push_str("---\n\n## 📊 Competition Breakdown\n\n");
    md.push_str("### New Keywords (Not in Account)\n\n");
    md.push_str("| Competition Level | Count | Percentage |\n");
    md.push_str("|-------------------|-------|------------|\n");
    for level in [Competition::Low, Competition::Medium, Competition::High] {
        let count = analysis.competition_breakdown.count(level);
        let pct = percentage(count, total).unwrap_or_default();
        md.push_str(&format!("| {} | {} | {:.1}% |\n", level.title(), count, pct));
    }
    md.push('\n');
}

fn write_strategy(md: &mut String, analysis: &AnalysisResult) {
    md.push_str("---\n\n## 💡 Strategy Recommendations\n\n");
    md.push_str("### Immediate Actions\n\n");

    let mut actions = Vec::new();
    if !analysis.quick_wins.is_empty() {
        actions.push(format!(
            "**Start with Low Competition Winners**: Add the {} low-competition, high-volume keywords first",
            analysis.quick_wins.len()
        ));
    }
    if !analysis.long_tail.is_empty() {
        actions.push(format!(
            "**Target Long-Tail Keywords**: The {} long-tail keywords typically convert better",
            analysis.long_tail.len()
        ));
    }
    actions.push(format!(
        "**Monitor Competition**: {} high-competition keywords may require higher budgets",
        analysis.competition_breakdown.high
    ));
    actions.push(
        "**Test and Iterate**: Start with top 10-20 keywords and expand based on performance"
            .to_string(),
    );

    for (i, action) in actions.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, action));
    }
    md.push('\n');

    if analysis.avg_low_bid > 0.0 {
        md.push_str("### Budget Allocation\n\n");
        md.push_str(&format!(
            "- Average CPC for low competition keywords: {} {}\n",
            analysis.currency,
            format_money(analysis.avg_low_bid)
        ));
        md.push_str(&format!(
            "- Recommended starting daily budget: {} {} ({} clicks/day)\n\n",
            analysis.currency,
            format_money(analysis.avg_low_bid * DAILY_CLICKS),
            DAILY_CLICKS
        ));
    }
}

fn write_methodology(md: &mut String) {
    md.push_str("---\n\n## 📝 Scoring Methodology\n\n");
    md.push_str(&format!("Keywords are scored {}-{} based on:\n\n", MIN_SCORE, MAX_SCORE));
    md.push_str("**Search Volume:**\n");
    md.push_str("- 1000+ searches: 5 points\n");
    md.push_str("- 500-999 searches: 4 points\n");
    md.push_str("- 100-499 searches: 3 points\n");
    md.push_str("- 50-99 searches: 2 points\n");
    md.push_str("- <50 searches: 1 point\n\n");
    md.push_str("**Competition (lower is better):**\n");
    md.push_str("- Low competition: 3 points\n");
    md.push_str("- Medium competition: 2 points\n");
    md.push_str("- High competition: 1 point\n");
    md.push_str("- Unknown competition: 0 points\n\n");
    md.push_str(&format!("Scores below {} are raised to {}.\n\n", MIN_SCORE, MIN_SCORE));
}
