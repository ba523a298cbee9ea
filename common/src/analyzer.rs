//! キーワード解析ロジック
//!
//! 処理順（この順序を変えると結果が変わる）:
//! 1. アカウント登録済み件数（フィルタ前の全件）
//! 2. 未登録キーワードに絞り込み条件を適用 → ワーキングセット
//! 3. 採点
//! 4. 各バケットの抽出・ソート・件数制限
//! 5. 競合度別件数・低競合の平均入札単価

use crate::filter::apply_filters;
use crate::scorer::score;
use crate::types::{
    AnalysisResult, Competition, CompetitionBreakdown, FilterConfig, KeywordRecord,
    DEFAULT_CURRENCY,
};

/// 平均入札単価の対象とする最低検索数
pub const MIN_MONTHLY_SEARCHES: u64 = 10;

pub const TOP_KEYWORDS_LIMIT: usize = 25;
pub const DIFFICULT_LIMIT: usize = 5;
pub const QUICK_WINS_LIMIT: usize = 10;
pub const HIGH_VOLUME_LIMIT: usize = 15;
pub const LONG_TAIL_LIMIT: usize = 15;

/// クイックウィン: 低競合かつこの検索数以上
pub const QUICK_WIN_MIN_SEARCHES: u64 = 500;
/// 難関: 高競合かつこの検索数以上
pub const DIFFICULT_MIN_SEARCHES: u64 = 1000;
/// 高ボリューム
pub const HIGH_VOLUME_MIN_SEARCHES: u64 = 5000;
/// ロングテール: 3語以上・低競合・この検索数以上
pub const LONG_TAIL_MIN_SEARCHES: u64 = 100;
pub const LONG_TAIL_MIN_WORDS: usize = 3;

/// キーワード一覧を解析
///
/// `in_account_count` と `currency` はフィルタ前の全件から、
/// それ以外の値はすべてワーキングセットから算出する。
/// 同じ入力に対しては常に同じ結果を返す。
pub fn analyze_keywords(keywords: &[KeywordRecord], filters: &FilterConfig) -> AnalysisResult {
    let filters = filters.snapshot();

    let in_account_count = keywords.iter().filter(|k| k.in_account).count();

    let new_keywords: Vec<KeywordRecord> =
        keywords.iter().filter(|k| !k.in_account).cloned().collect();
    let working_set: Vec<KeywordRecord> = apply_filters(&new_keywords, &filters)
        .into_iter()
        .map(|mut k| {
            k.score = Some(score(&k));
            k
        })
        .collect();

    log::debug!(
        "全 {} 件 / 登録済み {} 件 / ワーキングセット {} 件",
        keywords.len(),
        in_account_count,
        working_set.len()
    );

    // sort_by は安定ソートなので同点は元の順序を保つ
    let mut top_keywords = working_set.clone();
    top_keywords.sort_by(|a, b| b.score.cmp(&a.score));
    top_keywords.truncate(TOP_KEYWORDS_LIMIT);

    let difficult_keywords = top_by_searches(&working_set, DIFFICULT_LIMIT, |k| {
        k.competition == Competition::High && k.searches >= DIFFICULT_MIN_SEARCHES
    });

    let quick_wins = top_by_searches(&working_set, QUICK_WINS_LIMIT, |k| {
        k.competition == Competition::Low && k.searches >= QUICK_WIN_MIN_SEARCHES
    });

    let high_volume = top_by_searches(&working_set, HIGH_VOLUME_LIMIT, |k| {
        k.searches >= HIGH_VOLUME_MIN_SEARCHES
    });

    let long_tail = top_by_searches(&working_set, LONG_TAIL_LIMIT, |k| {
        k.word_count() >= LONG_TAIL_MIN_WORDS
            && k.searches >= LONG_TAIL_MIN_SEARCHES
            && k.competition == Competition::Low
    });

    let competition_breakdown =
        working_set
            .iter()
            .fold(CompetitionBreakdown::default(), |mut acc, k| {
                acc.add(k.competition);
                acc
            });

    let currency = keywords
        .first()
        .map(|k| k.currency.clone())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    AnalysisResult {
        total_keywords: keywords.len(),
        in_account_count,
        new_opportunities: working_set.len(),
        top_keywords,
        quick_wins,
        difficult_keywords,
        high_volume,
        long_tail,
        competition_breakdown,
        avg_low_bid: average_low_competition_bid(&working_set),
        currency,
        filters,
    }
}

/// 低競合キーワードの平均入札単価（入札レンジの中央値の平均）
///
/// 対象が0件なら0を返す。
pub fn average_low_competition_bid(working_set: &[KeywordRecord]) -> f64 {
    let midpoints: Vec<f64> = working_set
        .iter()
        .filter(|k| k.competition == Competition::Low && k.searches >= MIN_MONTHLY_SEARCHES)
        .filter_map(|k| k.bid_range())
        .map(|range| range.midpoint())
        .collect();

    if midpoints.is_empty() {
        return 0.0;
    }
    midpoints.iter().sum::<f64>() / midpoints.len() as f64
}

/// 条件に一致したものを検索数の降順で上位n件
fn top_by_searches<F>(records: &[KeywordRecord], limit: usize, predicate: F) -> Vec<KeywordRecord>
where
    F: Fn(&KeywordRecord) -> bool,
{
    let mut matched: Vec<KeywordRecord> = records.iter().filter(|k| predicate(k)).cloned().collect();
    matched.sort_by(|a, b| b.searches.cmp(&a.searches));
    matched.truncate(limit);
    matched
}
