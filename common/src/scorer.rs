//! 機会スコア
//!
//! 検索ボリューム（1〜5点）と競合度（0〜3点）の合計。
//! 競合度不明かつ低ボリュームの場合のみ合計が1になるため、下限2に丸める。

use crate::types::{Competition, KeywordRecord};

/// スコアの下限・上限
pub const MIN_SCORE: u8 = 2;
pub const MAX_SCORE: u8 = 8;

/// 検索ボリュームの閾値と点数（上から順に判定）
pub const VOLUME_TIERS: [(u64, u8); 4] = [(1000, 5), (500, 4), (100, 3), (50, 2)];

/// 検索ボリューム点
pub fn volume_points(searches: u64) -> u8 {
    VOLUME_TIERS
        .iter()
        .find(|(threshold, _)| searches >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(1)
}

/// 競合度点（低いほど高得点）
pub fn competition_points(competition: Competition) -> u8 {
    match competition {
        Competition::Low => 3,
        Competition::Medium => 2,
        Competition::High => 1,
        Competition::Unknown => 0,
    }
}

/// キーワードを採点（2〜8）
pub fn score(record: &KeywordRecord) -> u8 {
    let raw = volume_points(record.searches) + competition_points(record.competition);
    raw.clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(searches: u64, competition: Competition) -> KeywordRecord {
        KeywordRecord {
            text: "k".to_string(),
            searches,
            competition,
            ..Default::default()
        }
    }

    #[test]
    fn test_volume_points_boundaries() {
        assert_eq!(volume_points(0), 1);
        assert_eq!(volume_points(49), 1);
        assert_eq!(volume_points(50), 2);
        assert_eq!(volume_points(99), 2);
        assert_eq!(volume_points(100), 3);
        assert_eq!(volume_points(499), 3);
        assert_eq!(volume_points(500), 4);
        assert_eq!(volume_points(999), 4);
        assert_eq!(volume_points(1000), 5);
        assert_eq!(volume_points(1_000_000), 5);
    }

    #[test]
    fn test_score_examples() {
        assert_eq!(score(&record(1200, Competition::Low)), 8);
        assert_eq!(score(&record(600, Competition::Medium)), 6);
        assert_eq!(score(&record(10, Competition::High)), 2);
        assert_eq!(score(&record(100, Competition::Unknown)), 3);
    }

    #[test]
    fn test_unknown_low_volume_raised_to_min() {
        assert_eq!(score(&record(10, Competition::Unknown)), MIN_SCORE);
    }

    #[test]
    fn test_score_bounds() {
        for searches in [0, 49, 50, 100, 500, 1000, 50_000] {
            for competition in [
                Competition::Low,
                Competition::Medium,
                Competition::High,
                Competition::Unknown,
            ] {
                let s = score(&record(searches, competition));
                assert!((MIN_SCORE..=MAX_SCORE).contains(&s), "score {} out of range", s);
            }
        }
    }
}
