//! 絞り込み条件の適用
//!
//! 3つの条件（含む語・除外語・単語数）はすべてAND。
//! どれもキーワード文字列だけを見る純粋な述語なので適用順で結果は変わらない。

use crate::types::{FilterConfig, KeywordLength, KeywordRecord};

/// 事前に小文字化・分割した絞り込み条件
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    must_include: Option<String>,
    exclude_terms: Vec<String>,
    length: KeywordLength,
}

impl CompiledFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let must_include = Some(config.must_include.trim().to_lowercase()).filter(|t| !t.is_empty());
        let exclude_terms = split_exclude_terms(&config.exclude);

        Self {
            must_include,
            exclude_terms,
            length: config.keyword_length,
        }
    }

    /// 1件が条件に一致するか
    pub fn matches(&self, record: &KeywordRecord) -> bool {
        // 単語数の判定が最も軽いので先に行う
        if !self.length.matches(record.word_count()) {
            return false;
        }

        if self.must_include.is_none() && self.exclude_terms.is_empty() {
            return true;
        }

        let text = record.text.to_lowercase();

        if let Some(term) = &self.must_include {
            if !text.contains(term.as_str()) {
                return false;
            }
        }

        !self.exclude_terms.iter().any(|term| text.contains(term.as_str()))
    }
}

/// 除外語をカンマで分割（前後空白除去・小文字化・空要素除去）
pub fn split_exclude_terms(exclude: &str) -> Vec<String> {
    exclude
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// 絞り込みを適用（入力は変更せず、一致したものを複製して返す）
pub fn apply_filters(records: &[KeywordRecord], config: &FilterConfig) -> Vec<KeywordRecord> {
    let filter = CompiledFilter::new(config);
    records.iter().filter(|r| filter.matches(r)).cloned().collect()
}
