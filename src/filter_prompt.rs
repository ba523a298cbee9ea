//! 対話式の絞り込み条件入力

use crate::error::{AppError, Result};
use dialoguer::Input;
use keyword_analyzer_common::{FilterConfig, KeywordLength};

/// 現在の条件を初期値として3項目を順に入力させる
pub fn prompt_filters(current: &FilterConfig) -> Result<FilterConfig> {
    println!("🔎 絞り込み条件（Enterで現在の値のまま）");

    let must_include: String = Input::new()
        .with_prompt("含む語")
        .with_initial_text(current.must_include.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AppError::Prompt(e.to_string()))?;

    let exclude: String = Input::new()
        .with_prompt("除外語（カンマ区切り）")
        .with_initial_text(current.exclude.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AppError::Prompt(e.to_string()))?;

    let keyword_length: KeywordLength = Input::new()
        .with_prompt("単語数 (any/1-5/6=6語以上)")
        .default(current.keyword_length)
        .interact_text()
        .map_err(|e| AppError::Prompt(e.to_string()))?;

    Ok(FilterConfig {
        must_include,
        exclude,
        keyword_length,
    }
    .snapshot())
}
