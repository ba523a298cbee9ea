use crate::error::{AppError, Result};
use keyword_analyzer_common::{FilterConfig, KeywordLength};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ターミナル表示で各バケットから表示する件数
pub const DEFAULT_SUMMARY_ROWS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 既定の絞り込み条件（CLI引数で項目ごとに上書き）
    pub default_filters: FilterConfig,
    /// レポート等の既定出力先
    pub output_dir: Option<PathBuf>,
    pub summary_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_filters: FilterConfig::default(),
            output_dir: None,
            summary_rows: DEFAULT_SUMMARY_ROWS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("keyword-analyzer").join("config.json"))
    }

    /// 既定値にCLI指定を重ねた絞り込み条件
    ///
    /// 指定された項目だけを上書きし、解析開始時点のスナップショットを返す。
    pub fn resolve_filters(
        &self,
        must_include: Option<&str>,
        exclude: Option<&str>,
        length: Option<KeywordLength>,
    ) -> FilterConfig {
        let defaults = &self.default_filters;
        FilterConfig {
            must_include: must_include
                .map(str::to_string)
                .unwrap_or_else(|| defaults.must_include.clone()),
            exclude: exclude
                .map(str::to_string)
                .unwrap_or_else(|| defaults.exclude.clone()),
            keyword_length: length.unwrap_or(defaults.keyword_length),
        }
        .snapshot()
    }
}
