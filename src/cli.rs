use clap::{Args, Parser, Subcommand};
use keyword_analyzer_common::KeywordLength;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kwa")]
#[command(about = "Google Ads キーワードプランナー出力の解析・レポート生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 絞り込み条件（省略時は設定ファイルの既定値）
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// 含む必要がある語（部分一致、大文字小文字無視）
    #[arg(short = 'i', long)]
    pub must_include: Option<String>,

    /// 除外語（カンマ区切り）
    #[arg(short = 'x', long)]
    pub exclude: Option<String>,

    /// 単語数 (any/1-5/6=6語以上)
    #[arg(short = 'l', long)]
    pub length: Option<KeywordLength>,

    /// 絞り込み条件を対話的に入力
    #[arg(long)]
    pub interactive: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 出力ファイルを解析して結果を表示
    Analyze {
        /// キーワードプランナーの出力ファイル（CSV/TSV）
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// 解析結果をJSONで保存
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Markdownレポートを生成
    Report {
        /// キーワードプランナーの出力ファイル（CSV/TSV）
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// 出力ファイル/ディレクトリ（省略時は <元ファイル名>-analysis-<日付>.md）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ファイルに保存せず標準出力へ
        #[arg(long)]
        stdout: bool,
    },

    /// Markdown/JSON/Excelを出力
    Export {
        /// キーワードプランナーの出力ファイル（CSV/TSV）
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// 出力形式 (markdown/json/excel/all)
        #[arg(short, long, default_value = "all")]
        format: ExportFormat,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定の「含む語」
        #[arg(long)]
        must_include: Option<String>,

        /// 既定の除外語
        #[arg(long)]
        exclude: Option<String>,

        /// 既定の単語数
        #[arg(long)]
        length: Option<KeywordLength>,

        /// 既定の出力ディレクトリ
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// ターミナル表示の件数
        #[arg(long)]
        summary_rows: Option<usize>,

        /// 設定を初期化
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
    Excel,
    #[default]
    All,
}

impl ExportFormat {
    pub fn includes_markdown(&self) -> bool {
        matches!(self, ExportFormat::Markdown | ExportFormat::All)
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::All)
    }

    pub fn includes_excel(&self) -> bool {
        matches!(self, ExportFormat::Excel | ExportFormat::All)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use markdown, json, excel, or all", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::All => write!(f, "all"),
        }
    }
}
