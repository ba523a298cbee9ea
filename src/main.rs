use anyhow::Context;
use clap::Parser;
use keyword_analyzer_common::{analyze_keywords, AnalysisResult, FilterConfig};
use keyword_analyzer_rust::cli::{Cli, Commands, FilterArgs};
use keyword_analyzer_rust::config::Config;
use keyword_analyzer_rust::{export, filter_prompt, reader, summary};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = Config::load().context("設定ファイルを読み込めません")?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Analyze { file, filters, json } => {
            println!("🔍 kwa - キーワード解析\n");

            let filters = resolve_filters(&config, &filters)?;
            let (file_name, analysis) = run_analysis(&file, &filters, 2).await?;

            println!("{}", summary::render_summary(&analysis, config.summary_rows));

            if let Some(json_path) = json {
                let content = serde_json::to_string_pretty(&analysis)?;
                std::fs::write(&json_path, content)
                    .with_context(|| format!("JSONを書き込めません: {}", json_path.display()))?;
                println!("✔ 解析結果を保存: {}", json_path.display());
            }

            log::debug!("{}: 解析完了", file_name);
            println!("\n✅ 解析完了");
        }

        Commands::Report { file, filters, output, stdout } => {
            let filters = resolve_filters(&config, &filters)?;

            if stdout {
                let loaded = reader::load_export(&file).await?;
                let analysis = analyze_keywords(&loaded.keywords, &filters);
                print!("{}", export::markdown::render_report(&analysis, &loaded.file_name, today));
                return Ok(());
            }

            println!("📝 kwa - レポート生成\n");
            let (file_name, analysis) = run_analysis(&file, &filters, 3).await?;

            println!("[3/3] レポートを保存中...");
            let default_name = export::analysis_file_name(&file_name, today, "md");
            let target = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let path = export::output_path_for_format(&target, &default_name);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            export::markdown::write_report(&analysis, &file_name, &path, today)?;
            println!("✔ レポートを保存: {}", path.display());

            println!("\n✅ レポート生成完了");
        }

        Commands::Export { file, filters, format, output } => {
            println!("📄 kwa - エクスポート\n");

            let filters = resolve_filters(&config, &filters)?;
            let (file_name, analysis) = run_analysis(&file, &filters, 3).await?;

            println!("[3/3] エクスポート中...");
            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let written = export::export_results(&analysis, &file_name, &format, &output_dir, today)?;
            println!("✔ {}ファイルを出力", written.len());

            println!("\n✅ エクスポート完了");
        }

        Commands::Config {
            show,
            must_include,
            exclude,
            length,
            output_dir,
            summary_rows,
            reset,
        } => {
            let mut config = if reset {
                println!("✔ 設定を初期化しました");
                Config::default()
            } else {
                config
            };

            let mut changed = reset;
            if let Some(term) = must_include {
                config.default_filters.must_include = term;
                changed = true;
            }
            if let Some(terms) = exclude {
                config.default_filters.exclude = terms;
                changed = true;
            }
            if let Some(length) = length {
                config.default_filters.keyword_length = length;
                changed = true;
            }
            if let Some(dir) = output_dir {
                config.output_dir = Some(dir);
                changed = true;
            }
            if let Some(rows) = summary_rows {
                config.summary_rows = rows;
                changed = true;
            }

            if changed {
                config.default_filters = config.default_filters.snapshot();
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                print_config(&config);
            }
        }
    }

    Ok(())
}

/// 設定の既定値にCLI引数を重ね、必要なら対話入力で確定させる
fn resolve_filters(config: &Config, args: &FilterArgs) -> anyhow::Result<FilterConfig> {
    let filters = config.resolve_filters(
        args.must_include.as_deref(),
        args.exclude.as_deref(),
        args.length,
    );

    if args.interactive {
        return Ok(filter_prompt::prompt_filters(&filters)?);
    }

    Ok(filters)
}

/// 読み込み・解析までを進捗表示付きで実行
async fn run_analysis(
    file: &Path,
    filters: &FilterConfig,
    total_steps: usize,
) -> anyhow::Result<(String, AnalysisResult)> {
    println!("[1/{}] ファイルを読み込み中...", total_steps);
    let loaded = reader::load_export(file)
        .await
        .with_context(|| format!("{} を処理できません", file.display()))?;
    println!("✔ {}件のキーワードを読み込み\n", loaded.keywords.len());

    println!("[2/{}] 解析中...", total_steps);
    let analysis = analyze_keywords(&loaded.keywords, filters);
    println!(
        "✔ 新規候補 {}件 / 推奨 {}件\n",
        analysis.new_opportunities,
        analysis.top_keywords.len()
    );

    Ok((loaded.file_name, analysis))
}

fn print_config(config: &Config) {
    let filters = &config.default_filters;
    println!("設定:");
    println!(
        "  含む語: {}",
        if filters.must_include.is_empty() { "(なし)" } else { filters.must_include.as_str() }
    );
    println!(
        "  除外語: {}",
        if filters.exclude.is_empty() { "(なし)" } else { filters.exclude.as_str() }
    );
    println!("  単語数: {}", filters.keyword_length);
    println!(
        "  出力先: {}",
        config
            .output_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string())
    );
    println!("  表示件数: {}", config.summary_rows);
    if let Ok(path) = Config::config_path() {
        println!("  設定ファイル: {}", path.display());
    }
}
