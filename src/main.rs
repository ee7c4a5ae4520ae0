use anyhow::Context;
use clap::Parser;
use photo_verdict::{cli, config, metadata, model, store};
use cli::{Cli, Commands};
use config::Config;
use model::CliModelClient;
use photo_verdict::pipeline::Pipeline;
use photo_verdict_common::parse_response;
use store::{LocalObjectStore, MemoryObjectStore, RecordStore};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗")?;
    let provider = cli.ai_provider.unwrap_or(config.provider);

    match cli.command {
        Commands::Submit { photo, url, prompt_version, dry_run } => {
            println!("📸 photo-verdict - 写真判定\n");
            let version = prompt_version.unwrap_or(config.prompt_version);

            // 1. 読み込み
            println!("[1/3] 写真を読み込み中...");
            let photo = metadata::read_photo(&photo)?;
            println!("✔ {} ({} bytes)\n", photo.file_name, photo.bytes.len());

            // 2. 判定
            println!("[2/3] AI判定中... ({}, {})", provider.command_name(), version);
            let client = CliModelClient::from_config(&config, provider);

            let submission = if dry_run {
                let pipeline = Pipeline::new(version, MemoryObjectStore::default());
                pipeline
                    .submit(&photo.bytes, &photo.file_name, url.as_deref(), &client)
                    .await?
            } else {
                let pipeline = Pipeline::new(version, LocalObjectStore::new(&config.store_root));
                pipeline
                    .submit(&photo.bytes, &photo.file_name, url.as_deref(), &client)
                    .await?
            };
            println!("✔ 判定完了\n");

            // 3. 結果
            println!("[3/3] 結果");
            println!("{}", serde_json::to_string_pretty(&submission.record)?);
            if dry_run {
                println!("\n(dry-run) 保存先: {}", submission.key);
            } else {
                println!("\n✔ 保存: {}", submission.key);
            }

            let verdict = &submission.record.result;
            if verdict.yes_count != verdict.answered_yes() || verdict.no_count != verdict.answered_no() {
                println!(
                    "⚠ 件数 (Yes {} / No {}) と回答 (Yes {} / No {}) が一致しません",
                    verdict.yes_count,
                    verdict.no_count,
                    verdict.answered_yes(),
                    verdict.answered_no()
                );
            }
        }

        Commands::Prompt { photo, prompt_version } => {
            let version = prompt_version.unwrap_or(config.prompt_version);
            let photo = metadata::read_photo(&photo)?;
            let pipeline = Pipeline::new(version, MemoryObjectStore::default());
            let (_, prompt) = pipeline.preview_prompt(&photo.bytes);

            println!("=== system ===\n{}\n", prompt.system);
            println!("=== user ===\n{}", prompt.user);
        }

        Commands::Parse { input, prompt_version } => {
            let version = prompt_version.unwrap_or(config.prompt_version);
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("レスポンスを読み込めません: {}", input.display()))?;
            let parsed = parse_response(&raw, version)?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }

        Commands::Metadata { photo } => {
            let photo = metadata::read_photo(&photo)?;
            let map = metadata::extract(&photo.bytes);
            println!("{}", serde_json::to_string_pretty(&map)?);
        }

        Commands::Count { prefix } => {
            let records = RecordStore::new(LocalObjectStore::new(&config.store_root));
            let count = records.count_by_prefix(&prefix)?;
            println!("{}: {}件", prefix, count);
        }

        Commands::Config { set_api_key, set_prompt_version, set_store_root, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(version) = set_prompt_version {
                config.prompt_version = version;
                config.save()?;
                println!("✔ プロンプト版を設定しました: {}", version);
            }

            if let Some(root) = set_store_root {
                config.store_root = root;
                config.save()?;
                println!("✔ レコードストアを設定しました: {}", config.store_root.display());
            }

            if show {
                println!("設定:");
                println!("  プロバイダ: {}", config.provider.command_name());
                println!("  モデル: {}", if config.model.is_empty() { "(CLIの既定)" } else { config.model.as_str() });
                println!("  プロンプト版: {}", config.prompt_version);
                println!("  レコードストア: {}", config.store_root.display());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
