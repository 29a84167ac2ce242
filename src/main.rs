use clap::Parser;
use logbook_audit::{cli, config, credential, display, error, export, extractor, loader, session};
use cli::{Cli, Commands};
use config::Config;
use error::{AuditError, Result};
use logbook_audit_common::{layout_section, AuditReport};
use std::path::Path;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_report(path: &Path) -> Result<AuditReport> {
    if !path.exists() {
        return Err(AuditError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Audit { inputs, output, batch_size, recursive, quiet } => {
            println!("✈️ logbook-audit - ログブック監査\n");

            // 1. 入力読み込み
            println!("[1/3] 入力を読み込み中...");
            let (file_count, images) = loader::load_inputs(&inputs, recursive)?;
            if images.is_empty() {
                let joined = inputs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ");
                return Err(AuditError::NoImagesFound(joined));
            }
            println!("✔ Uploaded {} files → {} images to analyze", file_count, images.len());
            for image in &images {
                println!("  - {}", image.name);
            }

            // 2. バッチ抽出
            let batch_size = batch_size.unwrap_or(config.default_batch_size);
            let client = extractor::OpenAiClient::from_config(&config)?;
            println!("\n[2/3] AI解析中... (モデル: {}, バッチサイズ: {})", client.model(), batch_size);

            let total_batches = logbook_audit_common::batch_count(images.len(), batch_size)?;
            let progress = display::BatchProgress::new(total_batches, quiet);
            let mut session = session::AuditSession::new();
            let result = extractor::run_extraction(&client, &images, batch_size, &mut session, &progress).await;
            progress.finish();

            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    if session.completed_batches() > 0 {
                        println!(
                            "⚠ {}/{} バッチ完了後に失敗しました（処理済み {} 枚）",
                            session.completed_batches(),
                            session.total_batches(),
                            session.processed_images()
                        );
                    }
                    return Err(e);
                }
            };
            println!("✔ Analysis complete! Processed {} images.\n", session.processed_images());

            // 3. 結果保存
            println!("[3/3] 結果を保存中...");
            let json = serde_json::to_string_pretty(&report)?;
            std::fs::write(&output, json)?;
            println!("✔ 結果を保存: {}", output.display());

            if !quiet {
                println!();
                display::print_report(&report);
            }

            println!("\n✅ 監査完了");
        }

        Commands::Show { input, tab } => {
            let report = load_report(&input)?;
            match tab {
                Some(tab) => display::print_tab(&report, tab),
                None => display::print_report(&report),
            }
        }

        Commands::Reset { input } => {
            if input.exists() {
                std::fs::remove_file(&input)?;
                println!("✔ 監査結果を削除しました: {}", input.display());
            } else {
                println!("監査結果ファイルが存在しません: {}", input.display());
            }
            println!("新しい監査は `logbook-audit audit <files>` で開始できます");
        }

        Commands::Card { section, format, output, set, regen, random, seed, interactive } => {
            println!("🪪 logbook-audit - 資格証カード生成\n");

            let sections = credential::resolve_sections(&section)?;
            let mut form = credential::CredentialForm::new(seed);

            for raw in &set {
                let (key, value) = credential::parse_assignment(raw)?;
                form.set(&key, &value);
            }
            for field_id in &regen {
                form.regenerate(field_id);
            }
            for unknown in form.unknown_fields() {
                tracing::warn!(field = unknown, "どのセクションにもない項目です");
            }

            let fonts = export::CardFonts::discover(config.font_path.as_deref());

            for spec in sections {
                if interactive {
                    credential::prompt_section(&mut form, spec)?;
                }
                if random {
                    form.fill_missing(spec);
                }

                let layout = layout_section(spec.id, &form.section_values(spec))?;
                let written = export::export_section(&layout, spec.id, format, &output, &fonts)?;
                for path in written {
                    println!("✔ {}: {}", spec.title, path.display());
                }
            }

            println!("\n✅ 生成完了");
        }

        Commands::Config { set_api_key, set_model, set_font, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if let Some(path) = set_font {
                config.set_font(path)?;
                println!("✔ フォントを設定しました");
            }

            if show {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  モデル: {}", config.model);
                println!("  APIベースURL: {}", config.api_base());
                println!("  最大トークン: {}", config.max_tokens);
                println!("  バッチサイズ: {}", config.default_batch_size);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
                match &config.font_path {
                    Some(path) => println!("  フォント: {}", path.display()),
                    None => println!("  フォント: 自動検出"),
                }
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
