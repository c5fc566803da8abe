use carimbo_rede::{cli, clipboard, config, converter, error, logging, stamp};
use carimbo_common::messages;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{CarimboError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Stamp { input, set, output, copy, save_record } => {
            println!("📋 carimbo - Carimbo de Rede Externa\n");

            let record = input.as_deref().map(stamp::load_record).transpose()?;
            let assignments = set
                .iter()
                .map(|s| stamp::parse_assignment(s))
                .collect::<Result<Vec<_>>>()?;

            let mut form = stamp::build_form(record, config.technician(), &assignments)?;

            let now = chrono::Local::now().naive_local();
            let generated = form.generate(now).cloned();
            let report = match generated {
                Ok(report) => report,
                Err(e) => {
                    stamp::print_missing(&form);
                    return Err(e.into());
                }
            };

            println!("{}\n", report.render());
            println!("✔ {}", messages::STAMP_GENERATED);

            if let Some(path) = output {
                stamp::write_report(&report, &path)?;
                println!("✔ carimbo を保存: {}", path.display());
            }

            if copy || config.copy_to_clipboard {
                clipboard::copy_text(&form.copy_text()?)?;
                println!("✔ {}", messages::STAMP_COPIED);
            }

            if let Some(path) = save_record {
                stamp::save_record(form.record(), &path)?;
                println!("✔ フォームデータを保存: {}", path.display());
            }
        }

        Commands::Interactive { input } => {
            println!("📋 carimbo - 対話入力\n");

            let record = input.as_deref().map(stamp::load_record).transpose()?;
            let form = stamp::build_form(record, config.technician(), &[])?;
            stamp::interactive::run_interactive(form, input.as_deref(), config.copy_to_clipboard)?;
        }

        Commands::Template { output } => {
            let json = stamp::template_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ テンプレートを保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Convert { path, format, output, recursive, data_uri } => {
            println!("🖼  carimbo - BMP変換\n");

            let format = format.unwrap_or(config.default_format);
            let output_dir = output.or_else(|| config.output_dir.clone());

            // 1. Scan
            println!("[1/2] BMPをスキャン中...");
            let files = converter::scan_bmp(&path, recursive)?;
            println!("✔ {}件のBMPを検出\n", files.len());

            if data_uri && files.len() != 1 {
                return Err(CarimboError::DataUriNeedsSingleFile);
            }

            // 2. Convert
            println!("[2/2] {} に変換中...", format.extension().to_uppercase());
            let outcomes = converter::convert_all(&files, format, !data_uri).await;

            let mut failed = 0;
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(image) if data_uri => println!("{}", image.data_uri()),
                    Ok(image) => {
                        let written = converter::write_output(&outcome.source, output_dir.as_deref(), image)?;
                        if cli.verbose {
                            println!("  {} ({}x{})", written.display(), image.width, image.height);
                        }
                    }
                    Err(e) => {
                        failed += 1;
                        println!("✖ {}: {}", outcome.source.display(), e);
                        tracing::warn!(error = ?e, "conversion failed");
                    }
                }
            }

            if failed == outcomes.len() {
                // 全件失敗は最初のエラーで終了
                if let Some(Err(e)) = outcomes.into_iter().next().map(|o| o.result) {
                    return Err(e.into());
                }
            } else if !data_uri {
                println!("\n✅ {}", messages::IMAGE_CONVERTED);
                if failed > 0 {
                    println!("   ({}件失敗)", failed);
                }
            }
        }

        Commands::Config { set_technician, set_format, set_output_dir, copy_to_clipboard, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(name) = set_technician {
                config.default_technician = Some(name);
                changed = true;
            }
            if let Some(format) = set_format {
                config.default_format = format;
                changed = true;
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
                changed = true;
            }
            if let Some(copy) = copy_to_clipboard {
                config.copy_to_clipboard = copy;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  ファイル: {}", Config::config_path()?.display());
                println!(
                    "  技術者: {}",
                    config.technician().unwrap_or_else(|| "未設定".to_string())
                );
                println!("  出力形式: {}", config.default_format);
                println!(
                    "  出力フォルダ: {}",
                    config
                        .output_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "元ファイルと同じ".to_string())
                );
                println!(
                    "  自動コピー: {}",
                    if config.copy_to_clipboard { "有効" } else { "無効" }
                );
            }
        }
    }

    Ok(())
}
