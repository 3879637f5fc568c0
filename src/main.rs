//! Terjemah - Document Translation Workflow
//!
//! Main entry point: translates text snippets and documents (docx, xlsx,
//! pptx, srt, vtt, txt, csv) via an external translation backend or a
//! locally trained classifier demo mode.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use terjemah::cli::{Args, Commands};
use terjemah::config::{Config, SlideTextMode, TranslationMode};
use terjemah::error::TerjemahError;
use terjemah::lang::{self, LanguageId};
use terjemah::model::ClassifierTable;
use terjemah::session::Session;
use terjemah::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Text {
            text,
            target_lang,
            dict,
            train,
            source_lang,
            mode,
        } => {
            config.translate.mode = parse_translation_mode(&mode)?;
            if let Some(source) = source_lang {
                config.translate.source_language = Some(source.parse::<LanguageId>()?);
            }
            let target: LanguageId = target_lang.parse()?;
            let session = Session::from_files(&dict, &train)?;
            let workflow = Workflow::new(config, session);

            let translation = workflow.translate_text(&text, &target).await?;
            println!("{}", translation);
        }
        Commands::Document {
            input,
            target_langs,
            output_dir,
            dict,
            train,
            mode,
            bilingual_slides,
        } => {
            info!("Translating document: {}", input.display());
            config.translate.mode = parse_translation_mode(&mode)?;
            if bilingual_slides {
                config.document.slide_text = SlideTextMode::Bilingual;
            }
            let targets = parse_target_languages(&target_langs)?;
            let session = Session::from_files(&dict, &train)?;
            let workflow = Workflow::new(config, session);

            let outputs = workflow
                .translate_file(&input, &targets, output_dir.as_deref())
                .await?;
            for output in outputs {
                println!("{}", output.display());
            }
        }
        Commands::Batch {
            input_dir,
            target_langs,
            output_dir,
            dict,
            train,
            mode,
            bilingual_slides,
        } => {
            info!("Translating directory: {}", input_dir.display());
            config.translate.mode = parse_translation_mode(&mode)?;
            if bilingual_slides {
                config.document.slide_text = SlideTextMode::Bilingual;
            }
            let targets = parse_target_languages(&target_langs)?;
            let session = Session::from_files(&dict, &train)?;
            let workflow = Workflow::new(config, session);

            workflow
                .translate_directory(&input_dir, &targets, output_dir.as_deref())
                .await?;
        }
        Commands::Train { files } => {
            if files.is_empty() {
                return Err(TerjemahError::Config(
                    "No training files given".to_string(),
                )
                .into());
            }
            let classifiers = ClassifierTable::train_from_csv_files(&files)?;

            println!("\nTrained language pairs:");
            println!("{:<20} {:<10} {:<10}", "Pair", "Examples", "Labels");
            println!("{}", "-".repeat(40));
            let mut pairs: Vec<_> = classifiers.pairs().collect();
            pairs.sort_by_key(|(pair, _)| pair.to_string());
            for (pair, model) in pairs {
                println!(
                    "{:<20} {:<10} {:<10}",
                    pair.to_string(),
                    model.example_count(),
                    model.label_count()
                );
            }
            println!(
                "\n{} classifier(s) trained. Models are held in memory per \
                 invocation; pass the same files via --train when translating.",
                classifiers.len()
            );
        }
        Commands::Detect { text } => {
            let identified = lang::identify(&text);
            println!("{}", identified);
        }
        Commands::InitConfig { path } => {
            config.save_to_file(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".terjemah").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Daily-rotated log file; the guard must outlive the program.
    let file_appender = rolling::daily(&log_dir, "terjemah.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Parse a comma-separated list of target language codes
fn parse_target_languages(list: &str) -> Result<Vec<LanguageId>> {
    let targets = list
        .split(',')
        .map(|s| s.trim().parse::<LanguageId>())
        .collect::<terjemah::error::Result<Vec<_>>>()?;
    if targets.is_empty() {
        return Err(TerjemahError::Config("No target languages given".to_string()).into());
    }
    Ok(targets)
}

/// Parse translation mode from string
fn parse_translation_mode(mode: &str) -> Result<TranslationMode> {
    match mode.to_lowercase().as_str() {
        "auto" => Ok(TranslationMode::Auto),
        "remote" => Ok(TranslationMode::Remote),
        "classifier" => Ok(TranslationMode::Classifier),
        _ => Err(TerjemahError::Config(format!(
            "Invalid translation mode '{}'. Valid modes: auto, remote, classifier",
            mode
        ))
        .into()),
    }
}
