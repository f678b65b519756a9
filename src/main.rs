// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use babelcache::app_config::{Config, LogLevel};
use babelcache::database::TranslationRecord;
use babelcache::errors::AppError;
use babelcache::language_utils::{self, LanguagePair};
use babelcache::translation::HistoryFeed;
use babelcache::TranslationService;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a piece of text
    Translate {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        /// Source language code or name (defaults to config)
        #[arg(short, long)]
        source_language: Option<String>,

        /// Target language code or name (defaults to config)
        #[arg(short, long)]
        target_language: Option<String>,

        /// Exchange source and target before translating
        #[arg(long)]
        swap: bool,
    },

    /// Show history, most recent first
    History,

    /// Show history, most used first
    Popular,

    /// Show favorites, alphabetically
    Favorites,

    /// Toggle the favorite flag of a record
    Favorite {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Delete one record
    Delete {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Delete the whole history
    Clear,

    /// List the languages offered for translation
    Languages,

    /// Show history statistics
    Stats,

    /// Generate shell completions for babelcache
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// babelcache - text translation with provider fallback and a history cache
#[derive(Parser, Debug)]
#[command(name = "babelcache")]
#[command(version)]
#[command(about = "Translate text through a chain of free providers and keep a ranked history")]
#[command(long_about = "babelcache sends text to each configured translation provider in order \
until one returns a usable result, then records it in a deduplicated history.

EXAMPLES:
    babelcache translate \"Привет, мир!\"          # Translate with the configured languages
    babelcache translate -s en -t es \"Hello\"     # Pick languages explicitly
    babelcache popular                           # Most used translations
    babelcache favorite 12                       # Toggle favorite on record 12
    babelcache completions bash > babelcache.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Keep history in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,
}

/// Coloured, timestamped stderr logger; the level is raised after config load
struct CustomLogger;

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "babelcache", &mut std::io::stdout());
        }
        Commands::Languages => {
            for language in language_utils::supported_languages() {
                println!("{}  {}", language.code, language.display_name);
            }
        }
        Commands::Translate {
            text,
            source_language,
            target_language,
            swap,
        } => {
            let service = open_service(&cli)?;
            let mut pair = service.default_pair().clone();
            if let Some(source) = source_language {
                pair.source = language_utils::resolve(source)?.code.to_string();
            }
            if let Some(target) = target_language {
                pair.target = language_utils::resolve(target)?.code.to_string();
            }
            if *swap {
                pair = pair.swapped();
            }
            translate(&service, text, &pair).await?;
        }
        Commands::History => {
            let service = open_service(&cli)?;
            print_feed(&service.get_history(), "History").await?;
        }
        Commands::Popular => {
            let service = open_service(&cli)?;
            print_feed(&service.get_history_by_usage(), "Most used").await?;
        }
        Commands::Favorites => {
            let service = open_service(&cli)?;
            print_feed(&service.get_favorites(), "Favorites").await?;
        }
        Commands::Favorite { id } => {
            let service = open_service(&cli)?;
            let record = service.toggle_favorite(*id).await.map_err(AppError::from)?;
            let state = if record.is_favorite { "added to" } else { "removed from" };
            println!("Record {} {} favorites", id, state);
        }
        Commands::Delete { id } => {
            let service = open_service(&cli)?;
            if !service.delete_translation(*id).await.map_err(AppError::from)? {
                return Err(anyhow!("No record with id {}", id));
            }
            println!("Deleted record {}", id);
        }
        Commands::Clear => {
            let service = open_service(&cli)?;
            let count = service.clear_all_data().await.map_err(AppError::from)?;
            println!("Deleted {} record(s)", count);
        }
        Commands::Stats => {
            let service = open_service(&cli)?;
            let stats = service.stats().await.map_err(AppError::from)?;
            println!("{}", stats);
            println!("Providers: {}", service.provider_names().join(" -> "));
        }
    }

    Ok(())
}

/// Load configuration, apply CLI overrides and build the service
fn open_service(cli: &CommandLineOptions) -> Result<TranslationService> {
    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Loaded configuration from {}", cli.config_path.display());

    TranslationService::from_config(&config, cli.ephemeral)
}

async fn translate(service: &TranslationService, text: &str, pair: &LanguagePair) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(format!("Translating {} -> {}", pair.source, pair.target));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = service.translate_text(text, &pair.source, &pair.target).await;
    spinner.finish_and_clear();

    match result {
        Ok(translation) => {
            println!("{}", translation.text);
            if let Some(e) = translation.history_error {
                eprintln!("Warning: translation not saved to history ({})", e);
            }
            Ok(())
        }
        Err(e) => {
            debug!("Translation failed: {}", e);
            Err(anyhow!(e.user_message()))
        }
    }
}

async fn print_feed(feed: &HistoryFeed, title: &str) -> Result<()> {
    let records = feed
        .snapshot()
        .await
        .context("Failed to read translation history")?;

    println!("{} ({} record(s))", title, records.len());
    for record in &records {
        println!("{}", format_record(record));
    }
    Ok(())
}

fn format_record(record: &TranslationRecord) -> String {
    let when = chrono::DateTime::from_timestamp_millis(record.timestamp)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:>5} {} {}->{}  {} => {}  (x{}, {})",
        record.id,
        if record.is_favorite { "*" } else { " " },
        record.source_language,
        record.target_language,
        record.original_text,
        record.translated_text,
        record.usage_count,
        when
    )
}
