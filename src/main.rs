// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::{Config, SyncMode, TranslationProvider};
use crate::providers::{DeepL, MockTranslator, Translator};
use crate::sync::engine::{Pane, SyncEngine, SyncOutcome};
use crate::sync::highlight::highlight_words;

mod app_config;
mod errors;
mod language_utils;
mod providers;
mod sync;

/// CLI wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "deepl")]
    DeepL,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::DeepL => TranslationProvider::DeepL,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI wrapper for SyncMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSyncMode {
    Full,
    Partial,
}

impl From<CliSyncMode> for SyncMode {
    fn from(cli_mode: CliSyncMode) -> Self {
        match cli_mode {
            CliSyncMode::Full => SyncMode::Full,
            CliSyncMode::Partial => SyncMode::Partial,
        }
    }
}

/// CLI wrapper for Pane to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliPane {
    A,
    B,
}

impl From<CliPane> for Pane {
    fn from(cli_pane: CliPane) -> Self {
        match cli_pane {
            CliPane::A => Pane::A,
            CliPane::B => Pane::B,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply one edit of a pane and print the updated translation
    Sync(SyncArgs),

    /// Print word-level change markup between two text files
    Diff(DiffArgs),

    /// Test the connection to the configured translation provider
    Check(CheckArgs),

    /// Generate shell completions for promptsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SyncArgs {
    /// File holding the edited pane's previous snapshot
    #[arg(value_name = "PREVIOUS")]
    previous: PathBuf,

    /// File holding the edited pane's new text
    #[arg(value_name = "CURRENT")]
    current: PathBuf,

    /// File holding the other pane's existing translation
    #[arg(value_name = "TRANSLATED")]
    translated: PathBuf,

    /// Which pane was edited
    #[arg(long, value_enum, default_value = "a")]
    pane: CliPane,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Sync mode to use
    #[arg(short, long, value_enum)]
    mode: Option<CliSyncMode>,

    /// Pane A language code (e.g., 'EN')
    #[arg(long)]
    pane_a_language: Option<String>,

    /// Pane B language code (e.g., 'KO')
    #[arg(long)]
    pane_b_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct DiffArgs {
    /// File holding the old text
    #[arg(value_name = "OLD")]
    old: PathBuf,

    /// File holding the new text
    #[arg(value_name = "NEW")]
    new: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Translation provider to check
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// promptsync - Bidirectional prompt translation
///
/// Keeps two prompt panes in different languages in sync through a
/// translation provider, retranslating only the sentences an edit touched.
#[derive(Parser, Debug)]
#[command(name = "promptsync")]
#[command(version = "1.0.0")]
#[command(about = "Bidirectional prompt translation with incremental sync")]
#[command(long_about = "promptsync keeps two prompt panes in different languages in sync. An edit of
either pane is diffed against its previous snapshot and only the changed
sentences are retranslated and spliced into the other pane's text.

EXAMPLES:
    promptsync sync prev.txt cur.txt translated.txt       # Patch translation for an edit of pane A
    promptsync sync --pane b prev.txt cur.txt original.txt # Sync in the other direction
    promptsync sync -m full prev.txt cur.txt translated.txt # Retranslate everything
    promptsync diff old.txt new.txt                        # Word-level change markup
    promptsync check                                       # Test the provider connection
    promptsync completions bash > promptsync.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The DeepL API key can also come from the
    DEEPL_API_KEY environment variable.

SUPPORTED PROVIDERS:
    deepl - DeepL REST API (requires API key)
    mock  - In-memory mock provider (tests and dry runs)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified ceiling level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
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
async fn main() -> Result<()> {
    // The logger itself accepts everything up to trace; runtime verbosity
    // is driven through log::set_max_level once options and config are known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Sync(args) => run_sync(args).await,
        Commands::Diff(args) => run_diff(args),
        Commands::Check(args) => run_check(args).await,
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "promptsync", &mut std::io::stdout());
            Ok(())
        }
    }
}

async fn run_sync(args: SyncArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &args.log_level {
        apply_log_level(cmd_log_level.clone().into());
    }

    let mut config = load_or_create_config(&args.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = &args.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(mode) = &args.mode {
        config.sync.mode = mode.clone().into();
    }

    if let Some(language) = &args.pane_a_language {
        config.pane_a_language = language.clone();
    }

    if let Some(language) = &args.pane_b_language {
        config.pane_b_language = language.clone();
    }

    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if args.log_level.is_none() {
        apply_log_level(config.log_level.clone());
    }

    debug!(
        "Using the {} provider in {} mode, {} <-> {}",
        config.translation.provider.display_name(),
        config.sync.mode.display_name(),
        config.pane_a_language,
        config.pane_b_language
    );

    let previous = std::fs::read_to_string(&args.previous).context(format!(
        "Failed to read previous snapshot: {:?}",
        args.previous
    ))?;
    let current = std::fs::read_to_string(&args.current)
        .context(format!("Failed to read new text: {:?}", args.current))?;
    let translated = std::fs::read_to_string(&args.translated).context(format!(
        "Failed to read existing translation: {:?}",
        args.translated
    ))?;

    let translator = build_translator(&config);
    let engine = SyncEngine::new_with_config(
        translator,
        config.pane_a_language.clone(),
        config.pane_b_language.clone(),
        config.sync.mode,
        config.translation.optimal_concurrent_requests(),
    );

    // The edited pane starts from the previous snapshot, the other pane
    // holds the existing translation
    let pane: Pane = args.pane.into();
    match pane {
        Pane::A => engine.preload(&previous, &translated),
        Pane::B => engine.preload(&translated, &previous),
    }

    let outcome = engine.on_pane_edited(pane, &current).await?;
    if let SyncOutcome::Committed { provider_calls } = outcome {
        debug!("Sync issued {} translate call(s)", provider_calls);
    }

    println!("{}", engine.pane_text(pane.other()));
    Ok(())
}

fn run_diff(args: DiffArgs) -> Result<()> {
    if let Some(cmd_log_level) = &args.log_level {
        apply_log_level(cmd_log_level.clone().into());
    }

    let old = std::fs::read_to_string(&args.old)
        .context(format!("Failed to read old text: {:?}", args.old))?;
    let new = std::fs::read_to_string(&args.new)
        .context(format!("Failed to read new text: {:?}", args.new))?;

    println!("{}", highlight_words(&old, &new));
    Ok(())
}

async fn run_check(args: CheckArgs) -> Result<()> {
    if let Some(cmd_log_level) = &args.log_level {
        apply_log_level(cmd_log_level.clone().into());
    }

    let mut config = load_or_create_config(&args.config_path)?;

    if let Some(provider) = &args.provider {
        config.translation.provider = provider.clone().into();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    if args.log_level.is_none() {
        apply_log_level(config.log_level.clone());
    }

    let translator = build_translator(&config);
    info!(
        "Checking connection to the {} provider",
        config.translation.provider.display_name()
    );

    match translator.test_connection().await {
        Ok(()) => {
            info!("Connection to the {} provider is working", translator.name());
            Ok(())
        }
        Err(e) => Err(anyhow!("Connection check failed: {}", e)),
    }
}

/// Load the configuration file, creating a default one when it is missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        Ok(config)
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

/// Build the translator selected by the configuration
fn build_translator(config: &Config) -> Arc<dyn Translator> {
    match config.translation.provider {
        TranslationProvider::DeepL => Arc::new(DeepL::new_with_config(
            config.translation.get_api_key(),
            config.translation.get_endpoint(),
            config.translation.get_timeout_secs(),
        )),
        TranslationProvider::Mock => Arc::new(MockTranslator::working()),
    }
}

/// Apply a configured log level to the global logger
fn apply_log_level(level: app_config::LogLevel) {
    let filter = match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    };

    log::set_max_level(filter);
}
