use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use quizboard::{config, display, fixtures, snapshot::ScoreSnapshot};

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "quizboard")]
#[command(
    about = "Animated quiz leaderboard reveal",
    long_about = "Animated quiz leaderboard reveal\n\nIf no command is specified, the built-in demo board is shown."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the scores from a TOML board file
    Show {
        /// Path to the board file
        file: PathBuf,
    },
    /// Animate the built-in demo board
    Demo,
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!(
        "Configuration File: {} (Exists: {})",
        path_str,
        if exists { "yes" } else { "no" }
    );
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("frame_interval_ms: {}", cfg.frame_interval_ms);
    println!("boot_delay_ms: {}", cfg.boot_delay_ms);
    println!(
        "fireworks: {}",
        match cfg.fireworks {
            Some(v) => v.to_string(),
            None => "(from board file)".to_string(),
        }
    );
    println!();
    println!("[theme]");
    println!("chart_background: {:?}", cfg.theme.chart_background);
    println!("chart_background_alpha: {}", cfg.theme.chart_background_alpha);
    println!("grid: {:?}", cfg.theme.grid);
    println!("text: {:?}", cfg.theme.text);
    println!("highlight: {:?}", cfg.theme.highlight);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    let snapshot = match cli.command {
        Some(Commands::Config) => {
            handle_config_command();
            return;
        }
        Some(Commands::Show { file }) => match ScoreSnapshot::load(&file) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                tracing::error!("Failed to load board file: {:#}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Demo) | None => fixtures::demo_snapshot(),
    };

    if let Err(e) = display::run(snapshot, config).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Display failed: {:#}", e);
        std::process::exit(1);
    }
}
