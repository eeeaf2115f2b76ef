//! Hangman - CLI
//!
//! Timed hangman with TUI and line modes over a categorized dictionary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hangman::{
    commands::run_simple,
    core::Dictionary,
    engine::{GameConfig, GameEngine},
    output::print_dictionary_summary,
    wordlists::loader::load_from_file,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "hangman",
    about = "Timed hangman: guess the word before the gallows or the clock run out",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dictionary file with one WORD[,Category] per line (default: built-in list)
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,

    /// Write logs to this file (TUI mode logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Line-based mode without TUI
    Simple,

    /// List the dictionary by category
    Words,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    // Line mode can share the terminal with stderr logs; the TUI cannot
    let log_to_stderr = matches!(command, Commands::Simple | Commands::Words);
    init_tracing(cli.log_file.as_deref(), log_to_stderr)?;

    let dictionary = load_dictionary(cli.wordlist.as_deref())?;

    match command {
        Commands::Words => {
            print_dictionary_summary(&dictionary);
            Ok(())
        }
        Commands::Play => run_play_command(dictionary),
        Commands::Simple => run_simple_command(dictionary),
    }
}

/// Load the built-in dictionary or a custom file given with `-w`
fn load_dictionary(path: Option<&Path>) -> Result<Dictionary> {
    match path {
        Some(path) => load_from_file(path)
            .with_context(|| format!("failed to load dictionary from {}", path.display())),
        None => Ok(Dictionary::builtin()),
    }
}

fn init_tracing(log_file: Option<&Path>, log_to_stderr: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("invalid log filter")?;

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %path.display(), "Logging initialized");
        return Ok(());
    }

    if log_to_stderr {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
        return Ok(());
    }

    // No log file: prefer "no logs" over corrupting the TUI
    tracing_subscriber::registry().with(env_filter).init();
    Ok(())
}

fn run_play_command(dictionary: Dictionary) -> Result<()> {
    use hangman::interactive::{App, run_tui};

    let engine = GameEngine::new(dictionary, GameConfig::default());
    let result = run_tui(App::new(&engine));
    engine.shutdown();
    result
}

fn run_simple_command(dictionary: Dictionary) -> Result<()> {
    let engine = GameEngine::new(dictionary, GameConfig::default());
    let result = run_simple(&engine);
    engine.shutdown();
    result.map_err(|e| anyhow::anyhow!(e))
}
