//! CLI argument structures and parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::styles::{AFTER_HELP, get_styles};

/// Log verbosity level for CLI output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Quill - typewriter chat playground
///
/// If no subcommand is specified, starts the interactive chat.
#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(author, version, about = "Quill - typewriter reveal for AI chat replies", long_about = None)]
#[command(styles = get_styles(), after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to a config file (default: $QUILL_HOME/config.toml)
    #[arg(long = "config", short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log verbosity (also QUILL_LOG_LEVEL)
    #[arg(long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive chat with mock AI replies (default)
    Chat(ChatArgs),

    /// Reveal a text on stdout with the typewriter engine
    Play(PlayArgs),
}

/// Arguments of `quill chat`.
#[derive(Debug, Default, Args)]
pub struct ChatArgs {
    /// Initial speed preset
    #[arg(long, value_enum)]
    pub speed: Option<SpeedArg>,

    /// Delay before a mock reply arrives, in milliseconds
    #[arg(long = "reply-delay", value_name = "MS")]
    pub reply_delay_ms: Option<u64>,

    /// Start with an empty conversation (no greeting)
    #[arg(long)]
    pub no_greeting: bool,
}

/// Speed presets exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SpeedArg {
    Fast,
    Medium,
    Slow,
}

/// Arguments of `quill play`.
#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Text to reveal; read from --file or stdin when absent
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Base milliseconds per character
    #[arg(long, value_name = "MS")]
    pub speed: Option<f64>,

    /// Delay jitter in [0, 1]
    #[arg(long)]
    pub randomness: Option<f64>,

    /// Disable thinking pauses after sentences
    #[arg(long, conflicts_with = "pause_ms")]
    pub no_pauses: bool,

    /// Fixed thinking pause in milliseconds
    #[arg(long = "pause-ms", value_name = "MS")]
    pub pause_ms: Option<u64>,

    /// Seed for the jitter generator
    #[arg(long)]
    pub seed: Option<u64>,
}
