//! Tracing setup.
//!
//! `quill play` logs to stderr. The chat TUI owns the terminal, so it logs
//! to `quill.log` in the Quill home (or the cache dir) instead.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::LogLevel;
use crate::config::quill_home;

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "QUILL_LOG_LEVEL";

const LOG_FILE: &str = "quill.log";

/// Picks the effective level: `--log-level`, then `--verbose`, then
/// `QUILL_LOG_LEVEL`. `None` means nothing was asked for.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    verbose: bool,
    env_level: Option<&str>,
) -> Option<LogLevel> {
    cli_level
        .or(verbose.then_some(LogLevel::Debug))
        .or_else(|| env_level.and_then(LogLevel::from_str_loose))
}

/// Builds the filter. An explicit level scopes our crates to it; otherwise
/// `RUST_LOG` is honoured when set, falling back to `default`.
pub fn build_filter(level: Option<LogLevel>, rust_log: Option<&str>, default: LogLevel) -> EnvFilter {
    match (level, rust_log) {
        (Some(level), _) => EnvFilter::new(scoped_directives(level)),
        (None, Some(directives)) if !directives.trim().is_empty() => EnvFilter::new(directives),
        (None, _) => EnvFilter::new(scoped_directives(default)),
    }
}

fn scoped_directives(level: LogLevel) -> String {
    let lvl = level.as_filter_str();
    format!("warn,quill={lvl},quill_cli={lvl},quill_core={lvl}")
}

fn filter_from_env(level: Option<LogLevel>, default: LogLevel) -> EnvFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    build_filter(level, rust_log.as_deref(), default)
}

/// Logs to stderr.
pub fn init_stderr(level: Option<LogLevel>) {
    let filter = filter_from_env(level, LogLevel::Warn);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Logs to a file for the lifetime of the returned guard.
pub fn init_file(level: Option<LogLevel>, dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}. Check write permissions.", path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter_from_env(level, LogLevel::Info))
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(guard)
}

/// Directory for `quill.log`.
pub fn log_dir() -> PathBuf {
    quill_home()
        .or_else(|| dirs::cache_dir().map(|d| d.join("quill")))
        .unwrap_or_else(std::env::temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_wins() {
        let level = resolve_level(Some(LogLevel::Error), true, Some("trace"));
        assert_eq!(level, Some(LogLevel::Error));
    }

    #[test]
    fn test_verbose_beats_env() {
        assert_eq!(resolve_level(None, true, Some("trace")), Some(LogLevel::Debug));
    }

    #[test]
    fn test_env_level() {
        assert_eq!(resolve_level(None, false, Some("WARN")), Some(LogLevel::Warn));
        assert_eq!(resolve_level(None, false, Some("bogus")), None);
        assert_eq!(resolve_level(None, false, None), None);
    }

    #[test]
    fn test_filter_prefers_explicit_level() {
        let filter = build_filter(Some(LogLevel::Trace), Some("off"), LogLevel::Warn);
        assert!(filter.to_string().contains("quill_core=trace"));
    }

    #[test]
    fn test_filter_uses_rust_log() {
        let filter = build_filter(None, Some("quill_core=debug"), LogLevel::Warn);
        let rendered = filter.to_string();
        assert!(rendered.contains("quill_core=debug"));
        assert!(!rendered.contains("quill_cli"));
    }

    #[test]
    fn test_filter_default() {
        let filter = build_filter(None, Some("  "), LogLevel::Info);
        assert!(filter.to_string().contains("quill_cli=info"));
    }
}
