//! Command dispatch.

use std::path::Path;

use anyhow::Result;

use super::args::{ChatArgs, Cli, Commands, LogLevel};
use crate::config::QuillConfig;
use crate::logging::{self, LOG_LEVEL_ENV};
use crate::{chat, play_cmd};

/// Routes the parsed command line to its handler.
///
/// Logging is set up per command: `play` logs to stderr, the chat TUI to a
/// file so the screen stays clean.
pub async fn dispatch_command(cli: Cli) -> Result<()> {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let level = logging::resolve_level(cli.log_level, cli.verbose, env_level.as_deref());
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Play(args)) => {
            logging::init_stderr(level);
            let config = QuillConfig::load(config_path)?;
            play_cmd::run(args, &config).await
        }
        Some(Commands::Chat(args)) => run_chat(args, config_path, level).await,
        None => run_chat(ChatArgs::default(), config_path, level).await,
    }
}

async fn run_chat(args: ChatArgs, config_path: Option<&Path>, level: Option<LogLevel>) -> Result<()> {
    let dir = logging::log_dir();
    let _log_guard = match logging::init_file(level, &dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e:#}");
            None
        }
    };
    let config = QuillConfig::load(config_path)?;
    chat::run(args, config).await
}
