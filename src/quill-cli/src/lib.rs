//! Quill CLI library.
//!
//! - `cli/` - argument parsing and command dispatch
//! - `chat/` - the interactive chat TUI with mock replies
//! - `play_cmd` - reveal a text on stdout
//! - `config` - `config.toml` loading
//! - `logging` - tracing setup

pub mod chat;
pub mod cli;
pub mod config;
pub mod logging;
pub mod play_cmd;

pub use chat::install_panic_hook;
pub use config::{ConfigError, ConfigResult, QuillConfig};
