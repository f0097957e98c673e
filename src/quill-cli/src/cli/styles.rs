//! ANSI styling for the help output.

use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Help theme with blue accents.
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Blue.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

/// After-help section with keys and environment variables.
pub const AFTER_HELP: &str = "\
CHAT KEYS
    Enter        Send the message
    Esc          Skip the newest reply to the end
    Ctrl+P       Pause / resume the newest reply
    Ctrl+L       Like / unlike the last reply
    Ctrl+S       Cycle speed (fast, medium, slow)
    Ctrl+K       Clear the conversation
    Ctrl+C       Quit

ENVIRONMENT VARIABLES
    QUILL_HOME        Config and log directory
    QUILL_LOG_LEVEL   Log verbosity (error, warn, info, debug, trace)
    RUST_LOG          Full tracing filter when no level is given";
