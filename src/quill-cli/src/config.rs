//! Configuration file loading.
//!
//! Lookup order: `--config <path>`, then `$QUILL_HOME/config.toml`, then
//! `<config_dir>/quill/config.toml`. A missing file in the default
//! locations yields defaults; a missing explicit file is an error.
//!
//! ```toml
//! [typewriter]
//! speed_ms = 30
//! randomness = 0.15
//! thinking_pauses = true        # false, or a fixed pause in ms
//!
//! [ui]
//! frame_ms = 16
//! cursor = "▋"
//! render = "markdown"           # markdown | builtin | plain
//!
//! [chat]
//! reply_delay_ms = 1000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quill_core::markdown::MarkdownRenderer;
use quill_core::widgets::{DEFAULT_CURSOR, DEFAULT_SKIP_LABEL, ViewOptions};
use quill_core::{OptionsError, RenderStrategy, TypewriterOptions};

/// Environment variable naming the Quill home directory.
pub const QUILL_HOME_ENV: &str = "QUILL_HOME";

const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse TOML in '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Typewriter options out of range.
    #[error("Invalid [typewriter] options: {0}")]
    Invalid(#[from] OptionsError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Which renderer turns revealed text into lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Full CommonMark.
    #[default]
    Markdown,
    /// Fence splitting only.
    Builtin,
    Plain,
}

/// `[ui]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub frame_ms: u64,
    pub show_cursor: bool,
    pub cursor: String,
    pub show_skip_button: bool,
    pub skip_label: String,
    pub show_progress: bool,
    pub render: RenderMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            show_cursor: true,
            cursor: DEFAULT_CURSOR.to_string(),
            show_skip_button: true,
            skip_label: DEFAULT_SKIP_LABEL.to_string(),
            show_progress: true,
            render: RenderMode::Markdown,
        }
    }
}

impl UiConfig {
    /// Frame interval; never below one millisecond.
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn view_options(&self) -> ViewOptions {
        let strategy = match self.render {
            RenderMode::Markdown => RenderStrategy::commonmark(MarkdownRenderer::new()),
            RenderMode::Builtin => RenderStrategy::BuiltinMarkdown,
            RenderMode::Plain => RenderStrategy::PlainText,
        };
        ViewOptions {
            strategy,
            show_cursor: self.show_cursor,
            cursor: self.cursor.clone(),
            show_skip_button: self.show_skip_button,
            skip_label: self.skip_label.clone(),
            show_progress: self.show_progress,
        }
    }
}

/// `[chat]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub reply_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
        }
    }
}

impl ChatConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    pub typewriter: TypewriterOptions,
    pub ui: UiConfig,
    pub chat: ChatConfig,
}

impl QuillConfig {
    /// Loads the configuration following the lookup order.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::ParseError { source, .. } => ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates TOML content.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<string>"),
            source: e,
        })?;
        config.typewriter.validate()?;
        Ok(config)
    }
}

/// Quill home: `$QUILL_HOME`, else `<config_dir>/quill`.
pub fn quill_home() -> Option<PathBuf> {
    resolve_home(
        std::env::var_os(QUILL_HOME_ENV).map(PathBuf::from),
        dirs::config_dir(),
    )
}

fn resolve_home(env_home: Option<PathBuf>, config_dir: Option<PathBuf>) -> Option<PathBuf> {
    env_home
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| config_dir.map(|d| d.join("quill")))
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    quill_home().map(|home| home.join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::ThinkingPauses;
    use std::io::Write;

    #[test]
    fn test_empty_file_is_default() {
        let config = QuillConfig::parse("").unwrap();
        assert_eq!(config, QuillConfig::default());
        assert_eq!(config.ui.frame(), Duration::from_millis(16));
        assert_eq!(config.chat.reply_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_sections() {
        let config = QuillConfig::parse(
            r#"
            [typewriter]
            speed_ms = 10
            thinking_pauses = 250

            [ui]
            render = "plain"
            skip_label = "[esc]"
            "#,
        )
        .unwrap();
        assert_eq!(config.typewriter.speed_ms, 10.0);
        assert_eq!(config.typewriter.randomness, 0.15);
        assert_eq!(config.typewriter.thinking_pauses, ThinkingPauses::fixed_ms(250));
        assert_eq!(config.ui.render, RenderMode::Plain);
        assert_eq!(config.ui.skip_label, "[esc]");
        assert!(config.ui.show_cursor);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let err = QuillConfig::parse("[typewriter]\nrandomness = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[ui\nframe_ms = ").unwrap();
        let err = QuillConfig::load_from_file(file.path()).unwrap_err();
        match err {
            ConfigError::ParseError { path, .. } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = QuillConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[chat]\nreply_delay_ms = 50\n").unwrap();
        let config = QuillConfig::load(Some(&path)).unwrap();
        assert_eq!(config.chat.reply_delay_ms, 50);
    }

    #[test]
    fn test_home_resolution() {
        let env = Some(PathBuf::from("/tmp/qh"));
        let cfg = Some(PathBuf::from("/home/u/.config"));
        assert_eq!(resolve_home(env, cfg.clone()), Some(PathBuf::from("/tmp/qh")));
        assert_eq!(
            resolve_home(Some(PathBuf::new()), cfg.clone()),
            Some(PathBuf::from("/home/u/.config/quill"))
        );
        assert_eq!(resolve_home(None, None), None);
    }

    #[test]
    fn test_view_options_follow_ui() {
        let ui = UiConfig {
            render: RenderMode::Builtin,
            show_cursor: false,
            ..UiConfig::default()
        };
        let view = ui.view_options();
        assert!(matches!(view.strategy, RenderStrategy::BuiltinMarkdown));
        assert!(!view.show_cursor);
    }

    #[test]
    fn test_frame_never_zero() {
        let ui = UiConfig {
            frame_ms: 0,
            ..UiConfig::default()
        };
        assert_eq!(ui.frame(), Duration::from_millis(1));
    }
}
