//! Terminal setup and teardown for the chat TUI.
//!
//! [`ChatTerminal`] owns a [`TerminalGuard`]; dropping it (including while
//! unwinding) puts the terminal back the way it was.

use std::io::{self, IsTerminal, Stdout, stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, bail};
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Restores the terminal on drop.
pub struct TerminalGuard {
    alternate_screen: bool,
    bracketed_paste: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal_impl(self.alternate_screen, self.bracketed_paste);
    }
}

/// Options for [`ChatTerminal::with_options`].
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    pub alternate_screen: bool,
    pub bracketed_paste: bool,
    pub title: Option<String>,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            bracketed_paste: true,
            title: Some("Quill".to_string()),
        }
    }
}

/// A crossterm-backed ratatui terminal in raw mode.
pub struct ChatTerminal {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl ChatTerminal {
    pub fn new() -> Result<Self> {
        Self::with_options(TerminalOptions::default())
    }

    pub fn with_options(options: TerminalOptions) -> Result<Self> {
        if !io::stdout().is_terminal() {
            bail!("The chat needs an interactive terminal; use `quill play` for pipes.");
        }
        init_terminal(&options)?;
        // From here on the guard undoes whatever init_terminal did.
        let guard = TerminalGuard {
            alternate_screen: options.alternate_screen,
            bracketed_paste: options.bracketed_paste,
        };
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self {
            terminal,
            _guard: guard,
        })
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

fn init_terminal(options: &TerminalOptions) -> Result<()> {
    install_panic_hook();
    enable_raw_mode()?;

    let mut stdout = stdout();
    if options.alternate_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(stdout, EnableBracketedPaste)?;
    }
    execute!(stdout, Clear(ClearType::All), cursor::Hide)?;
    if let Some(ref title) = options.title {
        execute!(stdout, SetTitle(title))?;
    }
    Ok(())
}

fn restore_terminal_impl(alternate_screen: bool, bracketed_paste: bool) -> Result<()> {
    let mut stdout = stdout();
    execute!(stdout, cursor::Show)?;
    if bracketed_paste {
        execute!(stdout, DisableBracketedPaste)?;
    }
    if alternate_screen {
        execute!(stdout, LeaveAlternateScreen)?;
    }
    disable_raw_mode()?;
    Ok(())
}

/// Best-effort restore for paths that never built a guard.
pub fn restore_terminal() {
    let _ = restore_terminal_impl(true, true);
}

/// Restores the terminal before the default panic message is printed.
pub fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original_hook(info);
    }));
}
