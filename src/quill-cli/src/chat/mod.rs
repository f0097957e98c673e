//! `quill chat`: an interactive conversation with mock AI replies.
//!
//! ```text
//! ┌────────────┐  keys   ┌─────────┐  tick(elapsed)  ┌──────────────┐
//! │ EventStream│────────▶│ ChatApp │────────────────▶│ ChatHarness  │
//! └────────────┘         └────▲────┘                 │  sessions    │
//!                             │ HarnessEvent         └──────┬───────┘
//!                             └───── mpsc ◀── reply timers, on_complete
//! ```

mod app;
mod harness;
mod mock;
mod terminal;

pub use app::{ChatApp, ChatCommand, map_key};
pub use harness::{ChatHarness, HarnessEvent, SpeedPreset};
pub use mock::{MOCK_RESPONSES, MockResponder, QUICK_QUESTIONS};
pub use terminal::{ChatTerminal, TerminalGuard, TerminalOptions, install_panic_hook};

use anyhow::Result;
use tokio::sync::mpsc;

use crate::cli::ChatArgs;
use crate::config::QuillConfig;

/// Runs the chat until the user quits.
pub async fn run(args: ChatArgs, config: QuillConfig) -> Result<()> {
    let reply_delay = args
        .reply_delay_ms
        .map_or_else(|| config.chat.reply_delay(), std::time::Duration::from_millis);

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut harness = ChatHarness::new(config.typewriter.clone(), reply_delay, events_tx);
    if let Some(speed) = args.speed {
        harness = harness.with_speed(speed.into());
    }
    if !args.no_greeting {
        harness = harness.with_greeting();
    }

    tracing::info!(
        speed = %harness.speed_label(),
        reply_delay_ms = reply_delay.as_millis() as u64,
        "starting chat"
    );

    let app = ChatApp::new(harness, config.ui.view_options(), config.ui.frame());
    let mut terminal = ChatTerminal::new()?;
    app.run(&mut terminal, &mut events_rx).await
}
