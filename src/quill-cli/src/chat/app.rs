//! The chat TUI: key mapping, drawing, and the frame loop.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, MissedTickBehavior};

use quill_core::QuillStyle;
use quill_core::animation::{CursorBlink, Spinner};
use quill_core::widgets::{ChatWidget, ViewOptions};

use super::harness::{ChatHarness, HarnessEvent};
use super::terminal::ChatTerminal;

const SCROLL_STEP: usize = 5;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Input(char),
    Backspace,
    Submit,
    Quick(usize),
    Skip,
    TogglePause,
    ToggleLike,
    CycleSpeed,
    Clear,
    ScrollUp,
    ScrollDown,
    Quit,
}

/// Maps a key event to a command. Key releases are ignored.
pub fn map_key(key: KeyEvent) -> Option<ChatCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let command = match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => ChatCommand::Quit,
        KeyCode::Char('p') if ctrl => ChatCommand::TogglePause,
        KeyCode::Char('l') if ctrl => ChatCommand::ToggleLike,
        KeyCode::Char('s') if ctrl => ChatCommand::CycleSpeed,
        KeyCode::Char('k') if ctrl => ChatCommand::Clear,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(ch) => ChatCommand::Input(ch),
        KeyCode::Enter => ChatCommand::Submit,
        KeyCode::Backspace => ChatCommand::Backspace,
        KeyCode::Esc => ChatCommand::Skip,
        KeyCode::F(n @ 1..=3) => ChatCommand::Quick(usize::from(n - 1)),
        KeyCode::PageUp => ChatCommand::ScrollUp,
        KeyCode::PageDown => ChatCommand::ScrollDown,
        _ => return None,
    };
    Some(command)
}

/// The interactive chat application.
pub struct ChatApp {
    harness: ChatHarness,
    view: ViewOptions,
    frame: Duration,
    spinner: Spinner,
    blink: CursorBlink,
    scroll_back: usize,
    should_quit: bool,
}

impl ChatApp {
    pub fn new(harness: ChatHarness, view: ViewOptions, frame: Duration) -> Self {
        Self {
            harness,
            view,
            frame,
            spinner: Spinner::dots(),
            blink: CursorBlink::default(),
            scroll_back: 0,
            should_quit: false,
        }
    }

    pub fn harness(&self) -> &ChatHarness {
        &self.harness
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn apply(&mut self, command: ChatCommand) {
        match command {
            ChatCommand::Input(ch) => self.harness.input_push(ch),
            ChatCommand::Backspace => self.harness.input_backspace(),
            ChatCommand::Submit => {
                if self.harness.submit().is_some() {
                    self.scroll_back = 0;
                }
            }
            ChatCommand::Quick(index) => {
                if self.harness.submit_quick(index).is_some() {
                    self.scroll_back = 0;
                }
            }
            ChatCommand::Skip => {
                self.harness.skip();
            }
            ChatCommand::TogglePause => {
                self.harness.toggle_pause();
            }
            ChatCommand::ToggleLike => {
                self.harness.toggle_like();
            }
            ChatCommand::CycleSpeed => {
                self.harness.cycle_speed();
            }
            ChatCommand::Clear => {
                self.harness.clear();
                self.scroll_back = 0;
            }
            ChatCommand::ScrollUp => self.scroll_back += SCROLL_STEP,
            ChatCommand::ScrollDown => {
                self.scroll_back = self.scroll_back.saturating_sub(SCROLL_STEP);
            }
            ChatCommand::Quit => self.should_quit = true,
        }
    }

    /// Advances sessions and the decorative animations.
    pub fn on_frame(&mut self, elapsed: Duration) {
        self.harness.tick(elapsed);
        self.blink.advance(elapsed);
        if self.harness.is_waiting() {
            self.spinner.advance(elapsed);
        } else {
            self.spinner.reset();
        }
    }

    pub fn handle_event(&mut self, event: HarnessEvent) {
        self.harness.handle_event(event);
    }

    /// Runs until the user quits or the terminal event stream ends.
    pub async fn run(
        mut self,
        terminal: &mut ChatTerminal,
        events_rx: &mut UnboundedReceiver<HarnessEvent>,
    ) -> Result<()> {
        let mut input = EventStream::new();
        let mut ticker = tokio::time::interval(self.frame);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();

        terminal.draw(|f| self.draw(f))?;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Instant::now();
                    self.on_frame(now - last);
                    last = now;
                }
                maybe_event = input.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(command) = map_key(key) {
                            self.apply(command);
                        }
                    }
                    Some(Ok(Event::Paste(text))) => self.harness.input_push_str(&text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("Failed to read terminal events"),
                    None => break,
                },
                Some(event) = events_rx.recv() => self.handle_event(event),
            }

            if self.should_quit {
                tracing::info!("quit requested");
                break;
            }
            terminal.draw(|f| self.draw(f))?;
        }
        Ok(())
    }

    // --------------------------------------------------------
    // Drawing
    // --------------------------------------------------------

    pub fn draw(&self, frame: &mut Frame) {
        let [header, body, input] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        frame.render_widget(self.header_line(), header);

        let chat = ChatWidget::new(self.harness.messages(), &self.view)
            .sessions(self.harness.sessions())
            .cursor_visible(self.blink.is_visible())
            .typing(self.harness.is_waiting().then_some(&self.spinner))
            .scroll_back(self.scroll_back);
        frame.render_widget(chat, body.inner(Margin::new(1, 0)));

        self.draw_input(frame, input);
    }

    fn header_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(" Quill chat", QuillStyle::header()),
            Span::styled(
                format!("  speed: {}", self.harness.speed_label()),
                QuillStyle::muted(),
            ),
            Span::styled(
                "  Esc skip · ^P pause · ^L like · ^S speed · ^K clear · F1-F3 ask · ^C quit",
                QuillStyle::dimmed(),
            ),
        ])
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect) {
        let title = if self.harness.has_held_replies() {
            " Message · reply waiting until you send or clear "
        } else {
            " Message "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(QuillStyle::border())
            .title(title);
        let inner = block.inner(area);

        // Keep the tail of a long input visible.
        let input = self.harness.input();
        let visible: String = {
            let max = inner.width.saturating_sub(1) as usize;
            let count = input.chars().count();
            input.chars().skip(count.saturating_sub(max)).collect()
        };
        let width = display_width(&visible);

        frame.render_widget(
            Paragraph::new(visible).style(QuillStyle::text()).block(block),
            area,
        );
        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position(Position::new(inner.x + width.min(inner.width - 1), inner.y));
        }
    }
}

fn display_width(s: &str) -> u16 {
    Line::from(s.to_string()).width().min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use quill_core::TypewriterOptions;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn app() -> (ChatApp, UnboundedReceiver<HarnessEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let options = TypewriterOptions::default().with_randomness(0.0).with_seed(3);
        let harness = ChatHarness::new(options, Duration::from_millis(500), tx).with_greeting();
        (
            ChatApp::new(harness, ViewOptions::default(), Duration::from_millis(16)),
            rx,
        )
    }

    fn screen(app: &ChatApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_map_key() {
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(map_key(key(KeyCode::Char('a'), none)), Some(ChatCommand::Input('a')));
        assert_eq!(
            map_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(ChatCommand::Input('A'))
        );
        assert_eq!(map_key(key(KeyCode::Enter, none)), Some(ChatCommand::Submit));
        assert_eq!(map_key(key(KeyCode::Esc, none)), Some(ChatCommand::Skip));
        assert_eq!(map_key(key(KeyCode::Char('c'), ctrl)), Some(ChatCommand::Quit));
        assert_eq!(map_key(key(KeyCode::Char('p'), ctrl)), Some(ChatCommand::TogglePause));
        assert_eq!(map_key(key(KeyCode::Char('l'), ctrl)), Some(ChatCommand::ToggleLike));
        assert_eq!(map_key(key(KeyCode::Char('s'), ctrl)), Some(ChatCommand::CycleSpeed));
        assert_eq!(map_key(key(KeyCode::Char('k'), ctrl)), Some(ChatCommand::Clear));
        assert_eq!(map_key(key(KeyCode::Char('z'), ctrl)), None);
        assert_eq!(map_key(key(KeyCode::F(2), none)), Some(ChatCommand::Quick(1)));
        assert_eq!(map_key(key(KeyCode::F(9), none)), None);
        assert_eq!(map_key(key(KeyCode::PageUp, none)), Some(ChatCommand::ScrollUp));
    }

    #[test]
    fn test_release_ignored() {
        let mut event = key(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(event), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_and_submit() {
        let (mut app, _rx) = app();
        for ch in "hey".chars() {
            app.apply(ChatCommand::Input(ch));
        }
        app.apply(ChatCommand::Backspace);
        assert_eq!(app.harness().input(), "he");
        app.apply(ChatCommand::Submit);
        assert_eq!(app.harness().messages().len(), 2);
        assert!(app.harness().is_waiting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_clamps_at_bottom() {
        let (mut app, _rx) = app();
        app.apply(ChatCommand::ScrollUp);
        assert_eq!(app.scroll_back, SCROLL_STEP);
        app.apply(ChatCommand::ScrollDown);
        app.apply(ChatCommand::ScrollDown);
        assert_eq!(app.scroll_back, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit() {
        let (mut app, _rx) = app();
        assert!(!app.should_quit());
        app.apply(ChatCommand::Quit);
        assert!(app.should_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_shows_reveal_and_typing_indicator() {
        let (mut app, _rx) = app();
        app.on_frame(Duration::from_secs(30));
        app.apply(ChatCommand::Skip);
        app.apply(ChatCommand::Input('q'));
        app.apply(ChatCommand::Submit);

        let text = screen(&app, 80, 20);
        assert!(text.contains("Quill chat"));
        assert!(text.contains("medium (30 ms)"));
        assert!(text.contains("Hello!"));
        assert!(text.contains("AI is typing"));
        assert!(text.contains("Message"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_renders_after_event() {
        let (mut app, mut rx) = app();
        app.apply(ChatCommand::Skip);
        app.apply(ChatCommand::Quick(0));
        loop {
            let event = rx.recv().await.unwrap();
            let done = matches!(event, HarnessEvent::Reply { .. });
            app.handle_event(event);
            if done {
                break;
            }
        }
        app.on_frame(Duration::from_secs(60));
        let text = screen(&app, 100, 40);
        assert!(!text.contains("AI is typing"));
        assert!(text.contains("export default Welcome;"));
    }
}
