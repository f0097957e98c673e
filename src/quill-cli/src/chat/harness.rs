//! Conversation state for the chat demo.
//!
//! The harness owns the messages and one [`TypewriterSession`] per
//! assistant message. It never reads the clock: the frame loop calls
//! [`ChatHarness::tick`] with the elapsed time. Mock replies arrive through
//! the event channel after the configured delay, and sessions report
//! completion into the same channel.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use quill_core::widgets::{ChatMessage, MessageId, MessageRole};
use quill_core::{TypewriterOptions, TypewriterSession, TypewriterStatus};

use super::mock::{MockResponder, QUICK_QUESTIONS};
use crate::cli::SpeedArg;

/// Typing speed presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedPreset {
    Fast,
    Medium,
    Slow,
}

impl SpeedPreset {
    pub fn ms(self) -> f64 {
        match self {
            Self::Fast => 10.0,
            Self::Medium => 30.0,
            Self::Slow => 60.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Fast => Self::Medium,
            Self::Medium => Self::Slow,
            Self::Slow => Self::Fast,
        }
    }

    /// The preset with exactly this speed, if any.
    pub fn from_ms(ms: f64) -> Option<Self> {
        [Self::Fast, Self::Medium, Self::Slow]
            .into_iter()
            .find(|p| p.ms() == ms)
    }
}

impl From<SpeedArg> for SpeedPreset {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Fast => Self::Fast,
            SpeedArg::Medium => Self::Medium,
            SpeedArg::Slow => Self::Slow,
        }
    }
}

/// Messages delivered to the harness from timers and sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessEvent {
    /// A mock reply is ready. `epoch` ties it to the conversation it was
    /// requested in.
    Reply { epoch: u64, content: String },
    /// An assistant message finished revealing.
    RevealCompleted(MessageId),
}

/// The chat conversation and its live typewriter sessions.
pub struct ChatHarness {
    messages: Vec<ChatMessage>,
    sessions: HashMap<MessageId, TypewriterSession>,
    input: String,
    pending_replies: usize,
    responder: MockResponder,
    options: TypewriterOptions,
    speed: Option<SpeedPreset>,
    reply_delay: Duration,
    next_id: MessageId,
    epoch: u64,
    events_tx: UnboundedSender<HarnessEvent>,
}

impl ChatHarness {
    /// `options` is the template for every reply session; the speed preset
    /// matching `options.speed_ms` is selected when there is one.
    pub fn new(
        options: TypewriterOptions,
        reply_delay: Duration,
        events_tx: UnboundedSender<HarnessEvent>,
    ) -> Self {
        let speed = SpeedPreset::from_ms(options.speed_ms);
        Self {
            messages: Vec::new(),
            sessions: HashMap::new(),
            input: String::new(),
            pending_replies: 0,
            responder: MockResponder::new(),
            options,
            speed,
            reply_delay,
            next_id: 1,
            epoch: 0,
            events_tx,
        }
    }

    #[must_use]
    pub fn with_speed(mut self, speed: SpeedPreset) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Opens the conversation with the assistant greeting.
    #[must_use]
    pub fn with_greeting(mut self) -> Self {
        let greeting = self.responder.greeting();
        if !greeting.is_empty() {
            self.push_assistant(greeting.to_string());
        }
        self
    }

    // --------------------------------------------------------
    // Input line
    // --------------------------------------------------------

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_push(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn input_push_str(&mut self, text: &str) {
        self.input.push_str(text);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Replies created while this is true wait before revealing.
    pub fn user_typing(&self) -> bool {
        !self.input.is_empty()
    }

    // --------------------------------------------------------
    // Conversation
    // --------------------------------------------------------

    /// Sends the input line. Returns the new message id, or `None` when
    /// the input is blank.
    pub fn submit(&mut self) -> Option<MessageId> {
        if self.input.trim().is_empty() {
            return None;
        }
        let content = std::mem::take(&mut self.input);
        Some(self.send(content.trim().to_string()))
    }

    /// Sends one of the [`QUICK_QUESTIONS`].
    pub fn submit_quick(&mut self, index: usize) -> Option<MessageId> {
        let question = QUICK_QUESTIONS.get(index)?;
        Some(self.send((*question).to_string()))
    }

    fn send(&mut self, content: String) -> MessageId {
        let id = self.alloc_id();
        tracing::debug!(id, chars = content.chars().count(), "user message");
        self.messages.push(ChatMessage::user(id, content));
        self.request_reply();
        id
    }

    fn request_reply(&mut self) {
        self.pending_replies += 1;
        let content = self.responder.next_reply().to_string();
        let epoch = self.epoch;
        let delay = self.reply_delay;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(HarnessEvent::Reply { epoch, content });
        });
    }

    /// Applies an event from the channel.
    pub fn handle_event(&mut self, event: HarnessEvent) {
        match event {
            HarnessEvent::Reply { epoch, content } => {
                if epoch != self.epoch {
                    tracing::debug!(epoch, current = self.epoch, "dropping stale reply");
                    return;
                }
                self.pending_replies = self.pending_replies.saturating_sub(1);
                self.push_assistant(content);
            }
            HarnessEvent::RevealCompleted(id) => {
                if self.sessions.contains_key(&id) {
                    tracing::info!(id, "reply fully revealed");
                }
            }
        }
    }

    fn push_assistant(&mut self, content: String) -> MessageId {
        let id = self.alloc_id();
        let options = self.reply_options(id);
        let tx = self.events_tx.clone();
        let session = TypewriterSession::new(content.clone(), options)
            .on_complete(move || {
                let _ = tx.send(HarnessEvent::RevealCompleted(id));
            })
            .on_sentence_complete(move |sentence, ordinal| {
                tracing::trace!(id, ordinal, sentence = sentence.trim(), "sentence revealed");
            });
        tracing::debug!(id, status = %session.status(), "assistant message");
        self.sessions.insert(id, session);
        self.messages.push(ChatMessage::assistant(id, content));
        id
    }

    fn reply_options(&self, id: MessageId) -> TypewriterOptions {
        let mut options = self.options.clone();
        options.speed_ms = self.speed_ms();
        options.seed = self.options.seed.map(|seed| seed.wrapping_add(id));
        options.auto_start = self.options.should_auto_start(self.user_typing());
        options
    }

    fn alloc_id(&mut self) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // --------------------------------------------------------
    // Time
    // --------------------------------------------------------

    /// Advances every live session by `elapsed`. Replies held back while
    /// the user was typing start once the input is empty.
    pub fn tick(&mut self, elapsed: Duration) {
        let start_idle = self.options.should_auto_start(self.user_typing());
        for session in self.sessions.values_mut() {
            if start_idle && session.status() == TypewriterStatus::Idle {
                session.start();
            }
            session.advance(elapsed);
        }
    }

    // --------------------------------------------------------
    // Controls
    // --------------------------------------------------------

    fn newest_unfinished(&mut self) -> Option<(MessageId, &mut TypewriterSession)> {
        let id = self
            .messages
            .iter()
            .rev()
            .filter(|m| m.is_assistant())
            .map(|m| m.id)
            .find(|id| self.sessions.get(id).is_some_and(|s| !s.is_completed()))?;
        self.sessions.get_mut(&id).map(|s| (id, s))
    }

    /// Skips the newest unfinished reply to its end.
    pub fn skip(&mut self) -> Option<MessageId> {
        let (id, session) = self.newest_unfinished()?;
        session.complete();
        session.is_completed().then_some(id)
    }

    /// Pauses or resumes the newest unfinished reply, starting it if it is
    /// still idle.
    pub fn toggle_pause(&mut self) -> Option<TypewriterStatus> {
        let (_, session) = self.newest_unfinished()?;
        match session.status() {
            TypewriterStatus::Idle => session.start(),
            TypewriterStatus::Typing => session.pause(),
            TypewriterStatus::Paused => session.resume(),
            TypewriterStatus::Completed => {}
        }
        Some(session.status())
    }

    /// Toggles "like" on the last assistant message.
    pub fn toggle_like(&mut self) -> Option<bool> {
        let message = self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.role == MessageRole::Assistant)?;
        message.liked = !message.liked;
        Some(message.liked)
    }

    /// Moves to the next preset. Affects replies created afterwards.
    pub fn cycle_speed(&mut self) -> SpeedPreset {
        let next = self.speed.map_or(SpeedPreset::Fast, SpeedPreset::next);
        self.speed = Some(next);
        tracing::debug!(speed = next.label(), "speed changed");
        next
    }

    /// Empties the conversation. Sessions are dropped with their messages
    /// and replies still in flight are discarded on arrival.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.sessions.clear();
        self.pending_replies = 0;
        self.epoch += 1;
        tracing::debug!(epoch = self.epoch, "conversation cleared");
    }

    // --------------------------------------------------------
    // Observables
    // --------------------------------------------------------

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn sessions(&self) -> &HashMap<MessageId, TypewriterSession> {
        &self.sessions
    }

    pub fn session(&self, id: MessageId) -> Option<&TypewriterSession> {
        self.sessions.get(&id)
    }

    /// Whether a reply has been requested but not yet arrived.
    pub fn is_waiting(&self) -> bool {
        self.pending_replies > 0
    }

    /// Whether any reply is waiting to start.
    pub fn has_held_replies(&self) -> bool {
        self.sessions
            .values()
            .any(|s| s.status() == TypewriterStatus::Idle)
    }

    pub fn speed(&self) -> Option<SpeedPreset> {
        self.speed
    }

    pub fn speed_ms(&self) -> f64 {
        self.speed.map_or(self.options.speed_ms, SpeedPreset::ms)
    }

    pub fn speed_label(&self) -> String {
        match self.speed {
            Some(preset) => format!("{} ({} ms)", preset.label(), preset.ms()),
            None => format!("custom ({} ms)", self.options.speed_ms),
        }
    }
}
