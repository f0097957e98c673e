//! The typewriter engine for one message.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::lexical::char_speed;
use super::options::TypewriterOptions;
use super::pause::SentenceTracker;
use super::state::{TypewriterHooks, TypewriterStatus};

/// Progress, in percent, above which the skip affordance is offered.
pub const SKIP_THRESHOLD_PERCENT: u8 = 20;

/// The single pending reveal timer of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTick {
    remaining: Duration,
}

/// Reveals one text payload character by character.
///
/// Time is driven by the owner: call [`advance`](Self::advance) with the
/// elapsed time each frame. A session holds at most one pending tick; every
/// expiry reveals exactly one character, consults the sentence tracker and
/// the speed model for that character, and schedules the next tick. Lag is
/// carried over into the following tick so characters are still decided
/// one by one, in order.
///
/// # Example
/// ```rust,ignore
/// use std::time::Duration;
/// use quill_core::animation::{TypewriterOptions, TypewriterSession};
///
/// let mut tw = TypewriterSession::new("Hello, World!", TypewriterOptions::default())
///     .on_complete(|| println!("done"));
///
/// while !tw.is_completed() {
///     tw.advance(Duration::from_millis(16));
///     println!("{}", tw.display_text());
/// }
/// ```
pub struct TypewriterSession {
    text: String,
    chars: Vec<char>,
    /// Byte offset of every char boundary; `offsets.len() == chars.len() + 1`.
    offsets: Vec<usize>,
    options: TypewriterOptions,
    hooks: TypewriterHooks,
    rng: StdRng,

    revealed: usize,
    status: TypewriterStatus,
    progress: u8,
    in_code_block: bool,
    sentences: SentenceTracker,
    pending: Option<PendingTick>,
    completion_notified: bool,
}

impl std::fmt::Debug for TypewriterSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypewriterSession")
            .field("chars", &self.chars.len())
            .field("revealed", &self.revealed)
            .field("status", &self.status)
            .field("progress", &self.progress)
            .field("in_code_block", &self.in_code_block)
            .field("pending", &self.pending)
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl TypewriterSession {
    /// Creates a session for `text`. Starts immediately when
    /// `options.auto_start` is set.
    pub fn new(text: impl Into<String>, options: TypewriterOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut session = Self {
            text: String::new(),
            chars: Vec::new(),
            offsets: vec![0],
            options,
            hooks: TypewriterHooks::default(),
            rng,
            revealed: 0,
            status: TypewriterStatus::Idle,
            progress: 0,
            in_code_block: false,
            sentences: SentenceTracker::new(),
            pending: None,
            completion_notified: false,
        };
        session.load_text(text.into());
        if session.options.auto_start {
            session.start();
        }
        session
    }

    /// Registers the completion callback.
    #[must_use]
    pub fn on_complete(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.hooks.on_complete = Some(Box::new(hook));
        self
    }

    /// Registers the sentence callback. Enables sentence text collection.
    #[must_use]
    pub fn on_sentence_complete(mut self, hook: impl FnMut(&str, usize) + Send + 'static) -> Self {
        self.hooks.on_sentence_complete = Some(Box::new(hook));
        self
    }

    fn load_text(&mut self, text: String) {
        self.chars = text.chars().collect();
        self.offsets = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        self.text = text;
    }

    // --------------------------------------------------------
    // Control
    // --------------------------------------------------------

    /// Begins revealing. Only honoured while idle; the first character
    /// appears on the next [`advance`](Self::advance).
    pub fn start(&mut self) {
        if self.status != TypewriterStatus::Idle {
            tracing::trace!(status = %self.status, "typewriter start ignored");
            return;
        }
        self.status = TypewriterStatus::Typing;
        self.pending = Some(PendingTick {
            remaining: Duration::ZERO,
        });
        tracing::debug!(chars = self.chars.len(), "typewriter started");
    }

    /// Returns to idle with nothing revealed, clearing all derived state.
    pub fn reset(&mut self) {
        self.pending = None;
        self.revealed = 0;
        self.status = TypewriterStatus::Idle;
        self.progress = 0;
        self.in_code_block = false;
        self.sentences = SentenceTracker::new();
        self.completion_notified = false;
        tracing::debug!("typewriter reset");
    }

    /// Freezes the reveal and drops the pending tick.
    pub fn pause(&mut self) {
        if self.status != TypewriterStatus::Typing {
            return;
        }
        self.pending = None;
        self.status = TypewriterStatus::Paused;
        tracing::debug!(revealed = self.revealed, "typewriter paused");
    }

    /// Resumes a paused session with a freshly scheduled tick.
    pub fn resume(&mut self) {
        if self.status != TypewriterStatus::Paused {
            return;
        }
        let delay = self.jittered(self.options.speed_ms);
        self.pending = Some(PendingTick { remaining: delay });
        self.status = TypewriterStatus::Typing;
        tracing::debug!(revealed = self.revealed, ?delay, "typewriter resumed");
    }

    /// Skips to the end. No-op unless the session is interruptible; a no-op
    /// once completed.
    pub fn complete(&mut self) {
        if !self.options.interruptible {
            tracing::trace!("typewriter skip ignored: not interruptible");
            return;
        }
        if self.status == TypewriterStatus::Completed {
            return;
        }
        tracing::debug!(revealed = self.revealed, total = self.chars.len(), "typewriter skipped");
        self.revealed = self.chars.len();
        self.finish();
    }

    /// Replaces the text. A different text resets the session (and
    /// restarts it when auto-start is on); the same text is ignored.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.reset();
        self.load_text(text);
        if self.options.auto_start {
            self.start();
        }
    }

    // --------------------------------------------------------
    // Time
    // --------------------------------------------------------

    /// Advances the session clock by `elapsed`, firing every tick that
    /// falls due. Returns the number of characters revealed.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let mut budget = elapsed;
        let before = self.revealed;

        while self.status == TypewriterStatus::Typing {
            let Some(tick) = self.pending.as_mut() else {
                break;
            };
            if tick.remaining > budget {
                tick.remaining -= budget;
                break;
            }
            budget -= tick.remaining;
            self.pending = None;
            self.pending = self.fire().map(|remaining| PendingTick { remaining });
        }

        self.revealed - before
    }

    /// Time until the pending tick fires, if any.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.pending.map(|t| t.remaining)
    }

    /// Reveals one character; returns the delay before the next one, or
    /// `None` when the text is exhausted.
    fn fire(&mut self) -> Option<Duration> {
        let total = self.chars.len();
        if self.revealed >= total {
            self.finish();
            return None;
        }

        let index = self.revealed;
        self.revealed += 1;
        self.progress = ((self.revealed * 100) / total) as u8;

        let collect = self.hooks.on_sentence_complete.is_some();
        let boundary = self.sentences.observe(
            &self.chars[..self.revealed],
            index,
            self.in_code_block,
            self.options.thinking_pauses,
            collect,
        );
        let pause = match boundary {
            Some(boundary) => {
                tracing::trace!(
                    index,
                    ordinal = boundary.ordinal,
                    pause_ms = boundary.pause.as_millis() as u64,
                    "sentence boundary"
                );
                if let Some(hook) = self.hooks.on_sentence_complete.as_mut() {
                    hook(&boundary.sentence, boundary.ordinal);
                }
                boundary.pause
            }
            None => Duration::ZERO,
        };

        let speed = char_speed(
            &self.chars,
            index,
            self.in_code_block,
            self.options.speed_ms,
            &self.options.speed_adjustments,
        );
        if speed.toggles_fence {
            self.in_code_block = !self.in_code_block;
        }

        if self.revealed == total {
            self.finish();
            return None;
        }

        Some(self.jittered(speed.delay_ms).saturating_add(pause))
    }

    fn jittered(&mut self, nominal_ms: f64) -> Duration {
        let r = self.options.randomness;
        let factor = 1.0 - r + self.rng.random::<f64>() * r * 2.0;
        Duration::try_from_secs_f64((nominal_ms * factor).max(0.0) / 1000.0)
            .unwrap_or(Duration::MAX)
    }

    fn finish(&mut self) {
        self.pending = None;
        self.status = TypewriterStatus::Completed;
        self.progress = 100;
        if self.completion_notified {
            return;
        }
        self.completion_notified = true;
        tracing::debug!(chars = self.chars.len(), "typewriter completed");
        if let Some(hook) = self.hooks.on_complete.as_mut() {
            hook();
        }
    }

    // --------------------------------------------------------
    // Observables
    // --------------------------------------------------------

    /// The revealed prefix of the text.
    pub fn display_text(&self) -> &str {
        &self.text[..self.offsets[self.revealed]]
    }

    #[inline]
    pub fn status(&self) -> TypewriterStatus {
        self.status
    }

    #[inline]
    pub fn is_typing(&self) -> bool {
        self.status.is_typing()
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.status.is_paused()
    }

    /// Percentage revealed, `0..=100`.
    #[inline]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Characters revealed so far.
    #[inline]
    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// Characters in the full text.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn in_code_block(&self) -> bool {
        self.in_code_block
    }

    /// Sentence boundaries fired so far.
    #[inline]
    pub fn sentence_count(&self) -> usize {
        self.sentences.count()
    }

    pub fn last_pause_index(&self) -> Option<usize> {
        self.sentences.last_pause_index()
    }

    pub fn options(&self) -> &TypewriterOptions {
        &self.options
    }

    #[inline]
    pub fn is_interruptible(&self) -> bool {
        self.options.interruptible
    }

    /// Whether a skip control should be offered right now.
    pub fn can_skip(&self) -> bool {
        self.options.interruptible
            && self.is_typing()
            && !self.is_completed()
            && self.progress > SKIP_THRESHOLD_PERCENT
    }
}
