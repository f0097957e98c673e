//! Typewriter status and notification hooks.

use std::fmt;

/// Lifecycle of a typewriter session.
///
/// ```text
/// Idle ──start──▶ Typing ──pause──▶ Paused
///                  │  ▲               │
///                  │  └────resume─────┘
///                  ▼
///              Completed
/// ```
///
/// `reset` (or a text change) returns any state to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypewriterStatus {
    /// Nothing revealed, no tick scheduled.
    #[default]
    Idle,
    /// A tick is scheduled for the next character.
    Typing,
    /// Reveal frozen; no tick scheduled.
    Paused,
    /// The whole text is shown.
    Completed,
}

impl TypewriterStatus {
    #[inline]
    pub fn is_typing(&self) -> bool {
        matches!(self, Self::Typing)
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Typing => "typing",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TypewriterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type CompleteHook = Box<dyn FnMut() + Send>;
pub type SentenceHook = Box<dyn FnMut(&str, usize) + Send>;

/// Callbacks invoked by a session.
#[derive(Default)]
pub struct TypewriterHooks {
    /// Called once per completion, natural or skipped.
    pub on_complete: Option<CompleteHook>,
    /// Called once per sentence boundary with the sentence and its
    /// one-based ordinal.
    pub on_sentence_complete: Option<SentenceHook>,
}

impl fmt::Debug for TypewriterHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypewriterHooks")
            .field("on_complete", &self.on_complete.is_some())
            .field("on_sentence_complete", &self.on_sentence_complete.is_some())
            .finish()
    }
}
