//! Tests for the typewriter engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::*;

const FRAME: Duration = Duration::from_millis(16);

/// Deterministic options: no jitter, no pauses.
fn steady() -> TypewriterOptions {
    TypewriterOptions::default()
        .with_randomness(0.0)
        .with_thinking_pauses(ThinkingPauses::Disabled)
        .with_seed(7)
}

fn completion_counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let hook_count = Arc::clone(&count);
    (count, move || {
        hook_count.fetch_add(1, Ordering::SeqCst);
    })
}

/// Advances frame by frame until completion, returning every display text.
fn run_to_end(tw: &mut TypewriterSession) -> Vec<String> {
    let mut frames = Vec::new();
    for _ in 0..100_000 {
        if tw.is_completed() {
            break;
        }
        tw.advance(FRAME);
        frames.push(tw.display_text().to_string());
    }
    frames
}

// --------------------------------------------------------
// Lifecycle
// --------------------------------------------------------

#[test]
fn test_auto_start_reveals_first_char_on_next_tick() {
    let mut tw = TypewriterSession::new("Hello", steady());
    assert_eq!(tw.status(), TypewriterStatus::Typing);
    assert_eq!(tw.display_text(), "");
    assert_eq!(tw.next_tick_in(), Some(Duration::ZERO));

    assert_eq!(tw.advance(Duration::ZERO), 1);
    assert_eq!(tw.display_text(), "H");
    assert_eq!(tw.progress(), 20);
}

#[test]
fn test_manual_start() {
    let mut tw = TypewriterSession::new("Hello", steady().with_auto_start(false));
    assert_eq!(tw.status(), TypewriterStatus::Idle);
    assert_eq!(tw.advance(Duration::from_secs(5)), 0);
    assert_eq!(tw.display_text(), "");
    assert_eq!(tw.next_tick_in(), None);

    tw.start();
    assert!(tw.is_typing());
    tw.advance(Duration::ZERO);
    assert_eq!(tw.display_text(), "H");
}

#[test]
fn test_start_ignored_unless_idle() {
    let mut tw = TypewriterSession::new("Hello", steady());
    tw.advance(Duration::ZERO);
    tw.start();
    assert_eq!(tw.revealed_len(), 1);

    tw.complete();
    tw.start();
    assert!(tw.is_completed());
}

#[test]
fn test_nominal_timing() {
    let mut tw = TypewriterSession::new("abcd", steady());
    assert_eq!(tw.advance(Duration::ZERO), 1);
    assert_eq!(tw.advance(Duration::from_millis(29)), 0);
    assert_eq!(tw.advance(Duration::from_millis(2)), 1);
    assert_eq!(tw.display_text(), "ab");
    assert_eq!(tw.advance(Duration::from_millis(61)), 2);
    assert!(tw.is_completed());
}

#[test]
fn test_natural_completion_yields_prefixes() {
    let text = "Rust is fast. It is also safe! Does it have a typewriter? Yes.";
    let (count, hook) = completion_counter();
    let opts = TypewriterOptions::default().with_seed(42);
    let mut tw = TypewriterSession::new(text, opts).on_complete(hook);

    let frames = run_to_end(&mut tw);
    assert!(tw.is_completed());
    assert_eq!(tw.display_text(), text);
    assert_eq!(tw.revealed_len(), text.chars().count());
    assert_eq!(tw.progress(), 100);
    assert!(frames.iter().all(|f| text.starts_with(f.as_str())));
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_progress_is_non_decreasing() {
    let text = "```rust\nfn main() {}\n```\nDone. Really done!";
    let mut tw = TypewriterSession::new(text, TypewriterOptions::default().with_seed(3));
    let mut last = tw.progress();
    assert_eq!(last, 0);
    for _ in 0..100_000 {
        if tw.is_completed() {
            break;
        }
        tw.advance(Duration::from_millis(5));
        assert!(tw.progress() >= last);
        last = tw.progress();
    }
    assert_eq!(last, 100);
}

#[test]
fn test_single_large_advance_reveals_in_order() {
    let text = "one two three";
    let mut tw = TypewriterSession::new(text, steady());
    let revealed = tw.advance(Duration::from_secs(60));
    assert_eq!(revealed, text.chars().count());
    assert_eq!(tw.display_text(), text);
    assert!(tw.is_completed());
}

#[test]
fn test_empty_text_completes_on_next_tick() {
    let (count, hook) = completion_counter();
    let mut tw = TypewriterSession::new("", steady()).on_complete(hook);
    assert!(!tw.is_completed());
    assert_eq!(tw.advance(Duration::ZERO), 0);
    assert!(tw.is_completed());
    assert_eq!(tw.progress(), 100);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

// --------------------------------------------------------
// Skip
// --------------------------------------------------------

#[test]
fn test_skip_fires_completion_once() {
    let text = "A fairly long reply that we do not want to wait for.";
    let (count, hook) = completion_counter();
    let mut tw = TypewriterSession::new(text, steady()).on_complete(hook);
    tw.advance(Duration::from_millis(100));

    tw.complete();
    tw.complete();
    tw.advance(Duration::from_secs(10));

    assert_eq!(tw.display_text(), text);
    assert_eq!(tw.progress(), 100);
    assert!(tw.is_completed());
    assert!(!tw.is_typing());
    assert_eq!(tw.next_tick_in(), None);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_skip_before_start() {
    let mut tw = TypewriterSession::new("abc", steady().with_auto_start(false));
    tw.complete();
    assert_eq!(tw.display_text(), "abc");
    assert!(tw.is_completed());
}

#[test]
fn test_skip_ignored_when_not_interruptible() {
    let (count, hook) = completion_counter();
    let mut tw =
        TypewriterSession::new("abcdef", steady().with_interruptible(false)).on_complete(hook);
    tw.advance(Duration::ZERO);
    tw.complete();
    assert_eq!(tw.display_text(), "a");
    assert!(tw.is_typing());
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(!tw.can_skip());
}

#[test]
fn test_can_skip_after_threshold() {
    let mut tw = TypewriterSession::new("0123456789", steady());
    tw.advance(Duration::ZERO);
    tw.advance(Duration::from_millis(31));
    // 2 of 10 characters: 20% is not above the threshold
    assert_eq!(tw.progress(), 20);
    assert!(!tw.can_skip());
    tw.advance(Duration::from_millis(31));
    assert_eq!(tw.progress(), 30);
    assert!(tw.can_skip());

    tw.pause();
    assert!(!tw.can_skip());
}

// --------------------------------------------------------
// Pause / resume
// --------------------------------------------------------

#[test]
fn test_pause_freezes_reveal() {
    let mut tw = TypewriterSession::new("abcdefghij", steady());
    tw.advance(Duration::from_millis(40));
    let frozen = tw.revealed_len();
    assert!(frozen > 0);

    tw.pause();
    assert_eq!(tw.status(), TypewriterStatus::Paused);
    assert_eq!(tw.next_tick_in(), None);
    assert_eq!(tw.advance(Duration::from_secs(30)), 0);
    assert_eq!(tw.revealed_len(), frozen);

    tw.resume();
    assert!(tw.is_typing());
    assert!(tw.next_tick_in().is_some());
    tw.advance(Duration::from_millis(31));
    assert_eq!(tw.revealed_len(), frozen + 1);
}

#[test]
fn test_pause_and_resume_are_state_guarded() {
    let mut tw = TypewriterSession::new("abc", steady().with_auto_start(false));
    tw.pause();
    assert_eq!(tw.status(), TypewriterStatus::Idle);
    tw.resume();
    assert_eq!(tw.status(), TypewriterStatus::Idle);
}

// --------------------------------------------------------
// Reset / text change
// --------------------------------------------------------

#[test]
fn test_text_change_resets_and_cancels() {
    let old = "old old old old";
    let new = "fresh";
    let mut tw = TypewriterSession::new(old, steady());
    tw.advance(Duration::from_millis(100));
    assert!(tw.revealed_len() > 0);

    tw.set_text(new);
    assert_eq!(tw.revealed_len(), 0);
    assert_eq!(tw.display_text(), "");
    assert_eq!(tw.sentence_count(), 0);
    assert!(!tw.in_code_block());

    for _ in 0..20 {
        tw.advance(FRAME);
        assert!(new.starts_with(tw.display_text()));
    }
    assert_eq!(tw.display_text(), new);
}

#[test]
fn test_same_text_is_ignored() {
    let mut tw = TypewriterSession::new("same", steady());
    tw.advance(Duration::from_millis(35));
    let before = tw.revealed_len();
    tw.set_text("same");
    assert_eq!(tw.revealed_len(), before);
}

#[test]
fn test_reset_allows_second_completion() {
    let (count, hook) = completion_counter();
    let mut tw = TypewriterSession::new("hi", steady()).on_complete(hook);
    tw.advance(Duration::from_secs(1));
    assert!(tw.is_completed());

    tw.reset();
    assert_eq!(tw.status(), TypewriterStatus::Idle);
    assert_eq!(tw.progress(), 0);
    assert_eq!(tw.display_text(), "");

    tw.start();
    tw.advance(Duration::from_secs(1));
    assert!(tw.is_completed());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

// --------------------------------------------------------
// Content-aware timing
// --------------------------------------------------------

#[test]
fn test_sentence_callbacks_in_order() {
    let seen: Arc<Mutex<Vec<(String, usize)>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let opts = steady().with_thinking_pauses(ThinkingPauses::Auto);
    let mut tw = TypewriterSession::new("Hello there. Wonderful world!", opts)
        .on_sentence_complete(move |sentence, ordinal| {
            sink.lock().unwrap().push((sentence.to_string(), ordinal));
        });

    run_to_end(&mut tw);

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            ("Hello there".to_string(), 1),
            (" Wonderful world".to_string(), 2)
        ]
    );
    assert_eq!(tw.sentence_count(), 2);
}

#[test]
fn test_thinking_pause_extends_next_delay() {
    let opts = steady()
        .with_speed_ms(10.0)
        .with_thinking_pauses(ThinkingPauses::fixed_ms(500));
    let mut tw = TypewriterSession::new("Hello there. Next", opts);

    // reveal up to and including the '.' at index 11
    while tw.revealed_len() < 12 {
        tw.advance(Duration::from_millis(1));
    }
    assert_eq!(tw.last_pause_index(), Some(11));
    let wait = tw.next_tick_in().unwrap();
    assert!(wait >= Duration::from_millis(500));
    assert!(wait <= Duration::from_millis(506));
}

#[test]
fn test_pause_boundaries_keep_minimum_gap() {
    let seen: Arc<Mutex<Vec<usize>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let text = "Hi. Yes. No. Maybe so. Sure! Okay? Fine. Another long sentence here.";
    let opts = steady().with_thinking_pauses(ThinkingPauses::Auto);
    let mut tw = TypewriterSession::new(text, opts).on_sentence_complete(move |_, _| {
        sink.lock().unwrap().push(0);
    });

    let mut indices = Vec::new();
    let mut last = None;
    while !tw.is_completed() {
        tw.advance(Duration::from_millis(1));
        if tw.last_pause_index() != last {
            last = tw.last_pause_index();
            indices.extend(last);
        }
    }
    assert!(!indices.is_empty());
    assert!(indices.windows(2).all(|w| w[1] - w[0] > MIN_PAUSE_GAP));
    assert_eq!(seen.lock().unwrap().len(), indices.len());
}

#[test]
fn test_code_fence_toggles_code_mode() {
    let text = "```\nabcdefghijklmnopqrstuvwxyz";
    let mut tw = TypewriterSession::new(text, steady());
    tw.advance(Duration::ZERO);
    assert!(tw.in_code_block());

    // inside code the delay is a third of the base speed
    tw.advance(Duration::from_millis(31));
    let wait = tw.next_tick_in().unwrap();
    assert!(wait <= Duration::from_millis(11));
}

#[test]
fn test_multibyte_text() {
    let text = "日本語のテキスト。";
    let mut tw = TypewriterSession::new(text, steady());
    tw.advance(Duration::ZERO);
    assert_eq!(tw.display_text(), "日");
    tw.advance(Duration::from_secs(1));
    assert_eq!(tw.display_text(), text);
    assert_eq!(tw.total_len(), 9);
}

#[test]
fn test_sessions_are_independent() {
    let mut a = TypewriterSession::new("aaaaaaaa", steady());
    let mut b = TypewriterSession::new("bbbbbbbb", steady().with_speed_ms(60.0));
    a.advance(Duration::from_millis(100));
    b.advance(Duration::from_millis(100));
    assert!(a.revealed_len() > b.revealed_len());
    b.complete();
    assert!(b.is_completed());
    assert!(!a.is_completed());
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let opts = TypewriterOptions::default().with_seed(99);
    let mut a = TypewriterSession::new("jitter jitter jitter", opts.clone());
    let mut b = TypewriterSession::new("jitter jitter jitter", opts);
    for _ in 0..10 {
        a.advance(FRAME);
        b.advance(FRAME);
        assert_eq!(a.revealed_len(), b.revealed_len());
        assert_eq!(a.next_tick_in(), b.next_tick_in());
    }
}

#[test]
fn test_oversized_delays_saturate() {
    let opts = steady()
        .with_speed_ms(1e25)
        .with_thinking_pauses(ThinkingPauses::fixed_ms(u64::MAX));
    let mut tw = TypewriterSession::new("Hi. Yo", opts);
    tw.advance(Duration::ZERO);
    assert_eq!(tw.revealed_len(), 1);
    assert_eq!(tw.next_tick_in(), Some(Duration::MAX));

    for _ in 0..10 {
        if tw.is_completed() {
            break;
        }
        tw.advance(Duration::MAX);
    }
    assert!(tw.is_completed());
    assert_eq!(tw.display_text(), "Hi. Yo");
}
