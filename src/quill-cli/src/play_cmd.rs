//! `quill play`: reveal a text on stdout with the typewriter engine.
//!
//! The text comes from the positional argument, `--file`, or stdin. Each
//! frame advances the session by the real elapsed time and writes only the
//! newly revealed part. Ctrl+C skips to the end instead of aborting,
//! unless the typewriter is configured as not interruptible.

use std::future::Future;
use std::io::{IsTerminal, Read, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::time::{Instant, MissedTickBehavior};

use quill_core::{ThinkingPauses, TypewriterOptions, TypewriterSession};

use crate::cli::PlayArgs;
use crate::config::QuillConfig;

/// Summary of one playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Characters in the text.
    pub total: usize,
    /// Sentence boundaries that fired.
    pub sentences: usize,
    /// Whether the interrupt skipped to the end.
    pub interrupted: bool,
}

/// Runs `quill play`.
pub async fn run(args: PlayArgs, config: &QuillConfig) -> Result<()> {
    let text = read_text(&args)?;
    let options = apply_overrides(config.typewriter.clone(), &args);
    options
        .validate()
        .context("Invalid typewriter options")?;

    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let mut stdout = std::io::stdout();
    let outcome = play(&text, options, config.ui.frame(), &mut stdout, interrupt).await?;
    tracing::info!(
        chars = outcome.total,
        sentences = outcome.sentences,
        interrupted = outcome.interrupted,
        "playback finished"
    );
    Ok(())
}

fn read_text(args: &PlayArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No text given. Pass TEXT, use --file, or pipe text on stdin.");
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

/// Layers command-line flags over the configured options.
pub fn apply_overrides(mut options: TypewriterOptions, args: &PlayArgs) -> TypewriterOptions {
    if let Some(speed) = args.speed {
        options.speed_ms = speed;
    }
    if let Some(randomness) = args.randomness {
        options.randomness = randomness;
    }
    if args.no_pauses {
        options.thinking_pauses = ThinkingPauses::Disabled;
    } else if let Some(ms) = args.pause_ms {
        options.thinking_pauses = ThinkingPauses::fixed_ms(ms);
    }
    if let Some(seed) = args.seed {
        options.seed = Some(seed);
    }
    // Nothing else would start it.
    options.auto_start = true;
    options
}

/// Reveals `text` into `out`, one frame every `frame`, until done or until
/// `interrupt` resolves.
pub async fn play<W, F>(
    text: &str,
    options: TypewriterOptions,
    frame: Duration,
    out: &mut W,
    interrupt: F,
) -> Result<PlayOutcome>
where
    W: Write,
    F: Future<Output = ()>,
{
    let mut session = TypewriterSession::new(text, options.with_auto_start(true))
        .on_sentence_complete(|sentence, ordinal| {
            tracing::debug!(ordinal, sentence = sentence.trim(), "sentence complete");
        });

    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(interrupt);

    let mut written = 0;
    let mut interrupted = false;
    let mut last = Instant::now();

    while !session.is_completed() {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                session.advance(now - last);
                last = now;
            }
            _ = &mut interrupt, if !interrupted => {
                if !session.is_interruptible() {
                    writeln!(out)?;
                    out.flush()?;
                    bail!("Playback interrupted");
                }
                interrupted = true;
                session.complete();
            }
        }
        written = write_delta(&session, written, out)?;
    }

    if !text.is_empty() && !text.ends_with('\n') {
        writeln!(out)?;
    }
    out.flush()?;

    Ok(PlayOutcome {
        total: session.total_len(),
        sentences: session.sentence_count(),
        interrupted,
    })
}

/// Writes the revealed bytes past `written`; returns the new offset.
fn write_delta<W: Write>(session: &TypewriterSession, written: usize, out: &mut W) -> Result<usize> {
    let shown = session.display_text();
    if shown.len() > written {
        out.write_all(&shown.as_bytes()[written..])?;
        out.flush()?;
    }
    Ok(shown.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    fn steady(speed_ms: f64) -> TypewriterOptions {
        TypewriterOptions::default()
            .with_speed_ms(speed_ms)
            .with_randomness(0.0)
            .with_seed(1)
    }

    fn play_args(argv: &[&str]) -> PlayArgs {
        let mut full = vec!["quill", "play"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Some(Commands::Play(args)) => args,
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_writes_text_and_newline() {
        let mut out = Vec::new();
        let outcome = play(
            "Hello there, friend.",
            steady(10.0),
            Duration::from_millis(16),
            &mut out,
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Hello there, friend.\n");
        assert_eq!(outcome.total, 20);
        assert_eq!(outcome.sentences, 1);
        assert!(!outcome.interrupted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_keeps_existing_newline() {
        let mut out = Vec::new();
        play(
            "line\n",
            steady(0.0),
            Duration::from_millis(16),
            &mut out,
            std::future::pending(),
        )
        .await
        .unwrap();
        assert_eq!(out, b"line\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_takes_simulated_time() {
        let start = Instant::now();
        let mut out = Vec::new();
        play(
            "abcdef",
            steady(100.0).with_thinking_pauses(ThinkingPauses::Disabled),
            Duration::from_millis(10),
            &mut out,
            std::future::pending(),
        )
        .await
        .unwrap();
        // First char is immediate, five more at 100ms each.
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert!(start.elapsed() < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_skips_to_end() {
        let text = "A fairly long reply that would take a while to type out.";
        let mut out = Vec::new();
        let outcome = play(
            text,
            steady(50.0),
            Duration::from_millis(16),
            &mut out,
            tokio::time::sleep(Duration::from_millis(200)),
        )
        .await
        .unwrap();

        assert!(outcome.interrupted);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{text}\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_aborts_when_not_interruptible() {
        let text = "A fairly long reply that would take a while to type out.";
        let start = Instant::now();
        let mut out = Vec::new();
        let err = play(
            text,
            steady(50.0).with_interruptible(false),
            Duration::from_millis(16),
            &mut out,
            tokio::time::sleep(Duration::from_millis(200)),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("interrupted"));
        assert!(start.elapsed() < Duration::from_millis(300));
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.ends_with('\n'));
        assert!(shown.len() < text.len());
        assert!(text.starts_with(shown.trim_end()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_multibyte_output_is_intact() {
        let mut out = Vec::new();
        play(
            "héllo → 世界",
            steady(5.0),
            Duration::from_millis(16),
            &mut out,
            std::future::pending(),
        )
        .await
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "héllo → 世界\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text() {
        let mut out = Vec::new();
        let outcome = play(
            "",
            steady(10.0),
            Duration::from_millis(16),
            &mut out,
            std::future::pending(),
        )
        .await
        .unwrap();
        assert!(out.is_empty());
        assert_eq!(outcome.total, 0);
    }

    #[test]
    fn test_overrides() {
        let base = TypewriterOptions::default().with_auto_start(false);
        let args = play_args(&["--speed", "5", "--randomness", "0", "--pause-ms", "40", "x"]);
        let opts = apply_overrides(base, &args);
        assert_eq!(opts.speed_ms, 5.0);
        assert_eq!(opts.randomness, 0.0);
        assert_eq!(opts.thinking_pauses, ThinkingPauses::fixed_ms(40));
        assert!(opts.auto_start);

        let args = play_args(&["--no-pauses", "x"]);
        let opts = apply_overrides(TypewriterOptions::default(), &args);
        assert_eq!(opts.thinking_pauses, ThinkingPauses::Disabled);
    }

    #[test]
    fn test_read_text_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.md");
        std::fs::write(&path, "# Title\n").unwrap();
        let args = play_args(&["--file", path.to_str().unwrap()]);
        assert_eq!(read_text(&args).unwrap(), "# Title\n");
    }

    #[test]
    fn test_read_text_missing_file() {
        let args = play_args(&["--file", "/nonexistent/quill/reply.md"]);
        let err = read_text(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
