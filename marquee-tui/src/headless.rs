//! Headless mode
//!
//! Runs the engine on virtual time for a fixed span and writes every event
//! it publishes, one per line. Nothing sleeps, so a minute of animation is
//! printed instantly and the output is the same on every run.

use std::io::Write;
use std::time::Duration;

use clap::ValueEnum;
use libmarquee::{EngineConfig, Event, EventBus, EventReceiver, Orchestrator};
use tokio::sync::broadcast::error::TryRecvError;

use crate::error::Result;

/// Line format for headless output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Drive an engine built from `config` until `duration` of virtual time has
/// passed, then stop it. Returns the number of lines written.
pub fn run_headless<W: Write>(
    config: EngineConfig,
    duration: Duration,
    format: OutputFormat,
    out: &mut W,
) -> Result<usize> {
    let bus = EventBus::default();
    let mut events = bus.subscribe();
    let mut engine = Orchestrator::start_with_bus(config, bus)?;

    let mut written = write_pending(&mut events, engine.now(), format, out)?;

    while let Some(deadline) = engine.next_deadline() {
        if deadline > duration {
            break;
        }
        engine.fire_next();
        written += write_pending(&mut events, engine.now(), format, out)?;
    }

    engine.advance(duration.saturating_sub(engine.now()));
    engine.stop();
    written += write_pending(&mut events, engine.now(), format, out)?;

    tracing::debug!(lines = written, "headless run finished");
    Ok(written)
}

fn write_pending<W: Write>(
    events: &mut EventReceiver,
    at: Duration,
    format: OutputFormat,
    out: &mut W,
) -> Result<usize> {
    let at_ms = at.as_millis() as u64;
    let mut written = 0;

    loop {
        let event = match events.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "headless output dropped events");
                continue;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        };

        match format {
            OutputFormat::Json => {
                let line = serde_json::json!({ "at_ms": at_ms, "event": event });
                serde_json::to_writer(&mut *out, &line)?;
                writeln!(out)?;
            }
            OutputFormat::Text => writeln!(out, "{:>7}ms  {}", at_ms, describe(&event))?,
        }
        written += 1;
    }

    Ok(written)
}

fn describe(event: &Event) -> String {
    match event {
        Event::Snapshot(snapshot) => {
            let open: Vec<&str> = snapshot
                .accordion
                .sections
                .iter()
                .filter(|section| section.is_open)
                .map(|section| section.id.as_str())
                .collect();
            let mut line = format!(
                "{:<8} {:?}  blocks {}/{}",
                snapshot.typing.mode.to_string(),
                snapshot.typing.rendered_text,
                snapshot.reveal.revealed_count,
                snapshot.reveal.block_count,
            );
            if !open.is_empty() {
                line.push_str(&format!("  open [{}]", open.join(", ")));
            }
            line
        }
        Event::PhraseTyped { phrase_index } => format!("-- phrase {} typed", phrase_index),
        Event::PhraseCycleCompleted { phrase_index } => {
            format!("-- phrase {} cycle completed", phrase_index)
        }
        Event::SectionToggled { id, is_open } => {
            format!("-- section {} {}", id, if *is_open { "opened" } else { "closed" })
        }
        Event::Stopped => "-- stopped".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_prints_start_and_stop() {
        let mut out = Vec::new();
        let lines = run_headless(
            EngineConfig::new(["Hi"]),
            Duration::ZERO,
            OutputFormat::Text,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        // Initial snapshot, final snapshot, stopped
        assert_eq!(lines, 3);
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().last().unwrap().ends_with("-- stopped"));
    }

    #[test]
    fn test_invalid_config_writes_nothing() {
        let mut out = Vec::new();
        let result = run_headless(
            EngineConfig::new(Vec::<String>::new()),
            Duration::from_secs(1),
            OutputFormat::Json,
            &mut out,
        );

        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
