/// Timed line input - a single line raced against a wall-clock deadline
use std::future::Future;
use std::io::{self, stdout, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use crossterm::event::{self, Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use futures_util::StreamExt;
use tokio::time::Instant;
use tracing::debug;

/// Result of one timed read. `line` is `None` when the deadline fired first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedLine {
    pub line: Option<String>,
    pub elapsed: Duration,
}

/// Source of player guesses that never waits past the deadline
#[async_trait(?Send)]
pub trait TimedInput {
    async fn read_line_with_deadline(&mut self, deadline: Duration) -> Result<TimedLine>;
}

/// Race `read` against `deadline`. Whichever finishes first decides the
/// outcome; a losing read is dropped and can no longer deliver its line.
pub async fn race_deadline<F>(deadline: Duration, read: F) -> Result<TimedLine>
where
    F: Future<Output = Result<String>>,
{
    let started = Instant::now();
    match tokio::time::timeout(deadline, read).await {
        Ok(line) => Ok(TimedLine {
            line: Some(line?),
            elapsed: started.elapsed().min(deadline),
        }),
        Err(_) => {
            debug!(?deadline, "deadline fired before input");
            Ok(TimedLine { line: None, elapsed: deadline })
        }
    }
}

/// Raw mode for the lifetime of the guard
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads guesses from the terminal key event stream with local echo
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    /// Throw away keystrokes typed before the attempt started
    fn discard_pending() -> Result<()> {
        let dropped = drain_pending(|| event::poll(Duration::ZERO), || event::read().map(drop))?;
        if dropped > 0 {
            debug!(dropped, "discarded stale key events");
        }
        Ok(())
    }
}

/// Consume events for as long as `ready` reports one waiting, returning
/// how many were dropped
fn drain_pending<P, R>(mut ready: P, mut consume: R) -> io::Result<usize>
where
    P: FnMut() -> io::Result<bool>,
    R: FnMut() -> io::Result<()>,
{
    let mut dropped = 0;
    while ready()? {
        consume()?;
        dropped += 1;
    }
    Ok(dropped)
}

#[async_trait(?Send)]
impl TimedInput for TerminalInput {
    async fn read_line_with_deadline(&mut self, deadline: Duration) -> Result<TimedLine> {
        let _raw = RawModeGuard::enable()?;
        Self::discard_pending()?;
        let result = race_deadline(deadline, read_echoed_line()).await;
        if matches!(result, Ok(TimedLine { line: None, .. })) {
            // leave the half-typed line behind
            print!("\r\n");
            stdout().flush()?;
        }
        result
    }
}

/// What a single key press does to the line being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Echo this text back to the terminal
    Echo(String),
    Submit(String),
    Interrupt,
    Ignore,
}

/// Line editing over key events, independent of the terminal
#[derive(Debug, Default)]
pub struct LineEditor {
    line: String,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignore;
        }
        match key.code {
            KeyCode::Enter => KeyAction::Submit(std::mem::take(&mut self.line)),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Interrupt,
            KeyCode::Backspace => match self.line.pop() {
                Some(_) => KeyAction::Echo("\x08 \x08".to_string()),
                None => KeyAction::Ignore,
            },
            KeyCode::Char(c) => {
                self.line.push(c);
                KeyAction::Echo(c.to_string())
            }
            _ => KeyAction::Ignore,
        }
    }
}

async fn read_echoed_line() -> Result<String> {
    let mut events = EventStream::new();
    let mut editor = LineEditor::new();
    let mut out = stdout();

    while let Some(event) = events.next().await {
        let Event::Key(key) = event? else {
            continue;
        };
        match editor.apply(key) {
            KeyAction::Submit(line) => {
                write!(out, "\r\n")?;
                out.flush()?;
                return Ok(line);
            }
            KeyAction::Interrupt => {
                write!(out, "\r\n")?;
                out.flush()?;
                bail!("interrupted");
            }
            KeyAction::Echo(text) => {
                write!(out, "{text}")?;
                out.flush()?;
            }
            KeyAction::Ignore => {}
        }
    }

    bail!("terminal input closed")
}

#[cfg(test)]
pub(crate) use scripted::ScriptedInput;

#[cfg(test)]
mod scripted {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers, each typed after a delay. A silent reply
    /// never produces a line.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedInput {
        replies: VecDeque<Option<(Duration, String)>>,
    }

    impl ScriptedInput {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn typed(mut self, after: Duration, line: &str) -> Self {
            self.replies.push_back(Some((after, line.to_string())));
            self
        }

        pub(crate) fn silent(mut self) -> Self {
            self.replies.push_back(None);
            self
        }

        pub(crate) fn remaining(&self) -> usize {
            self.replies.len()
        }
    }

    #[async_trait(?Send)]
    impl TimedInput for ScriptedInput {
        async fn read_line_with_deadline(&mut self, deadline: Duration) -> Result<TimedLine> {
            let reply = self.replies.pop_front().flatten();
            race_deadline(deadline, async move {
                match reply {
                    Some((after, line)) => {
                        tokio::time::sleep(after).await;
                        Ok(line)
                    }
                    None => std::future::pending::<Result<String>>().await,
                }
            })
            .await
        }
    }
}
