//! Input sources for `listen`.
//!
//! Mirrors the print handler: stdin by default, a scripted queue of lines
//! for embedding and tests, or a closed source that is always at
//! end-of-input.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

use parking_lot::Mutex;

/// Reads lines from the process's stdin.
#[derive(Default)]
pub struct StdinInputHandler;

impl StdinInputHandler {
    /// Next line without its terminator, or `None` at end-of-input.
    pub fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(strip_line_ending(line)),
            Err(err) => {
                tracing::warn!(%err, "failed to read from stdin");
                None
            }
        }
    }
}

/// Serves a fixed queue of lines.
#[derive(Default)]
pub struct ScriptedInputHandler {
    lines: Mutex<VecDeque<String>>,
}

impl ScriptedInputHandler {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInputHandler {
            lines: Mutex::new(lines.into_iter().map(Into::into).collect()),
        }
    }

    pub fn read_line(&self) -> Option<String> {
        self.lines.lock().pop_front().map(strip_line_ending)
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.lock().len()
    }
}

/// Input handler implementation using enum dispatch.
pub enum InputHandlerImpl {
    Stdin(StdinInputHandler),
    Scripted(ScriptedInputHandler),
    Closed,
}

impl InputHandlerImpl {
    /// Next line without its terminator, or `None` at end-of-input.
    pub fn read_line(&self) -> Option<String> {
        match self {
            Self::Stdin(h) => h.read_line(),
            Self::Scripted(h) => h.read_line(),
            Self::Closed => None,
        }
    }
}

/// Shared input handler that can be passed around.
pub type SharedInputHandler = Arc<InputHandlerImpl>;

/// Create the default stdin input handler.
pub fn stdin_input() -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Stdin(StdinInputHandler))
}

/// Create an input handler serving `lines` in order.
pub fn scripted_input<I, S>(lines: I) -> SharedInputHandler
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(InputHandlerImpl::Scripted(ScriptedInputHandler::new(lines)))
}

/// Create an input handler that is always at end-of-input.
pub fn closed_input() -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Closed)
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
