//! Output destinations for `say` and `says`.
//!
//! - stdout (default), flushed after every write so prompts written with
//!   `says` appear before `listen` blocks
//! - buffer, for embedding and test assertions
//! - silent, discarding everything
//!
//! Enum dispatch keeps the hot path free of vtable calls.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to the process's stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn write(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // Output errors (closed pipe) are not runtime faults of the program.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

/// Captures output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Return and clear everything written so far.
    pub fn take_output(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    /// Write `text` verbatim.
    pub fn write(&self, text: &str) {
        match self {
            Self::Stdout(h) => h.write(text),
            Self::Buffer(h) => h.write(text),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Captured output, clearing the buffer.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.take_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Create a default stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Create a print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
