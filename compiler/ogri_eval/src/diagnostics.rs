//! Call-frame tracking for the evaluator.
//!
//! `CallStack` records one [`CallFrame`] per active user-function call.
//! `push` enforces the configured depth ceiling so runaway recursion becomes
//! a `StackOverflow` error instead of a native stack overflow, and
//! `capture` snapshots the frames into the backtrace attached to errors.

use ogri_runtime::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// A single active call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Called function name.
    pub name: String,
    /// Line of the call site.
    pub line: u32,
}

/// Live call stack for the interpreter.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` of `None` means unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is NOT pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Snapshot the stack, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|f| BacktraceFrame {
                name: f.name.clone(),
                line: f.line,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a snapshot of this stack to `err`.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}
