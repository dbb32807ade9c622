//! Runtime error types.
//!
//! Every fault the evaluator can detect is an [`EvalErrorKind`]. Faults are
//! fail-fast: they propagate as `Err` up to the entry point, which reports
//! them and ends the run. Factory functions (e.g. `division_by_zero()`) are
//! the public way to build errors; the source line is attached afterwards
//! with [`EvalError::at_line`].

use std::fmt;

use crate::table::TableError;
use crate::vector::VectorError;
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("'{name}' is not callable ({type_name})")]
    NotCallable { name: String, type_name: String },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("division by zero")]
    DivideByZero,

    #[error("index {index} out of range (size {len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("operator `{op}` is not supported for {type_name}")]
    UnsupportedOperator { op: String, type_name: String },

    #[error("iterator exhausted")]
    IteratorExhausted,

    #[error("allocation failed: {what}")]
    AllocationFailure { what: String },

    #[error("invalid assignment target: {target}")]
    InvalidTarget { target: String },

    #[error("'{signal}' outside of a loop")]
    ControlOutsideLoop { signal: String },

    #[error("maximum recursion depth exceeded (limit: {limit})")]
    StackOverflow { limit: usize },

    /// Catch-all for faults without a dedicated kind.
    #[error("{message}")]
    Custom { message: String },
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Called function name.
    pub name: String,
    /// Source line of the call site.
    pub line: u32,
}

/// Snapshot of the call stack at an error site.
///
/// Most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} at line {}", frame.name, frame.line)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Source line of the innermost node that failed.
    pub line: Option<u32>,
    /// Call stack at the error site, if captured.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            line: None,
            backtrace: None,
        }
    }

    /// Attach a source line unless a more specific one is already set.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line.get_or_insert(line);
        self
    }

    /// Attach a backtrace unless one is already set.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    /// The message without location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Runtime Error at line {line}: {}", self.kind),
            None => write!(f, "Runtime Error: {}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<VectorError> for EvalError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::IndexOutOfRange { index, len, .. } => {
                index_out_of_range(i64::try_from(index).unwrap_or(i64::MAX), len)
            }
            VectorError::ZeroCapacity | VectorError::AllocationFailure => {
                allocation_failure("list")
            }
            VectorError::EmptyReverse => EvalError::new(err.to_string()),
        }
    }
}

impl From<TableError> for EvalError {
    fn from(err: TableError) -> Self {
        allocation_failure(format!("scope table ({err})"))
    }
}

// Factory functions

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn not_callable(name: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        name: name.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Operands of a binary operator have incompatible types.
#[cold]
pub fn binary_type_mismatch(op: &str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: format!("compatible operands for `{op}`"),
        got: format!("{left} and {right}"),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivideByZero)
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, len })
}

#[cold]
pub fn unsupported_operator(op: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperator {
        op: op.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn iterator_exhausted() -> EvalError {
    EvalError::from_kind(EvalErrorKind::IteratorExhausted)
}

#[cold]
pub fn allocation_failure(what: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AllocationFailure { what: what.into() })
}

#[cold]
pub fn invalid_target(target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidTarget {
        target: target.to_string(),
    })
}

#[cold]
pub fn control_outside_loop(signal: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ControlOutsideLoop {
        signal: signal.to_string(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { limit })
}
