//! Ogric - run an Ogri syntax tree to completion.
//!
//! [`run`] is the whole-program entry point: it builds the root scope,
//! registers the builtins, evaluates the tree and reports any runtime fault
//! on stderr, returning an [`ExitStatus`] instead of exiting the process.
//! [`run_with`] is the embeddable form, returning the outcome as a value.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=ogri_eval=debug`) and call
//! [`init_tracing`] to see evaluator events.

mod options;

pub use options::RunOptions;

use std::sync::Once;

use ogri_eval::{EvalError, InterpreterBuilder, Value};
use ogri_ir::SyntaxTree;
use ogri_runtime::HashSeed;

/// Process-level result of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    /// Conventional process exit code.
    pub const fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, ExitStatus::Success)
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Why a run failed.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The parser produced no statements.
    #[error("Runtime Error: no statements to run")]
    EmptyProgram,
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

/// A completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// Value of the last top-level statement, or of a top-level `return`.
    pub value: Option<Value>,
}

/// Run `tree` on stdout/stdin with default limits.
pub fn run(tree: &SyntaxTree) -> ExitStatus {
    match run_with(tree, RunOptions::default()) {
        Ok(_) => ExitStatus::Success,
        Err(err) => {
            eprint!("{}", diagnostic(&err));
            ExitStatus::Failure
        }
    }
}

/// Run `tree` with the given options.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = tree.arena.len()))]
pub fn run_with(tree: &SyntaxTree, options: RunOptions) -> Result<RunOutcome, RunError> {
    let Some(root) = tree.root else {
        tracing::error!("empty program");
        return Err(RunError::EmptyProgram);
    };

    let mut builder = InterpreterBuilder::new(&tree.arena)
        .max_call_depth(options.max_call_depth)
        .max_interpolation_len(options.max_interpolation_len)
        .scope_capacity(options.scope_capacity)
        .hash_seed(options.hash_seed.unwrap_or_else(HashSeed::random));
    if let Some(print) = options.print_handler {
        builder = builder.print_handler(print);
    }
    if let Some(input) = options.input_handler {
        builder = builder.input_handler(input);
    }

    let mut interpreter = builder.build()?;
    match interpreter.run(root) {
        Ok(value) => Ok(RunOutcome { value }),
        Err(err) => {
            tracing::error!(line = ?err.line, kind = ?err.kind, "run failed");
            Err(RunError::Runtime(err))
        }
    }
}

/// Text reported on stderr for a failed run: the error line, then the call
/// stack when one was captured.
pub fn diagnostic(err: &RunError) -> String {
    let mut text = format!("{err}\n");
    if let RunError::Runtime(EvalError {
        backtrace: Some(backtrace),
        ..
    }) = err
    {
        text.push_str(&backtrace.to_string());
    }
    text
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
