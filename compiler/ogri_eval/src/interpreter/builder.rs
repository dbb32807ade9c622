//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use ogri_ir::NodeArena;
use ogri_runtime::{Builtin, EvalError, HashSeed, LocalScope, Scope, Value, DEFAULT_TABLE_CAPACITY};

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::input_handler::{stdin_input, SharedInputHandler};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Default ceiling on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Default maximum length, in bytes, of an interpolated string.
pub const DEFAULT_MAX_INTERPOLATION_LEN: usize = 65_535;

/// Builder for creating Interpreter instances with various configurations.
///
/// Every knob has a default: stdout and stdin, a call-depth ceiling of
/// [`DEFAULT_MAX_CALL_DEPTH`], and a hash seed drawn at build time.
pub struct InterpreterBuilder<'a> {
    arena: &'a NodeArena,
    print_handler: Option<SharedPrintHandler>,
    input_handler: Option<SharedInputHandler>,
    max_call_depth: Option<usize>,
    max_interpolation_len: usize,
    hash_seed: Option<HashSeed>,
    scope_capacity: usize,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Self {
            arena,
            print_handler: None,
            input_handler: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            max_interpolation_len: DEFAULT_MAX_INTERPOLATION_LEN,
            hash_seed: None,
            scope_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }

    /// Destination for `say` and `says`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Source for `listen`.
    #[must_use]
    pub fn input_handler(mut self, handler: SharedInputHandler) -> Self {
        self.input_handler = Some(handler);
        self
    }

    /// Ceiling on nested user-function calls; `None` disables the check.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn max_interpolation_len(mut self, len: usize) -> Self {
        self.max_interpolation_len = len;
        self
    }

    /// Fix the scope-table hash seed (tests use this for determinism).
    #[must_use]
    pub fn hash_seed(mut self, seed: HashSeed) -> Self {
        self.hash_seed = Some(seed);
        self
    }

    /// Initial slot count of every scope table.
    #[must_use]
    pub fn scope_capacity(mut self, capacity: usize) -> Self {
        self.scope_capacity = capacity;
        self
    }

    /// Build the interpreter: root scope plus every builtin bound by name.
    pub fn build(self) -> Result<Interpreter<'a>, EvalError> {
        let seed = self.hash_seed.unwrap_or_else(HashSeed::random);
        let global = LocalScope::new(Scope::with_capacity(self.scope_capacity, seed)?);
        {
            let mut root = global.borrow_mut();
            for builtin in Builtin::ALL {
                root.define(builtin.name(), Value::Builtin(builtin))?;
            }
        }
        tracing::debug!(
            seed = seed.get(),
            capacity = self.scope_capacity,
            max_call_depth = ?self.max_call_depth,
            "interpreter ready"
        );

        Ok(Interpreter {
            arena: self.arena,
            global,
            print: self.print_handler.unwrap_or_else(stdout_handler),
            input: self.input_handler.unwrap_or_else(stdin_input),
            call_stack: CallStack::new(self.max_call_depth),
            loop_depth: 0,
            max_interpolation_len: self.max_interpolation_len,
            signal_line: 0,
        })
    }
}
