//! Ogri Eval - tree-walking evaluator.
//!
//! Executes a [`SyntaxTree`](ogri_ir::SyntaxTree) against the runtime data
//! model in `ogri_runtime`:
//! - [`Interpreter`] / [`InterpreterBuilder`]: node dispatch, scopes, calls
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics
//! - built-in library (`say`, `says`, `to_int`, `listen`, `range`, `len`,
//!   `push`, `pop`)
//! - [`SharedPrintHandler`] / [`SharedInputHandler`]: configurable I/O
//!
//! Faults never abort the process; they propagate as [`EvalError`] to the
//! caller of [`Interpreter::run`].

mod builtins;
mod diagnostics;
mod input_handler;
mod interpreter;
mod operators;
mod print_handler;
mod stack;
mod unary_operators;

pub use builtins::{call_builtin, parse_leading_int, BuiltinIo};
pub use diagnostics::{CallFrame, CallStack};
pub use input_handler::{
    closed_input, scripted_input, stdin_input, InputHandlerImpl, ScriptedInputHandler,
    SharedInputHandler, StdinInputHandler,
};
pub use interpreter::{
    EvalOutcome, Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH,
    DEFAULT_MAX_INTERPOLATION_LEN,
};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use unary_operators::evaluate_unary;

pub use ogri_runtime::{EvalError, EvalErrorKind, Value};

#[cfg(test)]
mod tests;
