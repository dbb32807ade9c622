//! Runtime data model for the Ogri interpreter.
//!
//! Leaf-first:
//! - [`Vector`]: growable container with an explicit, monotone capacity
//! - [`HashTable`]: open-addressing string-keyed map built on `Vector`
//! - [`Scope`] / [`LocalScope`]: linked environments, one table each
//! - [`Value`]: every runtime datum, including control signals
//! - [`Cursor`]: position over a shared list
//! - [`EvalError`]: typed runtime faults surfaced to the entry point

mod cursor;
mod errors;
mod scope;
mod table;
mod value;
mod vector;

pub use cursor::Cursor;
pub use errors::{
    allocation_failure, binary_type_mismatch, control_outside_loop, division_by_zero,
    index_out_of_range, invalid_target, iterator_exhausted, not_callable,
    recursion_limit_exceeded, type_mismatch, undefined_variable, unsupported_operator,
    BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use scope::{LocalScope, Scope};
pub use table::{EntryStatus, HashSeed, HashTable, TableError, DEFAULT_TABLE_CAPACITY};
pub use value::{format_float, Builtin, FunctionValue, ListValue, Value};
pub use vector::{Vector, VectorError, VectorOp, DEFAULT_CAPACITY};
