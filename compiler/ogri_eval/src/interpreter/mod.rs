//! Tree-walking interpreter for Ogri.
//!
//! All evaluation goes through [`Interpreter::eval`], which dispatches on the
//! node kind. Helper modules hold the larger constructs:
//!
//! - `control` - conditionals and both loop forms
//! - `function_call` - builtin and user-function dispatch
//! - `assignment` - plain, indexed and destructuring assignment
//! - `access` - indexing, slicing, value lists and string interpolation
//!
//! # Control signals
//!
//! `return`, `break` and `continue` travel through the ordinary result
//! channel as [`Value::Return`], [`Value::Break`] and [`Value::Continue`].
//! Statement lists stop at the first signal and hand it upward; loops
//! consume `break`/`continue`; function calls unwrap `return`. A signal
//! that escapes every construct able to consume it becomes a
//! `ControlOutsideLoop` error.
//!
//! # No-value results
//!
//! Evaluation yields `Option<Value>`: empty blocks, unmatched conditionals
//! and calls whose arguments were all empty produce `None`. Operands that
//! need a value go through `eval_value`, which turns `None` into a
//! `TypeMismatch`.

mod access;
mod assignment;
mod builder;
mod control;
mod function_call;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH, DEFAULT_MAX_INTERPOLATION_LEN};

use ogri_ir::{BinaryOp, NodeArena, NodeId, NodeKind};
use ogri_runtime::{
    control_outside_loop, type_mismatch, EvalError, FunctionValue, LocalScope, Scope, Value,
};

use crate::diagnostics::CallStack;
use crate::input_handler::SharedInputHandler;
use crate::operators::evaluate_binary;
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;
use crate::unary_operators::evaluate_unary;

/// Result of evaluating one node: a value, or nothing.
pub type EvalOutcome = Result<Option<Value>, EvalError>;

/// Tree-walking interpreter over one [`NodeArena`].
pub struct Interpreter<'a> {
    arena: &'a NodeArena,
    /// Root scope holding the builtins and top-level bindings.
    global: LocalScope<Scope>,
    print: SharedPrintHandler,
    input: SharedInputHandler,
    call_stack: CallStack,
    /// Nesting depth of active loops, for tracing only.
    loop_depth: usize,
    max_interpolation_len: usize,
    /// Line of the most recent `break`/`continue`, reported if it escapes.
    signal_line: u32,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter with stdout/stdin and default limits.
    pub fn new(arena: &'a NodeArena) -> Result<Self, EvalError> {
        InterpreterBuilder::new(arena).build()
    }

    /// The root scope.
    pub fn global_scope(&self) -> &LocalScope<Scope> {
        &self.global
    }

    /// Number of user-function calls currently active.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Evaluate a program rooted at `root` in the global scope.
    ///
    /// A top-level `return` ends the run with its value. A `break` or
    /// `continue` reaching the top level is an error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, root: NodeId) -> EvalOutcome {
        let global = self.global.clone();
        match self.eval(root, &global)? {
            Some(Value::Return(value)) => Ok(value.map(|v| *v)),
            Some(Value::Break) => Err(control_outside_loop("break").at_line(self.signal_line)),
            Some(Value::Continue) => {
                Err(control_outside_loop("continue").at_line(self.signal_line))
            }
            other => Ok(other),
        }
    }

    /// Evaluate `id` in `scope`.
    ///
    /// Errors raised without a line are stamped with this node's line, so
    /// the innermost failing node is reported.
    pub fn eval(&mut self, id: NodeId, scope: &LocalScope<Scope>) -> EvalOutcome {
        let line = self.arena.line(id);
        ensure_sufficient_stack(|| self.eval_inner(id, scope)).map_err(|e| e.at_line(line))
    }

    /// Evaluate `id`, requiring a value.
    pub(crate) fn eval_value(
        &mut self,
        id: NodeId,
        scope: &LocalScope<Scope>,
    ) -> Result<Value, EvalError> {
        match self.eval(id, scope)? {
            Some(value) => Ok(value),
            None => Err(type_mismatch("value", "nothing").at_line(self.arena.line(id))),
        }
    }

    fn eval_inner(&mut self, id: NodeId, scope: &LocalScope<Scope>) -> EvalOutcome {
        let arena = self.arena;
        let line = arena.line(id);
        match arena.kind(id) {
            NodeKind::Statements(items) => self.eval_statements(items, scope),
            NodeKind::When {
                cond,
                then_block,
                otherwise_whens,
                otherwise,
            } => self.eval_when(*cond, *then_block, otherwise_whens, *otherwise, scope),
            NodeKind::Repeat {
                variable,
                collection,
                block,
            } => self.eval_repeat(variable, *collection, *block, scope),
            NodeKind::RepeatUntil { cond, block } => self.eval_repeat_until(*cond, *block, scope),
            NodeKind::FuncDef { name, params, body } => {
                let function = Value::Function(FunctionValue {
                    name: name.clone(),
                    params: *params,
                    body: *body,
                    env: scope.clone(),
                });
                scope.borrow_mut().define(name, function.clone())?;
                Ok(Some(function))
            }
            NodeKind::Assign {
                target,
                value,
                spread,
            } => self.eval_assign(*target, *value, *spread, scope),
            NodeKind::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval(*expr, scope)?,
                    None => Some(Value::Bool(true)),
                };
                Ok(Some(Value::Return(value.map(Box::new))))
            }
            NodeKind::Break => {
                self.signal_line = line;
                Ok(Some(Value::Break))
            }
            NodeKind::Continue => {
                self.signal_line = line;
                Ok(Some(Value::Continue))
            }
            NodeKind::Block(body) => {
                let Some(body) = body else {
                    return Ok(None);
                };
                let child = scope.child()?;
                self.eval(*body, &child)
            }
            NodeKind::Call { name, args } => self.eval_call(name, *args, line, scope),
            NodeKind::Binary { op, left, right } => {
                self.eval_binary(*op, *left, *right, scope).map(Some)
            }
            NodeKind::Unary { op, operand } => {
                let value = self.eval_value(*operand, scope)?;
                evaluate_unary(value, *op).map(Some)
            }
            NodeKind::Identifier(name) => scope.borrow().lookup(name, line).map(Some),
            NodeKind::Integer(n) => Ok(Some(Value::Int(*n))),
            NodeKind::Float(x) => Ok(Some(Value::Float(*x))),
            NodeKind::Str(text) | NodeKind::InterpolationText(text) => {
                Ok(Some(Value::Str(text.clone())))
            }
            NodeKind::Interpolated(parts) => self.eval_interpolated(parts, scope).map(Some),
            NodeKind::ValueList(items) | NodeKind::IdentifierList(items) => {
                self.eval_value_list(items, scope)
            }
            NodeKind::Index { name, index } => self.eval_index(name, *index, line, scope).map(Some),
            NodeKind::Slice { name, index } => self.eval_slice(name, *index, line, scope).map(Some),
            NodeKind::Range { .. } => Err(type_mismatch("expression", "range outside of a slice")),
        }
    }

    /// Evaluate statements in order; the first signal stops the list.
    fn eval_statements(&mut self, items: &[NodeId], scope: &LocalScope<Scope>) -> EvalOutcome {
        let mut result = None;
        for &item in items {
            result = self.eval(item, scope)?;
            if result.as_ref().is_some_and(Value::is_signal) {
                break;
            }
        }
        Ok(result)
    }

    /// `and`/`or` evaluate the right operand only when the left one does
    /// not decide the result; every other operator is eager.
    fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
        scope: &LocalScope<Scope>,
    ) -> Result<Value, EvalError> {
        let left = self.eval_value(left, scope)?;
        match op {
            BinaryOp::And if !left.is_truthy() => Ok(left),
            BinaryOp::Or if left.is_truthy() => Ok(left),
            BinaryOp::And | BinaryOp::Or => self.eval_value(right, scope),
            _ => {
                let right = self.eval_value(right, scope)?;
                evaluate_binary(left, right, op)
            }
        }
    }
}
