//! Conditionals and loops.

use ogri_ir::{NodeId, WhenClause};
use ogri_runtime::{Cursor, EvalError, ListValue, LocalScope, Scope, Value};

use super::{EvalOutcome, Interpreter};

/// What a loop does after one body evaluation.
enum LoopStep {
    /// Keep iterating; carries the body's result.
    Next(Option<Value>),
    /// `break`: stop with no value.
    Stop,
    /// `return`: stop and hand the signal to the caller.
    Exit(Value),
}

impl LoopStep {
    fn from_body(result: Option<Value>) -> Self {
        match result {
            Some(Value::Break) => LoopStep::Stop,
            Some(Value::Continue) => LoopStep::Next(None),
            Some(signal @ Value::Return(_)) => LoopStep::Exit(signal),
            other => LoopStep::Next(other),
        }
    }
}

impl Interpreter<'_> {
    /// `when` / `otherwise when` / `otherwise`.
    ///
    /// The first truthy `otherwise when` clause runs and ends the
    /// conditional, even when its block yields nothing.
    pub(super) fn eval_when(
        &mut self,
        cond: NodeId,
        then_block: NodeId,
        otherwise_whens: &[WhenClause],
        otherwise: Option<NodeId>,
        scope: &LocalScope<Scope>,
    ) -> EvalOutcome {
        if self.eval_condition(cond, scope)? {
            return self.eval(then_block, scope);
        }
        for clause in otherwise_whens {
            if self.eval_condition(clause.cond, scope)? {
                return self.eval(clause.block, scope);
            }
        }
        match otherwise {
            Some(block) => self.eval(block, scope),
            None => Ok(None),
        }
    }

    /// `repeat variable in collection { .. }`.
    ///
    /// A non-list collection is iterated as a one-element list. The loop
    /// variable is bound with `set_visible` in the enclosing scope.
    pub(super) fn eval_repeat(
        &mut self,
        variable: &str,
        collection: NodeId,
        block: NodeId,
        scope: &LocalScope<Scope>,
    ) -> EvalOutcome {
        let list = match self.eval_value(collection, scope)? {
            Value::List(list) => list,
            single => ListValue::from_values(vec![single]),
        };
        let mut cursor = Cursor::new(list);

        self.with_loop(|interp| {
            let mut result = None;
            while cursor.has_next() {
                let item = cursor.advance()?;
                scope.borrow_mut().set_visible(variable, item)?;
                match LoopStep::from_body(interp.eval(block, scope)?) {
                    LoopStep::Next(value) => result = value,
                    LoopStep::Stop => return Ok(None),
                    LoopStep::Exit(signal) => return Ok(Some(signal)),
                }
            }
            Ok(result)
        })
    }

    /// `repeat until cond { .. }`: the condition is checked before every
    /// iteration, so the body may never run.
    pub(super) fn eval_repeat_until(
        &mut self,
        cond: NodeId,
        block: NodeId,
        scope: &LocalScope<Scope>,
    ) -> EvalOutcome {
        self.with_loop(|interp| {
            let mut result = None;
            while !interp.eval_condition(cond, scope)? {
                match LoopStep::from_body(interp.eval(block, scope)?) {
                    LoopStep::Next(value) => result = value,
                    LoopStep::Stop => return Ok(None),
                    LoopStep::Exit(signal) => return Ok(Some(signal)),
                }
            }
            Ok(result)
        })
    }

    /// Truthiness of a condition; no value counts as false.
    fn eval_condition(&mut self, cond: NodeId, scope: &LocalScope<Scope>) -> Result<bool, EvalError> {
        Ok(self
            .eval(cond, scope)?
            .as_ref()
            .is_some_and(Value::is_truthy))
    }

    fn with_loop(&mut self, body: impl FnOnce(&mut Self) -> EvalOutcome) -> EvalOutcome {
        self.loop_depth += 1;
        tracing::trace!(depth = self.loop_depth, "enter loop");
        let result = body(self);
        self.loop_depth -= 1;
        result
    }
}
