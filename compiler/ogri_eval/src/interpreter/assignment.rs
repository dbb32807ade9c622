//! Assignment: plain, indexed and destructuring.

use ogri_ir::{NodeId, NodeKind};
use ogri_runtime::{
    index_out_of_range, invalid_target, type_mismatch, EvalError, ListValue, LocalScope, Scope,
    Value,
};

use super::{EvalOutcome, Interpreter};

impl Interpreter<'_> {
    /// `target = value` or, with `spread`, `target is/are value`.
    ///
    /// The spread form always binds a list, wrapping a single value. The
    /// plain form unwraps a one-element list when the target is a single
    /// name or element. Returns the bound value.
    pub(super) fn eval_assign(
        &mut self,
        target: NodeId,
        value: NodeId,
        spread: bool,
        scope: &LocalScope<Scope>,
    ) -> EvalOutcome {
        let mut value = self.eval_value(value, scope)?;
        let single_target = matches!(
            self.arena.kind(target),
            NodeKind::Identifier(_) | NodeKind::Index { .. }
        );
        if spread {
            if !matches!(value, Value::List(_)) {
                value = Value::list(vec![value]);
            }
        } else if single_target {
            value = unwrap_single(value);
        }

        self.assign_to(target, value.clone(), scope)?;
        Ok(Some(value))
    }

    fn assign_to(
        &mut self,
        target: NodeId,
        value: Value,
        scope: &LocalScope<Scope>,
    ) -> Result<(), EvalError> {
        let arena = self.arena;
        let line = arena.line(target);
        match arena.kind(target) {
            NodeKind::Identifier(name) => scope.borrow_mut().set_visible(name, value),
            NodeKind::Index { name, index } => {
                let list = scope.borrow().lookup(name, line)?;
                let index = self.eval_value(*index, scope)?;
                let (Value::List(list), Value::Int(i)) = (&list, &index) else {
                    return Err(type_mismatch(
                        "list and integer index for element assignment",
                        &format!("{} and {}", list.type_name(), index.type_name()),
                    )
                    .at_line(line));
                };
                let slot = usize::try_from(*i).map_err(|_| index_out_of_range(*i, list.len()))?;
                list.set(slot, value).map_err(|_| index_out_of_range(*i, list.len()))
            }
            NodeKind::IdentifierList(_) => {
                let source = match value {
                    Value::List(list) => list,
                    single => ListValue::from_values(vec![single]),
                };
                let mut next = 0;
                self.destructure(target, &source, &mut next, scope)
            }
            other => Err(invalid_target(other.name()).at_line(line)),
        }
    }

    /// Bind the names of a (possibly nested) identifier list to consecutive
    /// elements of `source`.
    fn destructure(
        &self,
        target: NodeId,
        source: &ListValue,
        next: &mut usize,
        scope: &LocalScope<Scope>,
    ) -> Result<(), EvalError> {
        let line = self.arena.line(target);
        match self.arena.kind(target) {
            NodeKind::IdentifierList(items) => {
                for &item in items {
                    self.destructure(item, source, next, scope)?;
                }
                Ok(())
            }
            NodeKind::Identifier(name) => {
                let value = source.get(*next).map_err(|_| {
                    index_out_of_range(i64::try_from(*next).unwrap_or(i64::MAX), source.len())
                        .at_line(line)
                })?;
                scope.borrow_mut().set_visible(name, value)?;
                *next += 1;
                Ok(())
            }
            other => Err(invalid_target(other.name()).at_line(line)),
        }
    }
}

fn unwrap_single(value: Value) -> Value {
    if let Value::List(list) = &value {
        if list.len() == 1 {
            if let Ok(item) = list.get(0) {
                return item;
            }
        }
    }
    value
}
