//! Indexing, slicing, value lists and string interpolation.

use ogri_ir::{NodeId, NodeKind};
use ogri_runtime::{index_out_of_range, type_mismatch, EvalError, LocalScope, Scope, Value};

use super::{EvalOutcome, Interpreter};

impl Interpreter<'_> {
    /// `name[index]`: the element itself, shared if it is a list.
    pub(super) fn eval_index(
        &mut self,
        name: &str,
        index: NodeId,
        line: u32,
        scope: &LocalScope<Scope>,
    ) -> Result<Value, EvalError> {
        let index = self.eval_value(index, scope)?;
        let target = scope.borrow().lookup(name, line)?;
        let (Value::List(list), Value::Int(i)) = (&target, &index) else {
            return Err(type_mismatch(
                &format!("list and integer index for `{name}[..]`"),
                &format!("{} and {}", target.type_name(), index.type_name()),
            ));
        };
        usize::try_from(*i)
            .ok()
            .and_then(|slot| list.get(slot).ok())
            .ok_or_else(|| index_out_of_range(*i, list.len()))
    }

    /// `name[from..end]` or `name[i]` as a fresh list.
    ///
    /// Omitted bounds default to the whole list; a single index selects
    /// `[i, i + 1)`. Bounds are clamped into `0..=len` and a start past the
    /// end yields an empty list.
    pub(super) fn eval_slice(
        &mut self,
        name: &str,
        index: NodeId,
        line: u32,
        scope: &LocalScope<Scope>,
    ) -> Result<Value, EvalError> {
        let target = scope.borrow().lookup(name, line)?;
        let Value::List(list) = &target else {
            return Err(type_mismatch("list to slice", target.type_name()));
        };
        let len = i64::try_from(list.len()).unwrap_or(i64::MAX);

        let arena = self.arena;
        let (start, end) = match arena.kind(index) {
            NodeKind::Range { from, end } => {
                let start = match from {
                    Some(from) => self.eval_bound(*from, scope)?,
                    None => 0,
                };
                let end = match end {
                    Some(end) => self.eval_bound(*end, scope)?,
                    None => len,
                };
                (start, end)
            }
            _ => {
                let i = self.eval_bound(index, scope)?;
                (i, i.saturating_add(1))
            }
        };

        let end = end.clamp(0, len);
        let start = start.clamp(0, len).min(end);
        // Both bounds now lie in 0..=len, which came from a usize.
        let (start, end) = (
            usize::try_from(start).unwrap_or(0),
            usize::try_from(end).unwrap_or(0),
        );
        let items = list.borrow().as_slice()[start..end].to_vec();
        Ok(Value::list(items))
    }

    fn eval_bound(&mut self, bound: NodeId, scope: &LocalScope<Scope>) -> Result<i64, EvalError> {
        let value = self.eval_value(bound, scope)?;
        value
            .as_int()
            .ok_or_else(|| type_mismatch("integer slice bound", value.type_name()))
    }

    /// Comma-joined values. Items without a value are dropped; a single
    /// remaining value is returned as itself, not as a list.
    pub(super) fn eval_value_list(
        &mut self,
        items: &[NodeId],
        scope: &LocalScope<Scope>,
    ) -> EvalOutcome {
        let mut values = Vec::with_capacity(items.len());
        for &item in items {
            if let Some(value) = self.eval(item, scope)? {
                values.push(value);
            }
        }
        if values.len() == 1 {
            return Ok(values.pop());
        }
        Ok(Some(Value::list(values)))
    }

    /// Concatenate text fragments and converted expression results, capped
    /// at `max_interpolation_len` bytes.
    pub(super) fn eval_interpolated(
        &mut self,
        parts: &[NodeId],
        scope: &LocalScope<Scope>,
    ) -> Result<Value, EvalError> {
        let arena = self.arena;
        let max = self.max_interpolation_len;
        let mut text = String::new();
        for &part in parts {
            if text.len() >= max {
                break;
            }
            match arena.kind(part) {
                NodeKind::InterpolationText(fragment) => text.push_str(fragment),
                _ => {
                    if let Some(value) = self.eval(part, scope)? {
                        text.push_str(&value.to_string());
                    }
                }
            }
        }
        truncate_on_char_boundary(&mut text, max);
        Ok(Value::Str(text))
    }
}

fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}
