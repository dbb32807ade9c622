//! Cursor over a list value.

use crate::errors::{iterator_exhausted, EvalError};
use crate::value::{ListValue, Value};

/// Position over a shared list, starting before the first element.
///
/// The list's length is read on every step, so elements appended during
/// iteration are visited.
#[derive(Clone, Debug)]
pub struct Cursor {
    list: ListValue,
    /// Index of the element last returned.
    position: Option<usize>,
}

impl Cursor {
    pub fn new(list: ListValue) -> Self {
        Cursor {
            list,
            position: None,
        }
    }

    fn next_index(&self) -> usize {
        self.position.map_or(0, |p| p + 1)
    }

    pub fn has_next(&self) -> bool {
        self.next_index() < self.list.len()
    }

    /// Step forward and return the element at the new position.
    pub fn advance(&mut self) -> Result<Value, EvalError> {
        if !self.has_next() {
            return Err(iterator_exhausted());
        }
        let index = self.next_index();
        let value = self.list.get(index)?;
        self.position = Some(index);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn walks_every_element_then_exhausts() {
        let list = ListValue::from_values(vec![Value::Int(1), Value::Int(2)]);
        let mut cursor = Cursor::new(list);
        assert!(cursor.has_next());
        assert_eq!(cursor.advance().unwrap(), Value::Int(1));
        assert_eq!(cursor.advance().unwrap(), Value::Int(2));
        assert!(!cursor.has_next());
        assert_eq!(
            cursor.advance().unwrap_err().kind,
            EvalErrorKind::IteratorExhausted
        );
    }

    #[test]
    fn empty_list_has_nothing() {
        let cursor = Cursor::new(ListValue::new());
        assert!(!cursor.has_next());
    }

    #[test]
    fn yielded_lists_alias_the_source() {
        let inner = ListValue::new();
        let list = ListValue::from_values(vec![Value::List(inner.clone())]);
        let mut cursor = Cursor::new(list);
        let Value::List(yielded) = cursor.advance().unwrap() else {
            panic!("expected list");
        };
        yielded.push(Value::Int(5)).unwrap();
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn sees_elements_appended_during_iteration() {
        let list = ListValue::from_values(vec![Value::Int(0)]);
        let mut cursor = Cursor::new(list.clone());
        cursor.advance().unwrap();
        assert!(!cursor.has_next());
        list.push(Value::Int(1)).unwrap();
        assert_eq!(cursor.advance().unwrap(), Value::Int(1));
    }
}
