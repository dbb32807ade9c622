//! Scope chain for variable bindings.
//!
//! Each [`Scope`] owns one [`HashTable`] and an optional link to its outer
//! scope. Scopes are shared through [`LocalScope`] so a function value can
//! keep its defining scope alive after the block that created it has ended.
//!
//! Binding rules:
//! - `define` writes to this scope only (parameters, function names)
//! - `set_visible` updates the nearest scope that already binds the name,
//!   else creates it here (plain assignment, loop variables)
//! - `assign_existing` updates the nearest binding or fails

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::errors::{undefined_variable, EvalError};
use crate::table::{HashSeed, HashTable, DEFAULT_TABLE_CAPACITY};
use crate::value::Value;

/// A single-threaded shared handle with interior mutability.
///
/// Wraps `Rc<RefCell<T>>`; all scope allocations go through
/// [`LocalScope::new`]. Not thread-safe, matching the single-threaded
/// evaluator.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single environment: bindings plus the enclosing scope.
pub struct Scope {
    table: HashTable<Value>,
    outer: Option<LocalScope<Scope>>,
    /// Table capacity handed down to child scopes.
    capacity: usize,
}

impl Scope {
    /// Create a root scope with the default table capacity.
    pub fn root(seed: HashSeed) -> Result<Self, EvalError> {
        Self::with_capacity(DEFAULT_TABLE_CAPACITY, seed)
    }

    /// Create a root scope whose tables start at `capacity` slots.
    pub fn with_capacity(capacity: usize, seed: HashSeed) -> Result<Self, EvalError> {
        Ok(Scope {
            table: HashTable::with_capacity(capacity, seed)?,
            outer: None,
            capacity,
        })
    }

    /// Create a scope enclosed by `outer`, sharing its seed and capacity.
    pub fn with_outer(outer: &LocalScope<Scope>) -> Result<Self, EvalError> {
        let (capacity, seed) = {
            let o = outer.borrow();
            (o.capacity, o.table.seed())
        };
        Ok(Scope {
            table: HashTable::with_capacity(capacity, seed)?,
            outer: Some(outer.clone()),
            capacity,
        })
    }

    pub fn outer(&self) -> Option<&LocalScope<Scope>> {
        self.outer.as_ref()
    }

    /// Bind `name` in this scope only.
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        self.table.set(name, value)?;
        Ok(())
    }

    /// Update the nearest visible binding of `name`, or create it here.
    pub fn set_visible(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if !self.table.contains(name) {
            if let Some(owner) = self.outer_owner(name) {
                owner.borrow_mut().table.set(name, value)?;
                return Ok(());
            }
        }
        self.table.set(name, value)?;
        Ok(())
    }

    /// Update the nearest visible binding of `name`; it must already exist.
    pub fn assign_existing(&mut self, name: &str, value: Value, line: u32) -> Result<(), EvalError> {
        if self.table.contains(name) {
            self.table.set(name, value)?;
            return Ok(());
        }
        match self.outer_owner(name) {
            Some(owner) => {
                owner.borrow_mut().table.set(name, value)?;
                Ok(())
            }
            None => Err(undefined_variable(name).at_line(line)),
        }
    }

    /// Resolve `name` through the chain.
    pub fn lookup(&self, name: &str, line: u32) -> Result<Value, EvalError> {
        self.get(name)
            .ok_or_else(|| undefined_variable(name).at_line(line))
    }

    /// Resolve `name` through the chain without failing.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.table.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Whether `name` is bound anywhere in the chain.
    pub fn exists(&self, name: &str) -> bool {
        self.table.contains(name) || self.outer_owner(name).is_some()
    }

    /// Whether `name` is bound in this scope itself.
    pub fn contains_local(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    /// Number of bindings in this scope.
    pub fn local_len(&self) -> usize {
        self.table.len()
    }

    /// Nearest enclosing scope (excluding this one) that binds `name`.
    fn outer_owner(&self, name: &str) -> Option<LocalScope<Scope>> {
        let mut current = self.outer.clone();
        while let Some(scope) = current {
            if scope.borrow().table.contains(name) {
                return Some(scope);
            }
            current = scope.borrow().outer.clone();
        }
        None
    }
}

impl fmt::Debug for Scope {
    // Values may capture this scope, so only names are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.table.keys().collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("names", &names)
            .field("has_outer", &self.outer.is_some())
            .finish()
    }
}

impl LocalScope<Scope> {
    /// Allocate a child scope of this one.
    pub fn child(&self) -> Result<LocalScope<Scope>, EvalError> {
        tracing::trace!(outer_names = self.borrow().local_len(), "new scope");
        Ok(LocalScope::new(Scope::with_outer(self)?))
    }
}
