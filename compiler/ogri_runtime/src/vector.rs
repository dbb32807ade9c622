//! Growable container.
//!
//! `Vector<T>` tracks a logical capacity separately from the backing `Vec`
//! so the growth policy is exact and observable: capacity starts at
//! [`DEFAULT_CAPACITY`], doubles when an insert finds the container full,
//! and never shrinks. Every fallible operation returns a typed
//! [`VectorError`] instead of aborting; callers decide how to escalate.

use std::fmt;

/// Initial capacity of a container created with [`Vector::new`].
pub const DEFAULT_CAPACITY: usize = 4;

/// The index-checked operation that failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VectorOp {
    Set,
    Insert,
    Remove,
    Get,
}

impl fmt::Display for VectorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Set => "set",
            Self::Insert => "insert",
            Self::Remove => "remove",
            Self::Get => "get",
        };
        f.write_str(name)
    }
}

/// Container error codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VectorError {
    #[error("index {index} out of range in {op} (size {len})")]
    IndexOutOfRange { op: VectorOp, index: usize, len: usize },
    #[error("cannot reverse an empty container")]
    EmptyReverse,
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
    #[error("memory allocation failed")]
    AllocationFailure,
}

/// Homogeneous growable sequence with `size() <= capacity()` at all times.
#[derive(Clone)]
pub struct Vector<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Vector<T> {
    /// Create an empty container with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Vector {
            items: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create an empty container able to hold `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, VectorError> {
        if capacity == 0 {
            return Err(VectorError::ZeroCapacity);
        }
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| VectorError::AllocationFailure)?;
        Ok(Vector { items, capacity })
    }

    /// Adopt an existing `Vec`; capacity is at least [`DEFAULT_CAPACITY`].
    pub fn from_vec(items: Vec<T>) -> Self {
        let capacity = items.len().max(DEFAULT_CAPACITY);
        Vector { items, capacity }
    }

    /// Number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity. Only ever increases.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append to the end, doubling capacity first if full.
    pub fn append(&mut self, value: T) -> Result<(), VectorError> {
        self.grow_if_full()?;
        self.items.push(value);
        Ok(())
    }

    /// Replace the element at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(VectorError::IndexOutOfRange {
                op: VectorOp::Set,
                index,
                len,
            })?;
        *slot = value;
        Ok(())
    }

    /// Insert before `index`; `index == size()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        if index > self.items.len() {
            return Err(VectorError::IndexOutOfRange {
                op: VectorOp::Insert,
                index,
                len: self.items.len(),
            });
        }
        self.grow_if_full()?;
        self.items.insert(index, value);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting the tail left.
    pub fn remove_at(&mut self, index: usize) -> Result<T, VectorError> {
        if index >= self.items.len() {
            return Err(VectorError::IndexOutOfRange {
                op: VectorOp::Remove,
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Borrow the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, VectorError> {
        self.items.get(index).ok_or(VectorError::IndexOutOfRange {
            op: VectorOp::Get,
            index,
            len: self.items.len(),
        })
    }

    /// Ensure capacity for at least `min_capacity` elements.
    ///
    /// A request at or below the current capacity is a no-op.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), VectorError> {
        if min_capacity == 0 {
            return Err(VectorError::ZeroCapacity);
        }
        if min_capacity <= self.capacity {
            return Ok(());
        }
        self.items
            .try_reserve_exact(min_capacity - self.items.len())
            .map_err(|_| VectorError::AllocationFailure)?;
        self.capacity = min_capacity;
        Ok(())
    }

    /// Reverse in place. Fails on an empty container.
    pub fn reverse(&mut self) -> Result<(), VectorError> {
        if self.items.is_empty() {
            return Err(VectorError::EmptyReverse);
        }
        let mut left = 0;
        let mut right = self.items.len() - 1;
        while left < right {
            self.items.swap(left, right);
            left += 1;
            right -= 1;
        }
        Ok(())
    }

    /// Borrow the last element.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Consume the container, returning its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn grow_if_full(&mut self) -> Result<(), VectorError> {
        if self.items.len() >= self.capacity {
            let doubled = self
                .capacity
                .checked_mul(2)
                .ok_or(VectorError::AllocationFailure)?;
            self.reserve(doubled)?;
        }
        Ok(())
    }
}

impl<T: Clone> Vector<T> {
    /// Make `self` a copy of `src`.
    ///
    /// Elements are cloned one level deep: shared handles inside them are
    /// duplicated, not the data they point to. Capacity becomes the larger
    /// of the two so it never shrinks.
    pub fn clone_from_vector(&mut self, src: &Vector<T>) -> Result<(), VectorError> {
        self.reserve(src.capacity)?;
        self.items.clear();
        self.items.extend_from_slice(&src.items);
        Ok(())
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("items", &self.items)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(items: Vec<T>) -> Self {
        Vector::from_vec(items)
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
