//! Open-addressing hash table keyed by strings.
//!
//! Slots live in a [`Vector`] whose length always equals the table capacity.
//! Collisions are resolved by probing with a fixed stride of 3, so capacity is
//! kept coprime with 3: construction bumps multiples of 3 by one and growth
//! only ever doubles. The table grows before any insert that would push
//! `count / capacity` above 0.7.
//!
//! The hash folds the key bytes over a fixed magic number plus a per-table
//! [`HashSeed`]. A random seed makes probe order differ between runs, so
//! nothing may depend on iteration order.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

use crate::vector::{Vector, VectorError};

/// Default capacity of a scope's table.
pub const DEFAULT_TABLE_CAPACITY: usize = 100;

const HASH_MAGIC: u64 = 9981;
const PROBE_STRIDE: usize = 3;

// Load factor 0.7 as a ratio, so the check stays in integer arithmetic.
const LOAD_NUMERATOR: usize = 7;
const LOAD_DENOMINATOR: usize = 10;

/// Salt mixed into every hash computed by a table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HashSeed(u64);

impl HashSeed {
    /// A reproducible seed, for tests.
    pub const fn fixed(seed: u64) -> Self {
        HashSeed(seed)
    }

    /// A seed drawn from the process's random hashing state.
    pub fn random() -> Self {
        HashSeed(RandomState::new().hash_one(HASH_MAGIC))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Status of a key's entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    Unused,
    Occupied,
    Deleted,
}

/// Hash table error codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("hash table capacity must be greater than zero")]
    ZeroCapacity,
    #[error("hash table allocation failed")]
    AllocationFailure,
    #[error("hash table has no free slot")]
    Full,
}

impl From<VectorError> for TableError {
    fn from(err: VectorError) -> Self {
        match err {
            VectorError::ZeroCapacity => TableError::ZeroCapacity,
            _ => TableError::AllocationFailure,
        }
    }
}

#[derive(Clone, Debug)]
enum Slot<V> {
    Unused,
    Occupied { key: String, value: V },
    Deleted,
}

/// Outcome of probing for a key.
enum Probe {
    Found(usize),
    /// Key absent; first reusable slot on its probe path.
    Vacant(usize),
    Full,
}

/// String-keyed map with open addressing and tombstones.
#[derive(Clone, Debug)]
pub struct HashTable<V> {
    slots: Vector<Slot<V>>,
    count: usize,
    seed: HashSeed,
}

impl<V> HashTable<V> {
    /// Create a table with [`DEFAULT_TABLE_CAPACITY`].
    pub fn new(seed: HashSeed) -> Result<Self, TableError> {
        Self::with_capacity(DEFAULT_TABLE_CAPACITY, seed)
    }

    /// Create a table with room for `capacity` slots.
    ///
    /// A multiple of 3 is bumped by one so the probe stride visits every slot.
    pub fn with_capacity(capacity: usize, seed: HashSeed) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        let capacity = if capacity % PROBE_STRIDE == 0 {
            capacity + 1
        } else {
            capacity
        };
        Ok(HashTable {
            slots: unused_slots(capacity)?,
            count: 0,
            seed,
        })
    }

    /// Number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn seed(&self) -> HashSeed {
        self.seed
    }

    /// Insert or update `key`.
    ///
    /// Returns `true` if the key already existed (update), `false` on insert.
    /// Updates never resize.
    pub fn set(&mut self, key: &str, value: V) -> Result<bool, TableError> {
        if let Probe::Found(index) = self.probe(key) {
            self.replace_value(index, value);
            return Ok(true);
        }
        while (self.count + 1) * LOAD_DENOMINATOR > self.capacity() * LOAD_NUMERATOR {
            self.grow()?;
        }
        match self.probe(key) {
            Probe::Vacant(index) => {
                self.slots.as_mut_slice()[index] = Slot::Occupied {
                    key: key.to_string(),
                    value,
                };
                self.count += 1;
                Ok(false)
            }
            Probe::Found(index) => {
                self.replace_value(index, value);
                Ok(true)
            }
            Probe::Full => Err(TableError::Full),
        }
    }

    /// Look up `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.probe(key) {
            Probe::Found(index) => match &self.slots.as_slice()[index] {
                Slot::Occupied { value, .. } => Some(value),
                Slot::Unused | Slot::Deleted => None,
            },
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Status of the entry for `key`.
    ///
    /// An absent key reports `Unused`, whatever the slot it would use holds.
    pub fn status(&self, key: &str) -> EntryStatus {
        match self.probe(key) {
            Probe::Found(_) => EntryStatus::Occupied,
            Probe::Vacant(_) | Probe::Full => EntryStatus::Unused,
        }
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Remove `key`, leaving a tombstone so later probes continue past it.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let Probe::Found(index) = self.probe(key) else {
            return None;
        };
        let slot = std::mem::replace(&mut self.slots.as_mut_slice()[index], Slot::Deleted);
        self.count -= 1;
        match slot {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Unused | Slot::Deleted => None,
        }
    }

    /// Iterate occupied entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key.as_str(), value)),
            Slot::Unused | Slot::Deleted => None,
        })
    }

    /// Iterate occupied keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    fn hash(&self, key: &str) -> u64 {
        key.bytes().fold(HASH_MAGIC.wrapping_add(self.seed.0), |h, byte| {
            (h << 5).wrapping_add(h).wrapping_add(u64::from(byte))
        })
    }

    fn start_index(&self, key: &str) -> usize {
        let capacity = self.capacity() as u64;
        usize::try_from(self.hash(key) % capacity).unwrap_or(0)
    }

    fn probe(&self, key: &str) -> Probe {
        let slots = self.slots.as_slice();
        let capacity = slots.len();
        let start = self.start_index(key);
        let mut index = start;
        let mut tombstone = None;
        loop {
            match &slots[index] {
                Slot::Unused => return Probe::Vacant(tombstone.unwrap_or(index)),
                Slot::Deleted => {
                    tombstone.get_or_insert(index);
                }
                Slot::Occupied { key: existing, .. } if existing == key => {
                    return Probe::Found(index);
                }
                Slot::Occupied { .. } => {}
            }
            index = (index + PROBE_STRIDE) % capacity;
            if index == start {
                return tombstone.map_or(Probe::Full, Probe::Vacant);
            }
        }
    }

    fn replace_value(&mut self, index: usize, new_value: V) {
        if let Slot::Occupied { value, .. } = &mut self.slots.as_mut_slice()[index] {
            *value = new_value;
        }
    }

    /// Double the capacity and rehash every occupied entry.
    ///
    /// Tombstones are dropped.
    fn grow(&mut self) -> Result<(), TableError> {
        let new_capacity = self
            .capacity()
            .checked_mul(2)
            .ok_or(TableError::AllocationFailure)?;
        tracing::trace!(
            from = self.capacity(),
            to = new_capacity,
            count = self.count,
            "hash table grow"
        );
        let old = std::mem::replace(&mut self.slots, unused_slots(new_capacity)?);
        self.count = 0;
        for slot in old.into_vec() {
            if let Slot::Occupied { key, value } = slot {
                match self.probe(&key) {
                    Probe::Vacant(index) => {
                        self.slots.as_mut_slice()[index] = Slot::Occupied { key, value };
                        self.count += 1;
                    }
                    Probe::Found(_) | Probe::Full => return Err(TableError::Full),
                }
            }
        }
        Ok(())
    }
}

fn unused_slots<V>(capacity: usize) -> Result<Vector<Slot<V>>, TableError> {
    let mut slots = Vector::with_capacity(capacity)?;
    for _ in 0..capacity {
        slots.append(Slot::Unused)?;
    }
    Ok(slots)
}

#[cfg(test)]
mod tests;
