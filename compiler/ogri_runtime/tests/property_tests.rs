//! Property-based tests for the runtime containers and scope chain.
//!
//! Verifies, over generated inputs:
//! 1. Hash table round-trip and the 0.7 load-factor ceiling after every `set`
//! 2. Container `size <= capacity` with monotone capacity
//! 3. `reverse` is its own inverse
//! 4. `define` never leaks into an enclosing scope

#![allow(clippy::unwrap_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::cast_precision_loss,
    reason = "Proptest macros generate code with these patterns"
)]

use ogri_runtime::{EntryStatus, HashSeed, HashTable, LocalScope, Scope, Value, Vector};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,12}").unwrap()
}

proptest! {
    #[test]
    fn table_round_trip(seed in any::<u64>(), entries in prop::collection::vec((key_strategy(), any::<i64>()), 1..200)) {
        let mut table = HashTable::new(HashSeed::fixed(seed)).unwrap();
        for (key, value) in &entries {
            table.set(key, *value).unwrap();
            prop_assert_eq!(table.status(key), EntryStatus::Occupied);
            prop_assert_eq!(table.get(key), Some(value));
        }
    }

    #[test]
    fn table_load_factor_ceiling(seed in any::<u64>(), capacity in 1usize..40, keys in prop::collection::vec(key_strategy(), 1..300)) {
        let mut table = HashTable::with_capacity(capacity, HashSeed::fixed(seed)).unwrap();
        for key in &keys {
            table.set(key, 0u8).unwrap();
            prop_assert!(table.len() as f64 / table.capacity() as f64 <= 0.7);
        }
    }

    #[test]
    fn table_keeps_one_entry_per_key(seed in any::<u64>(), keys in prop::collection::vec(key_strategy(), 1..100)) {
        let mut table = HashTable::new(HashSeed::fixed(seed)).unwrap();
        for key in &keys {
            table.set(key, 1u8).unwrap();
        }
        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(table.len(), unique.len());
        prop_assert_eq!(table.iter().count(), unique.len());
    }

    #[test]
    fn vector_size_within_capacity(values in prop::collection::vec(any::<i32>(), 0..100)) {
        let mut v = Vector::new();
        let mut last_capacity = v.capacity();
        for x in values {
            v.append(x).unwrap();
            prop_assert!(v.size() <= v.capacity());
            prop_assert!(v.capacity() >= last_capacity);
            last_capacity = v.capacity();
        }
    }

    #[test]
    fn reverse_is_involution(values in prop::collection::vec(any::<i64>(), 1..64)) {
        let mut v = Vector::from_vec(values.clone());
        v.reverse().unwrap();
        v.reverse().unwrap();
        prop_assert_eq!(v.as_slice(), values.as_slice());
    }

    #[test]
    fn define_stays_local(name in key_strategy(), outer_value in any::<i64>(), inner_value in any::<i64>()) {
        let outer = LocalScope::new(Scope::root(HashSeed::fixed(0)).unwrap());
        outer.borrow_mut().define(&name, Value::Int(outer_value)).unwrap();
        let inner = outer.child().unwrap();
        inner.borrow_mut().define(&name, Value::Int(inner_value)).unwrap();
        prop_assert_eq!(outer.borrow().lookup(&name, 1).unwrap(), Value::Int(outer_value));
        prop_assert_eq!(inner.borrow().lookup(&name, 1).unwrap(), Value::Int(inner_value));
    }
}
