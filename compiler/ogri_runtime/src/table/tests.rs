#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

const SEED: HashSeed = HashSeed::fixed(42);

fn table() -> HashTable<i64> {
    HashTable::new(SEED).unwrap()
}

#[test]
fn set_reports_insert_then_update() {
    let mut t = table();
    assert!(!t.set("x", 1).unwrap());
    assert!(t.set("x", 2).unwrap());
    assert_eq!(t.get("x"), Some(&2));
    assert_eq!(t.len(), 1);
}

#[test]
fn absent_key_reports_unused() {
    let t = table();
    assert_eq!(t.get("missing"), None);
    assert_eq!(t.status("missing"), EntryStatus::Unused);
    assert!(!t.contains("missing"));
}

#[test]
fn default_capacity_is_not_a_multiple_of_three() {
    let t = table();
    assert_eq!(t.capacity(), DEFAULT_TABLE_CAPACITY);
    assert_eq!(HashTable::<i64>::with_capacity(9, SEED).unwrap().capacity(), 10);
    assert_eq!(
        HashTable::<i64>::with_capacity(0, SEED).err(),
        Some(TableError::ZeroCapacity)
    );
}

#[test]
fn grows_before_exceeding_load_factor() {
    let mut t = HashTable::with_capacity(10, SEED).unwrap();
    for i in 0..7 {
        t.set(&format!("k{i}"), i).unwrap();
    }
    assert_eq!(t.capacity(), 10);
    t.set("k7", 7).unwrap();
    assert_eq!(t.capacity(), 20);
    for i in 0..8 {
        assert_eq!(t.get(&format!("k{i}")), Some(&i));
    }
}

#[test]
fn update_at_threshold_does_not_resize() {
    let mut t = HashTable::with_capacity(10, SEED).unwrap();
    for i in 0..7 {
        t.set(&format!("k{i}"), i).unwrap();
    }
    t.set("k0", 100).unwrap();
    assert_eq!(t.capacity(), 10);
    assert_eq!(t.get("k0"), Some(&100));
}

#[test]
fn tiny_table_still_holds_entries() {
    let mut t = HashTable::with_capacity(1, SEED).unwrap();
    for i in 0..20 {
        t.set(&i.to_string(), i).unwrap();
    }
    assert_eq!(t.len(), 20);
    assert_eq!(t.get("19"), Some(&19));
    assert_ne!(t.capacity() % 3, 0);
}

#[test]
fn remove_leaves_tombstone_that_probes_continue_past() {
    let mut t = HashTable::with_capacity(4, SEED).unwrap();
    t.set("a", 1).unwrap();
    t.set("b", 2).unwrap();
    assert_eq!(t.remove("a"), Some(1));
    assert_eq!(t.remove("a"), None);
    assert_eq!(t.get("b"), Some(&2));
    assert_eq!(t.status("a"), EntryStatus::Unused);
    assert_eq!(t.len(), 1);

    // Re-inserting reuses a slot without duplicating the live key.
    assert!(!t.set("a", 3).unwrap());
    assert!(t.set("b", 4).unwrap());
    assert_eq!(t.len(), 2);
    assert_eq!(t.get("a"), Some(&3));
    assert_eq!(t.get("b"), Some(&4));
}

#[test]
fn iteration_visits_each_occupied_entry_once() {
    let mut t = table();
    for key in ["one", "two", "three"] {
        t.set(key, 1).unwrap();
    }
    t.remove("two");
    let mut keys: Vec<&str> = t.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["one", "three"]);
}

#[test]
fn seeds_are_carried_by_each_table() {
    let a = HashTable::<i64>::new(HashSeed::fixed(1)).unwrap();
    let b = HashTable::<i64>::new(HashSeed::fixed(2)).unwrap();
    assert_eq!(a.seed().get(), 1);
    assert_eq!(b.seed().get(), 2);
    // Same key, same seed, same slot.
    assert_eq!(a.start_index("key"), a.start_index("key"));
}
