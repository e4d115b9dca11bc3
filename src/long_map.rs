//! The `LongMap` contract: an `i64`-keyed map with put/get/remove,
//! membership tests, snapshots of keys and values, and bulk clearing.

use crate::long_hash_map::LongHashMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Operations shared by every `i64`-keyed map in this crate.
///
/// `LongHashMap` is the primary implementation. `std::collections::HashMap`
/// also implements it, which makes it usable as a reference model.
pub trait LongMap<V> {
    /// Associates `value` with `key`, returning the previous value.
    fn put(&mut self, key: i64, value: V) -> Option<V>;

    fn get(&self, key: i64) -> Option<&V>;

    /// Removes the entry for `key`, returning its value.
    fn remove(&mut self, key: i64) -> Option<V>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// True iff `get(key)` yields a value.
    fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq;

    /// Snapshot of all keys; exactly `size()` items.
    fn keys(&self) -> Vec<i64>;

    /// Snapshot of all values; exactly `size()` items.
    fn values(&self) -> Vec<&V>;

    fn size(&self) -> usize;

    fn clear(&mut self);
}

impl<V> LongMap<V> for LongHashMap<V> {
    fn put(&mut self, key: i64, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn get(&self, key: i64) -> Option<&V> {
        LongHashMap::get(self, key)
    }

    fn remove(&mut self, key: i64) -> Option<V> {
        LongHashMap::remove(self, key)
    }

    fn is_empty(&self) -> bool {
        LongHashMap::is_empty(self)
    }

    fn contains_key(&self, key: i64) -> bool {
        LongHashMap::contains_key(self, key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        LongHashMap::contains_value(self, value)
    }

    fn keys(&self) -> Vec<i64> {
        LongHashMap::keys(self)
    }

    fn values(&self) -> Vec<&V> {
        LongHashMap::values(self)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        LongHashMap::clear(self)
    }
}

impl<V, S: BuildHasher> LongMap<V> for HashMap<i64, V, S> {
    fn put(&mut self, key: i64, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn get(&self, key: i64) -> Option<&V> {
        HashMap::get(self, &key)
    }

    fn remove(&mut self, key: i64) -> Option<V> {
        HashMap::remove(self, &key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        HashMap::values(self).any(|v| v == value)
    }

    fn keys(&self) -> Vec<i64> {
        HashMap::keys(self).copied().collect()
    }

    fn values(&self) -> Vec<&V> {
        HashMap::values(self).collect()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        HashMap::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<M: LongMap<&'static str>>(m: &mut M) {
        assert!(m.is_empty());
        assert_eq!(m.put(1, "A"), None);
        assert_eq!(m.put(2, "B"), None);
        assert_eq!(m.put(1, "C"), Some("A"));
        assert_eq!(m.get(1), Some(&"C"));
        assert_eq!(m.get(3), None);
        assert!(m.contains_key(2));
        assert!(!m.contains_key(3));
        assert!(m.contains_value(&"B"));
        assert!(!m.contains_value(&"A"));
        let mut keys = m.keys();
        keys.sort_unstable();
        assert_eq!(keys, vec![1, 2]);
        assert_eq!(m.values().len(), 2);
        assert_eq!(m.size(), 2);
        assert_eq!(m.remove(2), Some("B"));
        assert_eq!(m.remove(2), None);
        assert_eq!(m.size(), 1);
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.size(), 0);
    }

    /// Invariant: both implementations satisfy the same contract through
    /// the trait.
    #[test]
    fn long_hash_map_through_trait() {
        exercise(&mut LongHashMap::new());
    }

    #[test]
    fn std_hash_map_through_trait() {
        exercise(&mut HashMap::new());
    }

    /// Invariant: the trait stays usable as a trait object.
    #[test]
    fn trait_object_dispatch() {
        let mut boxed: Box<dyn LongMap<u32>> = Box::new(LongHashMap::new());
        boxed.put(-9, 9);
        assert!(boxed.contains_key(-9));
        assert_eq!(boxed.get(-9), Some(&9));
        assert_eq!(boxed.size(), 1);
    }
}
