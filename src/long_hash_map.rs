//! LongHashMap: separately-chained hash table keyed by `i64`.
//!
//! Chains are intrusive singly-linked lists whose nodes live in a
//! `SlotMap`. Each bucket stores the head and tail of its chain, so
//! appends are O(1) and a rehash relinks the existing nodes into the new
//! bucket array instead of moving values around.

use crate::error::LongMapError;
use crate::index::bucket_index;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use slotmap::{DefaultKey, SlotMap};

/// Number of buckets in a map created by [`LongHashMap::new`].
pub const DEFAULT_CAPACITY: usize = 16;

#[derive(Copy, Clone, Debug, Default)]
struct Bucket {
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

#[derive(Clone, Debug)]
struct Node<V> {
    key: i64,
    value: V,
    next: Option<DefaultKey>,
}

/// Hash map from `i64` keys to `V` values.
///
/// The table doubles its bucket count whenever an insertion finds it with
/// as many entries as buckets, so the load factor never exceeds 1.0 and
/// the bucket count is always a power of two. It never shrinks.
#[derive(Clone)]
pub struct LongHashMap<V> {
    buckets: Vec<Bucket>,
    nodes: SlotMap<DefaultKey, Node<V>>, // chain nodes, linked through `next`
}

fn alloc_buckets(capacity: usize) -> Result<Vec<Bucket>, LongMapError> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|source| LongMapError::AllocFailed {
            requested: capacity,
            source,
        })?;
    buckets.resize(capacity, Bucket::default());
    Ok(buckets)
}

// Allocation failure is fatal on the infallible paths, as it is for `Vec`.
fn fatal<T>(res: Result<T, LongMapError>) -> T {
    match res {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

impl<V> LongHashMap<V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a map with at least `capacity` buckets, rounded up to a power
    /// of two (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        fatal(Self::try_with_capacity(capacity))
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, LongMapError> {
        let capacity = capacity
            .max(1)
            .checked_next_power_of_two()
            .ok_or(LongMapError::CapacityOverflow)?;
        Ok(Self {
            buckets: alloc_buckets(capacity)?,
            nodes: SlotMap::with_key(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn slot(&self, key: i64) -> usize {
        bucket_index(key, self.buckets.len())
    }

    fn chain(&self, slot: usize) -> Chain<'_, V> {
        Chain {
            nodes: &self.nodes,
            cursor: self.buckets[slot].head,
        }
    }

    fn find_in(&self, slot: usize, key: i64) -> Option<DefaultKey> {
        self.chain(slot)
            .find(|(_, node)| node.key == key)
            .map(|(k, _)| k)
    }

    fn find(&self, key: i64) -> Option<DefaultKey> {
        self.find_in(self.slot(key), key)
    }

    pub fn get(&self, key: i64) -> Option<&V> {
        let k = self.find(key)?;
        Some(&self.nodes[k].value)
    }

    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let k = self.find(key)?;
        Some(&mut self.nodes[k].value)
    }

    /// Returns true if `key` has an entry, whatever value it holds.
    pub fn contains_key(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Associates `value` with `key`, returning the value it replaced.
    ///
    /// A full table (as many entries as buckets) is doubled before the
    /// chain is searched, so an overwrite can also trigger growth.
    ///
    /// # Panics
    ///
    /// Panics if the bucket array cannot grow.
    pub fn insert(&mut self, key: i64, value: V) -> Option<V> {
        fatal(self.try_insert(key, value))
    }

    /// Like [`insert`](Self::insert), but reports a failed growth instead of
    /// panicking. On error the map is unchanged and `value` is dropped.
    pub fn try_insert(&mut self, key: i64, value: V) -> Result<Option<V>, LongMapError> {
        if self.nodes.len() == self.buckets.len() {
            self.try_grow()?;
        }
        let slot = self.slot(key);
        if let Some(k) = self.find_in(slot, key) {
            return Ok(Some(mem::replace(&mut self.nodes[k].value, value)));
        }
        let k = self.nodes.insert(Node {
            key,
            value,
            next: None,
        });
        self.link_back(slot, k);
        Ok(None)
    }

    pub fn remove(&mut self, key: i64) -> Option<V> {
        let slot = self.slot(key);
        let mut prev = None;
        let mut cursor = self.buckets[slot].head;
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            let next = node.next;
            if node.key == key {
                match prev {
                    Some(p) => self.nodes[p].next = next,
                    None => self.buckets[slot].head = next,
                }
                if next.is_none() {
                    self.buckets[slot].tail = prev;
                }
                return self.nodes.remove(k).map(|node| node.value);
            }
            prev = Some(k);
            cursor = next;
        }
        None
    }

    /// Drops every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        log::trace!(
            "clearing long map: {} entries, {} buckets",
            self.nodes.len(),
            self.buckets.len()
        );
        self.nodes.clear();
        self.buckets.fill(Bucket::default());
    }

    /// Grows the table so that `additional` more entries fit without
    /// triggering a rehash.
    pub fn reserve(&mut self, additional: usize) {
        fatal(self.try_reserve(additional))
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), LongMapError> {
        let needed = self
            .nodes
            .len()
            .checked_add(additional)
            .ok_or(LongMapError::CapacityOverflow)?;
        if needed <= self.buckets.len() {
            return Ok(());
        }
        let target = needed
            .checked_next_power_of_two()
            .ok_or(LongMapError::CapacityOverflow)?;
        self.try_rehash(target)
    }

    fn try_grow(&mut self) -> Result<(), LongMapError> {
        let target = self
            .buckets
            .len()
            .checked_mul(2)
            .ok_or(LongMapError::CapacityOverflow)?;
        self.try_rehash(target)
    }

    // Relinks every node, in bucket-then-chain order, into a fresh bucket
    // array of `capacity` slots. The old array is only released once the
    // new one is allocated.
    fn try_rehash(&mut self, capacity: usize) -> Result<(), LongMapError> {
        let fresh = alloc_buckets(capacity)?;
        log::debug!(
            "growing long map: {} -> {} buckets, {} entries",
            self.buckets.len(),
            capacity,
            self.nodes.len()
        );
        let old = mem::replace(&mut self.buckets, fresh);
        for bucket in old {
            let mut cursor = bucket.head;
            while let Some(k) = cursor {
                let node = &mut self.nodes[k];
                cursor = node.next.take();
                let slot = bucket_index(node.key, capacity);
                self.link_back(slot, k);
            }
        }
        Ok(())
    }

    fn link_back(&mut self, slot: usize, k: DefaultKey) {
        let bucket = &mut self.buckets[slot];
        match bucket.tail {
            Some(tail) => self.nodes[tail].next = Some(k),
            None => bucket.head = Some(k),
        }
        bucket.tail = Some(k);
    }

    /// Snapshot of every key, in bucket-then-chain order.
    pub fn keys(&self) -> Vec<i64> {
        self.iter().map(|(k, _)| k).collect()
    }

    /// Snapshot of every value, in the same order as [`keys`](Self::keys).
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    /// Entries in bucket-then-chain order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Chain {
                nodes: &self.nodes,
                cursor: None,
            },
            remaining: self.nodes.len(),
        }
    }

    /// Entries with mutable values, in unspecified order.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            it: self.nodes.iter_mut(),
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_structure(&self) {
        use std::collections::HashSet;

        let capacity = self.buckets.len();
        assert!(capacity.is_power_of_two(), "capacity {capacity}");
        let mut seen = HashSet::new();
        for (slot, bucket) in self.buckets.iter().enumerate() {
            assert_eq!(bucket.head.is_none(), bucket.tail.is_none(), "slot {slot}");
            let mut last = None;
            for (k, node) in self.chain(slot) {
                assert_eq!(bucket_index(node.key, capacity), slot, "key {}", node.key);
                assert!(seen.insert(node.key), "duplicate key {}", node.key);
                last = Some(k);
            }
            assert_eq!(bucket.tail, last, "stale tail in slot {slot}");
        }
        assert_eq!(seen.len(), self.nodes.len(), "unreachable nodes");
    }
}

impl<V: PartialEq> LongHashMap<V> {
    /// Returns true if some key maps to a value equal to `value`. O(n).
    pub fn contains_value(&self, value: &V) -> bool {
        self.iter().any(|(_, v)| v == value)
    }
}

impl<V> Default for LongHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for LongHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Extend<(i64, V)> for LongHashMap<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> FromIterator<(i64, V)> for LongHashMap<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

struct Chain<'a, V> {
    nodes: &'a SlotMap<DefaultKey, Node<V>>,
    cursor: Option<DefaultKey>,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (DefaultKey, &'a Node<V>);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let nodes: &'a SlotMap<DefaultKey, Node<V>> = self.nodes;
        let node = &nodes[k];
        self.cursor = node.next;
        Some((k, node))
    }
}

/// Iterator over entries of a `LongHashMap`, in bucket-then-chain order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Bucket>,
    chain: Chain<'a, V>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, node)) = self.chain.next() {
                self.remaining -= 1;
                return Some((node.key, &node.value));
            }
            self.chain.cursor = self.buckets.next()?.head;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over entries of a `LongHashMap` with mutable values.
pub struct IterMut<'a, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Node<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (i64, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, node)| (node.key, &mut node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// Owning iterator over entries of a `LongHashMap`, in unspecified order.
pub struct IntoIter<V> {
    it: slotmap::basic::IntoIter<DefaultKey, Node<V>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (i64, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, node)| (node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<V> IntoIterator for LongHashMap<V> {
    type Item = (i64, V);
    type IntoIter = IntoIter<V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.nodes.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a LongHashMap<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut LongHashMap<V> {
    type Item = (i64, &'a mut V);
    type IntoIter = IterMut<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
