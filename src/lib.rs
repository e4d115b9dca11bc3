//! long-map: a single-threaded hash map keyed by 64-bit signed integers,
//! using separate chaining and doubling growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, predictable `i64 -> V` map whose bucket placement is
//!   fully determined by a fixed multiplicative index function.
//! - Layers:
//!   - `index`: maps a key and a power-of-two capacity to a bucket slot.
//!   - `LongHashMap<V>`: the table. Buckets hold the head and tail of an
//!     intrusive chain; chain nodes live in a `SlotMap` arena.
//!   - `LongMap<V>`: the operation contract (put/get/remove/...), also
//!     implemented for `std::collections::HashMap<i64, V>`.
//!
//! Constraints
//! - Single-threaded; callers that share a map supply their own locking.
//! - At most one entry per key; `len()` equals the number of chain nodes.
//! - Every node sits in the chain of `index(key, capacity)` for the
//!   current capacity. A rehash relinks every node before returning.
//! - Capacity starts at 16 (or a requested power of two) and doubles when
//!   an insertion finds `len() == capacity()`, including overwrites. It
//!   never shrinks, and `clear()` keeps it.
//!
//! Index function
//! - `index(key, capacity) = (key * 23424234) mod capacity`, with 64-bit
//!   wraparound multiplication. Because capacity is a power of two the
//!   reduction is a mask of the low bits and is never negative.
//!
//! Presence versus payload
//! - `contains_key` reports whether an entry exists. A key mapped to
//!   `None` in a `LongHashMap<Option<T>>` is present; `get` returns
//!   `Some(&None)` for it.
//!
//! Failure semantics
//! - Missing keys are `None`, never errors.
//! - Growing the bucket array is the only fallible step. `insert` panics
//!   when it fails; `try_insert` returns `LongMapError` and leaves the
//!   map unchanged.
//!
//! Notes and non-goals
//! - No serialization, no ordering guarantees, no `Sync` sharing layer.
//! - `keys()`/`values()` are snapshots taken at call time.

pub mod error;
pub mod index;
pub mod long_hash_map;
mod long_hash_map_proptest;
pub mod long_map;

// Public surface
pub use error::LongMapError;
pub use index::{bucket_index, MULTIPLIER};
pub use long_hash_map::{IntoIter, Iter, IterMut, LongHashMap, DEFAULT_CAPACITY};
pub use long_map::LongMap;
