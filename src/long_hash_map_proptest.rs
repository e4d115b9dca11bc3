#![cfg(test)]

// Property tests for LongHashMap kept inside the crate so they can check
// the private chain structure after every operation.

use crate::index::bucket_index;
use crate::long_hash_map::LongHashMap;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    ContainsValue(i32),
    Mutate(usize, i32),
    Snapshot,
    Clear,
}

fn arb_key() -> impl Strategy<Value = i64> {
    prop_oneof![
        3 => -64i64..64,
        1 => any::<i64>(),
        1 => Just(i64::MIN),
        1 => Just(i64::MAX),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (Vec<i64>, Vec<OpI>)> {
    proptest::collection::vec(arb_key(), 1..=48).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), -8i32..8).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => (-8i32..8).prop_map(OpI::ContainsValue),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Snapshot),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert/remove/get return exactly what the model returns.
// - `contains_key` parity with `get`, `contains_value` parity with the model.
// - `keys`/`values` snapshots hold `len()` items and agree with the model.
// - Capacity is a power of two, never shrinks, and never drops below
//   `len()`; every node sits in the chain its key indexes to.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: LongHashMap<i32> = LongHashMap::new();
        let mut model: HashMap<i64, i32> = HashMap::new();
        let mut capacity = sut.capacity();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.insert(k, v), model.insert(k, v));
                    prop_assert_eq!(sut.get(k), Some(&v));
                }
                OpI::Remove(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(&k));
                    prop_assert!(!sut.contains_key(k));
                }
                OpI::Get(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.get(k), model.get(&k));
                    prop_assert_eq!(sut.contains_key(k), sut.get(k).is_some());
                }
                OpI::ContainsValue(v) => {
                    let has_model = model.values().any(|mv| *mv == v);
                    prop_assert_eq!(sut.contains_value(&v), has_model);
                }
                OpI::Mutate(i, d) => {
                    let k = pool[i];
                    match (sut.get_mut(k), model.get_mut(&k)) {
                        (Some(sv), Some(mv)) => {
                            *sv = sv.wrapping_add(d);
                            *mv = mv.wrapping_add(d);
                        }
                        (None, None) => {}
                        (s, m) => {
                            prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m);
                        }
                    }
                }
                OpI::Snapshot => {
                    let keys = sut.keys();
                    let values = sut.values();
                    prop_assert_eq!(keys.len(), sut.len());
                    prop_assert_eq!(values.len(), sut.len());
                    let pairs: BTreeMap<i64, i32> =
                        keys.iter().copied().zip(values.into_iter().copied()).collect();
                    let expected: BTreeMap<i64, i32> =
                        model.iter().map(|(k, v)| (*k, *v)).collect();
                    prop_assert_eq!(pairs, expected);
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert!(sut.is_empty());
                    prop_assert_eq!(sut.capacity(), capacity);
                }
            }

            prop_assert!(sut.capacity() >= capacity, "capacity shrank");
            capacity = sut.capacity();
            prop_assert!(sut.len() <= capacity);
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            sut.assert_structure();
        }
    }
}

// Property: inserting enough distinct keys to force several doublings keeps
// every mapping, and the final capacity is the smallest power of two the
// grow-when-full policy reaches.
proptest! {
    #[test]
    fn prop_growth_preserves_mappings(keys in proptest::collection::btree_set(any::<i64>(), 17..300)) {
        let mut m = LongHashMap::new();
        for (i, &k) in keys.iter().enumerate() {
            prop_assert_eq!(m.insert(k, i), None);
        }
        for (i, &k) in keys.iter().enumerate() {
            prop_assert_eq!(m.get(k), Some(&i));
        }
        let n = keys.len();
        let mut expected = 16usize;
        while expected < n {
            expected *= 2;
        }
        prop_assert_eq!(m.capacity(), expected);
        let seen: BTreeSet<i64> = m.keys().into_iter().collect();
        prop_assert_eq!(&seen, &keys);
        m.assert_structure();
    }
}

// Property: `keys()` follows bucket order, so the slots of successive keys
// never decrease.
proptest! {
    #[test]
    fn prop_keys_follow_bucket_order(keys in proptest::collection::vec(any::<i64>(), 0..100)) {
        let m: LongHashMap<()> = keys.iter().map(|&k| (k, ())).collect();
        let capacity = m.capacity();
        let slots: Vec<usize> = m.keys().iter().map(|&k| bucket_index(k, capacity)).collect();
        prop_assert!(slots.windows(2).all(|w| w[0] <= w[1]), "slots {:?}", slots);
    }
}
