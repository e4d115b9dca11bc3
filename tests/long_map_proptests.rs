// LongMap trait property tests.
//
// Property 1: trace equivalence.
//  - Model: std::collections::HashMap<i64, V> driven through the same
//    `LongMap` trait as LongHashMap.
//  - Invariant: every operation returns the same observation on both maps;
//    snapshots are compared as sorted sequences since order differs.
//  - Operations: put, get, remove, contains_key, contains_value, keys,
//    values, size, is_empty, clear.
//
// Property 2: size accounting.
//  - Invariant: size() == distinct keys put minus keys removed.
use long_map::{LongHashMap, LongMap};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug)]
enum Op {
    Put(i64, Option<u8>),
    Get(i64),
    Remove(i64),
    ContainsKey(i64),
    ContainsValue(Option<u8>),
    Keys,
    Values,
    Size,
    Clear,
}

#[derive(Debug, PartialEq)]
enum Obs {
    Value(Option<Option<u8>>),
    Flag(bool),
    Keys(Vec<i64>),
    Values(Vec<Option<u8>>),
    Size(usize, bool),
    Unit,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let key = prop_oneof![4 => -40i64..40, 1 => any::<i64>()];
    let value = proptest::option::of(0u8..6);
    prop_oneof![
        5 => (key.clone(), value.clone()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => key.clone().prop_map(Op::Get),
        2 => key.clone().prop_map(Op::Remove),
        1 => key.prop_map(Op::ContainsKey),
        1 => value.prop_map(Op::ContainsValue),
        1 => Just(Op::Keys),
        1 => Just(Op::Values),
        1 => Just(Op::Size),
        1 => Just(Op::Clear),
    ]
}

fn apply<M: LongMap<Option<u8>>>(m: &mut M, op: &Op) -> Obs {
    match *op {
        Op::Put(k, v) => Obs::Value(m.put(k, v)),
        Op::Get(k) => Obs::Value(m.get(k).copied()),
        Op::Remove(k) => Obs::Value(m.remove(k)),
        Op::ContainsKey(k) => Obs::Flag(m.contains_key(k)),
        Op::ContainsValue(v) => Obs::Flag(m.contains_value(&v)),
        Op::Keys => {
            let mut keys = m.keys();
            keys.sort_unstable();
            Obs::Keys(keys)
        }
        Op::Values => {
            let mut values: Vec<Option<u8>> = m.values().into_iter().copied().collect();
            values.sort_unstable();
            Obs::Values(values)
        }
        Op::Size => Obs::Size(m.size(), m.is_empty()),
        Op::Clear => {
            m.clear();
            Obs::Unit
        }
    }
}

// Property 1: LongHashMap and HashMap produce identical traces.
proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]
    #[test]
    fn prop_trace_matches_std(ops in proptest::collection::vec(arb_op(), 1..300)) {
        let mut sut: LongHashMap<Option<u8>> = LongHashMap::new();
        let mut model: HashMap<i64, Option<u8>> = HashMap::new();
        for op in &ops {
            let got = apply(&mut sut, op);
            let want = apply(&mut model, op);
            prop_assert_eq!(got, want, "op {:?}", op);
            prop_assert_eq!(LongMap::size(&sut), LongMap::size(&model));
        }
    }
}

// Property 2: size equals distinct keys put minus keys removed.
proptest! {
    #[test]
    fn prop_size_accounting(
        puts in proptest::collection::vec(any::<i64>(), 0..200),
        remove_mask in proptest::collection::vec(any::<bool>(), 200),
    ) {
        let mut m: LongHashMap<u32> = LongHashMap::new();
        let mut distinct = BTreeSet::new();
        for (i, &k) in puts.iter().enumerate() {
            m.put(k, i as u32);
            distinct.insert(k);
        }
        prop_assert_eq!(m.size(), distinct.len());

        let mut removed = 0usize;
        for (k, remove) in distinct.iter().zip(&remove_mask) {
            if *remove {
                prop_assert!(LongMap::remove(&mut m, *k).is_some());
                removed += 1;
            }
        }
        prop_assert_eq!(LongMap::size(&m), distinct.len() - removed);
        prop_assert_eq!(LongMap::is_empty(&m), distinct.len() == removed);
    }
}
