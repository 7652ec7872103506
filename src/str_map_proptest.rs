#![cfg(test)]

// Property tests for StrMap kept inside the crate so they can check the
// private slot/arena invariants after every step.

use crate::{FxKeyHash, KeyHash, StrMap};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations: indices shrink toward earlier keys, which keeps
// counterexamples short.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, usize),
    Get(usize),
    Contains(String),
    Reserve(usize),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), idx.clone()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => idx.clone().prop_map(Op::Get),
            2 => "[a-z]{0,6}".prop_map(Op::Contains),
            1 => (0usize..64).prop_map(Op::Reserve),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_scenario<'p, H: KeyHash>(
    mut sut: StrMap<'p, H>,
    pool: &'p [String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<&'p str, &'p str> = HashMap::new();
    let mut order: Vec<&'p str> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let (k, v) = (pool[k].as_str(), pool[v].as_str());
                let prev = sut.insert(k, v);
                let expected = model.insert(k, v);
                prop_assert_eq!(prev, expected);
                if expected.is_none() {
                    order.push(k);
                }
            }
            Op::Get(k) => {
                let k = pool[k].as_str();
                prop_assert_eq!(sut.get(k), model.get(k).copied());
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(s.as_str()));
            }
            Op::Reserve(extra) => {
                let before = (sut.slot_count(), sut.capacity());
                sut.reserve(extra);
                prop_assert!(sut.slot_count() >= before.0, "slot table never shrinks");
                prop_assert!(sut.capacity() >= before.1, "arena never shrinks");
                prop_assert!(sut.capacity() >= sut.len() + extra);
                prop_assert!(sut.len() + extra <= sut.slot_count() * 3 / 4);
            }
            Op::Clear => {
                let before = (sut.slot_count(), sut.capacity());
                sut.clear();
                model.clear();
                order.clear();
                prop_assert_eq!((sut.slot_count(), sut.capacity()), before);
            }
        }

        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }

    // Arena order is first-insertion order.
    let keys: Vec<&str> = sut.keys().collect();
    prop_assert_eq!(keys, order);
    for (k, v) in sut.iter() {
        prop_assert_eq!(model.get(k).copied(), Some(v));
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the previous value exactly when the model had one.
// - get/contains_key parity with the model, including never-set keys.
// - reserve honours both the arena and the 75% load bound; nothing shrinks.
// - clear empties the map and keeps both allocations.
// - after every step each arena item is referenced by exactly one slot with
//   a matching cached hash.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_state_machine_fnv((pool, ops) in arb_scenario(), slots in 1usize..=8) {
        run_scenario(StrMap::new(slots), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_fx((pool, ops) in arb_scenario(), slots in 1usize..=8) {
        run_scenario(StrMap::with_hasher(slots, FxKeyHash), &pool, ops)?;
    }

    // A weak hash (first byte only) forces long probe chains and wraparound.
    #[test]
    fn prop_state_machine_clustered((pool, ops) in arb_scenario()) {
        let first_byte = |k: &[u8]| k.first().copied().unwrap_or(0) as u32;
        run_scenario(StrMap::with_hasher(1, first_byte), &pool, ops)?;
    }
}
