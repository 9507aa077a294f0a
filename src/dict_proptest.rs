#![cfg(test)]

// Property tests for Dictionary kept inside the crate so they can check
// chain structure through the internal consistency walker.

use crate::dict::tests::{assert_consistent, ConstBuildHasher};
use crate::dict::Dictionary;
use crate::error::DictError;
use crate::{DictConfig, Stats};
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, String),
    Remove(usize),
    Lookup(usize),
    Update(usize, String),
    Contains(String),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-zA-Z0-9 ]{0,6}", 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), "[a-z]{0,12}").prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Lookup),
            2 => (idx.clone(), "[a-z]{0,12}").prop_map(|(i, v)| OpI::Update(i, v)),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Shared state-machine driver: the dictionary must agree with a HashMap model
// after every operation.
// - Duplicate inserts fail with DuplicateKey and leave the old value.
// - remove on an absent key fails (Empty when nothing is stored, KeyNotFound
//   otherwise) and changes nothing.
// - update on an absent key fails and creates nothing.
// - iter yields exactly the model's pairs.
// - Chains stay acyclic, correctly bucketed and count-consistent.
fn run_state_machine<S: BuildHasher>(
    mut sut: Dictionary<S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, String> = HashMap::new();
    let mut collisions = 0usize;

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                let collides = sut.chain(sut.bucket_index(k)).next().is_some();
                match sut.insert(k, &v) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        if collides {
                            collisions += 1;
                        }
                        model.insert(k.clone(), v);
                    }
                    Err(DictError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                    Err(e) => prop_assert!(false, "unexpected insert error: {:?}", e),
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let before = sut.len();
                match (sut.remove(k), model.remove(k)) {
                    (Ok(()), Some(_)) => prop_assert_eq!(sut.len(), before - 1),
                    (Err(DictError::Empty), None) => prop_assert!(model.is_empty()),
                    (Err(DictError::KeyNotFound), None) => prop_assert_eq!(sut.len(), before),
                    (r, m) => prop_assert!(false, "remove mismatch: {:?} vs {:?}", r, m),
                }
                prop_assert!(sut.lookup(k).is_none());
            }
            OpI::Lookup(i) => {
                let k = &pool[i];
                let first = sut.lookup(k);
                prop_assert_eq!(first, model.get(k).map(String::as_str));
                prop_assert_eq!(first, sut.lookup(k), "lookup must be repeatable");
            }
            OpI::Update(i, v) => {
                let k = &pool[i];
                match sut.update(k, &v) {
                    Ok(()) => {
                        let mv = model.get_mut(k);
                        prop_assert!(mv.is_some(), "update succeeded on absent key");
                        if let Some(mv) = mv {
                            *mv = v.clone();
                        }
                        prop_assert_eq!(sut.lookup(k), Some(v.as_str()));
                    }
                    Err(DictError::KeyNotFound) => {
                        prop_assert!(!model.contains_key(k));
                        prop_assert!(sut.lookup(k).is_none(), "failed update created a value");
                    }
                    Err(e) => prop_assert!(false, "unexpected update error: {:?}", e),
                }
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Iterate => {
                let s_pairs: BTreeSet<(String, String)> = sut
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                let m_pairs: BTreeSet<(String, String)> =
                    model.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                prop_assert_eq!(s_pairs, m_pairs);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                collisions = 0;
            }
        }

        assert_consistent(&sut);
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        if let Some(Stats { collisions: c, .. }) = sut.stats() {
            prop_assert_eq!(c, collisions);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let sut = Dictionary::with_config(DictConfig::new().instrumented(true));
        run_state_machine(sut, &pool, ops)?;
    }
}

// Same invariants under worst-case collisions: every key shares bucket 0, so
// this stresses chain walking, relinking and tail insertion.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = Dictionary::with_config_and_hasher(
            DictConfig::new().instrumented(true),
            ConstBuildHasher,
        );
        run_state_machine(sut, &pool, ops)?;
    }
}

// Property: chain order within a bucket equals insertion order of the
// surviving keys, no matter which entries were removed in between.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_chain_order_is_insertion_order(
        n in 1usize..40,
        removals in proptest::collection::vec(0usize..40, 0..20),
    ) {
        let mut d = Dictionary::with_hasher(ConstBuildHasher);
        let keys: Vec<String> = (0..n).map(|i| format!("key{i}")).collect();
        for k in &keys {
            d.insert(k, "v").unwrap();
        }
        let mut alive: Vec<&String> = keys.iter().collect();
        for r in removals {
            let k = format!("key{}", r % n);
            if let Some(pos) = alive.iter().position(|a| **a == k) {
                d.remove(&k).unwrap();
                alive.remove(pos);
            } else if alive.is_empty() {
                prop_assert_eq!(d.remove(&k), Err(DictError::Empty));
            } else {
                prop_assert_eq!(d.remove(&k), Err(DictError::KeyNotFound));
            }
        }
        let chain: Vec<&str> = d.chain(0).map(|(k, _)| k).collect();
        let expected: Vec<&str> = alive.iter().map(|s| s.as_str()).collect();
        prop_assert_eq!(chain, expected);
    }
}
