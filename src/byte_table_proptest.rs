#![cfg(test)]

// Property tests for ByteTable kept inside the crate so they can check the
// slot-level bookkeeping alongside the public behavior.

use crate::byte_table::ByteTable;
use crate::error::TableError;
use crate::prime::is_prime;
use hashbrown::HashMap;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, Vec<u8>),
    Remove(usize),
    Get(usize),
}

// Small pools of short keys so collisions, tombstone reuse, and purges
// actually happen within a few dozen operations.
fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..4), 1..=24).prop_flat_map(
        |pool| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                3 => (idx.clone(), proptest::collection::vec(any::<u8>(), 0..6))
                    .prop_map(|(i, v)| OpI::Insert(i, v)),
                2 => idx.clone().prop_map(OpI::Remove),
                1 => idx.clone().prop_map(OpI::Get),
            ];
            proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
        },
    )
}

fn check_bookkeeping(sut: &ByteTable, model_len: usize) -> Result<(), TestCaseError> {
    let s = sut.stats();
    prop_assert_eq!(s.occupied, model_len);
    prop_assert!(is_prime(s.length), "length {} not prime", s.length);
    prop_assert_eq!(s.capacity, s.length / 2);
    prop_assert!(
        s.occupied + s.tombstones <= s.capacity,
        "occupied {} + tombstones {} over capacity {}",
        s.occupied,
        s.tombstones,
        s.capacity
    );
    Ok(())
}

// Property: State-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the previous value exactly when the model had one.
// - remove succeeds exactly when the model held the key; NotFound otherwise.
// - get/contains_key agree with the model for every pool key after each op.
// - length stays prime, capacity is half of it, and live plus tombstoned
//   slots never exceed capacity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = ByteTable::new().unwrap();
        let mut model: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let prev = sut.insert(k, &v).unwrap();
                    let expected = model.insert(k.clone(), v);
                    prop_assert_eq!(prev.map(|b| b.into_vec()), expected);
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    match (sut.remove(k), model.remove(k)) {
                        (Ok(()), Some(_)) => {}
                        (Err(TableError::NotFound), None) => {}
                        (got, want) => {
                            prop_assert!(false, "remove mismatch: {:?} vs {:?}", got, want)
                        }
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k).map(|v| &v[..]));
                }
            }

            check_bookkeeping(&sut, model.len())?;
            for k in &pool {
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
        }
    }
}

// Property: growth from any starting length keeps every live entry and only
// ever lands on primes at least double the previous length.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_entries(start in 2usize..64, n in 0usize..400) {
        let mut sut = ByteTable::with_initial_length(start).unwrap();
        let mut last = sut.stats().length;
        for i in 0..n {
            sut.insert(format!("key{i}").as_bytes(), &(i as u64).to_le_bytes()).unwrap();
            let len = sut.stats().length;
            if len != last {
                prop_assert!(is_prime(len));
                prop_assert!(len >= 2 * last);
                last = len;
            }
        }
        prop_assert_eq!(sut.len(), n);
        for i in 0..n {
            let expected = (i as u64).to_le_bytes();
            prop_assert_eq!(sut.get(format!("key{i}").as_bytes()), Some(&expected[..]));
        }
    }
}
