#![cfg(test)]

// State-machine property tests for both associative tables, kept inside
// the crate so they can reach entry references directly.

use crate::assoc::AssocTable;
use crate::hashed::HashedTable;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, i32),
    Remove(u8),
    Lookup(u8),
    Bump(u8, i32),
    RemoveWhere(u8),
}

prop_compose! {
    fn arb_ops()(ops in proptest::collection::vec(
        prop_oneof![
            (0u8..16, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            (0u8..16).prop_map(Op::Remove),
            (0u8..16).prop_map(Op::Lookup),
            (0u8..16, -100i32..100).prop_map(|(k, d)| Op::Bump(k, d)),
            (2u8..5).prop_map(Op::RemoveWhere),
        ], 1..120)) -> Vec<Op> { ops }
}

// Model: a Vec of (key, value) in insertion order with upsert semantics.
fn model_insert(model: &mut Vec<(u8, i32)>, k: u8, v: i32) -> Option<i32> {
    match model.iter_mut().find(|(mk, _)| *mk == k) {
        Some((_, mv)) => Some(core::mem::replace(mv, v)),
        None => {
            model.push((k, v));
            None
        }
    }
}

proptest! {
    #[test]
    fn prop_assoc_matches_ordered_model(ops in arb_ops()) {
        let mut sut = AssocTable::new(|a: &u8, b: &u8| a == b);
        let mut model: Vec<(u8, i32)> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(sut.insert(k, v), model_insert(&mut model, k, v));
                    // Insert then lookup always sees the new value.
                    prop_assert_eq!(sut.lookup(&k), Some(&v));
                }
                Op::Remove(k) => {
                    let expected = model.iter().position(|(mk, _)| *mk == k).map(|i| model.remove(i));
                    prop_assert_eq!(sut.remove(&k), expected);
                }
                Op::Lookup(k) => {
                    let expected = model.iter().find(|(mk, _)| *mk == k).map(|(_, v)| v);
                    prop_assert_eq!(sut.lookup(&k), expected);
                    prop_assert_eq!(sut.contains_key(&k), expected.is_some());
                }
                Op::Bump(k, d) => {
                    if let Some(r) = sut.find(&k) {
                        let v = r.value_mut(&mut sut).expect("live entry");
                        *v = v.saturating_add(d);
                        let (_, mv) = model.iter_mut().find(|(mk, _)| *mk == k).expect("model has key");
                        *mv = mv.saturating_add(d);
                    } else {
                        prop_assert!(!model.iter().any(|(mk, _)| *mk == k));
                    }
                }
                Op::RemoveWhere(m) => {
                    let before = model.len();
                    model.retain(|(k, _)| k % m != 0);
                    let removed = sut.for_each_remove(|k, _| k % m == 0);
                    prop_assert_eq!(removed, before - model.len());
                }
            }

            // No duplicate keys, and iteration order equals the model's.
            let seen: Vec<(u8, i32)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(&seen, &model);
            prop_assert_eq!(sut.len(), model.len());
        }
    }

    #[test]
    fn prop_hashed_agrees_with_linear(ops in arb_ops()) {
        let mut linear = AssocTable::new(|a: &u8, b: &u8| a == b);
        let mut hashed: HashedTable<u8, i32> = HashedTable::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(hashed.insert(k, v), linear.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(hashed.remove(&k), linear.remove(&k));
                }
                Op::Lookup(k) => {
                    prop_assert_eq!(hashed.lookup(&k), linear.lookup(&k));
                    prop_assert_eq!(hashed.lookup_extended(&k), linear.lookup_extended(&k));
                }
                Op::Bump(k, d) => {
                    if let (Some(a), Some(b)) = (hashed.lookup_mut(&k), linear.lookup_mut(&k)) {
                        *a = a.saturating_add(d);
                        *b = b.saturating_add(d);
                    }
                }
                Op::RemoveWhere(m) => {
                    prop_assert_eq!(
                        hashed.for_each_remove(|k, _| k % m == 0),
                        linear.for_each_remove(|k, _| k % m == 0)
                    );
                }
            }
            let h: Vec<_> = hashed.iter().collect();
            let l: Vec<_> = linear.iter().collect();
            prop_assert_eq!(h, l);
        }
    }
}
