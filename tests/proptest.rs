//! Property-based tests for ironseq using proptest.

use ironseq::*;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// ============================================================================
// Test helpers
// ============================================================================

fn first_occurrences(items: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::new();
    items.iter().copied().filter(|x| seen.insert(*x)).collect()
}

fn probe_strategy() -> impl Strategy<Value = ProbeStrategy> {
    prop_oneof![Just(ProbeStrategy::Linear), Just(ProbeStrategy::Quadratic)]
}

#[derive(Debug, Clone)]
enum Op {
    Add(i16, i32),
    Replace(i16, i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i32>()).prop_map(|(k, v)| Op::Add(k, v)),
        (any::<i16>(), any::<i32>()).prop_map(|(k, v)| Op::Replace(k, v)),
    ]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// The keyed store behaves like a std map under any operation mix.
    #[test]
    fn dictionary_matches_hash_map(
        ops in prop::collection::vec(op_strategy(), 0..200),
        probe in probe_strategy(),
        buckets in 1u64..4,
    ) {
        // a tiny hash range forces long collision chains
        let comparer = FnComparer::new(
            |a: &i16, b: &i16| a == b,
            move |k: &i16| HashKey::Number(u64::from(k.unsigned_abs()) % buckets),
        );
        let options = StoreOptions::default().with_probe(probe);
        let mut dict = Dictionary::with_options(comparer, options).unwrap();
        let mut model: HashMap<i16, i32> = HashMap::new();
        let mut order: Vec<i16> = Vec::new();

        for op in ops {
            match op {
                Op::Add(k, v) => {
                    let fresh = !model.contains_key(&k);
                    prop_assert_eq!(dict.add(k, v).is_ok(), fresh);
                    if fresh {
                        model.insert(k, v);
                        order.push(k);
                    }
                }
                Op::Replace(k, v) => {
                    dict.add_or_replace(k, v);
                    if model.insert(k, v).is_none() {
                        order.push(k);
                    }
                }
            }
        }

        prop_assert_eq!(dict.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(dict.try_get_value(k), Some(v));
        }
        let keys: Vec<i16> = dict.iter().map(|(k, _)| *k).collect();
        prop_assert_eq!(keys, order);
    }

    /// Distinct keeps exactly the first occurrence of every value.
    #[test]
    fn distinct_matches_first_occurrences(items in prop::collection::vec(-20i32..20, 0..100)) {
        let out = from_vec(items.clone()).distinct().to_array();
        prop_assert_eq!(out, first_occurrences(&items));
    }

    /// Union, intersect and except agree with set arithmetic in left-first order.
    #[test]
    fn set_operators_match_reference(
        left in prop::collection::vec(0i32..15, 0..40),
        right in prop::collection::vec(0i32..15, 0..40),
    ) {
        let l = from_vec(left.clone());
        let r = from_vec(right.clone());
        let right_set: HashSet<i32> = right.iter().copied().collect();

        let mut both = left.clone();
        both.extend(&right);
        prop_assert_eq!(l.union(&r).to_array(), first_occurrences(&both));

        let expected: Vec<i32> = first_occurrences(&left)
            .into_iter()
            .filter(|x| right_set.contains(x))
            .collect();
        prop_assert_eq!(l.intersect(&r).to_array(), expected);

        let expected: Vec<i32> = first_occurrences(&left)
            .into_iter()
            .filter(|x| !right_set.contains(x))
            .collect();
        prop_assert_eq!(l.except(&r).to_array(), expected);
    }

    /// Ordering by two keys is a stable lexicographic sort.
    #[test]
    fn order_by_then_by_is_a_stable_sort(
        rows in prop::collection::vec((0u8..4, 0u8..4, any::<u16>()), 0..60),
    ) {
        let sorted = from_vec(rows.clone())
            .order_by(|r| r.0)
            .then_by_descending(|r| r.1)
            .to_array();

        let mut expected = rows;
        expected.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
        prop_assert_eq!(sorted, expected);
    }

    /// Skip then take is the matching slice of the input.
    #[test]
    fn skip_take_slices(
        items in prop::collection::vec(any::<i32>(), 0..50),
        skip in -5i64..60,
        take in -5i64..60,
    ) {
        let out = from_vec(items.clone()).skip(skip).take(take).to_array();
        let start = usize::try_from(skip.max(0)).unwrap().min(items.len());
        let len = usize::try_from(take.max(0)).unwrap();
        let expected: Vec<i32> = items[start..].iter().copied().take(len).collect();
        prop_assert_eq!(out, expected);
    }

    /// Group sizes always add back up to the input length.
    #[test]
    fn group_sizes_sum_to_input(items in prop::collection::vec(0i32..10, 0..80)) {
        let groups = from_vec(items.clone()).group_by(|x| x % 4);
        let total: usize = groups.select(|g| g.values().count()).aggregate(0, |a, n| a + n);
        prop_assert_eq!(total, items.len());
        let keys = groups.select(|g| *g.key()).to_array();
        let expected: Vec<i32> = first_occurrences(&items.iter().map(|x| x % 4).collect::<Vec<_>>());
        prop_assert_eq!(keys, expected);
    }
}
