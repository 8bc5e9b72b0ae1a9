//! Assertion functions for sequence outputs.
//!
//! Every assertion drains the sequence exactly once.

use crate::{Enumerable, SeqBound};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that a sequence yields exactly `expected`, in order.
///
/// # Panics
///
/// Panics if the length or any element differs.
///
/// # Example
///
/// ```
/// use ironseq::from_vec;
/// use ironseq::testing::assert_sequence_equal;
///
/// assert_sequence_equal(&from_vec(vec![1, 2, 3]).skip(1), &[2, 3]);
/// ```
pub fn assert_sequence_equal<T>(actual: &Enumerable<T>, expected: &[T])
where
    T: SeqBound + Debug + PartialEq,
{
    let actual = actual.to_array();
    assert_eq!(
        actual.len(),
        expected.len(),
        "Sequence length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a, e,
            "Sequence mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that a sequence yields the same multiset of elements as `expected`.
///
/// # Panics
///
/// Panics if any element occurs a different number of times.
pub fn assert_sequence_unordered_equal<T>(actual: &Enumerable<T>, expected: &[T])
where
    T: SeqBound + Debug + Eq + Hash,
{
    let actual = actual.to_array();
    let mut counts: HashMap<&T, isize> = HashMap::new();
    for a in &actual {
        *counts.entry(a).or_default() += 1;
    }
    for e in expected {
        *counts.entry(e).or_default() -= 1;
    }
    let extra: Vec<_> = counts.iter().filter(|(_, n)| **n > 0).map(|(t, _)| *t).collect();
    let missing: Vec<_> = counts.iter().filter(|(_, n)| **n < 0).map(|(t, _)| *t).collect();
    assert!(
        extra.is_empty() && missing.is_empty(),
        "Sequence content mismatch:\n  Missing elements: {missing:?}\n  Extra elements: {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that every element satisfies `predicate`.
///
/// # Panics
///
/// Panics on the first element that fails, naming its index.
pub fn assert_all<T: SeqBound + Debug>(sequence: &Enumerable<T>, predicate: impl Fn(&T) -> bool) {
    for (i, item) in sequence.iter().enumerate() {
        assert!(predicate(&item), "Element at index {i} failed predicate: {item:?}");
    }
}

/// Assert that no element satisfies `predicate`.
///
/// # Panics
///
/// Panics on the first element that matches, naming its index.
pub fn assert_none<T: SeqBound + Debug>(sequence: &Enumerable<T>, predicate: impl Fn(&T) -> bool) {
    for (i, item) in sequence.iter().enumerate() {
        assert!(!predicate(&item), "Element at index {i} unexpectedly matched predicate: {item:?}");
    }
}

/// Assert that a sequence has exactly `expected` elements.
///
/// # Panics
///
/// Panics if the count differs.
pub fn assert_sequence_len<T: SeqBound>(sequence: &Enumerable<T>, expected: usize) {
    let actual = sequence.count();
    assert_eq!(
        actual, expected,
        "Sequence size mismatch:\n  Expected: {expected}\n  Actual: {actual}"
    );
}
