//! Key-based grouping and eager keyed conversions.
//!
//! # Overview
//! - [`Enumerable::group_by`] / [`Enumerable::group_by_with`] - lazy sequence of [`Grouping`]s
//! - [`Enumerable::to_dictionary`] and variants - eager, unique-key [`Dictionary`]
//! - [`Enumerable::to_lookup`] and variants - the same, frozen into a [`Lookup`]
//!
//! Groups come out in first-occurrence order of their keys, and members keep
//! their source order. Building the groups drains the whole source, but only
//! once the grouped sequence is first pulled.

use crate::comparer::{DefaultComparer, DefaultHash, EqualityComparer};
use crate::cursor::{BoxCursor, Deferred, from_iterator};
use crate::error::Result;
use crate::{Dictionary, Enumerable, Lookup, SeqBound, from_vec};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// A key together with the elements that share it.
#[derive(Clone)]
pub struct Grouping<K, T> {
    key: K,
    values: Enumerable<T>,
}

impl<K, T> Grouping<K, T> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The members, lazily enumerable and in source order.
    pub fn values(&self) -> &Enumerable<T> {
        &self.values
    }

    pub fn into_parts(self) -> (K, Enumerable<T>) {
        (self.key, self.values)
    }
}

impl<K: fmt::Debug, T> fmt::Debug for Grouping<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grouping").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Drain `rows` into a keyed index of members, one entry per distinct key.
pub(crate) fn group_index<T, K, C>(
    rows: impl Iterator<Item = T>,
    key: impl Fn(&T) -> K,
    comparer: C,
) -> Dictionary<K, Vec<T>, C>
where
    C: EqualityComparer<K>,
{
    let mut index = Dictionary::with_comparer(comparer);
    for row in rows {
        index.get_or_insert_with(key(&row), Vec::new).push(row);
    }
    index
}

impl<T: SeqBound> Enumerable<T> {
    /// Group elements by `key` under the default comparer.
    ///
    /// # Example
    /// ```
    /// use ironseq::from_vec;
    ///
    /// let groups = from_vec(vec![1, 2, 3, 4, 5]).group_by(|n| n % 2 == 0);
    /// let shaped: Vec<(bool, Vec<i32>)> = groups
    ///     .select(|g| (*g.key(), g.values().to_array()))
    ///     .to_array();
    /// assert_eq!(shaped, vec![(false, vec![1, 3, 5]), (true, vec![2, 4])]);
    /// ```
    #[must_use]
    pub fn group_by<K, S>(&self, key: S) -> Enumerable<Grouping<K, T>>
    where
        K: SeqBound + DefaultHash,
        S: Fn(&T) -> K + 'static,
    {
        self.group_by_with(key, DefaultComparer::new())
    }

    /// Group elements by `key` under `comparer`.
    #[must_use]
    pub fn group_by_with<K, S, C>(&self, key: S, comparer: C) -> Enumerable<Grouping<K, T>>
    where
        K: SeqBound,
        S: Fn(&T) -> K + 'static,
        C: EqualityComparer<K> + Clone + 'static,
    {
        let up = self.clone();
        let key = Rc::new(key);
        Enumerable::from_cursor_fn(move || {
            let up = up.clone();
            let key = Rc::clone(&key);
            let comparer = comparer.clone();
            Deferred::new(move || {
                let index = group_index(up.iter(), |t| key(t), comparer);
                debug!(groups = index.len(), "built groups");
                let groups = index.into_pairs().into_iter().map(|(key, members)| Grouping {
                    key,
                    values: from_vec(members),
                });
                Box::new(from_iterator(groups)) as BoxCursor<Grouping<K, T>>
            })
        })
    }

    /// Eager dictionary of elements keyed by `key`.
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`](crate::QueryError::DuplicateKey) if two
    /// elements produce equal keys.
    pub fn to_dictionary<K, S>(&self, key: S) -> Result<Dictionary<K, T>>
    where
        K: DefaultHash,
        S: Fn(&T) -> K,
    {
        self.to_dictionary_with(key, |t| t, DefaultComparer::new())
    }

    /// Eager dictionary of `value(element)` keyed by `key(&element)`.
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`](crate::QueryError::DuplicateKey) on equal keys.
    pub fn to_dictionary_select<K, V, S, P>(&self, key: S, value: P) -> Result<Dictionary<K, V>>
    where
        K: DefaultHash,
        S: Fn(&T) -> K,
        P: Fn(T) -> V,
    {
        self.to_dictionary_with(key, value, DefaultComparer::new())
    }

    /// Eager dictionary under an explicit comparer.
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`](crate::QueryError::DuplicateKey) on keys
    /// equal under `comparer`.
    pub fn to_dictionary_with<K, V, S, P, C>(&self, key: S, value: P, comparer: C) -> Result<Dictionary<K, V, C>>
    where
        S: Fn(&T) -> K,
        P: Fn(T) -> V,
        C: EqualityComparer<K>,
    {
        let mut dict = Dictionary::with_comparer(comparer);
        for item in self {
            let k = key(&item);
            dict.add(k, value(item))?;
        }
        debug!(entries = dict.len(), "built dictionary");
        Ok(dict)
    }

    /// Eager read-only lookup of elements keyed by `key`.
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`](crate::QueryError::DuplicateKey) on equal keys.
    pub fn to_lookup<K, S>(&self, key: S) -> Result<Lookup<K, T>>
    where
        K: DefaultHash,
        S: Fn(&T) -> K,
    {
        self.to_dictionary(key).map(Dictionary::into_lookup)
    }

    /// # Errors
    /// [`QueryError::DuplicateKey`](crate::QueryError::DuplicateKey) on equal keys.
    pub fn to_lookup_select<K, V, S, P>(&self, key: S, value: P) -> Result<Lookup<K, V>>
    where
        K: DefaultHash,
        S: Fn(&T) -> K,
        P: Fn(T) -> V,
    {
        self.to_dictionary_select(key, value).map(Dictionary::into_lookup)
    }

    /// # Errors
    /// [`QueryError::DuplicateKey`](crate::QueryError::DuplicateKey) on keys
    /// equal under `comparer`.
    pub fn to_lookup_with<K, V, S, P, C>(&self, key: S, value: P, comparer: C) -> Result<Lookup<K, V, C>>
    where
        S: Fn(&T) -> K,
        P: Fn(T) -> V,
        C: EqualityComparer<K>,
    {
        self.to_dictionary_with(key, value, comparer).map(Dictionary::into_lookup)
    }
}
