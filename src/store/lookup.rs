use super::dictionary::{Dictionary, Entries};
use crate::comparer::{DefaultComparer, EqualityComparer};
use crate::enumerable::{Enumerable, SeqBound};
use crate::error::Result;
use std::fmt;

/// Read-only view of a keyed store.
///
/// Produced by [`Enumerable::to_lookup`] and [`Dictionary::into_lookup`]; it
/// exposes the query half of [`Dictionary`] and nothing that mutates.
pub struct Lookup<K, V, C = DefaultComparer> {
    inner: Dictionary<K, V, C>,
}

impl<K, V, C> From<Dictionary<K, V, C>> for Lookup<K, V, C> {
    fn from(inner: Dictionary<K, V, C>) -> Self {
        Self { inner }
    }
}

impl<K, V, C> Lookup<K, V, C> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn comparer(&self) -> &C {
        self.inner.comparer()
    }

    pub fn iter(&self) -> Entries<'_, K, V> {
        self.inner.iter()
    }
}

impl<K, V, C: EqualityComparer<K>> Lookup<K, V, C> {
    /// # Errors
    /// [`QueryError::KeyNotFound`](crate::QueryError::KeyNotFound) if absent.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.inner.get(key)
    }

    pub fn try_get_value(&self, key: &K) -> Option<&V> {
        self.inner.try_get_value(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }
}

impl<K: SeqBound, V, C> Lookup<K, V, C> {
    pub fn keys(&self) -> Enumerable<K> {
        self.inner.keys()
    }
}

impl<K, V: SeqBound, C> Lookup<K, V, C> {
    pub fn values(&self) -> Enumerable<V> {
        self.inner.values()
    }
}

impl<K: SeqBound, V: SeqBound, C> Lookup<K, V, C> {
    pub fn to_enumerable(&self) -> Enumerable<(K, V)> {
        self.inner.to_enumerable()
    }
}

impl<'a, K, V, C> IntoIterator for &'a Lookup<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Lookup<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lookup").field(&self.inner).finish()
    }
}
