use super::lookup::Lookup;
use super::table::{Entry, ProbeTable};
use crate::comparer::{DefaultComparer, DefaultHash, EqualityComparer};
use crate::config::StoreOptions;
use crate::enumerable::{Enumerable, SeqBound, from_vec};
use crate::error::{QueryError, Result};
use std::fmt;

/// Mutable unique-key store with pluggable equality.
///
/// Keys are unique under the comparer `C`. Enumeration (of the store, its
/// keys, or its values) always follows first-insertion order.
///
/// # Example
/// ```
/// use ironseq::{Dictionary, QueryError};
///
/// let mut d = Dictionary::new();
/// d.add(5, 5).unwrap();
/// assert_eq!(d.add(5, 6), Err(QueryError::DuplicateKey));
/// d.add_or_replace(5, 6);
/// assert_eq!(d.get(&5), Ok(&6));
/// assert_eq!(d.try_get_value(&7), None);
/// ```
pub struct Dictionary<K, V, C = DefaultComparer> {
    table: ProbeTable<K, V>,
    comparer: C,
}

impl<K, V> Dictionary<K, V> {
    /// Empty store using the [`DefaultComparer`].
    pub fn new() -> Self {
        Self::with_comparer(DefaultComparer::new())
    }
}

impl<K, V> Default for Dictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: DefaultHash, V> Dictionary<K, V> {
    /// Store seeded from key/value pairs using the [`DefaultComparer`].
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`] if two pairs share a key.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs_with(pairs, DefaultComparer::new())
    }
}

impl<K, V, C> Dictionary<K, V, C> {
    /// Empty store using `comparer` and default [`StoreOptions`].
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            table: ProbeTable::new(StoreOptions::default()),
            comparer,
        }
    }

    /// Empty store using `comparer` and explicit options.
    ///
    /// # Errors
    /// [`QueryError::InvalidArguments`] if the options fail validation.
    pub fn with_options(comparer: C, options: StoreOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            table: ProbeTable::new(options),
            comparer,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Current number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn options(&self) -> StoreOptions {
        self.table.options()
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Borrowing iterator over `(key, value)` in insertion order.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries {
            inner: self.table.entries().iter(),
        }
    }

    /// Freeze into a read-only [`Lookup`].
    pub fn into_lookup(self) -> Lookup<K, V, C> {
        Lookup::from(self)
    }

    /// Consume the store into its pairs, in insertion order.
    pub fn into_pairs(self) -> Vec<(K, V)> {
        self.table
            .into_entries()
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect()
    }

    pub(crate) fn map_values<W>(self, f: impl FnMut(V) -> W) -> Dictionary<K, W, C> {
        Dictionary {
            table: self.table.map_values(f),
            comparer: self.comparer,
        }
    }
}

impl<K, V, C: EqualityComparer<K>> Dictionary<K, V, C> {
    /// Store seeded from key/value pairs.
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`] if two pairs share a key under `comparer`.
    pub fn from_pairs_with<I>(pairs: I, comparer: C) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut d = Self::with_comparer(comparer);
        for (k, v) in pairs {
            d.add(k, v)?;
        }
        Ok(d)
    }

    /// Insert a new key.
    ///
    /// # Errors
    /// [`QueryError::DuplicateKey`] if an equal key is already present; the
    /// store is left unchanged.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        match self.table.insert(&self.comparer, key, value) {
            Ok(_) => Ok(()),
            Err(_) => Err(QueryError::DuplicateKey),
        }
    }

    /// Insert a new key, returning `false` (and dropping the pair) if an equal
    /// key is already present.
    pub fn try_add(&mut self, key: K, value: V) -> bool {
        self.table.insert(&self.comparer, key, value).is_ok()
    }

    /// Insert, or overwrite the existing value in place. Insertion order of an
    /// existing key is not disturbed, and the originally stored key is kept.
    pub fn add_or_replace(&mut self, key: K, value: V) {
        if let Err((index, _, value)) = self.table.insert(&self.comparer, key, value) {
            *self.table.value_mut(index) = value;
        }
    }

    /// Value stored under `key`.
    ///
    /// # Errors
    /// [`QueryError::KeyNotFound`] if no equal key is present.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.try_get_value(key).ok_or(QueryError::KeyNotFound)
    }

    pub fn try_get_value(&self, key: &K) -> Option<&V> {
        self.table
            .find(&self.comparer, key)
            .map(|index| &self.table.entry(index).value)
    }

    pub fn try_get_value_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.table.find(&self.comparer, key)?;
        Some(self.table.value_mut(index))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.table.find(&self.comparer, key).is_some()
    }

    /// Value under `key`, inserting `default()` first if the key is new.
    pub(crate) fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.table.find(&self.comparer, &key) {
            Some(index) => index,
            None => match self.table.insert(&self.comparer, key, default()) {
                Ok(index) | Err((index, _, _)) => index,
            },
        };
        self.table.value_mut(index)
    }
}

impl<K: SeqBound, V, C> Dictionary<K, V, C> {
    /// Lazy sequence of the keys in insertion order.
    ///
    /// The keys are snapshotted when this is called; later additions to the
    /// store are not observed by the returned sequence.
    pub fn keys(&self) -> Enumerable<K> {
        from_vec(self.table.entries().iter().map(|e| e.key.clone()).collect())
    }
}

impl<K, V: SeqBound, C> Dictionary<K, V, C> {
    /// Lazy sequence of the values in key insertion order (snapshot).
    pub fn values(&self) -> Enumerable<V> {
        from_vec(self.table.entries().iter().map(|e| e.value.clone()).collect())
    }
}

impl<K: SeqBound, V: SeqBound, C> Dictionary<K, V, C> {
    /// Lazy sequence of `(key, value)` pairs in insertion order (snapshot).
    pub fn to_enumerable(&self) -> Enumerable<(K, V)> {
        from_vec(
            self.table
                .entries()
                .iter()
                .map(|e| (e.key.clone(), e.value.clone()))
                .collect(),
        )
    }
}

impl<'a, K, V, C> IntoIterator for &'a Dictionary<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Dictionary<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a keyed store, in insertion order.
pub struct Entries<'a, K, V> {
    inner: std::slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}
