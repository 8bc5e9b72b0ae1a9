//! Deferred multi-key ordering.
//!
//! # Overview
//! - [`Enumerable::order_by`] / [`Enumerable::order_by_descending`] /
//!   [`Enumerable::order_by_with`] start an [`OrderedEnumerable`]
//! - [`OrderedEnumerable::then_by`] and friends append tie-break keys
//!
//! Sort keys accumulate in an append-only list; nothing is sorted until the
//! sequence is enumerated. Each enumeration drains the upstream once and runs
//! one stable sort with a composite comparator that walks the keys left to
//! right and stops at the first non-equal result.
//!
//! # Example
//! ```
//! use ironseq::from_vec;
//!
//! let rows = from_vec(vec![(1, 3), (0, 9), (1, 1)]);
//! let sorted = rows.order_by(|r| r.0).then_by_descending(|r| r.1);
//! assert_eq!(sorted.to_array(), vec![(0, 9), (1, 3), (1, 1)]);
//! ```

use crate::cursor::{BoxCursor, Deferred, from_iterator};
use crate::enumerable::{Enumerable, SeqBound};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use tracing::debug;

/// Sort direction of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// `Ascending` leaves the ordering unchanged, `Descending` reverses it.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// One entry of an ordering: an element comparator plus a direction.
pub struct SortKey<T> {
    compare: Rc<dyn Fn(&T, &T) -> Ordering>,
    direction: Direction,
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Rc::clone(&self.compare),
            direction: self.direction,
        }
    }
}

impl<T: 'static> SortKey<T> {
    /// Key comparing the projections of `key` with `compare`.
    pub fn new<K, S, F>(key: S, compare: F, direction: Direction) -> Self
    where
        S: Fn(&T) -> K + 'static,
        F: Fn(&K, &K) -> Ordering + 'static,
    {
        Self {
            compare: Rc::new(move |a: &T, b: &T| compare(&key(a), &key(b))),
            direction,
        }
    }

    /// Key comparing projections by their `Ord` impl.
    pub fn by<K: Ord + 'static, S>(key: S, direction: Direction) -> Self
    where
        S: Fn(&T) -> K + 'static,
    {
        Self::new(key, K::cmp, direction)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        self.direction.apply((self.compare)(a, b))
    }
}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortKey")
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

fn compare_all<T>(keys: &[SortKey<T>], a: &T, b: &T) -> Ordering
where
    T: 'static,
{
    keys.iter()
        .map(|k| k.compare(a, b))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// A sequence with an attached, still-unapplied list of sort keys.
///
/// Dereferences to the sorted [`Enumerable`], so every sequence operator is
/// available on it directly.
pub struct OrderedEnumerable<T> {
    source: Enumerable<T>,
    keys: Vec<SortKey<T>>,
    sorted: Enumerable<T>,
}

impl<T: SeqBound> OrderedEnumerable<T> {
    fn new(source: Enumerable<T>, keys: Vec<SortKey<T>>) -> Self {
        let shared: Rc<[SortKey<T>]> = Rc::from(keys.clone());
        let up = source.clone();
        let sorted = Enumerable::from_cursor_fn(move || {
            let up = up.clone();
            let keys = Rc::clone(&shared);
            Deferred::new(move || {
                let mut rows = up.to_array();
                rows.sort_by(|a, b| compare_all(&keys, a, b));
                debug!(elements = rows.len(), keys = keys.len(), "sorted sequence");
                Box::new(from_iterator(rows)) as BoxCursor<T>
            })
        });
        Self {
            source,
            keys,
            sorted,
        }
    }

    /// Extend the ordering with an arbitrary [`SortKey`].
    #[must_use]
    pub fn then_by_key(&self, key: SortKey<T>) -> Self {
        let mut keys = self.keys.clone();
        keys.push(key);
        Self::new(self.source.clone(), keys)
    }

    /// Break ties by `key`, ascending.
    #[must_use]
    pub fn then_by<K: Ord + 'static, S>(&self, key: S) -> Self
    where
        S: Fn(&T) -> K + 'static,
    {
        self.then_by_key(SortKey::by(key, Direction::Ascending))
    }

    /// Break ties by `key`, descending. Only the tie-break is reversed.
    #[must_use]
    pub fn then_by_descending<K: Ord + 'static, S>(&self, key: S) -> Self
    where
        S: Fn(&T) -> K + 'static,
    {
        self.then_by_key(SortKey::by(key, Direction::Descending))
    }

    /// Break ties by `key` under a custom comparison.
    #[must_use]
    pub fn then_by_with<K, S, F>(&self, key: S, compare: F, direction: Direction) -> Self
    where
        S: Fn(&T) -> K + 'static,
        F: Fn(&K, &K) -> Ordering + 'static,
    {
        self.then_by_key(SortKey::new(key, compare, direction))
    }

    /// The sort keys, primary first.
    pub fn keys(&self) -> &[SortKey<T>] {
        &self.keys
    }

    /// The sorted sequence as a plain [`Enumerable`].
    pub fn into_enumerable(self) -> Enumerable<T> {
        self.sorted
    }
}

impl<T> Deref for OrderedEnumerable<T> {
    type Target = Enumerable<T>;

    fn deref(&self) -> &Enumerable<T> {
        &self.sorted
    }
}

impl<T> Clone for OrderedEnumerable<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            keys: self.keys.clone(),
            sorted: self.sorted.clone(),
        }
    }
}

impl<T> From<OrderedEnumerable<T>> for Enumerable<T> {
    fn from(ordered: OrderedEnumerable<T>) -> Self {
        ordered.sorted
    }
}

impl<T: SeqBound> IntoIterator for &OrderedEnumerable<T> {
    type Item = T;
    type IntoIter = crate::enumerable::Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted.iter()
    }
}

impl<T> fmt::Debug for OrderedEnumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedEnumerable")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl<T: SeqBound> Enumerable<T> {
    /// Sort ascending by `key`.
    #[must_use]
    pub fn order_by<K: Ord + 'static, S>(&self, key: S) -> OrderedEnumerable<T>
    where
        S: Fn(&T) -> K + 'static,
    {
        self.order_by_key(SortKey::by(key, Direction::Ascending))
    }

    /// Sort descending by `key`.
    #[must_use]
    pub fn order_by_descending<K: Ord + 'static, S>(&self, key: S) -> OrderedEnumerable<T>
    where
        S: Fn(&T) -> K + 'static,
    {
        self.order_by_key(SortKey::by(key, Direction::Descending))
    }

    /// Sort by `key` under a custom comparison.
    ///
    /// # Example
    /// ```
    /// use ironseq::{from_vec, Direction};
    ///
    /// let words = from_vec(vec!["bb", "A", "c"]);
    /// let sorted = words.order_by_with(|w| w.to_lowercase(), |a, b| a.cmp(b), Direction::Ascending);
    /// assert_eq!(sorted.to_array(), vec!["A", "bb", "c"]);
    /// ```
    #[must_use]
    pub fn order_by_with<K, S, F>(&self, key: S, compare: F, direction: Direction) -> OrderedEnumerable<T>
    where
        S: Fn(&T) -> K + 'static,
        F: Fn(&K, &K) -> Ordering + 'static,
    {
        self.order_by_key(SortKey::new(key, compare, direction))
    }

    /// Start an ordering from an arbitrary [`SortKey`].
    #[must_use]
    pub fn order_by_key(&self, key: SortKey<T>) -> OrderedEnumerable<T> {
        OrderedEnumerable::new(self.clone(), vec![key])
    }
}
