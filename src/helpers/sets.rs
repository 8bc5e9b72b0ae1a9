//! Set operators over keyed-store membership.
//!
//! # Overview
//! - [`Enumerable::distinct`] / [`Enumerable::distinct_by`] - first element per equivalence class
//! - [`Enumerable::union`] - distinct elements of both sides
//! - [`Enumerable::intersect`] - distinct elements of the left side also present on the right
//! - [`Enumerable::except`] - distinct elements of the left side absent from the right
//!
//! Every operator has a `*_with` form taking an explicit [`EqualityComparer`].
//! Output always follows first-occurrence order on the left operand.
//! Membership is answered by a [`Dictionary`], never by rescanning.
//!
//! ```
//! use ironseq::from_vec;
//!
//! let s = from_vec(vec![1, 1, 2, 3, 3, 3, 5]);
//! assert_eq!(s.distinct().to_array(), vec![1, 2, 3, 5]);
//! let e = from_vec(vec![1, 2, 3, 4, 5]).except(&from_vec(vec![2, 4]));
//! assert_eq!(e.to_array(), vec![1, 3, 5]);
//! ```

use crate::comparer::{DefaultComparer, DefaultHash, EqualityComparer};
use crate::cursor::{BoxCursor, Cursor, CursorFactory};
use crate::{Dictionary, Enumerable, SeqBound};
use std::rc::Rc;
use tracing::debug;

struct DistinctCursor<T, K, C> {
    up: BoxCursor<T>,
    key: Rc<dyn Fn(&T) -> K>,
    seen: Dictionary<K, (), C>,
}
impl<T, K, C: EqualityComparer<K>> Cursor<T> for DistinctCursor<T, K, C> {
    fn next(&mut self) -> Option<T> {
        while let Some(item) = self.up.next() {
            if self.seen.try_add((self.key)(&item), ()) {
                return Some(item);
            }
        }
        None
    }
}

struct IntersectCursor<T, C> {
    up: BoxCursor<T>,
    other: CursorFactory<T>,
    comparer: Option<C>,
    // value: whether the element has been emitted already
    index: Option<Dictionary<T, bool, C>>,
}
impl<T, C: EqualityComparer<T>> Cursor<T> for IntersectCursor<T, C> {
    fn next(&mut self) -> Option<T> {
        if let Some(comparer) = self.comparer.take() {
            let mut index = Dictionary::with_comparer(comparer);
            let mut other = (self.other)();
            while let Some(item) = other.next() {
                index.try_add(item, false);
            }
            debug!(entries = index.len(), "built intersect index");
            self.index = Some(index);
        }
        let index = self.index.as_mut()?;
        while let Some(item) = self.up.next() {
            if let Some(emitted) = index.try_get_value_mut(&item) {
                if !*emitted {
                    *emitted = true;
                    return Some(item);
                }
            }
        }
        None
    }
}

struct ExceptCursor<T, C> {
    up: BoxCursor<T>,
    other: CursorFactory<T>,
    comparer: Option<C>,
    excluded: Option<Dictionary<T, (), C>>,
}
impl<T: Clone, C: EqualityComparer<T>> Cursor<T> for ExceptCursor<T, C> {
    fn next(&mut self) -> Option<T> {
        if let Some(comparer) = self.comparer.take() {
            let mut excluded = Dictionary::with_comparer(comparer);
            let mut other = (self.other)();
            while let Some(item) = other.next() {
                excluded.try_add(item, ());
            }
            debug!(entries = excluded.len(), "built except index");
            self.excluded = Some(excluded);
        }
        let excluded = self.excluded.as_mut()?;
        while let Some(item) = self.up.next() {
            if excluded.try_add(item.clone(), ()) {
                return Some(item);
            }
        }
        None
    }
}

impl<T: SeqBound> Enumerable<T> {
    /// Distinct elements under the default comparer, in first-seen order.
    #[must_use]
    pub fn distinct(&self) -> Self
    where
        T: DefaultHash,
    {
        self.distinct_with(DefaultComparer::new())
    }

    #[must_use]
    pub fn distinct_with<C>(&self, comparer: C) -> Self
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        self.distinct_by_with(T::clone, comparer)
    }

    /// First element for each distinct `key`, in first-seen order.
    ///
    /// # Example
    /// ```
    /// use ironseq::from_vec;
    ///
    /// let people = from_vec(vec![("ann", 30), ("bob", 30), ("cid", 41)]);
    /// let by_age = people.distinct_by(|p| p.1);
    /// assert_eq!(by_age.to_array(), vec![("ann", 30), ("cid", 41)]);
    /// ```
    #[must_use]
    pub fn distinct_by<K, S>(&self, key: S) -> Self
    where
        K: DefaultHash + 'static,
        S: Fn(&T) -> K + 'static,
    {
        self.distinct_by_with(key, DefaultComparer::new())
    }

    #[must_use]
    pub fn distinct_by_with<K, S, C>(&self, key: S, comparer: C) -> Self
    where
        K: 'static,
        S: Fn(&T) -> K + 'static,
        C: EqualityComparer<K> + Clone + 'static,
    {
        let key: Rc<dyn Fn(&T) -> K> = Rc::new(key);
        self.derive(move |up| DistinctCursor {
            up,
            key: Rc::clone(&key),
            seen: Dictionary::with_comparer(comparer.clone()),
        })
    }

    /// Distinct elements of `self` followed by those of `other` not yet seen.
    #[must_use]
    pub fn union(&self, other: &Enumerable<T>) -> Self
    where
        T: DefaultHash,
    {
        self.union_with(other, DefaultComparer::new())
    }

    #[must_use]
    pub fn union_with<C>(&self, other: &Enumerable<T>, comparer: C) -> Self
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        self.concat(other).distinct_with(comparer)
    }

    /// Distinct elements of `self` that also occur in `other`.
    #[must_use]
    pub fn intersect(&self, other: &Enumerable<T>) -> Self
    where
        T: DefaultHash,
    {
        self.intersect_with(other, DefaultComparer::new())
    }

    #[must_use]
    pub fn intersect_with<C>(&self, other: &Enumerable<T>, comparer: C) -> Self
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        let other = Rc::clone(&other.factory);
        self.derive(move |up| IntersectCursor {
            up,
            other: Rc::clone(&other),
            comparer: Some(comparer.clone()),
            index: None,
        })
    }

    /// Distinct elements of `self` that do not occur in `other`.
    #[must_use]
    pub fn except(&self, other: &Enumerable<T>) -> Self
    where
        T: DefaultHash,
    {
        self.except_with(other, DefaultComparer::new())
    }

    #[must_use]
    pub fn except_with<C>(&self, other: &Enumerable<T>, comparer: C) -> Self
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        let other = Rc::clone(&other.factory);
        self.derive(move |up| ExceptCursor {
            up,
            other: Rc::clone(&other),
            comparer: Some(comparer.clone()),
            excluded: None,
        })
    }
}
