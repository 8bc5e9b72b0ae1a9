//! Hash joins between two sequences.
//!
//! Both joins index the inner sequence once by its key into a [`Dictionary`]
//! (O(m)), then scan the outer sequence once (O(n)), looking up each outer
//! key in expected O(1). The index is built on the first pull of each
//! enumeration, not when the join is constructed.
//!
//! ## Available operations
//! - [`Enumerable::join`] - inner join; outer rows with no match are dropped
//! - [`Enumerable::group_join`] - exactly one result per outer row, carrying the
//!   (possibly empty) matched inner rows
//!
//! Both have `*_with` forms taking an explicit [`EqualityComparer`].
//!
//! ## Example
//! ```
//! use ironseq::from_vec;
//!
//! let people = from_vec(vec![(1, "ann"), (2, "bob"), (3, "cid")]);
//! let pets = from_vec(vec![(1, "rex"), (1, "tom"), (3, "kit")]);
//!
//! let pairs = people.join(&pets, |p| p.0, |q| q.0, |p, q| format!("{}:{}", p.1, q.1));
//! assert_eq!(pairs.to_array(), vec!["ann:rex", "ann:tom", "cid:kit"]);
//!
//! let counts = people.group_join(&pets, |p| p.0, |q| q.0, |p, qs| (p.1, qs.count()));
//! assert_eq!(counts.to_array(), vec![("ann", 2), ("bob", 0), ("cid", 1)]);
//! ```

use crate::comparer::{DefaultComparer, DefaultHash, EqualityComparer};
use crate::cursor::{BoxCursor, Cursor, CursorFactory};
use crate::enumerable::from_shared;
use crate::helpers::grouping::group_index;
use crate::{Dictionary, Enumerable, SeqBound};
use std::rc::Rc;
use tracing::debug;

/// Index the inner side: one entry per distinct key, members in source order.
fn inner_index<I, K, C>(
    inner: &CursorFactory<I>,
    key: &dyn Fn(&I) -> K,
    comparer: C,
) -> Dictionary<K, Rc<[I]>, C>
where
    C: EqualityComparer<K>,
{
    let mut rows = inner();
    let index = group_index(std::iter::from_fn(|| rows.next()), key, comparer);
    debug!(keys = index.len(), "built join index");
    index.map_values(|rows: Vec<I>| Rc::<[I]>::from(rows))
}

struct JoinSide<I, K, C> {
    inner: CursorFactory<I>,
    inner_key: Rc<dyn Fn(&I) -> K>,
    comparer: C,
    index: Option<Dictionary<K, Rc<[I]>, C>>,
}

impl<I, K, C: EqualityComparer<K> + Clone> JoinSide<I, K, C> {
    fn new(inner: &CursorFactory<I>, inner_key: &Rc<dyn Fn(&I) -> K>, comparer: &C) -> Self {
        Self {
            inner: Rc::clone(inner),
            inner_key: Rc::clone(inner_key),
            comparer: comparer.clone(),
            index: None,
        }
    }

    fn index(&mut self) -> &Dictionary<K, Rc<[I]>, C> {
        let (inner, key, comparer) = (&self.inner, &self.inner_key, &self.comparer);
        self.index
            .get_or_insert_with(|| inner_index(inner, &**key, comparer.clone()))
    }
}

struct JoinCursor<T, I, K, R, C> {
    up: BoxCursor<T>,
    side: JoinSide<I, K, C>,
    outer_key: Rc<dyn Fn(&T) -> K>,
    result: Rc<dyn Fn(&T, &I) -> R>,
    current: Option<(T, Rc<[I]>, usize)>,
}
impl<T, I, K, R, C: EqualityComparer<K> + Clone> Cursor<R> for JoinCursor<T, I, K, R, C> {
    fn next(&mut self) -> Option<R> {
        loop {
            if let Some((outer, matches, pos)) = self.current.as_mut() {
                if let Some(inner) = matches.get(*pos) {
                    *pos += 1;
                    return Some((self.result)(outer, inner));
                }
                self.current = None;
            }
            let outer = self.up.next()?;
            let key = (self.outer_key)(&outer);
            if let Some(matches) = self.side.index().try_get_value(&key) {
                self.current = Some((outer, Rc::clone(matches), 0));
            }
        }
    }
}

struct GroupJoinCursor<T, I, K, R, C> {
    up: BoxCursor<T>,
    side: JoinSide<I, K, C>,
    outer_key: Rc<dyn Fn(&T) -> K>,
    result: Rc<dyn Fn(T, Enumerable<I>) -> R>,
}
impl<T, I: SeqBound, K, R, C: EqualityComparer<K> + Clone> Cursor<R> for GroupJoinCursor<T, I, K, R, C> {
    fn next(&mut self) -> Option<R> {
        let outer = self.up.next()?;
        let key = (self.outer_key)(&outer);
        let matches = match self.side.index().try_get_value(&key) {
            Some(rows) => from_shared(Rc::clone(rows)),
            None => Enumerable::empty(),
        };
        Some((self.result)(outer, matches))
    }
}

impl<T: SeqBound> Enumerable<T> {
    /// Inner join with `inner` on equal keys under the default comparer.
    #[must_use]
    pub fn join<I, K, R, OK, IK, F>(&self, inner: &Enumerable<I>, outer_key: OK, inner_key: IK, result: F) -> Enumerable<R>
    where
        I: SeqBound,
        K: DefaultHash + 'static,
        R: SeqBound,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        F: Fn(&T, &I) -> R + 'static,
    {
        self.join_with(inner, outer_key, inner_key, result, DefaultComparer::new())
    }

    /// Inner join under an explicit key comparer.
    #[must_use]
    pub fn join_with<I, K, R, OK, IK, F, C>(
        &self,
        inner: &Enumerable<I>,
        outer_key: OK,
        inner_key: IK,
        result: F,
        comparer: C,
    ) -> Enumerable<R>
    where
        I: SeqBound,
        K: 'static,
        R: SeqBound,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        F: Fn(&T, &I) -> R + 'static,
        C: EqualityComparer<K> + Clone + 'static,
    {
        let inner = Rc::clone(&inner.factory);
        let outer_key: Rc<dyn Fn(&T) -> K> = Rc::new(outer_key);
        let inner_key: Rc<dyn Fn(&I) -> K> = Rc::new(inner_key);
        let result: Rc<dyn Fn(&T, &I) -> R> = Rc::new(result);
        self.derive(move |up| JoinCursor {
            up,
            side: JoinSide::new(&inner, &inner_key, &comparer),
            outer_key: Rc::clone(&outer_key),
            result: Rc::clone(&result),
            current: None,
        })
    }

    /// One result per outer element, paired with its matching inner elements.
    #[must_use]
    pub fn group_join<I, K, R, OK, IK, F>(
        &self,
        inner: &Enumerable<I>,
        outer_key: OK,
        inner_key: IK,
        result: F,
    ) -> Enumerable<R>
    where
        I: SeqBound,
        K: DefaultHash + 'static,
        R: SeqBound,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        F: Fn(T, Enumerable<I>) -> R + 'static,
    {
        self.group_join_with(inner, outer_key, inner_key, result, DefaultComparer::new())
    }

    #[must_use]
    pub fn group_join_with<I, K, R, OK, IK, F, C>(
        &self,
        inner: &Enumerable<I>,
        outer_key: OK,
        inner_key: IK,
        result: F,
        comparer: C,
    ) -> Enumerable<R>
    where
        I: SeqBound,
        K: 'static,
        R: SeqBound,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        F: Fn(T, Enumerable<I>) -> R + 'static,
        C: EqualityComparer<K> + Clone + 'static,
    {
        let inner = Rc::clone(&inner.factory);
        let outer_key: Rc<dyn Fn(&T) -> K> = Rc::new(outer_key);
        let inner_key: Rc<dyn Fn(&I) -> K> = Rc::new(inner_key);
        let result: Rc<dyn Fn(T, Enumerable<I>) -> R> = Rc::new(result);
        self.derive(move |up| GroupJoinCursor {
            up,
            side: JoinSide::new(&inner, &inner_key, &comparer),
            outer_key: Rc::clone(&outer_key),
            result: Rc::clone(&result),
        })
    }
}
