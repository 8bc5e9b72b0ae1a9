//! Pull cursors: the unit of iteration every operator produces and consumes.
//!
//! A [`Cursor`] hands out one element per [`Cursor::next`] call until it is
//! exhausted, after which every further call returns `None` again. Each
//! operator in the crate has its own small cursor struct holding exactly the
//! state that operator needs; a pipeline is a chain of boxed cursors built
//! fresh by a [`CursorFactory`] on every enumeration.

use std::rc::Rc;

/// Pull interface over a lazy, possibly infinite, sequence.
///
/// Implementations must keep returning `None` once they have returned it.
pub trait Cursor<T> {
    fn next(&mut self) -> Option<T>;
}

impl<T, C: Cursor<T> + ?Sized> Cursor<T> for Box<C> {
    fn next(&mut self) -> Option<T> {
        (**self).next()
    }
}

pub type BoxCursor<T> = Box<dyn Cursor<T>>;

/// Zero-argument function returning a fresh, independent cursor per call.
pub type CursorFactory<T> = Rc<dyn Fn() -> BoxCursor<T>>;

/// Cursor driven by a closure. Exhaustion is latched.
///
/// ```
/// use ironseq::{from_fn, Cursor};
///
/// let mut n = 0;
/// let mut c = from_fn(move || { n += 1; (n <= 2).then_some(n) });
/// assert_eq!(c.next(), Some(1));
/// assert_eq!(c.next(), Some(2));
/// assert_eq!(c.next(), None);
/// assert_eq!(c.next(), None);
/// ```
pub struct FnCursor<F> {
    pull: F,
    done: bool,
}

pub fn from_fn<T, F: FnMut() -> Option<T>>(pull: F) -> FnCursor<F> {
    FnCursor { pull, done: false }
}

impl<T, F: FnMut() -> Option<T>> Cursor<T> for FnCursor<F> {
    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        let item = (self.pull)();
        self.done = item.is_none();
        item
    }
}

/// Cursor over any std iterator.
pub struct IterCursor<I> {
    inner: std::iter::Fuse<I>,
}

pub fn from_iterator<I: IntoIterator>(iter: I) -> IterCursor<I::IntoIter> {
    IterCursor {
        inner: iter.into_iter().fuse(),
    }
}

impl<I: Iterator> Cursor<I::Item> for IterCursor<I> {
    fn next(&mut self) -> Option<I::Item> {
        self.inner.next()
    }
}

/// Clones elements out of a shared buffer. Many cursors may read one buffer.
pub(crate) struct SliceCursor<T> {
    data: Rc<[T]>,
    pos: usize,
}

impl<T> SliceCursor<T> {
    pub(crate) fn new(data: Rc<[T]>) -> Self {
        Self { data, pos: 0 }
    }
}

impl<T: Clone> Cursor<T> for SliceCursor<T> {
    fn next(&mut self) -> Option<T> {
        let item = self.data.get(self.pos)?.clone();
        self.pos += 1;
        Some(item)
    }
}

/// Latches exhaustion for cursors whose implementation we do not control.
pub(crate) struct Fused<T> {
    inner: BoxCursor<T>,
    done: bool,
}

impl<T> Fused<T> {
    pub(crate) fn new(inner: BoxCursor<T>) -> Self {
        Self { inner, done: false }
    }
}

impl<T> Cursor<T> for Fused<T> {
    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        let item = self.inner.next();
        self.done = item.is_none();
        item
    }
}

/// Runs eager work on the first pull, never at construction.
///
/// Operators that must see their whole input before emitting (grouping,
/// sorting, reversing, join index building) wrap that work in a `Deferred` so
/// that building the pipeline stays free of upstream pulls.
pub(crate) struct Deferred<T, F> {
    build: Option<F>,
    cursor: Option<BoxCursor<T>>,
}

impl<T, F: FnOnce() -> BoxCursor<T>> Deferred<T, F> {
    pub(crate) fn new(build: F) -> Self {
        Self {
            build: Some(build),
            cursor: None,
        }
    }
}

impl<T, F: FnOnce() -> BoxCursor<T>> Cursor<T> for Deferred<T, F> {
    fn next(&mut self) -> Option<T> {
        if let Some(build) = self.build.take() {
            self.cursor = Some(build());
        }
        self.cursor.as_mut()?.next()
    }
}

pub(crate) struct Empty;

impl<T> Cursor<T> for Empty {
    fn next(&mut self) -> Option<T> {
        None
    }
}
