//! Prefix partitioning: `take`, `skip`, `take_while`, `skip_while`.
//!
//! Negative counts behave as zero. Skipped elements are still pulled from
//! upstream, so their side effects happen; `take` never pulls past the last
//! element it yields.

use crate::cursor::{BoxCursor, Cursor};
use crate::{Enumerable, SeqBound};
use std::rc::Rc;

pub(crate) fn clamp_count(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

struct TakeCursor<T> {
    up: BoxCursor<T>,
    remaining: usize,
}
impl<T> Cursor<T> for TakeCursor<T> {
    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let item = self.up.next();
        if item.is_none() {
            self.remaining = 0;
        }
        item
    }
}

struct SkipCursor<T> {
    up: BoxCursor<T>,
    pending: usize,
}
impl<T> Cursor<T> for SkipCursor<T> {
    fn next(&mut self) -> Option<T> {
        while self.pending > 0 {
            self.pending -= 1;
            self.up.next()?;
        }
        self.up.next()
    }
}

struct TakeWhileCursor<T> {
    up: BoxCursor<T>,
    pred: Rc<dyn Fn(&T) -> bool>,
    done: bool,
}
impl<T> Cursor<T> for TakeWhileCursor<T> {
    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        match self.up.next() {
            Some(item) if (self.pred)(&item) => Some(item),
            _ => {
                self.done = true;
                None
            }
        }
    }
}

struct SkipWhileCursor<T> {
    up: BoxCursor<T>,
    pred: Rc<dyn Fn(&T) -> bool>,
    skipping: bool,
}
impl<T> Cursor<T> for SkipWhileCursor<T> {
    fn next(&mut self) -> Option<T> {
        if self.skipping {
            self.skipping = false;
            while let Some(item) = self.up.next() {
                if !(self.pred)(&item) {
                    return Some(item);
                }
            }
            return None;
        }
        self.up.next()
    }
}

impl<T: SeqBound> Enumerable<T> {
    /// The first `n` elements.
    ///
    /// # Example
    /// ```
    /// use ironseq::from_vec;
    ///
    /// let s = from_vec(vec![1, 2, 3]);
    /// assert_eq!(s.take(2).to_array(), vec![1, 2]);
    /// assert!(s.take(-1).to_array().is_empty());
    /// ```
    #[must_use]
    pub fn take(&self, n: i64) -> Self {
        let n = clamp_count(n);
        self.derive(move |up| TakeCursor { up, remaining: n })
    }

    /// Everything after the first `n` elements.
    #[must_use]
    pub fn skip(&self, n: i64) -> Self {
        let n = clamp_count(n);
        self.derive(move |up| SkipCursor { up, pending: n })
    }

    /// Elements up to (not including) the first one failing `pred`.
    #[must_use]
    pub fn take_while<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        let pred: Rc<dyn Fn(&T) -> bool> = Rc::new(pred);
        self.derive(move |up| TakeWhileCursor {
            up,
            pred: Rc::clone(&pred),
            done: false,
        })
    }

    /// Elements from the first one failing `pred` onward.
    #[must_use]
    pub fn skip_while<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        let pred: Rc<dyn Fn(&T) -> bool> = Rc::new(pred);
        self.derive(move |up| SkipWhileCursor {
            up,
            pred: Rc::clone(&pred),
            skipping: true,
        })
    }
}
