//! Whole-sequence combinators: `concat`, `zip`, `reverse`, `default_if_empty`.

use crate::cursor::{BoxCursor, Cursor, CursorFactory, Deferred, from_iterator};
use crate::{Enumerable, SeqBound};
use std::rc::Rc;
use tracing::debug;

struct ConcatCursor<T> {
    first: BoxCursor<T>,
    rest: CursorFactory<T>,
    second: Option<BoxCursor<T>>,
}
impl<T> Cursor<T> for ConcatCursor<T> {
    fn next(&mut self) -> Option<T> {
        if self.second.is_none() {
            if let Some(item) = self.first.next() {
                return Some(item);
            }
            self.second = Some((self.rest)());
        }
        self.second.as_mut()?.next()
    }
}

struct ZipCursor<T, U, R> {
    left: BoxCursor<T>,
    right: BoxCursor<U>,
    f: Rc<dyn Fn(T, U) -> R>,
    done: bool,
}
impl<T, U, R> Cursor<R> for ZipCursor<T, U, R> {
    fn next(&mut self) -> Option<R> {
        if self.done {
            return None;
        }
        let pair = match self.left.next() {
            Some(l) => self.right.next().map(|r| (l, r)),
            None => None,
        };
        match pair {
            Some((l, r)) => Some((self.f)(l, r)),
            None => {
                self.done = true;
                None
            }
        }
    }
}

struct DefaultIfEmptyCursor<T> {
    up: BoxCursor<T>,
    fallback: Option<T>,
}
impl<T> Cursor<T> for DefaultIfEmptyCursor<T> {
    fn next(&mut self) -> Option<T> {
        match self.fallback.take() {
            Some(fallback) => Some(self.up.next().unwrap_or(fallback)),
            None => self.up.next(),
        }
    }
}

impl<T: SeqBound> Enumerable<T> {
    /// This sequence followed by `other`. `other` is only enumerated once this
    /// one is exhausted.
    #[must_use]
    pub fn concat(&self, other: &Enumerable<T>) -> Self {
        let rest = Rc::clone(&other.factory);
        self.derive(move |first| ConcatCursor {
            first,
            rest: Rc::clone(&rest),
            second: None,
        })
    }

    /// Pair elements positionally through `f`; stops at the shorter side.
    ///
    /// # Example
    /// ```
    /// use ironseq::from_vec;
    ///
    /// let a = from_vec(vec![1, 2, 3]);
    /// let b = from_vec(vec!["one", "two"]);
    /// assert_eq!(a.zip(&b, |n, w| format!("{n}:{w}")).to_array(), vec!["1:one", "2:two"]);
    /// ```
    #[must_use]
    pub fn zip<U, R, F>(&self, other: &Enumerable<U>, f: F) -> Enumerable<R>
    where
        U: SeqBound,
        R: SeqBound,
        F: Fn(T, U) -> R + 'static,
    {
        let right = Rc::clone(&other.factory);
        let f: Rc<dyn Fn(T, U) -> R> = Rc::new(f);
        self.derive(move |left| ZipCursor {
            left,
            right: right(),
            f: Rc::clone(&f),
            done: false,
        })
    }

    /// Elements back to front. Drains the upstream on the first pull.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let up = self.clone();
        Enumerable::from_cursor_fn(move || {
            let up = up.clone();
            Deferred::new(move || {
                let rows = up.to_array();
                debug!(elements = rows.len(), "reversed sequence");
                Box::new(from_iterator(rows.into_iter().rev())) as BoxCursor<T>
            })
        })
    }

    /// This sequence, or a single `value` if it turns out to be empty.
    #[must_use]
    pub fn default_if_empty(&self, value: T) -> Self {
        self.derive(move |up| DefaultIfEmptyCursor {
            up,
            fallback: Some(value.clone()),
        })
    }
}
