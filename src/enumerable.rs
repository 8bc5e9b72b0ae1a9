use crate::cursor::{
    BoxCursor, Cursor, CursorFactory, Empty, FnCursor, Fused, IterCursor, SliceCursor, from_fn,
    from_iterator,
};
use crate::enumerator::Enumerator;
use crate::error::{QueryError, Result};
use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;
use tracing::debug;

/// Bound for element types flowing through a sequence.
///
/// Elements are cloned out of array-backed sources on every enumeration, and
/// the cursor chain is boxed, so types must be `Clone + 'static`.
pub trait SeqBound: 'static + Clone {}
impl<T> SeqBound for T where T: 'static + Clone {}

/// A lazy, re-enumerable sequence.
///
/// An `Enumerable` owns exactly one [`CursorFactory`]. Operators never touch
/// the receiver; they return a new `Enumerable` whose factory closes over the
/// previous one. Building a pipeline pulls nothing from the source. Each
/// enumeration calls the factory again and therefore re-runs the whole
/// upstream chain, including any generator side effects. Use
/// [`materialize`](Enumerable::materialize) to cache a source.
pub struct Enumerable<T> {
    pub(crate) factory: CursorFactory<T>,
}

impl<T> Clone for Enumerable<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

/// Array-backed sequence over `data`.
pub fn from_vec<T: SeqBound>(data: Vec<T>) -> Enumerable<T> {
    from_shared(Rc::from(data))
}

pub(crate) fn from_shared<T: SeqBound>(data: Rc<[T]>) -> Enumerable<T> {
    Enumerable::from_cursor_fn(move || SliceCursor::new(Rc::clone(&data)))
}

// ---- cursors for the core projections ----
struct SelectCursor<T, U> {
    up: BoxCursor<T>,
    f: Rc<dyn Fn(T) -> U>,
}
impl<T, U> Cursor<U> for SelectCursor<T, U> {
    fn next(&mut self) -> Option<U> {
        self.up.next().map(|t| (self.f)(t))
    }
}

struct FilterCursor<T> {
    up: BoxCursor<T>,
    pred: Rc<dyn Fn(&T) -> bool>,
}
impl<T> Cursor<T> for FilterCursor<T> {
    fn next(&mut self) -> Option<T> {
        while let Some(item) = self.up.next() {
            if (self.pred)(&item) {
                return Some(item);
            }
        }
        None
    }
}

struct SelectManyCursor<T, U> {
    up: BoxCursor<T>,
    f: Rc<dyn Fn(T) -> Enumerable<U>>,
    inner: Option<BoxCursor<U>>,
}
impl<T, U> Cursor<U> for SelectManyCursor<T, U> {
    fn next(&mut self) -> Option<U> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                self.inner = None;
            }
            let outer = self.up.next()?;
            let inner = (self.f)(outer);
            self.inner = Some((inner.factory)());
        }
    }
}

impl<T: SeqBound> Enumerable<T> {
    /// Array-backed sequence; same as [`from_vec`].
    pub fn of(data: impl Into<Vec<T>>) -> Self {
        from_vec(data.into())
    }

    /// Sequence over a user-supplied cursor factory. Every enumeration calls
    /// `factory` once; the cursors it returns are fused.
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: Fn() -> BoxCursor<T> + 'static,
    {
        Self::from_cursor_fn(move || Fused::new(factory()))
    }

    /// Sequence over a generator closure. `make` runs once per enumeration and
    /// returns a fresh pull function; the sequence ends at its first `None`.
    ///
    /// # Example
    /// ```
    /// use ironseq::Enumerable;
    ///
    /// let naturals = Enumerable::from_generator(|| {
    ///     let mut n = 0u64;
    ///     move || { n += 1; Some(n) }
    /// });
    /// assert_eq!(naturals.take(3).to_array(), vec![1, 2, 3]);
    /// // a second enumeration starts over
    /// assert_eq!(naturals.take(2).to_array(), vec![1, 2]);
    /// ```
    pub fn from_generator<F, G>(make: F) -> Self
    where
        F: Fn() -> G + 'static,
        G: FnMut() -> Option<T> + 'static,
    {
        Self::from_cursor_fn(move || -> FnCursor<G> { from_fn(make()) })
    }

    /// Sequence over a std iterator, rebuilt by `make` for every enumeration.
    pub fn from_iterable<F, I>(make: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_cursor_fn(move || -> IterCursor<I::IntoIter> { from_iterator(make()) })
    }

    pub fn empty() -> Self {
        Self::from_cursor_fn(|| Empty)
    }

    /// `value` repeated `count` times.
    ///
    /// # Errors
    /// [`QueryError::IndexOutOfRange`] if `count` is negative.
    pub fn repeat(value: T, count: i64) -> Result<Self> {
        let count = usize::try_from(count).map_err(|_| QueryError::IndexOutOfRange { index: count })?;
        Ok(Self::from_iterable(move || std::iter::repeat_n(value.clone(), count)))
    }

    pub(crate) fn from_cursor_fn<C, F>(make: F) -> Self
    where
        C: Cursor<T> + 'static,
        F: Fn() -> C + 'static,
    {
        Self {
            factory: Rc::new(move || Box::new(make()) as BoxCursor<T>),
        }
    }

    /// A fresh cursor over the sequence. Creating it pulls nothing.
    pub fn cursor(&self) -> BoxCursor<T> {
        (self.factory)()
    }

    /// Fresh std iterator over the sequence.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            cursor: self.cursor(),
        }
    }

    /// Explicit state-machine handle over a fresh enumeration.
    pub fn get_enumerator(&self) -> Enumerator<T> {
        Enumerator::new(Rc::clone(&self.factory))
    }

    /// New sequence whose cursor wraps a fresh upstream cursor.
    pub(crate) fn derive<U, C, F>(&self, wrap: F) -> Enumerable<U>
    where
        U: SeqBound,
        C: Cursor<U> + 'static,
        F: Fn(BoxCursor<T>) -> C + 'static,
    {
        let up = Rc::clone(&self.factory);
        Enumerable::from_cursor_fn(move || wrap(up()))
    }

    /// Project each element.
    #[must_use]
    pub fn select<U, F>(&self, f: F) -> Enumerable<U>
    where
        U: SeqBound,
        F: Fn(T) -> U + 'static,
    {
        let f: Rc<dyn Fn(T) -> U> = Rc::new(f);
        self.derive(move |up| SelectCursor { up, f: Rc::clone(&f) })
    }

    /// Keep the elements matching `pred` (LINQ `Where`).
    ///
    /// # Example
    /// ```
    /// use ironseq::from_vec;
    ///
    /// let evens = from_vec(vec![1, 2, 3, 4]).filter(|x| x % 2 == 0);
    /// assert_eq!(evens.to_array(), vec![2, 4]);
    /// ```
    #[must_use]
    pub fn filter<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        let pred: Rc<dyn Fn(&T) -> bool> = Rc::new(pred);
        self.derive(move |up| FilterCursor {
            up,
            pred: Rc::clone(&pred),
        })
    }

    /// Project each element to a sub-sequence and flatten.
    ///
    /// Sub-sequences are enumerated lazily, one at a time.
    #[must_use]
    pub fn select_many<U, E, F>(&self, f: F) -> Enumerable<U>
    where
        U: SeqBound,
        E: Into<Enumerable<U>>,
        F: Fn(T) -> E + 'static,
    {
        let f: Rc<dyn Fn(T) -> Enumerable<U>> = Rc::new(move |t: T| -> Enumerable<U> { f(t).into() });
        self.derive(move |up| SelectManyCursor {
            up,
            f: Rc::clone(&f),
            inner: None,
        })
    }

    /// Convert each element through its `Into` impl.
    #[must_use]
    pub fn cast<U>(&self) -> Enumerable<U>
    where
        U: SeqBound,
        T: Into<U>,
    {
        self.select(T::into)
    }

    /// Drain the sequence into a `Vec`.
    pub fn to_array(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Drain once and return an array-backed sequence over the result. Later
    /// enumerations of the returned sequence never touch the original source.
    #[must_use]
    pub fn materialize(&self) -> Self {
        let data = self.to_array();
        debug!(elements = data.len(), "materialized sequence");
        from_vec(data)
    }

    /// Drain the sequence, calling `f` on each element.
    pub fn for_each<F: FnMut(T)>(&self, f: F) {
        self.iter().for_each(f);
    }
}

impl Enumerable<i64> {
    /// `count` consecutive integers starting at `start`.
    ///
    /// # Errors
    /// [`QueryError::IndexOutOfRange`] if `count` is negative or the last
    /// value would not fit in an `i64`.
    ///
    /// # Example
    /// ```
    /// use ironseq::Enumerable;
    ///
    /// assert_eq!(Enumerable::range(3, 4).unwrap().to_array(), vec![3, 4, 5, 6]);
    /// assert!(Enumerable::range(0, -1).is_err());
    /// ```
    pub fn range(start: i64, count: i64) -> Result<Self> {
        if count < 0 || (count > 0 && start.checked_add(count - 1).is_none()) {
            return Err(QueryError::IndexOutOfRange { index: count });
        }
        Ok(Self::from_iterable(move || (0..count).map(move |i| start + i)))
    }
}

/// Fused std iterator over one enumeration of an [`Enumerable`].
pub struct Iter<T> {
    cursor: BoxCursor<T>,
}

impl<T> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.cursor.next()
    }
}

impl<T> FusedIterator for Iter<T> {}

impl<T: SeqBound> IntoIterator for &Enumerable<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: SeqBound> IntoIterator for Enumerable<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: SeqBound> FromIterator<T> for Enumerable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        from_vec(iter.into_iter().collect())
    }
}

impl<T: SeqBound> From<Vec<T>> for Enumerable<T> {
    fn from(data: Vec<T>) -> Self {
        from_vec(data)
    }
}

impl<T> fmt::Debug for Enumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerable").finish_non_exhaustive()
    }
}
