//! Element access and equality tests.
//!
//! `first`, `last`, `single` and `element_at` return [`Result`] and fail with
//! the matching [`QueryError`]; each has an `*_or_default` twin returning
//! `Option` instead. The `*_where` forms take a predicate.

use crate::comparer::{DefaultComparer, DefaultHash, EqualityComparer};
use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::{Enumerable, SeqBound};

/// Exactly one element of `items`, or the error describing why not.
fn exactly_one<T>(mut items: impl Iterator<Item = T>) -> Result<T> {
    let first = items.next().ok_or(QueryError::EmptySequence)?;
    match items.next() {
        Some(_) => Err(QueryError::TooManyElements),
        None => Ok(first),
    }
}

impl<T: SeqBound> Enumerable<T> {
    /// # Errors
    /// [`QueryError::EmptySequence`] if the sequence is empty.
    pub fn first(&self) -> Result<T> {
        self.first_or_default().ok_or(QueryError::EmptySequence)
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if no element matches.
    pub fn first_where<F>(&self, pred: F) -> Result<T>
    where
        F: Fn(&T) -> bool,
    {
        self.first_or_default_where(pred)
            .ok_or(QueryError::EmptySequence)
    }

    pub fn first_or_default(&self) -> Option<T> {
        self.cursor().next()
    }

    pub fn first_or_default_where<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.iter().find(|t| pred(t))
    }

    /// Last element; drains the sequence.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if the sequence is empty.
    pub fn last(&self) -> Result<T> {
        self.reverse().first()
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if no element matches.
    pub fn last_where<F>(&self, pred: F) -> Result<T>
    where
        F: Fn(&T) -> bool,
    {
        self.reverse().first_where(pred)
    }

    pub fn last_or_default(&self) -> Option<T> {
        self.reverse().first_or_default()
    }

    pub fn last_or_default_where<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.reverse().first_or_default_where(pred)
    }

    /// The only element. Pulls at most two.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] if empty, [`QueryError::TooManyElements`]
    /// if there is more than one element.
    pub fn single(&self) -> Result<T> {
        exactly_one(self.iter())
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if nothing matches,
    /// [`QueryError::TooManyElements`] if more than one element matches.
    pub fn single_where<F>(&self, pred: F) -> Result<T>
    where
        F: Fn(&T) -> bool,
    {
        exactly_one(self.iter().filter(|t| pred(t)))
    }

    /// The only element, or `None` when there are zero or several.
    pub fn single_or_default(&self) -> Option<T> {
        self.single().ok()
    }

    pub fn single_or_default_where<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.single_where(pred).ok()
    }

    /// Element at zero-based `index`.
    ///
    /// # Errors
    /// [`QueryError::IndexOutOfRange`] if `index` is negative or not less than
    /// the length of the sequence.
    pub fn element_at(&self, index: i64) -> Result<T> {
        self.element_at_or_default(index)
            .ok_or(QueryError::IndexOutOfRange { index })
    }

    pub fn element_at_or_default(&self, index: i64) -> Option<T> {
        let index = usize::try_from(index).ok()?;
        self.iter().nth(index)
    }

    /// Whether an element equals `item` under the default comparer.
    pub fn contains(&self, item: &T) -> bool
    where
        T: DefaultHash,
    {
        self.contains_with(item, DefaultComparer::new())
    }

    pub fn contains_with<C>(&self, item: &T, comparer: C) -> bool
    where
        C: EqualityComparer<T>,
    {
        self.iter().any(|t| comparer.equals(&t, item))
    }

    /// Whether both sequences have equal length and pairwise equal elements
    /// under the default comparer.
    pub fn sequence_equal(&self, other: &Enumerable<T>) -> bool
    where
        T: DefaultHash,
    {
        self.sequence_equal_with(other, DefaultComparer::new())
    }

    pub fn sequence_equal_with<C>(&self, other: &Enumerable<T>, comparer: C) -> bool
    where
        C: EqualityComparer<T>,
    {
        let mut left = self.cursor();
        let mut right = other.cursor();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if comparer.equals(&a, &b) => {}
                _ => return false,
            }
        }
    }
}
