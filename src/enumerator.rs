//! Explicit enumeration handle with a `NotStarted → Active → Finished`
//! lifecycle.
//!
//! ```
//! use ironseq::{from_vec, EnumeratorState};
//!
//! let mut e = from_vec(vec![1, 2]).get_enumerator();
//! assert!(e.current().is_err());
//! assert!(e.move_next());
//! assert_eq!(e.current(), Ok(&1));
//! assert!(e.move_next());
//! assert!(!e.move_next());
//! assert_eq!(e.state(), EnumeratorState::Finished);
//! e.reset();
//! assert!(e.move_next());
//! assert_eq!(e.current(), Ok(&1));
//! ```

use crate::cursor::{BoxCursor, CursorFactory};
use crate::error::{QueryError, Result};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnumeratorState {
    NotStarted,
    Active,
    Finished,
}

/// Stateful handle over one enumeration of a sequence.
pub struct Enumerator<T> {
    factory: CursorFactory<T>,
    cursor: Option<BoxCursor<T>>,
    state: EnumeratorState,
    current: Option<T>,
}

impl<T> Enumerator<T> {
    pub(crate) fn new(factory: CursorFactory<T>) -> Self {
        Self {
            factory,
            cursor: None,
            state: EnumeratorState::NotStarted,
            current: None,
        }
    }

    /// Advance to the next element. Returns `false`, and stays `Finished`,
    /// once the sequence is exhausted.
    pub fn move_next(&mut self) -> bool {
        if self.state == EnumeratorState::Finished {
            return false;
        }
        let factory = &self.factory;
        let cursor = self.cursor.get_or_insert_with(|| factory());
        match cursor.next() {
            Some(item) => {
                self.current = Some(item);
                self.state = EnumeratorState::Active;
                true
            }
            None => {
                self.current = None;
                self.cursor = None;
                self.state = EnumeratorState::Finished;
                false
            }
        }
    }

    /// The element the enumerator is positioned on.
    ///
    /// # Errors
    /// [`QueryError::InvalidEnumerationState`] before the first
    /// [`move_next`](Self::move_next) and after exhaustion.
    pub fn current(&self) -> Result<&T> {
        match (self.state, self.current.as_ref()) {
            (EnumeratorState::Active, Some(item)) => Ok(item),
            (EnumeratorState::Active, None) => {
                Err(QueryError::InvalidEnumerationState(EnumeratorState::Finished))
            }
            (state, _) => Err(QueryError::InvalidEnumerationState(state)),
        }
    }

    /// Drop the current cursor and start over from a fresh one. The source is
    /// re-enumerated from scratch on the next [`move_next`](Self::move_next).
    pub fn reset(&mut self) {
        self.cursor = None;
        self.current = None;
        self.state = EnumeratorState::NotStarted;
    }

    pub fn state(&self) -> EnumeratorState {
        self.state
    }
}

impl<T: fmt::Debug> fmt::Debug for Enumerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerator")
            .field("state", &self.state)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
