//! Error kinds raised by sequence operators, keyed stores, and enumerators.
//!
//! Every failure is local and synchronous: the operator that detects the
//! violation returns it to the caller and the consuming pull is aborted.
//! Use the `*_or_default` / `try_get_value` forms where a miss is expected.

use crate::enumerator::EnumeratorState;
use thiserror::Error;

/// Errors that can occur while consuming a sequence or querying a keyed store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No (matching) element exists.
    #[error("sequence contains no elements")]
    EmptySequence,

    /// More than one (matching) element exists where exactly one was required.
    #[error("sequence contains more than one element")]
    TooManyElements,

    /// A negative index or count, or an index past the end of the sequence.
    #[error("index or count {index} was out of range; must be non-negative and less than the size of the collection")]
    IndexOutOfRange { index: i64 },

    /// A projected element is not numeric.
    #[error("{operator}() is only valid on numeric elements, found {found}")]
    TypeMismatch {
        operator: &'static str,
        found: String,
    },

    /// The key is already present under the store's comparer.
    #[error("an item with the same key has already been added")]
    DuplicateKey,

    /// The key is absent under the store's comparer.
    #[error("the given key was not present in the dictionary")]
    KeyNotFound,

    /// `Enumerator::current` was read while not positioned on an element.
    #[error("{}", state_message(*.0))]
    InvalidEnumerationState(EnumeratorState),

    /// A keyed store was constructed from an invalid option combination.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

fn state_message(state: EnumeratorState) -> &'static str {
    match state {
        EnumeratorState::NotStarted => "enumeration has not started; call move_next",
        EnumeratorState::Finished => "enumeration already finished",
        EnumeratorState::Active => "enumeration is active",
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
