//! # Ironseq
//!
//! **Lazy, composable query operators** for Rust over finite or infinite
//! sequences, in the style of LINQ, with keyed stores that take pluggable
//! equality.
//!
//! ## Key Features
//!
//! - **Deferred pipelines** - building a query pulls nothing; work happens on enumeration
//! - **Re-enumerable** - every enumeration re-runs the source; [`materialize`](Enumerable::materialize) caches it
//! - **Full operator set** - projection, filtering, partitioning, sets, grouping, joins, ordering, folds
//! - **Pluggable equality** - [`EqualityComparer`] for every keyed operator and store
//! - **Keyed stores** - [`Dictionary`] / [`Lookup`] on an open-addressing table that stays correct under constant hashes
//! - **Explicit enumerators** - [`Enumerator`] with a `NotStarted → Active → Finished` lifecycle
//!
//! ## Quick Start
//!
//! ```
//! use ironseq::*;
//! # use ironseq::Result;
//!
//! # fn main() -> Result<()> {
//! let words = from_vec(vec!["pear", "fig", "apple", "kiwi", "plum", "fig"]);
//!
//! let by_len = words
//!     .distinct()
//!     .group_by(|w| w.len())
//!     .select(|g| (*g.key(), g.values().count()))
//!     .order_by(|(len, _)| *len);
//!
//! assert_eq!(by_len.to_array(), vec![(3, 1), (4, 3), (5, 1)]);
//! assert_eq!(words.first_where(|w| w.starts_with('k'))?, "kiwi");
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Enumerable
//!
//! An [`Enumerable<T>`] wraps a cursor factory: a function returning a fresh
//! [`Cursor`] each time the sequence is enumerated. Operators return new
//! `Enumerable`s and never mutate their receiver. Sources can be vectors
//! ([`from_vec`]), generator closures ([`Enumerable::from_generator`]), std
//! iterators ([`Enumerable::from_iterable`]) or raw cursor factories
//! ([`Enumerable::from_factory`]).
//!
//! ### Keyed stores
//!
//! [`Dictionary`] maps unique keys to values under an [`EqualityComparer`]
//! and always enumerates in first-insertion order. [`Lookup`] is its frozen
//! read view. [`DefaultComparer`] hashes primitive values by canonical
//! serialization and `Rc` / `Arc` keys by allocation identity.
//!
//! ### Ordering
//!
//! [`order_by`](Enumerable::order_by) returns an [`OrderedEnumerable`] that
//! collects sort keys through `then_by` and sorts once per enumeration.
//!
//! ## Errors
//!
//! Fallible operators return [`Result<T>`](Result) with a [`QueryError`].
//! `*_or_default` forms return `Option` where a miss is expected.
//!
//! ## Logging
//!
//! Eager steps (grouping, join indexing, sorting, reversing, materializing,
//! dictionary building) emit `tracing` debug events with element counts.
//! Table growth and collision probes emit trace events. No subscriber is
//! installed by the library.

pub mod comparer;
pub mod config;
pub mod cursor;
pub mod enumerable;
pub mod enumerator;
pub mod error;
mod helpers;
pub mod numeric;
pub mod ordering;
pub mod store;
pub mod testing;

pub use comparer::{
    DefaultComparer, DefaultHash, EqHashComparer, EqualityComparer, FnComparer, HashKey,
    IdentityTable, JsonComparer, TokenMode,
};
pub use config::{MAX_INITIAL_CAPACITY, ProbeStrategy, StoreOptions};
pub use cursor::{BoxCursor, Cursor, CursorFactory, FnCursor, IterCursor, from_fn, from_iterator};
pub use enumerable::{Enumerable, Iter, SeqBound, from_vec};
pub use enumerator::{Enumerator, EnumeratorState};
pub use error::{QueryError, Result};
pub use helpers::Grouping;
pub use numeric::AsNumber;
pub use ordering::{Direction, OrderedEnumerable, SortKey};
pub use store::{Dictionary, Entries, Lookup};
