//! Keyed stores: unique-key association with pluggable equality.
//!
//! [`Dictionary`] is the mutable store, [`Lookup`] its frozen read view. Both
//! sit on an open-addressing table whose probe sequence is chosen through
//! [`StoreOptions`](crate::StoreOptions).

mod dictionary;
mod lookup;
mod table;

pub use dictionary::{Dictionary, Entries};
pub use lookup::Lookup;
