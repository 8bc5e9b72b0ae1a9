//! Testing utilities for sequence pipelines.
//!
//! - **Assertions** compare an [`Enumerable`](crate::Enumerable) against
//!   expected elements with readable failure messages.
//! - **Fixtures** provide instrumented sources, such as [`CountingSource`],
//!   that record how often the upstream generator is invoked, plus small
//!   sample datasets for join and grouping tests.
//!
//! # Quick Start
//!
//! ```
//! use ironseq::testing::*;
//!
//! let source = CountingSource::new();
//! let first_five = source.naturals().take(5);
//! assert_sequence_equal(&first_five, &[0, 1, 2, 3, 4]);
//! assert_sequence_equal(&first_five, &[0, 1, 2, 3, 4]);
//! assert_eq!(source.pulls(), 10);
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
