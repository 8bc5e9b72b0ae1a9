//! Tuning options for keyed stores.
//!
//! [`StoreOptions`] controls the initial slot count, how full the table may
//! get before it doubles, and which [`ProbeStrategy`] walks the slots after a
//! collision. The defaults suit most workloads; the operators that build
//! stores internally (`distinct`, `group_by`, `join`, ...) always use them.
//!
//! ```
//! use ironseq::{Dictionary, DefaultComparer, ProbeStrategy, StoreOptions};
//!
//! let options = StoreOptions::default()
//!     .with_capacity(64)
//!     .with_probe(ProbeStrategy::Linear);
//! let mut d = Dictionary::<u32, &str>::with_options(DefaultComparer::new(), options).unwrap();
//! d.add(1, "a").unwrap();
//! assert!(d.contains_key(&1));
//! ```

use crate::error::{QueryError, Result};

/// Largest accepted [`StoreOptions::initial_capacity`].
pub const MAX_INITIAL_CAPACITY: usize = 1 << (usize::BITS - 2);

/// How the next candidate slot is derived after a collision.
///
/// Both strategies are deterministic and, on the power-of-two tables used by
/// the keyed store, visit every slot before repeating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProbeStrategy {
    /// `home, home + 1, home + 2, ...`
    Linear,
    /// Triangular steps: `home, home + 1, home + 3, home + 6, ...`
    #[default]
    Quadratic,
}

impl ProbeStrategy {
    /// Slot to try after `slot` failed on probe number `attempt` (starting at 1).
    #[inline]
    pub fn next_slot(self, slot: usize, attempt: usize, mask: usize) -> usize {
        match self {
            ProbeStrategy::Linear => slot.wrapping_add(1) & mask,
            ProbeStrategy::Quadratic => slot.wrapping_add(attempt) & mask,
        }
    }
}

/// Construction options for [`Dictionary`](crate::Dictionary) and
/// [`Lookup`](crate::Lookup).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoreOptions {
    /// Slots allocated up front. Rounded up to a power of two (minimum 8).
    pub initial_capacity: usize,
    /// Fraction of occupied slots that triggers doubling. Must lie in `(0, 1)`.
    pub max_load_factor: f64,
    /// Collision probe sequence.
    pub probe: ProbeStrategy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_load_factor: 0.75,
            probe: ProbeStrategy::default(),
        }
    }
}

impl StoreOptions {
    #[must_use]
    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    #[must_use]
    pub fn with_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    #[must_use]
    pub fn with_probe(mut self, probe: ProbeStrategy) -> Self {
        self.probe = probe;
        self
    }

    /// Check the option combination.
    ///
    /// # Errors
    /// [`QueryError::InvalidArguments`] if the load factor is not a finite
    /// value strictly between 0 and 1, or the initial capacity exceeds
    /// [`MAX_INITIAL_CAPACITY`].
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(QueryError::InvalidArguments(format!(
                "initial_capacity must be at most {MAX_INITIAL_CAPACITY}, got {}",
                self.initial_capacity
            )));
        }
        let lf = self.max_load_factor;
        if !lf.is_finite() || lf <= 0.0 || lf >= 1.0 {
            return Err(QueryError::InvalidArguments(format!(
                "max_load_factor must be in (0, 1), got {lf}"
            )));
        }
        Ok(())
    }
}
