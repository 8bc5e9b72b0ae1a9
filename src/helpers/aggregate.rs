//! Folds and numeric aggregates.
//!
//! # Overview
//! - [`Enumerable::aggregate`] / [`Enumerable::aggregate_select`] - left fold with optional result projection
//! - [`Enumerable::count`] / [`Enumerable::count_where`] - full scan, no cached length
//! - [`Enumerable::any`] / [`Enumerable::any_where`] / [`Enumerable::all`] - short-circuiting tests
//! - [`Enumerable::sum`], [`Enumerable::average`], [`Enumerable::min`], [`Enumerable::max`]
//!   and their `*_by` selector forms
//!
//! The numeric operators read elements through [`AsNumber`]. A value without
//! a numeric reading fails with [`QueryError::TypeMismatch`]. `sum` of an empty
//! sequence is `0.0`; `average`, `min` and `max` of one fail with
//! [`QueryError::EmptySequence`].

use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::numeric::AsNumber;
use crate::{Enumerable, SeqBound};
use ordered_float::OrderedFloat;

fn project<N: AsNumber>(operator: &'static str, value: &N) -> Result<f64> {
    value.to_number().ok_or_else(|| QueryError::TypeMismatch {
        operator,
        found: value.kind(),
    })
}

/// Running state shared by the numeric folds.
#[derive(Default)]
struct Stats {
    count: usize,
    sum: f64,
    min: Option<OrderedFloat<f64>>,
    max: Option<OrderedFloat<f64>>,
}

impl Stats {
    fn push(&mut self, x: f64) {
        let x = OrderedFloat(x);
        self.count += 1;
        self.sum += x.0;
        self.min = Some(self.min.map_or(x, |m| m.min(x)));
        self.max = Some(self.max.map_or(x, |m| m.max(x)));
    }
}

impl<T: SeqBound> Enumerable<T> {
    /// Left fold from `seed`.
    ///
    /// # Example
    /// ```
    /// use ironseq::from_vec;
    ///
    /// let s = from_vec(vec![1, 2, 2, 3]);
    /// assert_eq!(s.aggregate(0, |acc, x| acc + x), 8);
    /// assert_eq!(s.aggregate_select(0, |acc, x| acc + x, |acc| acc + 5), 13);
    /// ```
    pub fn aggregate<A, F>(&self, seed: A, f: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.iter().fold(seed, f)
    }

    /// Left fold from `seed`, then `result` applied to the final accumulator.
    pub fn aggregate_select<A, R, F, P>(&self, seed: A, f: F, result: P) -> R
    where
        F: FnMut(A, T) -> A,
        P: FnOnce(A) -> R,
    {
        result(self.aggregate(seed, f))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn count_where<F>(&self, pred: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.iter().filter(|t| pred(t)).count()
    }

    /// Whether the sequence has at least one element. Pulls at most one.
    pub fn any(&self) -> bool {
        self.cursor().next().is_some()
    }

    pub fn any_where<F>(&self, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.iter().any(|t| pred(&t))
    }

    /// Whether every element satisfies `pred`; `true` for an empty sequence.
    pub fn all<F>(&self, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        !self.any_where(|t| !pred(t))
    }

    fn stats_by<N, S>(&self, operator: &'static str, selector: S) -> Result<Stats>
    where
        N: AsNumber,
        S: Fn(&T) -> N,
    {
        let mut stats = Stats::default();
        for item in self {
            stats.push(project(operator, &selector(&item))?);
        }
        Ok(stats)
    }

    /// # Errors
    /// [`QueryError::TypeMismatch`] on a non-numeric element.
    pub fn sum(&self) -> Result<f64>
    where
        T: AsNumber,
    {
        self.sum_by(|t| t.clone())
    }

    /// # Errors
    /// [`QueryError::TypeMismatch`] on a non-numeric projection.
    pub fn sum_by<N, S>(&self, selector: S) -> Result<f64>
    where
        N: AsNumber,
        S: Fn(&T) -> N,
    {
        Ok(self.stats_by("sum", selector)?.sum)
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if empty, [`QueryError::TypeMismatch`] on a
    /// non-numeric element.
    pub fn average(&self) -> Result<f64>
    where
        T: AsNumber,
    {
        self.average_by(|t| t.clone())
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if empty, [`QueryError::TypeMismatch`] on a
    /// non-numeric projection.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_by<N, S>(&self, selector: S) -> Result<f64>
    where
        N: AsNumber,
        S: Fn(&T) -> N,
    {
        let stats = self.stats_by("average", selector)?;
        if stats.count == 0 {
            return Err(QueryError::EmptySequence);
        }
        Ok(stats.sum / stats.count as f64)
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if empty, [`QueryError::TypeMismatch`] on a
    /// non-numeric element.
    pub fn min(&self) -> Result<f64>
    where
        T: AsNumber,
    {
        self.min_by(|t| t.clone())
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if empty, [`QueryError::TypeMismatch`] on a
    /// non-numeric projection.
    pub fn min_by<N, S>(&self, selector: S) -> Result<f64>
    where
        N: AsNumber,
        S: Fn(&T) -> N,
    {
        self.stats_by("min", selector)?
            .min
            .map(|m| m.0)
            .ok_or(QueryError::EmptySequence)
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if empty, [`QueryError::TypeMismatch`] on a
    /// non-numeric element.
    pub fn max(&self) -> Result<f64>
    where
        T: AsNumber,
    {
        self.max_by(|t| t.clone())
    }

    /// # Errors
    /// [`QueryError::EmptySequence`] if empty, [`QueryError::TypeMismatch`] on a
    /// non-numeric projection.
    pub fn max_by<N, S>(&self, selector: S) -> Result<f64>
    where
        N: AsNumber,
        S: Fn(&T) -> N,
    {
        self.stats_by("max", selector)?
            .max
            .map(|m| m.0)
            .ok_or(QueryError::EmptySequence)
    }
}
