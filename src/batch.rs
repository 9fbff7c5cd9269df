//! Parallel filtering of independent sequences.
//!
//! A [`DiscreteIirFilter`] holds only immutable coefficients, so one filter
//! can be applied to many sequences concurrently. Each sequence is filtered
//! from zero initial conditions, exactly as [`DiscreteIirFilter::apply`] does.

use rayon::prelude::*;

use crate::iir_filtering::DiscreteIirFilter;

/// Parallel batch processor for applying one filter to many sequences.
pub struct ParallelFilter;

impl ParallelFilter {
    /// Filter every sequence in parallel, returning outputs in input order.
    ///
    /// # Arguments
    /// * `filter` - Filter shared by all sequences
    /// * `items` - Independent input sequences
    pub fn process<S>(filter: &DiscreteIirFilter, items: &[S]) -> Vec<Vec<f64>>
    where
        S: AsRef<[f64]> + Sync,
    {
        tracing::debug!(items = items.len(), order = filter.order(), "filtering batch in parallel");
        items
            .par_iter()
            .map(|item| filter.apply(item.as_ref()))
            .collect()
    }

    /// Filter every sequence in place, in parallel.
    pub fn process_in_place(filter: &DiscreteIirFilter, items: &mut [Vec<f64>]) {
        items
            .par_iter_mut()
            .for_each(|item| filter.apply_in_place(item));
    }
}
