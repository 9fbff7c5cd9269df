//! Direct-form IIR filtering.
//!
//! A [`DiscreteIirFilter`] applies the causal recurrence
//!
//! ```text
//! y[m] = b[0]·x[m] + Σ_{i=1}^{n} ( b[i]·x[m-i] + f[i]·y[m-i] ),   f[i] = -a[i]
//! ```
//!
//! to a whole input sequence. Every call starts from zero initial
//! conditions; the only state is the rolling delay lines of the call itself.
//! NaN and infinite values are not trapped and propagate through the
//! arithmetic.

use ndarray::{Array1, ArrayView1};

use crate::error::FilterResult;
use crate::transfer_function::DiscreteTransferFunction;
use crate::types::StartupPolicy;

/// IIR filter built from a normalised discrete transfer function.
///
/// Coefficients are immutable; the filter can be shared between threads
/// and applied to any number of independent sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteIirFilter {
    transfer_function: DiscreteTransferFunction,
    /// Feedback coefficients `-a[1..=n]`.
    feedback: Vec<f64>,
    startup: StartupPolicy,
}

impl DiscreteIirFilter {
    /// Create a filter from feed-forward `b` and normalised denominator `a`.
    ///
    /// # Arguments
    /// * `b_coeffs` - Feed-forward coefficients `b[0..=n]`
    /// * `a_coeffs` - Denominator coefficients `a[0..=n]` with `a[0] == 1`
    ///
    /// # Errors
    /// - [`crate::FilterDesignError::MismatchedCoefficientLengths`] when the lengths differ or are zero.
    /// - [`crate::FilterDesignError::UnnormalizedDenominator`] when `a[0] != 1`.
    pub fn new(b_coeffs: Vec<f64>, a_coeffs: Vec<f64>) -> FilterResult<Self> {
        DiscreteTransferFunction::new(b_coeffs, a_coeffs)
            .inspect_err(|err| tracing::warn!(%err, "rejecting IIR coefficients"))
            .map(Self::from_transfer_function)
    }

    /// Create a filter from an already validated transfer function.
    pub fn from_transfer_function(transfer_function: DiscreteTransferFunction) -> Self {
        let feedback = transfer_function.feedback();
        Self {
            transfer_function,
            feedback,
            startup: StartupPolicy::default(),
        }
    }

    /// Replace the startup policy.
    pub fn with_startup(mut self, startup: StartupPolicy) -> Self {
        self.startup = startup;
        self
    }

    /// Filter order `n`.
    pub fn order(&self) -> usize {
        self.feedback.len()
    }

    /// Feed-forward coefficients `b[0..=n]`.
    pub fn b_coeffs(&self) -> &[f64] {
        self.transfer_function.numerator()
    }

    /// Feedback coefficients `-a[1..=n]` as used in the recurrence.
    pub fn feedback_coeffs(&self) -> &[f64] {
        &self.feedback
    }

    /// The discrete transfer function this filter realises.
    pub const fn transfer_function(&self) -> &DiscreteTransferFunction {
        &self.transfer_function
    }

    /// Startup policy for the leading outputs.
    pub const fn startup(&self) -> StartupPolicy {
        self.startup
    }

    /// Filter a sequence, returning an output of the same length.
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        tracing::trace!(len = input.len(), order = self.order(), "applying IIR filter");
        let mut state = DelayLines::new(self);
        input
            .iter()
            .enumerate()
            .map(|(m, &x)| state.step(self, m, x))
            .collect()
    }

    /// Filter a sequence in place.
    pub fn apply_in_place(&self, samples: &mut [f64]) {
        tracing::trace!(len = samples.len(), order = self.order(), "applying IIR filter in place");
        let mut state = DelayLines::new(self);
        for (m, sample) in samples.iter_mut().enumerate() {
            *sample = state.step(self, m, *sample);
        }
    }

    /// Filter an `ndarray` view, returning a new array.
    pub fn apply_array(&self, input: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut state = DelayLines::new(self);
        input
            .iter()
            .enumerate()
            .map(|(m, &x)| state.step(self, m, x))
            .collect()
    }
}

impl From<DiscreteTransferFunction> for DiscreteIirFilter {
    fn from(transfer_function: DiscreteTransferFunction) -> Self {
        Self::from_transfer_function(transfer_function)
    }
}

/// Rolling history of the last `n` inputs and outputs, most recent first.
struct DelayLines {
    x_delays: Vec<f64>,
    y_delays: Vec<f64>,
    first_computed: usize,
}

impl DelayLines {
    fn new(filter: &DiscreteIirFilter) -> Self {
        let order = filter.order();
        Self {
            x_delays: vec![0.0; order],
            y_delays: vec![0.0; order],
            first_computed: filter.startup.first_computed_index(order),
        }
    }

    fn step(&mut self, filter: &DiscreteIirFilter, index: usize, input: f64) -> f64 {
        let output = if index < self.first_computed {
            0.0
        } else {
            let b = filter.b_coeffs();
            let mut acc = b[0] * input;
            for i in 0..self.x_delays.len() {
                acc += b[i + 1] * self.x_delays[i] + filter.feedback[i] * self.y_delays[i];
            }
            acc
        };

        if !self.x_delays.is_empty() {
            self.x_delays.rotate_right(1);
            self.x_delays[0] = input;
            self.y_delays.rotate_right(1);
            self.y_delays[0] = output;
        }

        output
    }
}

/// Filter `input` with coefficients `b` and `a` in one call.
///
/// Validates the coefficients before touching the input, so an error never
/// comes with partial output.
pub fn filter_sequence(b: &[f64], a: &[f64], input: &[f64]) -> FilterResult<Vec<f64>> {
    let filter = DiscreteIirFilter::new(b.to_vec(), a.to_vec())?;
    Ok(filter.apply(input))
}
