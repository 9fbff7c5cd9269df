//! Error types and result utilities for filter design and filtering.

use thiserror::Error;

/// Convenience type alias for results that may contain a [`FilterDesignError`].
pub type FilterResult<T> = Result<T, FilterDesignError>;

/// Error types that can occur while designing or applying a Butterworth filter.
///
/// Every variant is a caller usage error raised before any computation
/// happens, so a failing call never yields partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterDesignError {
    /// The filter order must be at least 1.
    #[error("Invalid filter order: {order} (must be >= 1)")]
    InvalidOrder {
        /// The rejected order.
        order: usize,
    },

    /// The cutoff angular frequency must be strictly positive and finite.
    #[error("Invalid cutoff frequency: {cutoff} rad/s (must be > 0)")]
    InvalidCutoff {
        /// The rejected cutoff in rad/s.
        cutoff: f64,
    },

    /// A continuous transfer function cannot be built from the given coefficients.
    ///
    /// This happens for an empty denominator, a zero leading denominator
    /// coefficient, or a numerator of higher degree than the denominator.
    #[error("Degenerate transfer function: {reason}")]
    DegenerateTransferFunction {
        /// Description of what made the transfer function degenerate.
        reason: String,
    },

    /// The sample interval must be strictly positive and finite.
    #[error("Invalid sample interval: {dt} s (must be > 0)")]
    InvalidSampleInterval {
        /// The rejected interval in seconds.
        dt: f64,
    },

    /// The bilinear blend parameter must lie in `[0, 1]`.
    #[error("Invalid bilinear blend parameter: {alpha} (must be within [0, 1])")]
    InvalidBlendParameter {
        /// The rejected blend parameter.
        alpha: f64,
    },

    /// The substituted denominator has a (numerically) zero constant term and
    /// cannot be normalised.
    #[error("Singular discretization: denominator constant term is {constant_term}")]
    SingularDiscretization {
        /// The constant term of the substituted denominator.
        constant_term: f64,
    },

    /// Feed-forward and feedback coefficient vectors differ in length or are empty.
    #[error(
        "Mismatched coefficient lengths: numerator has {numerator}, denominator has {denominator}"
    )]
    MismatchedCoefficientLengths {
        /// Length of the numerator (b) vector.
        numerator: usize,
        /// Length of the denominator (a) vector.
        denominator: usize,
    },

    /// The discrete denominator is not normalised to `a[0] == 1`.
    #[error("Unnormalized denominator: a[0] = {leading} (expected 1)")]
    UnnormalizedDenominator {
        /// The leading denominator coefficient that was found.
        leading: f64,
    },
}

impl FilterDesignError {
    /// Create a new degenerate transfer function error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateTransferFunction {
            reason: reason.into(),
        }
    }
}
