//! Analog Butterworth prototype design.
//!
//! The normalised (`ωc = 1`) Butterworth polynomial `B_n(s) = Σ a_k s^k` is
//! generated directly from its closed-form coefficient recursion rather than
//! by multiplying out the pole factors:
//!
//! ```text
//! γ = π / (2n),  a_0 = 1,  a_{k+1} = a_k · cos(kγ) / sin((k+1)γ)
//! ```
//!
//! Frequency scaling substitutes `s → s/ωc` and reverses the coefficient
//! order so the result reads highest power first.

use std::f64::consts::PI;

use crate::error::{FilterDesignError, FilterResult};

/// Normalised Butterworth denominator coefficients `a_0..a_n` (ascending powers of `s`).
///
/// The returned vector has `order + 1` entries and `a[0] == 1`.
///
/// # Errors
/// Returns [`FilterDesignError::InvalidOrder`] when `order == 0`.
pub fn prototype_coefficients(order: usize) -> FilterResult<Vec<f64>> {
    if order == 0 {
        tracing::warn!(order, "rejecting Butterworth prototype order");
        return Err(FilterDesignError::InvalidOrder { order });
    }

    let gamma = PI / (2.0 * order as f64);
    let mut coeffs = Vec::with_capacity(order + 1);
    coeffs.push(1.0);
    for k in 0..order {
        let next = coeffs[k] * (k as f64 * gamma).cos() / ((k + 1) as f64 * gamma).sin();
        coeffs.push(next);
    }

    tracing::debug!(order, ?coeffs, "computed normalised Butterworth prototype");
    Ok(coeffs)
}

/// Rescales prototype coefficients to the cutoff `ωc` (rad/s).
///
/// Given ascending prototype coefficients `a_0..a_n`, returns `c_0..c_n` with
/// `c_{n-k} = a_k / ωc^k`, i.e. the coefficients of `B_n(s/ωc)` ordered by
/// descending power of `s`. The last entry `c_n` equals `a_0`.
///
/// # Errors
/// - [`FilterDesignError::InvalidCutoff`] when `cutoff` is not a positive finite number.
/// - [`FilterDesignError::InvalidOrder`] when `prototype` is empty.
pub fn frequency_scale(prototype: &[f64], cutoff: f64) -> FilterResult<Vec<f64>> {
    if !(cutoff > 0.0 && cutoff.is_finite()) {
        tracing::warn!(cutoff, "rejecting Butterworth cutoff");
        return Err(FilterDesignError::InvalidCutoff { cutoff });
    }
    if prototype.is_empty() {
        return Err(FilterDesignError::InvalidOrder { order: 0 });
    }

    let mut scale = 1.0;
    let mut scaled: Vec<f64> = prototype
        .iter()
        .map(|&a| {
            let c = a / scale;
            scale *= cutoff;
            c
        })
        .collect();
    scaled.reverse();

    tracing::debug!(cutoff, ?scaled, "frequency-scaled Butterworth denominator");
    Ok(scaled)
}

/// Butterworth lowpass denominator for `order` and `cutoff` (rad/s), highest power first.
///
/// Validates both parameters before computing anything.
pub fn butterworth_denominator(order: usize, cutoff: f64) -> FilterResult<Vec<f64>> {
    if !(cutoff > 0.0 && cutoff.is_finite()) {
        tracing::warn!(cutoff, "rejecting Butterworth cutoff");
        return Err(FilterDesignError::InvalidCutoff { cutoff });
    }
    let prototype = prototype_coefficients(order)?;
    frequency_scale(&prototype, cutoff)
}
