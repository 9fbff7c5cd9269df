//! Fixed-degree polynomial algebra over coefficient vectors.
//!
//! Unless stated otherwise, a coefficient vector `p` stores `p[k]` as the
//! coefficient of `x^k` (ascending powers). Only the handful of operations
//! needed for the bilinear substitution and frequency-response evaluation
//! are provided.

use num_complex::Complex64;

/// Returns the discrete, linear convolution (polynomial product) of two sequences.
///
/// An empty operand yields an empty product.
pub fn convolve(f: &[f64], g: &[f64]) -> Vec<f64> {
    if f.is_empty() || g.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0.0; f.len() + g.len() - 1];
    for (i, &fv) in f.iter().enumerate() {
        for (j, &gv) in g.iter().enumerate() {
            out[i + j] += fv * gv;
        }
    }
    out
}

/// Raises a polynomial to a non-negative integer power by repeated multiplication.
///
/// `power(p, 0)` is the constant polynomial `[1.0]`.
pub fn power(p: &[f64], exponent: usize) -> Vec<f64> {
    (0..exponent).fold(vec![1.0], |acc, _| convolve(&acc, p))
}

/// Adds `scale * term` into `acc`, coefficient by coefficient.
///
/// `term` must not be longer than `acc`; callers size `acc` for the
/// highest degree they will accumulate.
pub fn accumulate_scaled(acc: &mut [f64], term: &[f64], scale: f64) {
    debug_assert!(term.len() <= acc.len());
    for (a, &t) in acc.iter_mut().zip(term) {
        *a += scale * t;
    }
}

/// Evaluates an ascending-power polynomial at a complex point (Horner's rule).
pub fn evaluate_ascending(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
}

/// Evaluates a descending-power polynomial at a complex point (Horner's rule).
///
/// `coeffs[0]` multiplies the highest power.
pub fn evaluate_descending(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
}
