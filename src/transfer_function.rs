//! Continuous and discrete transfer function value types.
//!
//! Both types are immutable once constructed and validate their invariants
//! in their constructors, including when deserialised.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{FilterDesignError, FilterResult};
use crate::polynomial::{evaluate_ascending, evaluate_descending};

/// Tolerance on `a[0] == 1` accepted for a normalised discrete denominator.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-12;

/// Continuous-time transfer function `H(s) = N(s) / D(s)`.
///
/// Both coefficient vectors are ordered by **descending** power of `s`, so
/// `denominator[0]` multiplies `s^n`. For the Butterworth lowpass the
/// numerator is `[1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawContinuous")]
pub struct ContinuousTransferFunction {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
}

#[derive(Deserialize)]
struct RawContinuous {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
}

impl TryFrom<RawContinuous> for ContinuousTransferFunction {
    type Error = FilterDesignError;

    fn try_from(raw: RawContinuous) -> FilterResult<Self> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl ContinuousTransferFunction {
    /// Creates a transfer function from descending-power coefficient vectors.
    ///
    /// # Errors
    /// [`FilterDesignError::DegenerateTransferFunction`] when the denominator
    /// is empty, its leading coefficient is zero, the numerator is empty, or
    /// the numerator has a higher degree than the denominator.
    pub fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> FilterResult<Self> {
        let Some(&leading) = denominator.first() else {
            return Err(FilterDesignError::degenerate("denominator is empty"));
        };
        if leading == 0.0 {
            return Err(FilterDesignError::degenerate(
                "leading denominator coefficient is zero",
            ));
        }
        if numerator.is_empty() {
            return Err(FilterDesignError::degenerate("numerator is empty"));
        }
        if numerator.len() > denominator.len() {
            return Err(FilterDesignError::degenerate(format!(
                "numerator degree {} exceeds denominator degree {}",
                numerator.len() - 1,
                denominator.len() - 1
            )));
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// All-pole lowpass `H(s) = 1 / D(s)`.
    pub fn all_pole(denominator: Vec<f64>) -> FilterResult<Self> {
        Self::new(vec![1.0], denominator)
    }

    /// Numerator coefficients, highest power first.
    pub fn numerator(&self) -> &[f64] {
        &self.numerator
    }

    /// Denominator coefficients, highest power first.
    pub fn denominator(&self) -> &[f64] {
        &self.denominator
    }

    /// Degree of the denominator polynomial.
    pub fn order(&self) -> usize {
        self.denominator.len() - 1
    }

    /// Evaluates `H(s)` at a complex frequency.
    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        evaluate_descending(&self.numerator, s) / evaluate_descending(&self.denominator, s)
    }
}

/// Discrete-time transfer function `H(z) = B(z⁻¹) / A(z⁻¹)`.
///
/// Both vectors are ordered by **ascending** power of `z⁻¹` and share the
/// same length `n + 1`; the denominator is normalised so `a[0] == 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscrete")]
pub struct DiscreteTransferFunction {
    b: Vec<f64>,
    a: Vec<f64>,
}

#[derive(Deserialize)]
struct RawDiscrete {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl TryFrom<RawDiscrete> for DiscreteTransferFunction {
    type Error = FilterDesignError;

    fn try_from(raw: RawDiscrete) -> FilterResult<Self> {
        Self::new(raw.b, raw.a)
    }
}

impl DiscreteTransferFunction {
    /// Creates a discrete transfer function from normalised coefficients.
    ///
    /// # Errors
    /// - [`FilterDesignError::MismatchedCoefficientLengths`] when the vectors
    ///   differ in length or are empty.
    /// - [`FilterDesignError::UnnormalizedDenominator`] when `a[0]` is not 1.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> FilterResult<Self> {
        if b.len() != a.len() || b.is_empty() {
            return Err(FilterDesignError::MismatchedCoefficientLengths {
                numerator: b.len(),
                denominator: a.len(),
            });
        }
        let leading = a[0];
        if !((leading - 1.0).abs() <= NORMALIZATION_TOLERANCE) {
            return Err(FilterDesignError::UnnormalizedDenominator { leading });
        }

        Ok(Self { b, a })
    }

    /// Feed-forward coefficients `b[0..=n]`.
    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    /// Denominator coefficients `a[0..=n]` as stored (`a[0] == 1`), before the
    /// feedback sign flip.
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Filter order `n`.
    pub fn order(&self) -> usize {
        self.a.len() - 1
    }

    /// Feedback coefficients `-a[1..=n]` as multiplied against past outputs.
    pub fn feedback(&self) -> Vec<f64> {
        self.a[1..].iter().map(|&a| -a).collect()
    }

    /// Gain at zero frequency, `Σb / Σa`.
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    /// Magnitude and phase response at the given frequencies (Hz).
    ///
    /// Returns `(magnitudes, phases)` with phases in radians.
    pub fn frequency_response(&self, frequencies: &[f64], sample_rate: f64) -> (Vec<f64>, Vec<f64>) {
        frequencies
            .iter()
            .map(|&freq| {
                let omega = 2.0 * PI * freq / sample_rate;
                let z_inv = Complex64::new(0.0, -omega).exp();
                let h = evaluate_ascending(&self.b, z_inv) / evaluate_ascending(&self.a, z_inv);
                (h.norm(), h.arg())
            })
            .unzip()
    }

    /// Whether every root of the denominator lies strictly inside the unit circle.
    ///
    /// Uses the Schur-Cohn step-down recursion: the polynomial is stable iff
    /// every reflection coefficient has magnitude below one.
    pub fn is_stable(&self) -> bool {
        let mut poly = self.a.clone();
        while poly.len() > 1 {
            let n = poly.len() - 1;
            let k = poly[n] / poly[0];
            if !(k.abs() < 1.0) {
                return false;
            }
            let denom = 1.0 - k * k;
            poly = (0..n)
                .map(|i| (poly[i] - k * poly[n - i]) / denom)
                .collect();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_continuous_validation() {
        assert!(ContinuousTransferFunction::all_pole(vec![1.0, 1.0]).is_ok());
        assert!(matches!(
            ContinuousTransferFunction::all_pole(vec![]),
            Err(FilterDesignError::DegenerateTransferFunction { .. })
        ));
        assert!(matches!(
            ContinuousTransferFunction::all_pole(vec![0.0, 1.0]),
            Err(FilterDesignError::DegenerateTransferFunction { .. })
        ));
        assert!(matches!(
            ContinuousTransferFunction::new(vec![], vec![1.0]),
            Err(FilterDesignError::DegenerateTransferFunction { .. })
        ));
        assert!(matches!(
            ContinuousTransferFunction::new(vec![1.0, 0.0, 0.0], vec![1.0, 1.0]),
            Err(FilterDesignError::DegenerateTransferFunction { .. })
        ));
    }

    #[test]
    fn test_continuous_accessors() {
        let tf = ContinuousTransferFunction::all_pole(vec![2.0, 3.0, 1.0]).unwrap();
        assert_eq!(tf.numerator(), &[1.0]);
        assert_eq!(tf.denominator(), &[2.0, 3.0, 1.0]);
        assert_eq!(tf.order(), 2);
        // H(0) = 1 / 1
        assert_approx_eq!(tf.evaluate(Complex64::new(0.0, 0.0)).re, 1.0, 1e-12);
    }

    #[test]
    fn test_continuous_deserialize_revalidates() {
        let ok = r#"{"numerator": [1.0], "denominator": [1.0, 1.4142, 1.0]}"#;
        assert!(serde_json::from_str::<ContinuousTransferFunction>(ok).is_ok());

        let bad = r#"{"numerator": [1.0], "denominator": [0.0, 1.0]}"#;
        assert!(serde_json::from_str::<ContinuousTransferFunction>(bad).is_err());
    }

    #[test]
    fn test_discrete_validation() {
        assert_eq!(
            DiscreteTransferFunction::new(vec![1.0, 2.0], vec![1.0]),
            Err(FilterDesignError::MismatchedCoefficientLengths {
                numerator: 2,
                denominator: 1
            })
        );
        assert!(matches!(
            DiscreteTransferFunction::new(vec![], vec![]),
            Err(FilterDesignError::MismatchedCoefficientLengths { .. })
        ));
        assert_eq!(
            DiscreteTransferFunction::new(vec![1.0, 0.0], vec![2.0, 0.5]),
            Err(FilterDesignError::UnnormalizedDenominator { leading: 2.0 })
        );
        assert!(DiscreteTransferFunction::new(vec![0.5], vec![1.0]).is_ok());
    }

    #[test]
    fn test_feedback_sign_flip() {
        let tf = DiscreteTransferFunction::new(
            vec![0.25, 0.5, 0.25],
            vec![1.0, -1.779_082_35, 0.801_167_13],
        )
        .unwrap();
        assert_eq!(tf.feedback(), vec![1.779_082_35, -0.801_167_13]);
        assert_eq!(tf.order(), 2);
    }

    #[test]
    fn test_dc_gain_and_frequency_response() {
        // One-pole smoother y = 0.5 x + 0.5 y[-1]
        let tf = DiscreteTransferFunction::new(vec![0.5, 0.0], vec![1.0, -0.5]).unwrap();
        assert_approx_eq!(tf.dc_gain(), 1.0, 1e-12);

        let (mag, phase) = tf.frequency_response(&[0.0, 50.0], 100.0);
        assert_approx_eq!(mag[0], 1.0, 1e-12);
        assert!(phase[0].abs() < 1e-12);
        // At Nyquist z⁻¹ = -1: 0.5 / 1.5
        assert_approx_eq!(mag[1], 1.0 / 3.0, 1e-9);
    }

    #[test]
    fn test_stability_check() {
        let stable = DiscreteTransferFunction::new(vec![1.0, 0.0, 0.0], vec![1.0, -1.5, 0.7]).unwrap();
        assert!(stable.is_stable());

        // Pole at z = 1.1
        let unstable = DiscreteTransferFunction::new(vec![1.0, 0.0], vec![1.0, -1.1]).unwrap();
        assert!(!unstable.is_stable());

        // Double pole on the unit circle at z = 1
        let marginal =
            DiscreteTransferFunction::new(vec![1.0, 0.0, 0.0], vec![1.0, -2.0, 1.0]).unwrap();
        assert!(!marginal.is_stable());
    }

    #[test]
    fn test_discrete_serde_round_trip() {
        let tf = DiscreteTransferFunction::new(vec![0.1, 0.2], vec![1.0, -0.7]).unwrap();
        let json = serde_json::to_string(&tf).unwrap();
        let back: DiscreteTransferFunction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tf);

        let bad = r#"{"b": [0.1, 0.2], "a": [3.0, -0.7]}"#;
        assert!(serde_json::from_str::<DiscreteTransferFunction>(bad).is_err());
    }
}
