//! Generalised bilinear (Tustin-family) discretisation.
//!
//! A continuous transfer function `N(s) / D(s)` of order `n` is mapped to the
//! `z⁻¹` domain with
//!
//! ```text
//! s = P(z⁻¹) / Q(z⁻¹),   P = 1 - z⁻¹,   Q = dt · (α + (1 - α)·z⁻¹)
//! ```
//!
//! Multiplying numerator and denominator by `Q^n` clears every fraction:
//! a term `c · s^k` becomes `c · P^k · Q^(n-k)`, a polynomial of degree `n`
//! in `z⁻¹`. The result is normalised so the denominator's constant term is 1.
//!
//! For `0 < α <= 1` the left half of the s-plane maps inside the unit disk,
//! so stable analog designs stay stable. `α = 0.5` (Tustin) warps
//! frequencies towards Nyquist; no pre-warping is applied here.

use crate::error::{FilterDesignError, FilterResult};
use crate::polynomial::{accumulate_scaled, convolve, power};
use crate::transfer_function::{ContinuousTransferFunction, DiscreteTransferFunction};
use crate::types::BlendParameter;

/// Validated sample interval and blend parameter for discretisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilinearDiscretizer {
    dt: f64,
    alpha: BlendParameter,
}

impl BilinearDiscretizer {
    /// Creates a discretiser for sample interval `dt` (seconds) and blend `alpha`.
    ///
    /// # Errors
    /// - [`FilterDesignError::InvalidSampleInterval`] when `dt` is not a positive finite number.
    /// - [`FilterDesignError::InvalidBlendParameter`] when `alpha` lies outside `[0, 1]`.
    pub fn new(dt: f64, alpha: f64) -> FilterResult<Self> {
        let alpha = BlendParameter::new(alpha).inspect_err(|_| {
            tracing::warn!(alpha, "rejecting bilinear blend parameter");
        })?;
        Self::with_blend(dt, alpha)
    }

    /// Creates a discretiser from an already validated blend parameter.
    pub fn with_blend(dt: f64, alpha: BlendParameter) -> FilterResult<Self> {
        if !(dt > 0.0 && dt.is_finite()) {
            tracing::warn!(dt, "rejecting sample interval");
            return Err(FilterDesignError::InvalidSampleInterval { dt });
        }
        Ok(Self { dt, alpha })
    }

    /// Tustin discretiser (`α = 0.5`) for a sampling frequency in Hz.
    pub fn tustin(sample_rate: f64) -> FilterResult<Self> {
        Self::with_blend(1.0 / sample_rate, BlendParameter::TUSTIN)
    }

    /// Sample interval in seconds.
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Blend parameter.
    pub const fn alpha(&self) -> BlendParameter {
        self.alpha
    }

    /// Maps `tf` to a discrete transfer function of the same order.
    ///
    /// # Errors
    /// [`FilterDesignError::SingularDiscretization`] when the substituted
    /// denominator's constant term is numerically zero.
    pub fn discretize(
        &self,
        tf: &ContinuousTransferFunction,
    ) -> FilterResult<DiscreteTransferFunction> {
        let order = tf.order();
        let alpha = self.alpha.value();

        let p = [1.0, -1.0];
        let q = [self.dt * alpha, self.dt * (1.0 - alpha)];
        let p_powers: Vec<Vec<f64>> = (0..=order).map(|k| power(&p, k)).collect();
        let q_powers: Vec<Vec<f64>> = (0..=order).map(|k| power(&q, k)).collect();

        // Coefficient `c` of s^k contributes c · P^k · Q^(order - k).
        let substitute = |descending: &[f64]| {
            let degree = descending.len() - 1;
            let mut out = vec![0.0; order + 1];
            for (i, &c) in descending.iter().enumerate() {
                let k = degree - i;
                let term = convolve(&p_powers[k], &q_powers[order - k]);
                accumulate_scaled(&mut out, &term, c);
            }
            out
        };

        let mut a = substitute(tf.denominator());
        let mut b = substitute(tf.numerator());

        let constant = a[0];
        let magnitude = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if constant.abs() <= f64::EPSILON * magnitude || constant == 0.0 {
            tracing::warn!(constant, "bilinear substitution produced a singular denominator");
            return Err(FilterDesignError::SingularDiscretization {
                constant_term: constant,
            });
        }

        a.iter_mut().for_each(|v| *v /= constant);
        b.iter_mut().for_each(|v| *v /= constant);
        // Exact normalisation, independent of rounding in the division above.
        a[0] = 1.0;

        tracing::debug!(
            order,
            dt = self.dt,
            alpha,
            ?b,
            ?a,
            "discretised continuous transfer function"
        );
        DiscreteTransferFunction::new(b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::butterworth_denominator;
    use approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn butterworth(order: usize, cutoff: f64) -> ContinuousTransferFunction {
        ContinuousTransferFunction::all_pole(butterworth_denominator(order, cutoff).unwrap())
            .unwrap()
    }

    #[test]
    fn test_second_order_tustin_reference() {
        let tf = butterworth(2, 2.0 * PI * 5.0);
        let discrete = BilinearDiscretizer::new(0.005, 0.5)
            .unwrap()
            .discretize(&tf)
            .unwrap();

        let b = discrete.numerator();
        let a = discrete.denominator();
        assert_approx_eq!(b[0], 0.005_521_19, 1e-6);
        assert_approx_eq!(b[1], 0.011_042_39, 1e-6);
        assert_approx_eq!(b[2], 0.005_521_19, 1e-6);
        assert_eq!(a[0], 1.0);
        assert_approx_eq!(a[1], -1.779_082_35, 1e-6);
        assert_approx_eq!(a[2], 0.801_167_13, 1e-6);
    }

    #[test]
    fn test_first_order_tustin() {
        // H(s) = 1 / (s/ωc + 1): b = k/(1+k)·[1, 1], a = [1, (k-1)/(k+1)], k = ωc·dt/2
        let wc = 2.0 * PI * 5.0;
        let dt = 0.005;
        let discrete = BilinearDiscretizer::new(dt, 0.5)
            .unwrap()
            .discretize(&butterworth(1, wc))
            .unwrap();

        let k = wc * dt / 2.0;
        assert_approx_eq!(discrete.numerator()[0], k / (1.0 + k), 1e-9);
        assert_approx_eq!(discrete.numerator()[1], k / (1.0 + k), 1e-9);
        assert_approx_eq!(discrete.denominator()[1], (k - 1.0) / (k + 1.0), 1e-9);
    }

    #[test]
    fn test_euler_variants() {
        let tf = butterworth(2, 2.0 * PI * 5.0);

        // Backward Euler: the whole numerator sits at z⁰.
        let backward = BilinearDiscretizer::new(0.005, 1.0)
            .unwrap()
            .discretize(&tf)
            .unwrap();
        assert_approx_eq!(backward.numerator()[0], 0.019_789_582_663_819_17, 1e-9);
        assert_eq!(backward.numerator()[1], 0.0);
        assert_eq!(backward.numerator()[2], 0.0);
        assert_approx_eq!(backward.denominator()[1], -1.782_251_993_050_599_3, 1e-9);

        // Forward Euler: the whole numerator is delayed by n samples.
        let forward = BilinearDiscretizer::new(0.005, 0.0)
            .unwrap()
            .discretize(&tf)
            .unwrap();
        assert_eq!(forward.numerator()[0], 0.0);
        assert_eq!(forward.numerator()[1], 0.0);
        assert_approx_eq!(forward.numerator()[2], 0.024_674_011_002_723_39, 1e-9);
        assert_approx_eq!(forward.denominator()[1], -1.777_855_853_092_081_6, 1e-9);
    }

    #[test]
    fn test_tustin_preserves_stability_and_dc_gain() {
        let wc = 2.0 * PI * 5.0;
        for order in 1..=8 {
            let discrete = BilinearDiscretizer::tustin(200.0)
                .unwrap()
                .discretize(&butterworth(order, wc))
                .unwrap();
            assert_eq!(discrete.numerator().len(), order + 1);
            assert_eq!(discrete.denominator()[0], 1.0);
            assert!(discrete.is_stable(), "order {order} lost stability");
            assert!((discrete.dc_gain() - 1.0).abs() < 1e-4, "order {order}");
        }
    }

    #[test]
    fn test_normalised_for_all_blends() {
        let tf = butterworth(3, 20.0);
        for alpha in [0.0, 0.1, 0.5, 0.9, 1.0] {
            for dt in [1e-3, 1e-2, 0.1] {
                let discrete = BilinearDiscretizer::new(dt, alpha)
                    .unwrap()
                    .discretize(&tf)
                    .unwrap();
                assert_eq!(discrete.denominator()[0], 1.0);
                assert_eq!(discrete.order(), 3);
            }
        }
    }

    #[test]
    fn test_proper_numerator_is_supported() {
        // H(s) = s / (s + 1): Tustin with dt = 2 gives s = (1 - z⁻¹)/(1 + z⁻¹)
        let tf = ContinuousTransferFunction::new(vec![1.0, 0.0], vec![1.0, 1.0]).unwrap();
        let discrete = BilinearDiscretizer::new(2.0, 0.5)
            .unwrap()
            .discretize(&tf)
            .unwrap();
        assert_approx_eq!(discrete.numerator()[0], 0.5, 1e-12);
        assert_approx_eq!(discrete.numerator()[1], -0.5, 1e-12);
        assert_eq!(discrete.denominator(), &[1.0, 0.0]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            BilinearDiscretizer::new(0.0, 0.5),
            Err(FilterDesignError::InvalidSampleInterval { dt: 0.0 })
        );
        assert!(BilinearDiscretizer::new(-0.01, 0.5).is_err());
        assert!(BilinearDiscretizer::new(f64::INFINITY, 0.5).is_err());
        assert_eq!(
            BilinearDiscretizer::new(0.005, 1.5),
            Err(FilterDesignError::InvalidBlendParameter { alpha: 1.5 })
        );
        assert!(BilinearDiscretizer::tustin(0.0).is_err());
    }

    #[test]
    fn test_singular_discretization() {
        // Root at s = 2 coincides with 1/(α·dt) for α = 1, dt = 0.5.
        let tf = ContinuousTransferFunction::all_pole(vec![1.0, -2.0]).unwrap();
        let result = BilinearDiscretizer::new(0.5, 1.0).unwrap().discretize(&tf);
        assert!(matches!(
            result,
            Err(FilterDesignError::SingularDiscretization { .. })
        ));
    }
}
