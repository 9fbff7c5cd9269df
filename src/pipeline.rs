//! End-to-end Butterworth lowpass design.
//!
//! Chains the prototype recursion, frequency scaling, bilinear
//! discretisation and filter construction. Every parameter is validated
//! before any coefficient is computed.

use crate::bilinear::BilinearDiscretizer;
use crate::error::FilterResult;
use crate::iir_filtering::DiscreteIirFilter;
use crate::prototype::butterworth_denominator;
use crate::transfer_function::{ContinuousTransferFunction, DiscreteTransferFunction};
use crate::types::{BlendParameter, ButterworthDesign};

impl ButterworthDesign {
    /// Validates the sampling parameters and returns the matching discretiser.
    pub fn discretizer(&self) -> FilterResult<BilinearDiscretizer> {
        BilinearDiscretizer::with_blend(self.sample_interval(), self.blend)
    }

    /// Continuous lowpass `H(s) = 1 / B_n(s/ωc)`.
    pub fn analog(&self) -> FilterResult<ContinuousTransferFunction> {
        ContinuousTransferFunction::all_pole(butterworth_denominator(self.order, self.cutoff)?)
    }

    /// Discrete transfer function `(b, a)` for this design.
    pub fn transfer_function(&self) -> FilterResult<DiscreteTransferFunction> {
        let discretizer = self.discretizer()?;
        let denominator = butterworth_denominator(self.order, self.cutoff)?;
        let analog = ContinuousTransferFunction::all_pole(denominator)?;

        tracing::debug!(
            order = self.order,
            cutoff = self.cutoff,
            sample_rate = self.sample_rate,
            alpha = self.blend.value(),
            "designing Butterworth lowpass"
        );
        discretizer.discretize(&analog)
    }

    /// Runs the full pipeline and returns a ready-to-use filter.
    pub fn design(&self) -> FilterResult<DiscreteIirFilter> {
        Ok(DiscreteIirFilter::from_transfer_function(self.transfer_function()?)
            .with_startup(self.startup))
    }
}

/// Design a Tustin-discretised Butterworth lowpass and return `(b, a)`.
///
/// # Arguments
/// * `order` - Filter order, at least 1
/// * `cutoff` - Cutoff angular frequency in rad/s
/// * `sample_rate` - Sampling frequency in Hz
///
/// `a` is the normalised denominator (`a[0] == 1`) before the feedback sign flip.
pub fn butterworth_lowpass(
    order: usize,
    cutoff: f64,
    sample_rate: f64,
) -> FilterResult<(Vec<f64>, Vec<f64>)> {
    let tf = ButterworthDesign::lowpass(order, cutoff, sample_rate).transfer_function()?;
    Ok((tf.numerator().to_vec(), tf.denominator().to_vec()))
}

/// Design a lowpass for the given parameters and apply it to `input`.
///
/// `alpha` is the bilinear blend parameter, validated along with every other
/// parameter before the input is read.
pub fn lowpass_filter(
    input: &[f64],
    sample_rate: f64,
    order: usize,
    cutoff: f64,
    alpha: f64,
) -> FilterResult<Vec<f64>> {
    let blend = BlendParameter::new(alpha)?;
    let filter = ButterworthDesign::lowpass(order, cutoff, sample_rate)
        .with_blend(blend)
        .design()?;
    Ok(filter.apply(input))
}
