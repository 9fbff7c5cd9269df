//! Supporting types for Butterworth filter design.
//!
//! This module contains the parameter structs and enums that configure the
//! design pipeline. They carry no numeric behaviour of their own beyond
//! validation.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{FilterDesignError, FilterResult};

/// Blend parameter `α` of the generalised bilinear transform.
///
/// The mapping used for discretisation is
///
/// ```text
/// s = (1 - z⁻¹) / (dt · (α + (1 - α)·z⁻¹))
/// ```
///
/// so `α = 0` is forward Euler, `α = 1` backward Euler and `α = 0.5`
/// Tustin's trapezoidal rule.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BlendParameter(f64);

impl BlendParameter {
    /// Forward Euler (`α = 0`).
    pub const FORWARD_EULER: Self = Self(0.0);
    /// Backward Euler (`α = 1`).
    pub const BACKWARD_EULER: Self = Self(1.0);
    /// Tustin / bilinear / trapezoidal (`α = 0.5`).
    pub const TUSTIN: Self = Self(0.5);

    /// Creates a blend parameter, rejecting values outside `[0, 1]` (and NaN).
    pub fn new(alpha: f64) -> FilterResult<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(FilterDesignError::InvalidBlendParameter { alpha });
        }
        Ok(Self(alpha))
    }

    /// Returns the raw `α` value.
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for BlendParameter {
    fn default() -> Self {
        Self::TUSTIN
    }
}

impl TryFrom<f64> for BlendParameter {
    type Error = FilterDesignError;

    fn try_from(alpha: f64) -> FilterResult<Self> {
        Self::new(alpha)
    }
}

impl From<BlendParameter> for f64 {
    fn from(alpha: BlendParameter) -> Self {
        alpha.0
    }
}

/// How the filter treats the leading outputs for which the recurrence lacks history.
///
/// The recurrence itself always starts from zero initial conditions; this
/// only decides how many leading outputs are forced to exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartupPolicy {
    /// `y[m] = 0` for `m < n`; the recurrence runs from `m = n`.
    #[default]
    ZeroUntilOrder,
    /// `y[m] = 0` for `m <= n`; the recurrence runs from `m = n + 1`.
    ///
    /// An order-2 filter therefore emits three leading zeros.
    ZeroThroughOrder,
}

impl StartupPolicy {
    /// Index of the first output computed by the recurrence for a filter of `order`.
    pub const fn first_computed_index(self, order: usize) -> usize {
        match self {
            StartupPolicy::ZeroUntilOrder => order,
            StartupPolicy::ZeroThroughOrder => order + 1,
        }
    }
}

/// Butterworth lowpass design parameters.
///
/// Gathers everything the pipeline needs: order, cutoff, sampling rate,
/// bilinear blend and the startup policy of the resulting filter. Call
/// [`ButterworthDesign::design`] to run the full pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButterworthDesign {
    /// Filter order (number of poles), at least 1.
    pub order: usize,
    /// Cutoff angular frequency in rad/s.
    pub cutoff: f64,
    /// Sampling frequency in Hz.
    pub sample_rate: f64,
    /// Generalised bilinear blend parameter.
    #[serde(default)]
    pub blend: BlendParameter,
    /// Treatment of the leading outputs.
    #[serde(default)]
    pub startup: StartupPolicy,
}

impl ButterworthDesign {
    /// Create a Tustin-discretised lowpass design with a cutoff in rad/s.
    pub const fn lowpass(order: usize, cutoff: f64, sample_rate: f64) -> Self {
        Self {
            order,
            cutoff,
            sample_rate,
            blend: BlendParameter::TUSTIN,
            startup: StartupPolicy::ZeroUntilOrder,
        }
    }

    /// Create a Tustin-discretised lowpass design with a cutoff in Hz.
    pub fn from_hz(order: usize, cutoff_hz: f64, sample_rate: f64) -> Self {
        Self::lowpass(order, 2.0 * PI * cutoff_hz, sample_rate)
    }

    /// Replace the bilinear blend parameter.
    pub const fn with_blend(mut self, blend: BlendParameter) -> Self {
        self.blend = blend;
        self
    }

    /// Replace the startup policy.
    pub const fn with_startup(mut self, startup: StartupPolicy) -> Self {
        self.startup = startup;
        self
    }

    /// Sample interval `dt = 1 / sample_rate` in seconds.
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate
    }
}
