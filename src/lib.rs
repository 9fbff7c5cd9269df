// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![cfg_attr(not(test), warn(clippy::unwrap_used))] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![deny(missing_docs)] // Documentation is a must for release

//! # butterworth_iir
//!
//! Discrete-time Butterworth lowpass design and filtering.
//!
//! ## Overview
//!
//! The crate covers four steps, each consuming the previous one's output:
//!
//! 1. [`prototype`] - the normalised Butterworth polynomial by recursion,
//!    rescaled to the requested cutoff.
//! 2. [`ContinuousTransferFunction`] - the validated `H(s) = 1 / B_n(s/ωc)`.
//! 3. [`BilinearDiscretizer`] - the generalised bilinear transform
//!    (forward Euler, Tustin, backward Euler and everything in between).
//! 4. [`DiscreteIirFilter`] - the direct-form recurrence applied to a sample sequence.
//!
//! [`ButterworthDesign`] gathers the parameters and runs all four.
//!
//! ## Quick Start
//!
//! ```rust
//! use butterworth_iir::{ButterworthDesign, FilterResult};
//!
//! # fn example() -> FilterResult<()> {
//! // 2nd order, 5 Hz cutoff, 200 Hz sampling, Tustin discretisation
//! let filter = ButterworthDesign::from_hz(2, 5.0, 200.0).design()?;
//!
//! let input: Vec<f64> = (0..200)
//!     .map(|i| (2.0 * std::f64::consts::PI * 2.0 * i as f64 / 200.0).sin())
//!     .collect();
//! let output = filter.apply(&input);
//! assert_eq!(output.len(), input.len());
//!
//! let b = filter.b_coeffs();
//! let a = filter.transfer_function().denominator();
//! assert_eq!(a[0], 1.0);
//! assert_eq!(b.len(), a.len());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`FilterResult`]; parameters are checked
//! before anything is computed.
//!
//! ```rust
//! use butterworth_iir::{ButterworthDesign, FilterDesignError};
//!
//! match ButterworthDesign::lowpass(0, 10.0, 1000.0).design() {
//!     Err(FilterDesignError::InvalidOrder { order }) => assert_eq!(order, 0),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Features
//!
//! - `parallel-processing`: [`batch::ParallelFilter`] for filtering many
//!   sequences concurrently with `rayon`.
//!
//! ## Logging
//!
//! Design steps emit `tracing` events at `debug` level and filtering at
//! `trace` level; rejected parameters are reported at `warn`. Install any
//! `tracing` subscriber to see them.

mod error;

#[cfg(feature = "parallel-processing")]
pub mod batch;
pub mod bilinear;
pub mod iir_filtering;
pub mod pipeline;
pub mod polynomial;
pub mod prototype;
pub mod transfer_function;
pub mod types;

pub use crate::bilinear::BilinearDiscretizer;
pub use crate::error::{FilterDesignError, FilterResult};
pub use crate::iir_filtering::{DiscreteIirFilter, filter_sequence};
pub use crate::pipeline::{butterworth_lowpass, lowpass_filter};
pub use crate::prototype::{butterworth_denominator, frequency_scale, prototype_coefficients};
pub use crate::transfer_function::{ContinuousTransferFunction, DiscreteTransferFunction};
pub use crate::types::{BlendParameter, ButterworthDesign, StartupPolicy};
