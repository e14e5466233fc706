//! Rigorous bounds on how much floating point representation alone limits the accuracy of a 2D segment intersection.
//!
//! Derived vectors are enclosed with an error-free two-diff transformation, then carried through the parametric intersection
//! formula with outward rounded interval arithmetic. The width of the final enclosure is the floor that any approximate
//! intersection algorithm working on the same inputs is measured against.

mod error;
mod estimator;
mod interval;
mod linear_error;
mod sample;
mod screening;
mod two_diff;
mod ulp;
mod vector;

pub use error::{Stage, UncertaintyError};
pub use estimator::{UncertaintyResult, estimate_batch, estimate_uncertainty};
pub use interval::{ScalarInterval, add_interval, div_interval, mul_interval, sub_interval};
pub use linear_error::{LinearErrorEstimate, cross_product_error};
pub use sample::Sample;
pub use screening::{DEFAULT_MAX_RELATIVE_ERROR, ScreeningConfig, ScreeningOutcome, screen_batch};
pub use two_diff::{two_diff, two_diff_residual};
pub use ulp::{step_by_ulps, ulp, ulp_distance};
pub use vector::{DerivedVector, Point, cross};
