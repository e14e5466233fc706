use std::fmt;

use thiserror::Error;

/// The stage of the intersection pipeline in which a value left the finite range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
	DerivedVectors,
	CrossProducts,
	Parameter,
	Coordinates,
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Stage::DerivedVectors => "derived vector",
			Stage::CrossProducts => "cross product",
			Stage::Parameter => "intersection parameter",
			Stage::Coordinates => "intersection coordinate",
		};
		write!(f, "{name}")
	}
}

/// The error type used for interval construction and per-sample uncertainty estimation.
///
/// Every variant except [`UncertaintyError::InvalidInterval`] is a property of one sample and never of a whole batch.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum UncertaintyError {
	/// The lower bound is above the upper bound, or one of them is NaN.
	#[error("Invalid interval bounds [{lo}, {hi}]")]
	InvalidInterval { lo: f64, hi: f64 },

	#[error("Divisor interval [{lo}, {hi}] contains or touches zero")]
	DivisionByZeroStraddle { lo: f64, hi: f64 },

	/// The direction cross product cannot be separated from zero, so the segments are parallel within rounding error.
	#[error("The segments are parallel or too close to parallel for the intersection to be bounded")]
	UndefinedIntersection,

	#[error("A {stage} value exceeded the representable floating point range")]
	NumericOverflow { stage: Stage },

	#[error("Sample coordinate {name} is not a finite number")]
	NonFiniteInput { name: &'static str },
}

impl UncertaintyError {
	/// Short machine readable name of the error kind.
	pub fn kind(&self) -> &'static str {
		match self {
			UncertaintyError::InvalidInterval { .. } => "invalid_interval",
			UncertaintyError::DivisionByZeroStraddle { .. } => "division_by_zero_straddle",
			UncertaintyError::UndefinedIntersection => "undefined_intersection",
			UncertaintyError::NumericOverflow { .. } => "numeric_overflow",
			UncertaintyError::NonFiniteInput { .. } => "non_finite_input",
		}
	}
}
