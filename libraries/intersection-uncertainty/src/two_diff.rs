//! Error-free transformation of a single subtraction.
//!
//! Under IEEE 754 round-to-nearest, the rounded difference `x = a - b` and the residual `y` returned by [`two_diff`]
//! satisfy `x + y == a - b` exactly, as long as `x` does not overflow. The sign of `y` tells on which side of `x` the
//! true difference lies, which gives an enclosure at most one ULP wide.

use crate::interval::ScalarInterval;

/// Splits `a - b` into the rounded difference and its exact rounding error.
pub fn two_diff(a: f64, b: f64) -> (f64, f64) {
	let x = a - b;
	let b_virtual = a - x;
	let a_virtual = x + b_virtual;
	let b_roundoff = b_virtual - b;
	let a_roundoff = a - a_virtual;
	(x, a_roundoff + b_roundoff)
}

/// The exact rounding error of `a - b`.
pub fn two_diff_residual(a: f64, b: f64) -> f64 {
	two_diff(a, b).1
}

impl ScalarInterval {
	/// The tightest enclosure of the true difference `a - b`.
	///
	/// Exact differences give a point interval, rounded ones an interval one ULP wide with the rounded result on the side the residual points away from.
	pub fn from_sub(a: f64, b: f64) -> Self {
		let (x, residual) = two_diff(a, b);

		// For finite operands an infinite `x` means the true difference lies beyond the largest double
		if x.is_nan() {
			ScalarInterval::ENTIRE
		} else if x == f64::INFINITY {
			ScalarInterval::from_bounds(f64::MAX, f64::INFINITY)
		} else if x == f64::NEG_INFINITY {
			ScalarInterval::from_bounds(f64::NEG_INFINITY, -f64::MAX)
		} else if residual < 0. {
			ScalarInterval::from_bounds(x.next_down(), x)
		} else if residual > 0. {
			ScalarInterval::from_bounds(x, x.next_up())
		} else {
			ScalarInterval::from_float(x)
		}
	}
}
