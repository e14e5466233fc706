//! First order relative error estimates for 2D cross products.
//!
//! These are linear Taylor approximations, not bounds. The estimate divides by the magnitude of the cross product itself, so it
//! amplifies noise without limit as the vectors approach parallel and reaches `inf` or `NaN` at exactly zero. That is inherent to
//! the method: callers must treat large or non-finite estimates as unreliable and fall back to [`crate::estimate_uncertainty`].

use crate::sample::Sample;
use crate::two_diff::two_diff;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Relative error of `a.x * b.y - a.y * b.x` given absolute errors of the vector components.
///
/// The sign of each component error is ignored. A cross product that overflows has no meaningful relative error and gives `inf`.
pub fn cross_product_error(a: DVec2, a_error: DVec2, b: DVec2, b_error: DVec2) -> f64 {
	let cross = a.perp_dot(b);
	if cross.is_infinite() {
		return f64::INFINITY;
	}

	let a_error = a_error.abs();
	let b_error = b_error.abs();

	let propagated = a_error.x * b.y.abs() + a.x.abs() * b_error.y + a_error.y * b.x.abs() + a.y.abs() * b_error.x;
	propagated / cross.abs()
}

/// A rounded difference vector together with the exact rounding error of each component.
#[derive(Clone, Copy, Debug, PartialEq)]
struct RoundedDifference {
	value: DVec2,
	error: DVec2,
}

impl RoundedDifference {
	fn between(from: DVec2, to: DVec2) -> Self {
		let (x, x_error) = two_diff(to.x, from.x);
		let (y, y_error) = two_diff(to.y, from.y);
		Self {
			value: DVec2::new(x, y),
			error: DVec2::new(x_error, y_error),
		}
	}
}

/// Linear relative error estimates for the three cross products of a sample's derived vectors `va = a2 - a1`, `vb = b2 - b1` and `e = b1 - a1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearErrorEstimate {
	pub va_vb: f64,
	pub e_va: f64,
	pub e_vb: f64,
}

impl LinearErrorEstimate {
	/// Uses the two-diff residuals of the derived vectors as their component errors.
	pub fn from_sample(sample: &Sample) -> Self {
		let va = RoundedDifference::between(sample.a1, sample.a2);
		let vb = RoundedDifference::between(sample.b1, sample.b2);
		let e = RoundedDifference::between(sample.a1, sample.b1);

		let estimate = |a: RoundedDifference, b: RoundedDifference| cross_product_error(a.value, a.error, b.value, b.error);

		Self {
			va_vb: estimate(va, vb),
			e_va: estimate(e, va),
			e_vb: estimate(e, vb),
		}
	}

	/// The largest of the three estimates, with NaN counted as infinitely large.
	pub fn worst(&self) -> f64 {
		[self.va_vb, self.e_va, self.e_vb]
			.into_iter()
			.map(|estimate| if estimate.is_nan() { f64::INFINITY } else { estimate })
			.fold(0., f64::max)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::vector::Point;

	#[test]
	fn matches_the_first_order_formula() {
		let a = DVec2::new(3., -4.);
		let b = DVec2::new(2., 5.);
		let a_error = DVec2::new(0.01, -0.02);
		let b_error = DVec2::new(0.03, 0.04);

		// (0.01 * 5 + 3 * 0.04 + 0.02 * 2 + 4 * 0.03) / |3 * 5 - (-4) * 2|
		let expected = (0.05 + 0.12 + 0.04 + 0.12) / 23.;
		assert!((cross_product_error(a, a_error, b, b_error) - expected).abs() < 1e-15);
	}

	#[test]
	fn exact_components_give_zero_error() {
		assert_eq!(cross_product_error(DVec2::new(1., 2.), DVec2::ZERO, DVec2::new(3., 1.), DVec2::ZERO), 0.);
	}

	#[test]
	fn parallel_vectors_blow_up() {
		let a = DVec2::new(1., 1.);
		assert_eq!(cross_product_error(a, DVec2::splat(1e-17), a * 2., DVec2::ZERO), f64::INFINITY);
		assert!(cross_product_error(a, DVec2::ZERO, a * 2., DVec2::ZERO).is_nan());
	}

	#[test]
	fn overflowing_cross_product_is_unreliable() {
		let a = DVec2::new(1e200, 1e-200);
		let b = DVec2::new(1e200, -2e200);
		assert_eq!(cross_product_error(a, DVec2::ZERO, b, DVec2::ZERO), f64::INFINITY);

		let sample = Sample::new(Point::new(0., 0.), Point::new(1e200, 1e-200), Point::new(1e-200, 1e200), Point::new(1e200, -1e200));
		assert_eq!(LinearErrorEstimate::from_sample(&sample).worst(), f64::INFINITY);
	}

	#[test]
	fn sample_with_exact_differences_has_zero_estimates() {
		let sample = Sample::new(Point::new(0., 0.), Point::new(2., 0.), Point::new(1., -1.), Point::new(1., 1.));
		let estimate = LinearErrorEstimate::from_sample(&sample);
		assert_eq!(estimate, LinearErrorEstimate { va_vb: 0., e_va: 0., e_vb: 0. });
		assert_eq!(estimate.worst(), 0.);
	}

	#[test]
	fn sample_with_rounded_differences_has_small_estimates() {
		// `a2.x - a1.x` is 1 + 3 * 2^-54, which rounds with a residual of -2^-54
		let sample = Sample::new(Point::new(2_f64.powi(-54), 0.), Point::new(1_f64.next_up(), 1.), Point::new(0.5, -1.), Point::new(0.25, 2.));
		let estimate = LinearErrorEstimate::from_sample(&sample);
		assert!(estimate.va_vb > 0.);
		assert!(estimate.worst() < 1e-14);
	}

	#[test]
	fn worst_treats_nan_as_unreliable() {
		let estimate = LinearErrorEstimate { va_vb: f64::NAN, e_va: 1e-16, e_vb: 0. };
		assert_eq!(estimate.worst(), f64::INFINITY);
	}
}
