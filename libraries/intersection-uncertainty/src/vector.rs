use crate::interval::{ScalarInterval, mul_interval, sub_interval};

use glam::DVec2;

/// An input coordinate, taken as exact.
pub type Point = DVec2;

/// The difference of two points, each component enclosed by an interval that bounds its rounding error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedVector {
	pub x: ScalarInterval,
	pub y: ScalarInterval,
}

impl DerivedVector {
	/// Encloses `to - from` componentwise.
	pub fn between(from: Point, to: Point) -> Self {
		Self {
			x: ScalarInterval::from_sub(to.x, from.x),
			y: ScalarInterval::from_sub(to.y, from.y),
		}
	}

	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

/// Enclosure of the 2D cross product `a.x * b.y - a.y * b.x`.
pub fn cross(a: DerivedVector, b: DerivedVector) -> ScalarInterval {
	sub_interval(mul_interval(a.x, b.y), mul_interval(a.y, b.x))
}
