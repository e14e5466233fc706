use crate::error::UncertaintyError;

use serde::{Deserialize, Serialize};

/// A closed interval `[lo, hi]` guaranteed to contain a true real value despite the floating point rounding of every step that produced it.
///
/// Intervals are immutable. The arithmetic functions in this module ([`add_interval`], [`sub_interval`], [`mul_interval`], [`div_interval`])
/// round the computed bounds outward by one representable value so the result still contains the exact combination of any values drawn from the operands.
///
/// Serialized as the two element array `[lo, hi]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct ScalarInterval {
	lo: f64,
	hi: f64,
}

impl ScalarInterval {
	/// The whole extended real line.
	pub const ENTIRE: ScalarInterval = ScalarInterval {
		lo: f64::NEG_INFINITY,
		hi: f64::INFINITY,
	};

	/// Builds an interval from bounds produced by this crate's own arithmetic.
	///
	/// Out of order or NaN bounds can only come from a defect in the rounding logic, so this is checked in release builds too.
	pub(crate) fn from_bounds(lo: f64, hi: f64) -> Self {
		assert!(lo <= hi, "{}", UncertaintyError::InvalidInterval { lo, hi });
		Self { lo, hi }
	}

	/// Builds an interval from caller supplied bounds, rejecting `lo > hi` and NaN bounds.
	pub fn try_new(lo: f64, hi: f64) -> Result<Self, UncertaintyError> {
		if lo <= hi { Ok(Self { lo, hi }) } else { Err(UncertaintyError::InvalidInterval { lo, hi }) }
	}

	/// The degenerate interval `[x, x]` for a value that is exactly representable.
	///
	/// Panics if `x` is NaN.
	pub fn from_float(x: f64) -> Self {
		Self::from_bounds(x, x)
	}

	pub fn lo(&self) -> f64 {
		self.lo
	}

	pub fn hi(&self) -> f64 {
		self.hi
	}

	/// Distance between the bounds. This is the uncertainty carried by the interval.
	pub fn width(&self) -> f64 {
		self.hi - self.lo
	}

	/// A representative value inside the interval.
	///
	/// With one unbounded side this is the finite bound, and `0` for [`ScalarInterval::ENTIRE`].
	pub fn mid(&self) -> f64 {
		match (self.lo.is_finite(), self.hi.is_finite()) {
			_ if self.lo == self.hi => self.lo,
			(true, true) => self.lo / 2. + self.hi / 2.,
			(true, false) => self.lo,
			(false, true) => self.hi,
			(false, false) => 0.,
		}
	}

	pub fn contains(&self, x: f64) -> bool {
		self.lo <= x && x <= self.hi
	}

	/// Whether zero lies inside the interval or on one of its bounds.
	pub fn contains_zero(&self) -> bool {
		self.contains(0.)
	}

	pub fn is_finite(&self) -> bool {
		self.lo.is_finite() && self.hi.is_finite()
	}

	pub fn is_point(&self) -> bool {
		self.lo == self.hi
	}
}

impl From<ScalarInterval> for [f64; 2] {
	fn from(interval: ScalarInterval) -> Self {
		[interval.lo, interval.hi]
	}
}

impl TryFrom<[f64; 2]> for ScalarInterval {
	type Error = UncertaintyError;

	fn try_from([lo, hi]: [f64; 2]) -> Result<Self, Self::Error> {
		ScalarInterval::try_new(lo, hi)
	}
}

/// Widens the hull of the four corner evaluations by one representable value on each side.
///
/// Each corner carries at most half an ULP of rounding error, so a single step outward restores containment.
fn round_outward(corners: [f64; 4]) -> ScalarInterval {
	// An undefined corner (`inf - inf`, `0 * inf`) only arises from unbounded operands
	if corners.iter().any(|corner| corner.is_nan()) {
		return ScalarInterval::ENTIRE;
	}

	let lo = corners.into_iter().fold(f64::INFINITY, f64::min);
	let hi = corners.into_iter().fold(f64::NEG_INFINITY, f64::max);

	ScalarInterval::from_bounds(lo.next_down(), hi.next_up())
}

fn combine(a: ScalarInterval, b: ScalarInterval, op: impl Fn(f64, f64) -> f64) -> ScalarInterval {
	round_outward([op(a.lo, b.lo), op(a.lo, b.hi), op(a.hi, b.lo), op(a.hi, b.hi)])
}

pub fn add_interval(a: ScalarInterval, b: ScalarInterval) -> ScalarInterval {
	combine(a, b, |x, y| x + y)
}

pub fn sub_interval(a: ScalarInterval, b: ScalarInterval) -> ScalarInterval {
	combine(a, b, |x, y| x - y)
}

pub fn mul_interval(a: ScalarInterval, b: ScalarInterval) -> ScalarInterval {
	combine(a, b, |x, y| x * y)
}

/// Divides `a` by `b`, which must keep one strict sign over its whole range.
///
/// A divisor that contains or touches zero has no bounded quotient and yields [`UncertaintyError::DivisionByZeroStraddle`].
pub fn div_interval(a: ScalarInterval, b: ScalarInterval) -> Result<ScalarInterval, UncertaintyError> {
	if b.contains_zero() {
		return Err(UncertaintyError::DivisionByZeroStraddle { lo: b.lo, hi: b.hi });
	}

	Ok(combine(a, b, |x, y| x / y))
}
