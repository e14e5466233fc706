use crate::error::{Stage, UncertaintyError};
use crate::interval::{ScalarInterval, add_interval, div_interval, mul_interval};
use crate::sample::Sample;
use crate::vector::{DerivedVector, Point, cross};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Rigorous enclosures of the intersection of one sample's segments, as if the input coordinates were exact real numbers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyResult {
	/// Position of the intersection along segment A, where `a1` is 0 and `a2` is 1.
	pub parameter: ScalarInterval,
	pub x: ScalarInterval,
	pub y: ScalarInterval,
	/// Sum of the widths of `x` and `y`. Any algorithm working on these floating point inputs is uncertain by at least this much.
	pub width: f64,
}

impl UncertaintyResult {
	/// Whether an approximate intersection lies inside both coordinate enclosures.
	pub fn contains(&self, point: Point) -> bool {
		self.x.contains(point.x) && self.y.contains(point.y)
	}

	pub fn midpoint(&self) -> Point {
		Point::new(self.x.mid(), self.y.mid())
	}
}

fn ensure_finite(stage: Stage, intervals: &[ScalarInterval]) -> Result<(), UncertaintyError> {
	if intervals.iter().all(ScalarInterval::is_finite) { Ok(()) } else { Err(UncertaintyError::NumericOverflow { stage }) }
}

/// Bounds the intersection point of segments `A = (a1, a2)` and `B = (b1, b2)` using `a1 + s * (a2 - a1)` with `s = cross(b1 - a1, vb) / cross(va, vb)`.
///
/// Segments whose direction cross product can't be separated from zero are reported as [`UncertaintyError::UndefinedIntersection`].
pub fn estimate_uncertainty(sample: &Sample) -> Result<UncertaintyResult, UncertaintyError> {
	sample.validate()?;

	let va = DerivedVector::between(sample.a1, sample.a2);
	let vb = DerivedVector::between(sample.b1, sample.b2);
	let e = DerivedVector::between(sample.a1, sample.b1);
	ensure_finite(Stage::DerivedVectors, &[va.x, va.y, vb.x, vb.y, e.x, e.y])?;

	let cross_va_vb = cross(va, vb);
	let cross_e_vb = cross(e, vb);
	ensure_finite(Stage::CrossProducts, &[cross_va_vb, cross_e_vb])?;

	let parameter = div_interval(cross_e_vb, cross_va_vb).map_err(|_| UncertaintyError::UndefinedIntersection)?;
	ensure_finite(Stage::Parameter, &[parameter])?;

	let x = add_interval(ScalarInterval::from_float(sample.a1.x), mul_interval(parameter, va.x));
	let y = add_interval(ScalarInterval::from_float(sample.a1.y), mul_interval(parameter, va.y));
	ensure_finite(Stage::Coordinates, &[x, y])?;

	let width = x.width() + y.width();
	if !width.is_finite() {
		return Err(UncertaintyError::NumericOverflow { stage: Stage::Coordinates });
	}

	Ok(UncertaintyResult { parameter, x, y, width })
}

/// Evaluates every sample independently in parallel. Results are in input order and do not depend on the thread count.
pub fn estimate_batch(samples: &[Sample]) -> Vec<Result<UncertaintyResult, UncertaintyError>> {
	let results: Vec<_> = samples
		.par_iter()
		.map(|sample| {
			let result = estimate_uncertainty(sample);
			if let Err(error) = &result {
				log::trace!("Sample {sample:?} has no uncertainty bound: {error}");
			}
			result
		})
		.collect();

	let rejected = results.iter().filter(|result| result.is_err()).count();
	log::debug!("Bounded {} of {} samples, {rejected} rejected", samples.len() - rejected, samples.len());

	results
}
