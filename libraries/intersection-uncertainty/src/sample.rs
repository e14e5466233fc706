use crate::error::UncertaintyError;
use crate::vector::Point;

use serde::Deserialize;

/// The endpoints of two segments, `A = (a1, a2)` and `B = (b1, b2)`, whose intersection is bounded.
///
/// Deserializes from either nested points (`{"a1": [x, y], ...}`) or the flat columns written by the benchmark harness (`{"a1_x": x, "a1_y": y, ...}`).
/// Unknown fields are ignored so whole benchmark records can be read directly.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "SampleRecord")]
pub struct Sample {
	pub a1: Point,
	pub a2: Point,
	pub b1: Point,
	pub b2: Point,
}

impl Sample {
	pub fn new(a1: Point, a2: Point, b1: Point, b2: Point) -> Self {
		Self { a1, a2, b1, b2 }
	}

	/// Rejects samples with a NaN or infinite coordinate, naming the first offending one.
	pub fn validate(&self) -> Result<(), UncertaintyError> {
		let coordinates = [
			("a1.x", self.a1.x),
			("a1.y", self.a1.y),
			("a2.x", self.a2.x),
			("a2.y", self.a2.y),
			("b1.x", self.b1.x),
			("b1.y", self.b1.y),
			("b2.x", self.b2.x),
			("b2.y", self.b2.y),
		];

		match coordinates.into_iter().find(|(_, value)| !value.is_finite()) {
			Some((name, _)) => Err(UncertaintyError::NonFiniteInput { name }),
			None => Ok(()),
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SampleRecord {
	Nested {
		a1: Point,
		a2: Point,
		b1: Point,
		b2: Point,
	},
	Flat {
		a1_x: f64,
		a1_y: f64,
		a2_x: f64,
		a2_y: f64,
		b1_x: f64,
		b1_y: f64,
		b2_x: f64,
		b2_y: f64,
	},
}

impl From<SampleRecord> for Sample {
	fn from(record: SampleRecord) -> Self {
		match record {
			SampleRecord::Nested { a1, a2, b1, b2 } => Sample { a1, a2, b1, b2 },
			SampleRecord::Flat {
				a1_x,
				a1_y,
				a2_x,
				a2_y,
				b1_x,
				b1_y,
				b2_x,
				b2_y,
			} => Sample {
				a1: Point::new(a1_x, a1_y),
				a2: Point::new(a2_x, a2_y),
				b1: Point::new(b1_x, b1_y),
				b2: Point::new(b2_x, b2_y),
			},
		}
	}
}
