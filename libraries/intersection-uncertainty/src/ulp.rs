/// Moves `x` by `steps` representable doubles, upward for positive `steps` and downward for negative ones.
pub fn step_by_ulps(x: f64, steps: i32) -> f64 {
	let mut value = x;
	for _ in 0..steps.unsigned_abs() {
		value = if steps > 0 { value.next_up() } else { value.next_down() };
	}
	value
}

/// The gap between `x` and the next representable double above it.
pub fn ulp(x: f64) -> f64 {
	x.next_up() - x
}

/// Maps a double onto a signed integer scale on which adjacent doubles differ by one, with both zeros at the origin.
fn ordinal(x: f64) -> i64 {
	let bits = x.to_bits() as i64;
	if bits < 0 { i64::MIN - bits } else { bits }
}

/// The number of representable doubles separating `a` and `b`.
///
/// `+0.0` and `-0.0` are zero apart. Returns `None` if either value is NaN.
pub fn ulp_distance(a: f64, b: f64) -> Option<u64> {
	if a.is_nan() || b.is_nan() {
		return None;
	}

	Some(ordinal(a).abs_diff(ordinal(b)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ulp_of_one_is_machine_epsilon() {
		assert_eq!(ulp(1.), f64::EPSILON);
		// Below a power of two the spacing halves
		assert_eq!(ulp(1_f64.next_down()), f64::EPSILON / 2.);
	}

	#[test]
	fn stepping_is_reversible() {
		let x = 2. - 1e-10;
		assert_eq!(step_by_ulps(step_by_ulps(x, 1000), -1000), x);
		assert_eq!(step_by_ulps(x, 0), x);
		assert_eq!(step_by_ulps(0., -1), -f64::from_bits(1));
	}

	#[test]
	fn distance_counts_representable_values() {
		assert_eq!(ulp_distance(1., step_by_ulps(1., 3)), Some(3));
		assert_eq!(ulp_distance(step_by_ulps(1., -7), 1.), Some(7));
		assert_eq!(ulp_distance(-0., 0.), Some(0));
		assert_eq!(ulp_distance(-f64::from_bits(1), f64::from_bits(1)), Some(2));
		assert_eq!(ulp_distance(f64::NAN, 1.), None);
	}

	#[test]
	fn distance_across_a_power_of_two() {
		let below = step_by_ulps(2., -2);
		let above = step_by_ulps(2., 2);
		assert_eq!(ulp_distance(below, above), Some(4));
	}
}
