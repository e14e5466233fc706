use crate::error::UncertaintyError;
use crate::estimator::{UncertaintyResult, estimate_uncertainty};
use crate::linear_error::LinearErrorEstimate;
use crate::sample::Sample;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RELATIVE_ERROR: f64 = 1e-9;

/// Settings for [`screen_batch`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
	/// Largest linear relative error estimate that is trusted without running the rigorous estimator.
	pub max_relative_error: f64,
}

impl Default for ScreeningConfig {
	fn default() -> Self {
		Self {
			max_relative_error: DEFAULT_MAX_RELATIVE_ERROR,
		}
	}
}

/// The result of screening one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScreeningOutcome {
	/// The cheap estimate was small and finite.
	Linear(LinearErrorEstimate),
	/// The cheap estimate was unreliable, so the sample was bounded rigorously.
	Rigorous(Result<UncertaintyResult, UncertaintyError>),
}

impl ScreeningConfig {
	pub fn screen(&self, sample: &Sample) -> ScreeningOutcome {
		let estimate = LinearErrorEstimate::from_sample(sample);
		let worst = estimate.worst();

		if worst.is_finite() && worst <= self.max_relative_error {
			ScreeningOutcome::Linear(estimate)
		} else {
			log::trace!("Linear estimate {worst} exceeds {}, bounding rigorously", self.max_relative_error);
			ScreeningOutcome::Rigorous(estimate_uncertainty(sample))
		}
	}
}

/// Screens every sample in parallel with the linear estimator, falling back to the rigorous estimator where the estimate can't be trusted.
pub fn screen_batch(samples: &[Sample], config: &ScreeningConfig) -> Vec<ScreeningOutcome> {
	let outcomes: Vec<_> = samples.par_iter().map(|sample| config.screen(sample)).collect();

	let rigorous = outcomes.iter().filter(|outcome| matches!(outcome, ScreeningOutcome::Rigorous(_))).count();
	log::debug!("Screened {} samples, {rigorous} needed the rigorous estimator", samples.len());

	outcomes
}
