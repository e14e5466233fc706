use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use intersection_uncertainty::{LinearErrorEstimate, Sample, ScreeningConfig, ScreeningOutcome, UncertaintyError, UncertaintyResult, estimate_batch, screen_batch};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Mode {
	/// Bound every sample with interval arithmetic
	Rigorous,
	/// Use the linear error estimate where it is reliable and bound only the remaining samples
	Screened,
}

#[derive(Parser)]
#[command(name = "uncertainty-cli")]
#[command(about = "Bound the floating point uncertainty of segment intersection samples")]
struct Args {
	/// JSON file holding an array of samples (`-` reads from stdin)
	input: PathBuf,

	/// Output file (defaults to stdout)
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Evaluation mode
	#[arg(short, long, value_enum, default_value = "rigorous")]
	mode: Mode,

	/// JSON file with screening settings
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Largest trusted linear relative error estimate, overrides the config file
	#[arg(long)]
	max_relative_error: Option<f64>,

	/// Pretty print the output JSON
	#[arg(long)]
	pretty: bool,
}

/// The outcome for one input sample, tagged by `status`.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Record {
	Bounded { index: usize, result: UncertaintyResult },
	Screened { index: usize, estimate: LinearErrorEstimate },
	Rejected { index: usize, kind: &'static str, reason: String },
}

impl Record {
	fn from_result(index: usize, result: Result<UncertaintyResult, UncertaintyError>) -> Self {
		match result {
			Ok(result) => Record::Bounded { index, result },
			Err(error) => Record::Rejected {
				index,
				kind: error.kind(),
				reason: error.to_string(),
			},
		}
	}

	fn from_outcome(index: usize, outcome: ScreeningOutcome) -> Self {
		match outcome {
			ScreeningOutcome::Linear(estimate) => Record::Screened { index, estimate },
			ScreeningOutcome::Rigorous(result) => Record::from_result(index, result),
		}
	}
}

fn load_config(path: Option<&Path>, max_relative_error: Option<f64>) -> Result<ScreeningConfig> {
	let mut config: ScreeningConfig = match path {
		Some(path) => {
			let text = fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
			serde_json::from_str(&text).with_context(|| format!("Failed to parse config file {}", path.display()))?
		}
		None => ScreeningConfig::default(),
	};

	if let Some(max_relative_error) = max_relative_error {
		config.max_relative_error = max_relative_error;
	}

	Ok(config)
}

fn read_samples(path: &Path) -> Result<Vec<Sample>> {
	let text = if path == Path::new("-") {
		let mut text = String::new();
		io::stdin().read_to_string(&mut text).context("Failed to read samples from stdin")?;
		text
	} else {
		fs::read_to_string(path).with_context(|| format!("Failed to read sample file {}", path.display()))?
	};

	parse_samples(&text).with_context(|| format!("Failed to parse samples from {}", path.display()))
}

fn parse_samples(text: &str) -> serde_json::Result<Vec<Sample>> {
	serde_json::from_str(text)
}

fn evaluate(samples: &[Sample], mode: Mode, config: &ScreeningConfig) -> Vec<Record> {
	match mode {
		Mode::Rigorous => estimate_batch(samples).into_iter().enumerate().map(|(index, result)| Record::from_result(index, result)).collect(),
		Mode::Screened => screen_batch(samples, config).into_iter().enumerate().map(|(index, outcome)| Record::from_outcome(index, outcome)).collect(),
	}
}

fn write_records(records: &[Record], output: Option<&Path>, pretty: bool) -> Result<()> {
	let writer: Box<dyn Write> = match output {
		Some(path) => Box::new(File::create(path).with_context(|| format!("Failed to create output file {}", path.display()))?),
		None => Box::new(io::stdout().lock()),
	};
	let mut writer = BufWriter::new(writer);

	if pretty {
		serde_json::to_writer_pretty(&mut writer, records)?;
	} else {
		serde_json::to_writer(&mut writer, records)?;
	}
	writeln!(writer)?;
	writer.flush().context("Failed to write results")
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();
	let config = load_config(args.config.as_deref(), args.max_relative_error)?;
	let samples = read_samples(&args.input)?;
	log::info!("Read {} samples from {}", samples.len(), args.input.display());

	let records = evaluate(&samples, args.mode, &config);

	let count = |predicate: fn(&Record) -> bool| records.iter().filter(|record| predicate(record)).count();
	let bounded = count(|record| matches!(record, Record::Bounded { .. }));
	let screened = count(|record| matches!(record, Record::Screened { .. }));
	let rejected = count(|record| matches!(record, Record::Rejected { .. }));
	log::info!("{bounded} bounded, {screened} screened, {rejected} rejected");

	write_records(&records, args.output.as_deref(), args.pretty)
}

#[cfg(test)]
mod tests {
	use super::*;
	use intersection_uncertainty::Point;
	use pretty_assertions::assert_eq;

	const SAMPLES: &str = r#"[
		{"a1": [0, 0], "a2": [2, 0], "b1": [1, -1], "b2": [1, 1]},
		{"a1_x": 0, "a1_y": 0, "a2_x": 1, "a2_y": 0, "b1_x": 0, "b1_y": 1, "b2_x": 1, "b2_y": 1, "t_soe": 4.2}
	]"#;

	#[test]
	fn rigorous_mode_bounds_or_rejects_each_sample() {
		let samples = parse_samples(SAMPLES).unwrap();
		let records = evaluate(&samples, Mode::Rigorous, &ScreeningConfig::default());

		assert_eq!(records.len(), 2);
		match &records[0] {
			Record::Bounded { index, result } => {
				assert_eq!(*index, 0);
				assert!(result.contains(Point::new(1., 0.)));
			}
			other => panic!("Expected a bounded record, got {other:?}"),
		}
		assert_eq!(
			records[1],
			Record::Rejected {
				index: 1,
				kind: "undefined_intersection",
				reason: UncertaintyError::UndefinedIntersection.to_string(),
			}
		);
	}

	#[test]
	fn screened_mode_skips_rigorous_work_for_exact_samples() {
		let samples = parse_samples(SAMPLES).unwrap();
		let records = evaluate(&samples, Mode::Screened, &ScreeningConfig::default());

		assert!(matches!(records[0], Record::Screened { index: 0, .. }));
		assert!(matches!(records[1], Record::Rejected { index: 1, kind: "undefined_intersection", .. }));
	}

	#[test]
	fn records_are_tagged_by_status() {
		let record = Record::Rejected {
			index: 3,
			kind: "non_finite_input",
			reason: "bad".to_string(),
		};
		let json = serde_json::to_value(&record).unwrap();
		assert_eq!(json, serde_json::json!({"status": "rejected", "index": 3, "kind": "non_finite_input", "reason": "bad"}));

		let samples = parse_samples(SAMPLES).unwrap();
		let records = evaluate(&samples[..1], Mode::Rigorous, &ScreeningConfig::default());
		let json = serde_json::to_value(&records[0]).unwrap();
		assert_eq!(json["status"], "bounded");
		assert_eq!(json["result"]["x"].as_array().map(Vec::len), Some(2));
	}

	#[test]
	fn command_line_threshold_overrides_default() {
		let config = load_config(None, Some(1e-3)).unwrap();
		assert_eq!(config.max_relative_error, 1e-3);
		assert_eq!(load_config(None, None).unwrap(), ScreeningConfig::default());
	}
}
