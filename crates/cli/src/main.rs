#![warn(clippy::pedantic)]

use std::{
	fs::File,
	io::{Read, Write},
	path::PathBuf,
};

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use gold2cal_core::IcsCalendar;

/// Turn an exported schedule page into a quarter of recurring calendar
/// events, written out as an iCalendar file.
#[derive(Parser)]
struct Args {
	/// Exported schedule page; stdin when omitted.
	#[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
	path: Option<PathBuf>,
	/// First day of the quarter.
	#[clap(short, long, value_name = "YYYY-MM-DD")]
	quarter_start: NaiveDate,
	/// Quarter length in weeks (six for a summer term).
	#[clap(short, long, default_value_t = 10)]
	weeks: u32,
	/// Output file; stdout when omitted.
	#[clap(short, long, value_hint = clap::ValueHint::FilePath)]
	output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
	env_logger::init();

	let args = Args::parse();

	let mut html = String::new();
	if let Some(path) = &args.path {
		File::open(path)
			.with_context(|| format!("cannot open {}", path.display()))?
			.read_to_string(&mut html)?;
	} else {
		std::io::stdin().read_to_string(&mut html)?;
	}

	let mut service = IcsCalendar::new();
	let outcome = gold2cal_core::process(&html, args.quarter_start, args.weeks, &mut service)
		.context("failed to process schedule")?;

	log::info!("{} anomalies absorbed during extraction", outcome.diagnostics.len());

	let calendar = service.into_calendar();

	if let Some(output) = args.output {
		let mut file = File::create(&output)
			.with_context(|| format!("cannot create {}", output.display()))?;
		write!(&mut file, "{calendar}")?;
	} else {
		write!(&mut std::io::stdout(), "{calendar}")?;
	}

	eprintln!(
		"Added {} courses to your calendar: {}",
		outcome.event_ids.len(),
		outcome.course_codes.join(", ")
	);

	Ok(())
}
