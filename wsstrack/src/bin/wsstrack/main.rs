//! Working set size tracker (`wsstrack`)

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	clap::Parser,
	std::{
		fs,
		io::{self, Write},
		path::Path,
	},
	wsstrack::{config::Config, data, EventTraceReader, Report, ReportSink, Simulator, WssTracker},
	wsstrack_util::logger,
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Read the config file, then apply any overrides
	let mut config = match &args.config_file {
		Some(config_file) => {
			let config_file = fs::File::open(config_file).context("Unable to open config file")?;
			serde_json::from_reader::<_, Config>(config_file).context("Unable to parse config file")?
		},
		None => Config::default(),
	};
	if let Some(window_size) = args.window_size {
		config.window_size = window_size;
	}
	if let Some(granularity) = args.granularity {
		config.granularity = granularity;
	}
	if let Some(boundary_mode) = args.boundary_mode {
		config.boundary_mode = boundary_mode;
	}
	if args.disabled {
		config.enabled = false;
	}
	tracing::debug!(?config, "Configuration");

	// Note: We validate even when disabled, so bad configs are always reported
	let tracker_config = config.tracker_config().context("Invalid configuration")?;
	let debug_output_period = config.debug_output_period().context("Invalid configuration")?;
	if !config.enabled {
		tracing::info!("Analysis disabled, exiting");
		return Ok(());
	}

	// Read the trace file
	let trace_file = fs::File::open(&args.trace_file).context("Unable to open trace file")?;
	let mut event_trace_reader =
		EventTraceReader::from_reader(io::BufReader::new(trace_file)).context("Unable to parse event trace")?;
	tracing::trace!(target: "wsstrack::parse_event_trace", ?event_trace_reader, "Parsed event trace");

	let report_sink = match &args.report_file {
		Some(report_file) => ReportSink::File(report_file.clone()),
		None => ReportSink::Stderr,
	};
	tracing::info!(
		window_size = config.window_size,
		granularity = config.granularity,
		?report_sink,
		"Tracking working set size of {:?}",
		args.trace_file
	);

	// Run the simulator
	let mut sim = Simulator::new(debug_output_period);
	let mut tracker = WssTracker::start(tracker_config);
	let run_output = sim
		.run(&mut event_trace_reader, &mut tracker)
		.context("Unable to run simulator")?;

	let report = tracker.finalize();
	tracing::info!(events = run_output.events, access_count = report.access_count, "Finished tracking");

	self::finish(&report, &report_sink, args.output_file.as_deref(), &config)
}

/// Emits the report and writes the output data, if requested.
///
/// The report is always emitted, even if writing the output data fails.
fn finish(
	report: &Report,
	report_sink: &ReportSink,
	output_path: Option<&Path>,
	config: &Config,
) -> Result<(), anyhow::Error> {
	let data_res = match output_path {
		Some(output_path) => {
			let data = data::Data::from_report(report, config.window_size, config.granularity);
			self::write_data(output_path, &data).with_context(|| format!("Unable to write output data to {output_path:?}"))
		},
		None => Ok(()),
	};
	if let Err(err) = &data_res {
		tracing::error!(?err, "Unable to write output data, emitting report anyway");
	}

	report_sink.emit(report).context("Unable to emit report")?;
	data_res
}

/// Writes output data to `path`
fn write_data(path: &Path, data: &data::Data) -> Result<(), anyhow::Error> {
	let output_file = fs::File::create(path).context("Unable to create output file")?;
	let mut output_file = io::BufWriter::new(output_file);
	serde_json::to_writer(&mut output_file, data).context("Unable to write to output file")?;
	output_file.flush().context("Unable to flush output file")?;

	Ok(())
}
