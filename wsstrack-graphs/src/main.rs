//! Creates graphs from `wsstrack`'s output

// Modules
mod args;

// Imports
use {
	anyhow::Context,
	args::Args,
	clap::Parser,
	gnuplot::{AxesCommon, Caption, Figure},
	itertools::Itertools,
	std::{fs, path::Path},
	wsstrack::data::Data,
	wsstrack_util::logger,
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Then check the sub-command
	match args.sub_cmd {
		args::SubCmd::WindowSizes(cmd_args) => self::draw_window_sizes(&cmd_args)?,
		args::SubCmd::WindowSizesMultiple(cmd_args) => self::draw_window_sizes_multiple(&cmd_args)?,
	}

	Ok(())
}

/// Draws the working set sizes of a single input
fn draw_window_sizes(cmd_args: &args::WindowSizes) -> Result<(), anyhow::Error> {
	let data = self::read_data(&cmd_args.input_file)?;
	tracing::debug!(
		windows = data.wss.series.len(),
		peak_wss = data.wss.peak,
		peak_cwss = data.cwss.peak,
		"Read data"
	);

	// Note: The concurrent working set size only exists from the second window onwards
	let wss_points = data.wss.series.iter().enumerate().map(|(idx, &wss)| (idx, wss)).collect_vec();
	let cwss_points = data
		.cwss
		.series
		.iter()
		.enumerate()
		.map(|(idx, &cwss)| (idx + 1, cwss))
		.collect_vec();

	let mut fig = Figure::new();
	let wss_caption = format!("WSS (peak {}, avg {:.2})", data.wss.peak, data.wss.average);
	let cwss_caption = format!("CWSS (peak {}, avg {:.2})", data.cwss.peak, data.cwss.average);
	fig.axes2d()
		.set_x_label(&format!("Window ({} accesses)", data.window_size), &[])
		.set_y_label("Bytes", &[])
		.lines(
			wss_points.iter().map(|&(idx, _)| idx),
			wss_points.iter().map(|&(_, wss)| wss),
			&[Caption(wss_caption.as_str())],
		)
		.lines(
			cwss_points.iter().map(|&(idx, _)| idx),
			cwss_points.iter().map(|&(_, cwss)| cwss),
			&[Caption(cwss_caption.as_str())],
		);

	self::handle_output(&mut fig, &cmd_args.output)
}

/// Draws the working set sizes of multiple inputs
fn draw_window_sizes_multiple(cmd_args: &args::WindowSizesMultiple) -> Result<(), anyhow::Error> {
	let mut fig = Figure::new();
	let axes = fig
		.axes2d()
		.set_x_label("Window", &[])
		.set_y_label("Working set size (bytes)", &[]);

	for input_file in &cmd_args.input_files {
		let data = self::read_data(input_file)?;
		let caption = input_file
			.file_stem()
			.map_or_else(|| input_file.display().to_string(), |stem| stem.to_string_lossy().into_owned());

		axes.lines(0..data.wss.series.len(), &data.wss.series, &[Caption(caption.as_str())]);
	}

	self::handle_output(&mut fig, &cmd_args.output)
}

/// Reads output data from `path`
fn read_data(path: &Path) -> Result<Data, anyhow::Error> {
	let file = fs::File::open(path).with_context(|| format!("Unable to open input file {path:?}"))?;
	serde_json::from_reader::<_, Data>(file).with_context(|| format!("Unable to parse input file {path:?}"))
}

/// Handles output for a figure
fn handle_output(fig: &mut Figure, output: &args::Output) -> Result<(), anyhow::Error> {
	if let Some(output_file) = &output.file {
		fig.save_to_png(output_file, output.width, output.height)
			.map_err(|err| anyhow::anyhow!("Unable to save output file: {err:?}"))?;
	}

	if output.interactive {
		fig.show().map_err(|err| anyhow::anyhow!("Unable to show figure: {err:?}"))?;
	}

	Ok(())
}
