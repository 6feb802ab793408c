//! Arguments

// Imports
use {std::path::PathBuf, wsstrack::tracker::BoundaryMode};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Event trace file
	pub trace_file: PathBuf,

	/// Config file
	///
	/// If not specified, the default configuration is used
	#[clap(long = "config")]
	pub config_file: Option<PathBuf>,

	/// Report file
	///
	/// If not specified, the report is written to stderr
	#[clap(long = "report")]
	pub report_file: Option<PathBuf>,

	/// Output data file (json)
	#[clap(long = "output")]
	pub output_file: Option<PathBuf>,

	/// Memory accesses per window
	#[clap(long = "window-size")]
	pub window_size: Option<u64>,

	/// Cache line granularity, in bytes
	#[clap(long = "granularity")]
	pub granularity: Option<u64>,

	/// Boundary mode
	#[clap(long = "boundary-mode", value_enum)]
	pub boundary_mode: Option<BoundaryMode>,

	/// Disables the analysis
	#[clap(long = "disabled")]
	pub disabled: bool,
}
