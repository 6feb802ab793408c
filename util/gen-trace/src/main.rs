//! Generates synthetic event traces with known working set sizes

// Imports
use {
	anyhow::Context,
	clap::Parser,
	rand::{rngs::StdRng, Rng, SeedableRng},
	std::{fs, io::BufWriter, path::PathBuf},
	wsstrack::{AccessEvent, EventTraceWriter},
	wsstrack_util::logger,
};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
struct Args {
	/// Output event trace file
	#[clap(short = 'o', long = "output", default_value = "output.trace")]
	output_file: PathBuf,

	/// Access pattern
	#[clap(long = "pattern", value_enum, default_value_t = Pattern::Sequential)]
	pattern: Pattern,

	/// Number of events to generate
	#[clap(long = "events", default_value_t = 1_000_000)]
	events: u64,

	/// Working set, in bytes
	#[clap(long = "working-set", default_value_t = 1 << 20)]
	working_set: u64,

	/// Stride between accesses, in bytes
	#[clap(long = "stride", default_value_t = 64)]
	stride: u64,

	/// Base address
	#[clap(long = "base", default_value_t = 0x7f00_0000_0000)]
	base: u64,

	/// Random seed
	#[clap(long = "seed", default_value_t = 0)]
	seed: u64,
}

/// Access pattern
#[derive(PartialEq, Eq, Clone, Copy, Debug, clap::ValueEnum)]
enum Pattern {
	/// Sweeps the working set in order, with a read and a write per event
	Sequential,

	/// Reads random addresses in the working set, with occasional writes
	Random,

	/// Reads a small hot region 90% of the time, and the rest of the working set otherwise
	HotCold,
}

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(None, false);

	anyhow::ensure!(args.stride > 0, "Stride must be positive");
	let slots = args.working_set / args.stride;
	anyhow::ensure!(slots > 0, "Working set must hold at least a single stride");

	let file = fs::File::create(&args.output_file).context("Unable to create output file")?;
	let mut writer = EventTraceWriter::new(BufWriter::new(file)).context("Unable to create event trace writer")?;

	let mut rng = StdRng::seed_from_u64(args.seed);
	let addr_of = |slot: u64| args.base + slot * args.stride;
	for event_idx in 0..args.events {
		let event = match args.pattern {
			Pattern::Sequential => {
				let slot = event_idx % slots;
				AccessEvent::read_write(addr_of(slot), addr_of(slot))
			},
			Pattern::Random => {
				let read = addr_of(rng.gen_range(0..slots));
				match rng.gen_bool(0.25) {
					true => AccessEvent::read_write(read, addr_of(rng.gen_range(0..slots))),
					false => AccessEvent::read(read),
				}
			},
			Pattern::HotCold => {
				let hot_slots = (slots / 16).max(1);
				let slot = match rng.gen_bool(0.9) {
					true => rng.gen_range(0..hot_slots),
					false => rng.gen_range(0..slots),
				};
				AccessEvent::read(addr_of(slot))
			},
		};

		writer.write(&event).context("Unable to write event")?;
	}

	writer.finish().context("Unable to finish writing event trace")?;
	tracing::info!("Wrote {} {:?} events to {:?}", args.events, args.pattern, args.output_file);

	Ok(())
}
