//! Parses `valgrind`'s `lackey` tool output (`--trace-mem=yes`) from stdin,
//! converting it to an event trace.

// Imports
use {
	anyhow::Context,
	clap::Parser,
	std::{
		fs,
		io::{self, BufRead, BufWriter},
		path::PathBuf,
	},
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
}

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(None, false);

	// Create the writer
	let file = fs::File::create(&args.output_file).context("Unable to create output file")?;
	let mut writer = EventTraceWriter::new(BufWriter::new(file)).context("Unable to create event trace writer")?;

	// Start reading the output
	let mut builder = EventBuilder::default();
	let mut stdin = io::stdin().lock();
	let mut line = String::new();
	while let Ok(1..) = {
		line.clear();
		stdin.read_line(&mut line)
	} {
		// Get the kind of record
		let Some((kind, rest)) = line.trim().split_once(' ') else {
			continue;
		};
		let kind = match kind {
			"I" => Kind::Inst,
			"L" => Kind::Load,
			"S" => Kind::Store,
			"M" => Kind::Modify,

			// Else ignore line
			_ => continue,
		};

		// Parse the address, ignoring the size
		let addr = rest.trim_start().split(',').next().unwrap_or_default();
		let addr = u64::from_str_radix(addr, 16).with_context(|| format!("Unable to parse address {addr:?}"))?;

		for event in builder.push(kind, addr) {
			writer.write(&event).context("Unable to write event")?;
		}
	}
	if let Some(event) = builder.finish() {
		writer.write(&event).context("Unable to write event")?;
	}

	// Finally finish writing the event trace
	let events = writer.records_written();
	writer.finish().context("Unable to finish writing event trace")?;
	tracing::info!("Wrote {events} events to {:?}", args.output_file);

	Ok(())
}

/// Record kind
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Kind {
	/// Instruction fetch
	Inst,

	/// Data load
	Load,

	/// Data store
	Store,

	/// Data modify (load, then store)
	Modify,
}

/// Builds events from the data accesses of each instruction
#[derive(Default, Debug)]
struct EventBuilder {
	/// Current event
	event: AccessEvent,
}

impl EventBuilder {
	/// Pushes a record, returning any finished events
	fn push(&mut self, kind: Kind, addr: u64) -> Vec<AccessEvent> {
		let mut finished = vec![];
		match kind {
			// Note: Instruction fetches aren't data accesses, they only
			//       delimit the accesses of each instruction.
			Kind::Inst => finished.extend(self.finish()),
			Kind::Load => self.push_read(addr, &mut finished),
			Kind::Store => self.push_write(addr, &mut finished),
			Kind::Modify => {
				self.push_read(addr, &mut finished);
				self.push_write(addr, &mut finished);
			},
		}

		finished
	}

	/// Pushes a read, flushing the current event if both read slots are taken
	fn push_read(&mut self, addr: u64, finished: &mut Vec<AccessEvent>) {
		if self.event.read1.is_none() {
			self.event.read1 = Some(addr);
			return;
		}
		if self.event.read2.is_none() {
			self.event.read2 = Some(addr);
			return;
		}

		finished.extend(self.finish());
		self.event.read1 = Some(addr);
	}

	/// Pushes a write, flushing the current event if the write slot is taken
	fn push_write(&mut self, addr: u64, finished: &mut Vec<AccessEvent>) {
		if self.event.write.is_some() {
			finished.extend(self.finish());
		}
		self.event.write = Some(addr);
	}

	/// Finishes the current event, if it has any accesses
	fn finish(&mut self) -> Option<AccessEvent> {
		let event = std::mem::take(&mut self.event);
		(!event.is_empty()).then_some(event)
	}
}
