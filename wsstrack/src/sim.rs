//! Simulator

// Imports
use {
	crate::{event::AccessEvent, event_trace::EventTraceReader},
	anyhow::Context,
	std::{
		fmt,
		io,
		time::{Duration, Instant},
	},
};

/// Simulator
#[derive(Debug)]
pub struct Simulator {
	/// Debug output period
	///
	/// Interval in which to output debug output for the tracker
	debug_output_period: Duration,
}

impl Simulator {
	/// Creates a new simulator
	pub fn new(debug_output_period: Duration) -> Self {
		Self { debug_output_period }
	}

	/// Runs the simulator on all events from `event_trace_reader` with tracker `tracker`
	pub fn run<T: Tracker>(
		&mut self,
		event_trace_reader: &mut EventTraceReader<impl io::Read>,
		tracker: &mut T,
	) -> Result<RunOutput, anyhow::Error> {
		// Note: We start in the past so that we output right away at the start
		let mut last_debug_time = Instant::now()
			.checked_sub(self.debug_output_period)
			.unwrap_or_else(Instant::now);

		// Create the event iterator
		let total_events = event_trace_reader.records_remaining();
		let event_it = std::iter::from_fn(|| event_trace_reader.read_next().transpose());

		// Go through all events
		let mut events = 0;
		for (event_idx, event_res) in event_it.enumerate() {
			let event = event_res.context("Unable to read next event")?;
			tracker
				.handle_event(event)
				.context("Unable to handle event with tracker")?;
			events += 1;

			// Then show debug output, if it's been long enough
			let cur_time = Instant::now();
			if cur_time.duration_since(last_debug_time) >= self.debug_output_period {
				let events_processed_percentage = 100.0 * (event_idx as f64 / total_events as f64);
				tracing::info!(
					"[{events_processed_percentage:.2}%] Debug: {}",
					wsstrack_util::DisplayWrapper::new(|f| tracker.fmt_debug(f))
				);
				last_debug_time = cur_time;
			}
		}

		Ok(RunOutput { events })
	}
}

/// Output for [`Simulator::run`]
#[derive(Clone, Debug)]
pub struct RunOutput {
	/// Events processed
	pub events: u64,
}

/// Tracker
pub trait Tracker {
	/// Handles an event
	fn handle_event(&mut self, event: AccessEvent) -> Result<(), anyhow::Error>;

	/// Formats debug output to `f`.
	fn fmt_debug(&mut self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error>;
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::event_trace::EventTraceWriter,
		std::io::Cursor,
	};

	/// Tracker that remembers every event
	#[derive(Default)]
	struct RecordingTracker {
		events: Vec<AccessEvent>,
	}

	impl Tracker for RecordingTracker {
		fn handle_event(&mut self, event: AccessEvent) -> Result<(), anyhow::Error> {
			self.events.push(event);
			Ok(())
		}

		fn fmt_debug(&mut self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
			write!(f, "{} events", self.events.len())
		}
	}

	/// Tracker that fails on the first event
	struct FailingTracker;

	impl Tracker for FailingTracker {
		fn handle_event(&mut self, _event: AccessEvent) -> Result<(), anyhow::Error> {
			anyhow::bail!("Refusing event")
		}

		fn fmt_debug(&mut self, _f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
			Ok(())
		}
	}

	fn reader(events: &[AccessEvent]) -> EventTraceReader<Cursor<Vec<u8>>> {
		let mut writer = EventTraceWriter::new(Cursor::new(vec![])).expect("Unable to create writer");
		for event in events {
			writer.write(event).expect("Unable to write event");
		}
		let bytes = writer.finish().expect("Unable to finish trace").into_inner();
		EventTraceReader::from_reader(Cursor::new(bytes)).expect("Unable to parse trace")
	}

	#[test]
	fn feeds_all_events_in_order() {
		let events = [AccessEvent::read(1), AccessEvent::write(2), AccessEvent::read2(3, 4)];
		let mut reader = reader(&events);
		let mut tracker = RecordingTracker::default();

		let output = Simulator::new(Duration::from_secs(60))
			.run(&mut reader, &mut tracker)
			.expect("Unable to run simulator");
		assert_eq!(output.events, 3);
		assert_eq!(tracker.events, events);
	}

	#[test]
	fn propagates_tracker_errors() {
		let mut reader = reader(&[AccessEvent::read(1)]);
		let err = Simulator::new(Duration::ZERO)
			.run(&mut reader, &mut FailingTracker)
			.expect_err("Tracker error should propagate");
		assert!(format!("{err:#}").contains("Refusing event"), "{err:#}");
	}
}
