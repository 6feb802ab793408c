//! Working set size tracker

// Modules
pub mod cache_line;
pub mod overlap;
pub mod statistics;
pub mod window;

// Exports
pub use self::{
	cache_line::{CacheLineKey, Granularity},
	statistics::{MetricSummary, Statistics},
	window::{BoundaryMode, WindowAccumulator, WindowRecord},
};

// Imports
use {
	crate::{event::AccessEvent, report::Report, sim},
	itertools::Itertools,
	std::{fmt, num::NonZeroU64},
};

/// Working set size tracker.
///
/// Owns all state of a single run, from [`WssTracker::start`] to [`WssTracker::finalize`].
#[derive(Debug)]
pub struct WssTracker {
	/// Window accumulator
	window: WindowAccumulator,

	/// Working set size statistics
	wss: Statistics,

	/// Concurrent working set size statistics
	cwss: Statistics,
}

impl WssTracker {
	/// Starts a new run
	#[must_use]
	pub fn start(config: TrackerConfig) -> Self {
		tracing::debug!(?config, "Starting working set size tracker");
		Self {
			window: WindowAccumulator::new(config.window_size, config.granularity, config.boundary_mode),
			wss:    Statistics::new(),
			cwss:   Statistics::new(),
		}
	}

	/// Records an event
	pub fn record_event(&mut self, event: AccessEvent) {
		let Self { window, wss, cwss } = self;
		window.record_event(event, |record| {
			wss.record(record.wss_bytes);
			if let Some(cwss_bytes) = record.cwss_bytes {
				cwss.record(cwss_bytes);
			}
		});
	}

	/// Returns the window accumulator
	#[must_use]
	pub fn window(&self) -> &WindowAccumulator {
		&self.window
	}

	/// Returns the working set size statistics
	#[must_use]
	pub fn wss(&self) -> &Statistics {
		&self.wss
	}

	/// Returns the concurrent working set size statistics
	#[must_use]
	pub fn cwss(&self) -> &Statistics {
		&self.cwss
	}

	/// Finishes this run and returns its report.
	///
	/// Accesses in the current, unclosed, window are counted, but
	/// don't contribute to any statistics.
	#[must_use]
	pub fn finalize(self) -> Report {
		if self.window.cur_len() != 0 {
			tracing::debug!(
				unique_lines = self.window.cur_len(),
				"Discarding partial window at end of run"
			);
		}

		Report {
			wss:          self.wss.finalize(),
			cwss:         self.cwss.finalize(),
			access_count: self.window.access_count(),
		}
	}
}

impl sim::Tracker for WssTracker {
	fn handle_event(&mut self, event: AccessEvent) -> Result<(), anyhow::Error> {
		tracing::trace!(?event, "Received event");
		self.record_event(event);
		Ok(())
	}

	fn fmt_debug(&mut self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		// Note: Start with a newline, since we're a multi-line output
		f.pad("\n")?;

		let window_size = self.window.window_size();
		let granularity = self.window.granularity();
		writeln!(
			f,
			"Accesses: {} ({} windows of {window_size} accesses, {granularity} lines)",
			self.window.access_count(),
			self.window.windows_closed(),
		)?;
		writeln!(f, "Current window: {} unique lines", self.window.cur_len())?;

		for (name, statistics) in [("wss", &self.wss), ("cwss", &self.cwss)] {
			let variance = statistics
				.series()
				.iter()
				.map(|&value| value as f64)
				.collect::<average::Variance>();
			let (min, max) = statistics
				.series()
				.iter()
				.minmax()
				.into_option()
				.map_or((0, 0), |(&min, &max)| (min, max));

			writeln!(
				f,
				"{name}: {:.2} ± {:.2} ({min}..{max}, peak {})",
				variance.mean(),
				variance.error(),
				statistics.peak(),
			)?;
		}

		Ok(())
	}
}

/// Tracker configuration
#[derive(Clone, Copy, Debug)]
pub struct TrackerConfig {
	/// Accesses per window
	pub window_size: NonZeroU64,

	/// Cache line granularity
	pub granularity: Granularity,

	/// Boundary mode
	pub boundary_mode: BoundaryMode,
}

impl TrackerConfig {
	/// Default window size
	pub const DEFAULT_WINDOW_SIZE: u64 = 10_000_000;
}

impl Default for TrackerConfig {
	fn default() -> Self {
		Self {
			window_size:   NonZeroU64::new(Self::DEFAULT_WINDOW_SIZE).expect("Default window size is non-zero"),
			granularity:   Granularity::DEFAULT,
			boundary_mode: BoundaryMode::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use {super::*, crate::sim::Tracker, wsstrack_util::DisplayWrapper};

	fn tracker(window_size: u64, granularity: u64) -> WssTracker {
		WssTracker::start(TrackerConfig {
			window_size:   NonZeroU64::new(window_size).expect("Window size was zero"),
			granularity:   Granularity::from_bytes(granularity).expect("Granularity wasn't a power of two"),
			boundary_mode: BoundaryMode::PerEvent,
		})
	}

	#[test]
	fn empty_run() {
		let mut tracker = tracker(3, 64);
		tracker.record_event(AccessEvent::read(0x40));
		tracker.record_event(AccessEvent::write(0x80));

		let report = tracker.finalize();
		assert_eq!(report.access_count, 2);
		assert_eq!(report.wss, MetricSummary::default());
		assert_eq!(report.cwss, MetricSummary::default());
	}

	#[test]
	fn routes_records_to_statistics() {
		let mut tracker = tracker(2, 64);
		for event in [
			AccessEvent::read2(0x00, 0x40),
			AccessEvent::read_write(0x40, 0x80),
			AccessEvent::read2(0x80, 0x88),
		] {
			tracker.record_event(event);
		}

		assert_eq!(tracker.wss().series(), [128, 128, 64]);
		assert_eq!(tracker.cwss().series(), [64, 64]);

		let report = tracker.finalize();
		assert_eq!(report.wss.peak, 128);
		assert_eq!(report.cwss.average, 64.0);
		assert_eq!(report.access_count, 6);
	}

	#[test]
	fn default_config() {
		let config = TrackerConfig::default();
		assert_eq!(config.window_size.get(), 10_000_000);
		assert_eq!(config.granularity.bytes(), 64);
		assert_eq!(config.boundary_mode, BoundaryMode::PerEvent);
	}

	#[test]
	fn debug_output() {
		let mut tracker = tracker(1, 64);
		tracker.record_event(AccessEvent::read(0));
		tracker.record_event(AccessEvent::read(0));

		let output = DisplayWrapper::new(|f| tracker.fmt_debug(f)).to_string();
		assert!(output.contains("Accesses: 2 (2 windows of 1 accesses, 64B lines)"), "{output}");
		assert!(output.contains("wss: 64.00"), "{output}");
		assert!(output.contains("cwss: 64.00"), "{output}");
	}
}
