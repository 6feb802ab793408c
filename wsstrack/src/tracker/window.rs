//! Window accumulator

// Imports
use {
	super::{
		cache_line::{self, CacheLineKey, Granularity},
		overlap,
	},
	crate::event::AccessEvent,
	std::{collections::HashSet, mem, num::NonZeroU64},
};

/// Window accumulator.
///
/// Collects the unique cache lines touched in the current window and
/// closes it every `window_size` accesses.
#[derive(Debug)]
pub struct WindowAccumulator {
	/// Cache lines touched in the current window
	cur: HashSet<CacheLineKey>,

	/// Cache lines touched in the previous window.
	///
	/// `None` until the first window closes.
	prev: Option<HashSet<CacheLineKey>>,

	/// Total accesses recorded.
	///
	/// Never reset between windows.
	access_count: u64,

	/// Windows closed so far
	windows_closed: u64,

	/// Accesses per window
	window_size: NonZeroU64,

	/// Granularity
	granularity: Granularity,

	/// Boundary mode
	boundary_mode: BoundaryMode,
}

impl WindowAccumulator {
	/// Creates an empty window accumulator
	#[must_use]
	pub fn new(window_size: NonZeroU64, granularity: Granularity, boundary_mode: BoundaryMode) -> Self {
		Self {
			cur: HashSet::new(),
			prev: None,
			access_count: 0,
			windows_closed: 0,
			window_size,
			granularity,
			boundary_mode,
		}
	}

	/// Records all accesses of an event.
	///
	/// Calls `on_close` with every window closed by this event. In
	/// [`BoundaryMode::PerEvent`] that is at most one window, while in
	/// [`BoundaryMode::PerAccess`] small window sizes may close several.
	pub fn record_event(&mut self, event: AccessEvent, mut on_close: impl FnMut(WindowRecord)) {
		for addr in event.addrs() {
			self.access_count += 1;
			let _ = self.cur.insert(cache_line::normalize(addr, self.granularity));

			if self.boundary_mode == BoundaryMode::PerAccess && self.at_boundary() {
				on_close(self.close_window());
			}
		}

		if self.boundary_mode == BoundaryMode::PerEvent && !event.is_empty() && self.at_boundary() {
			on_close(self.close_window());
		}
	}

	/// Returns if the access counter is at a window boundary
	fn at_boundary(&self) -> bool {
		self.access_count % self.window_size.get() == 0
	}

	/// Closes the current window
	fn close_window(&mut self) -> WindowRecord {
		// Note: Lines are disjoint, so this only saturates when every line
		//       of the address space was touched, which is `2^64` bytes.
		let granularity = self.granularity.bytes();
		let to_bytes = |lines: usize| (lines as u64).saturating_mul(granularity);
		let wss_bytes = to_bytes(self.cur.len());
		let cwss_bytes = self
			.prev
			.as_ref()
			.map(|prev| to_bytes(overlap::overlap_count(&self.cur, prev)));

		// Then make the current window the previous one
		// Note: The old previous window is dropped here.
		self.prev = Some(mem::take(&mut self.cur));
		self.windows_closed += 1;

		let record = WindowRecord { wss_bytes, cwss_bytes };
		tracing::debug!(
			window = self.windows_closed,
			access_count = self.access_count,
			?record,
			"Closed window"
		);

		record
	}

	/// Returns the total number of accesses recorded
	#[must_use]
	pub fn access_count(&self) -> u64 {
		self.access_count
	}

	/// Returns the number of windows closed
	#[must_use]
	pub fn windows_closed(&self) -> u64 {
		self.windows_closed
	}

	/// Returns the number of unique cache lines in the current window
	#[must_use]
	pub fn cur_len(&self) -> usize {
		self.cur.len()
	}

	/// Returns the number of unique cache lines in the previous window, if any
	#[must_use]
	pub fn prev_len(&self) -> Option<usize> {
		self.prev.as_ref().map(HashSet::len)
	}

	/// Returns the window size
	#[must_use]
	pub fn window_size(&self) -> NonZeroU64 {
		self.window_size
	}

	/// Returns the granularity
	#[must_use]
	pub fn granularity(&self) -> Granularity {
		self.granularity
	}
}

/// Record for a closed window
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct WindowRecord {
	/// Working set size, in bytes
	pub wss_bytes: u64,

	/// Concurrent working set size, in bytes.
	///
	/// `None` for the first window.
	pub cwss_bytes: Option<u64>,
}

/// When to check for window boundaries
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryMode {
	/// Check once after each event.
	///
	/// Boundaries crossed in the middle of an event are skipped, and
	/// their accesses merged into the next window.
	#[default]
	PerEvent,

	/// Check after each access
	PerAccess,
}
