//! Statistics

/// Statistics for a single metric.
///
/// Append-only record of every window value for a metric.
#[derive(Clone, Default, Debug)]
pub struct Statistics {
	/// All values, in window close order
	series: Vec<u64>,

	/// Sum of all values.
	///
	/// Wider than the values, since each may be up to `u64::MAX`
	sum: u128,

	/// Peak value
	peak: u64,
}

impl Statistics {
	/// Creates new, empty, statistics
	#[must_use]
	pub fn new() -> Self {
		Self {
			series: vec![],
			sum:    0,
			peak:   0,
		}
	}

	/// Records a value
	pub fn record(&mut self, value: u64) {
		self.series.push(value);
		self.sum += u128::from(value);
		self.peak = self.peak.max(value);
	}

	/// Returns the peak value, or 0, if empty
	#[must_use]
	pub fn peak(&self) -> u64 {
		self.peak
	}

	/// Returns the sum of all values
	#[must_use]
	pub fn sum(&self) -> u128 {
		self.sum
	}

	/// Returns the number of values recorded
	#[must_use]
	pub fn count(&self) -> usize {
		self.series.len()
	}

	/// Returns all values recorded
	#[must_use]
	pub fn series(&self) -> &[u64] {
		&self.series
	}

	/// Returns the average value, or 0, if empty
	#[must_use]
	pub fn average(&self) -> f64 {
		match self.count() {
			0 => 0.0,
			count => self.sum as f64 / count as f64,
		}
	}

	/// Finalizes these statistics into a summary
	#[must_use]
	pub fn finalize(self) -> MetricSummary {
		MetricSummary {
			peak:    self.peak,
			average: self.average(),
			series:  self.series,
		}
	}
}

/// Summary of a metric's statistics
#[derive(PartialEq, Clone, Default, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MetricSummary {
	/// Peak value
	pub peak: u64,

	/// Average value
	pub average: f64,

	/// All values, in window close order
	pub series: Vec<u64>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty() {
		let statistics = Statistics::new();
		assert_eq!(statistics.count(), 0);
		assert_eq!(statistics.finalize(), MetricSummary {
			peak:    0,
			average: 0.0,
			series:  vec![],
		});
	}

	#[test]
	fn peak_sum_average() {
		let mut statistics = Statistics::new();
		for value in [128, 512, 64, 256] {
			statistics.record(value);
		}

		assert_eq!(statistics.peak(), 512);
		assert_eq!(statistics.sum(), 960);
		assert_eq!(statistics.count(), 4);

		let summary = statistics.finalize();
		assert_eq!(summary.peak, 512);
		assert_eq!(summary.average, 240.0);
		assert_eq!(summary.series, [128, 512, 64, 256]);
	}

	#[test]
	fn sum_past_u64() {
		let mut statistics = Statistics::new();
		for _ in 0..5 {
			statistics.record(1 << 62);
		}

		assert_eq!(statistics.sum(), 5 << 62);
		assert_eq!(statistics.peak(), 1 << 62);
		assert_eq!(statistics.average(), (1u64 << 62) as f64);
	}

	#[test]
	fn zero_values_still_count() {
		let mut statistics = Statistics::new();
		statistics.record(0);
		statistics.record(0);
		assert_eq!(statistics.count(), 2);
		assert_eq!(statistics.peak(), 0);
		assert_eq!(statistics.average(), 0.0);
	}
}
