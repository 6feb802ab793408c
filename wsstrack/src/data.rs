//! Output data

// Imports
use crate::{report::Report, tracker::MetricSummary};

/// Output data
#[derive(PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Data {
	/// Memory accesses per window
	pub window_size: u64,

	/// Cache line granularity, in bytes
	pub granularity: u64,

	/// Total memory accesses
	pub access_count: u64,

	/// Working set size
	pub wss: MetricSummary,

	/// Concurrent working set size
	pub cwss: MetricSummary,
}

impl Data {
	/// Creates the output data from a report
	pub fn from_report(report: &Report, window_size: u64, granularity: u64) -> Self {
		Self {
			window_size,
			granularity,
			access_count: report.access_count,
			wss: report.wss.clone(),
			cwss: report.cwss.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn json_layout() {
		let report = Report {
			wss:          MetricSummary {
				peak:    128,
				average: 96.0,
				series:  vec![64, 128],
			},
			cwss:         MetricSummary {
				peak:    64,
				average: 64.0,
				series:  vec![64],
			},
			access_count: 8,
		};
		let data = Data::from_report(&report, 4, 64);

		let json = serde_json::to_value(&data).expect("Unable to serialize data");
		assert_eq!(json["wss"]["series"], serde_json::json!([64, 128]));
		assert_eq!(json["cwss"]["peak"], 64);
		assert_eq!(json["access_count"], 8);

		let parsed = serde_json::from_value::<Data>(json).expect("Unable to deserialize data");
		assert_eq!(parsed, data);
	}
}
