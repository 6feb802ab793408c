//! Configuration

// Imports
use {
	crate::tracker::{BoundaryMode, Granularity, TrackerConfig},
	anyhow::Context,
	std::{num::NonZeroU64, time::Duration},
};

/// Configuration
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Memory accesses per window
	pub window_size: u64,

	/// Cache line granularity, in bytes
	pub granularity: u64,

	/// Boundary mode
	pub boundary_mode: BoundaryMode,

	/// Whether to run the analysis at all
	pub enabled: bool,

	/// Debug output period (in seconds)
	pub debug_output_period_secs: f64,
}

impl Config {
	/// Validates this configuration into a tracker configuration
	pub fn tracker_config(&self) -> Result<TrackerConfig, anyhow::Error> {
		let window_size = NonZeroU64::new(self.window_size).context("Window size must be positive")?;
		let granularity = Granularity::from_bytes(self.granularity).context("Invalid granularity")?;

		Ok(TrackerConfig {
			window_size,
			granularity,
			boundary_mode: self.boundary_mode,
		})
	}

	/// Validates the debug output period
	pub fn debug_output_period(&self) -> Result<Duration, anyhow::Error> {
		Duration::try_from_secs_f64(self.debug_output_period_secs).with_context(|| {
			format!(
				"Debug output period must be a finite, non-negative number of seconds, found {}",
				self.debug_output_period_secs
			)
		})
	}
}

impl Default for Config {
	fn default() -> Self {
		let tracker = TrackerConfig::default();
		Self {
			window_size:              tracker.window_size.get(),
			granularity:              tracker.granularity.bytes(),
			boundary_mode:            tracker.boundary_mode,
			enabled:                  true,
			debug_output_period_secs: 1.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_file_uses_defaults() {
		let config = serde_json::from_str::<Config>("{}").expect("Unable to parse config");
		assert!(config.enabled);
		assert_eq!(config.window_size, 10_000_000);
		assert_eq!(config.granularity, 64);
		assert_eq!(config.boundary_mode, BoundaryMode::PerEvent);
	}

	#[test]
	fn parses_all_fields() {
		let config = serde_json::from_str::<Config>(
			r#"{
				"window_size": 1000,
				"granularity": 4096,
				"boundary_mode": "per-access",
				"enabled": false,
				"debug_output_period_secs": 0.5
			}"#,
		)
		.expect("Unable to parse config");

		assert!(!config.enabled);
		let tracker = config.tracker_config().expect("Config should be valid");
		assert_eq!(tracker.window_size.get(), 1000);
		assert_eq!(tracker.granularity.shift(), 12);
		assert_eq!(tracker.boundary_mode, BoundaryMode::PerAccess);
	}

	#[test]
	fn rejects_invalid_values() {
		let config = Config {
			window_size: 0,
			..Config::default()
		};
		assert!(config.tracker_config().is_err());

		let config = Config {
			granularity: 100,
			..Config::default()
		};
		let err = config.tracker_config().expect_err("Granularity should be invalid");
		assert!(format!("{err:#}").contains("power of two"), "{err:#}");
	}

	#[test]
	fn rejects_invalid_debug_output_period() {
		for secs in [-1.0, f64::NAN, f64::INFINITY] {
			let config = Config {
				debug_output_period_secs: secs,
				..Config::default()
			};
			assert!(config.debug_output_period().is_err(), "{secs} should be rejected");
		}

		let config = Config {
			debug_output_period_secs: 0.25,
			..Config::default()
		};
		assert_eq!(
			config.debug_output_period().expect("Period should be valid"),
			Duration::from_millis(250)
		);
	}

	#[test]
	fn rejects_unknown_fields() {
		assert!(serde_json::from_str::<Config>(r#"{ "window": 3 }"#).is_err());
	}
}
