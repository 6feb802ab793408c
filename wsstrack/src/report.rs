//! Report

// Imports
use {
	crate::tracker::MetricSummary,
	anyhow::Context,
	std::{
		fmt,
		fs,
		io::{self, Write},
		path::PathBuf,
	},
};

/// Final report of a run
#[derive(PartialEq, Clone, Debug)]
pub struct Report {
	/// Working set size
	pub wss: MetricSummary,

	/// Concurrent working set size
	pub cwss: MetricSummary,

	/// Total memory accesses
	pub access_count: u64,
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "peak wss: {}", self.wss.peak)?;
		writeln!(f, "wss avg: {}", self.wss.average)?;
		writeln!(f, "peak cwss: {}", self.cwss.peak)?;
		writeln!(f, "cwss avg: {}", self.cwss.average)?;
		writeln!(f, "mem trace count: {}", self.access_count)?;
		for wss in &self.wss.series {
			writeln!(f, "{wss}")?;
		}

		Ok(())
	}
}

/// Report sink
#[derive(Clone, Default, Debug)]
pub enum ReportSink {
	/// Standard error
	#[default]
	Stderr,

	/// File
	File(PathBuf),
}

impl ReportSink {
	/// Emits a report to this sink.
	///
	/// # Errors
	/// If unable to write to a file, the report is written to stderr instead,
	/// and the original error is returned.
	pub fn emit(&self, report: &Report) -> Result<(), anyhow::Error> {
		self.emit_with_fallback(report, io::stderr())
	}

	/// Emits a report to this sink, using `stderr` as standard error
	fn emit_with_fallback<E: Write>(&self, report: &Report, stderr: E) -> Result<(), anyhow::Error> {
		match self {
			Self::Stderr => Self::write_to(stderr, report).context("Unable to write report to stderr"),
			Self::File(path) => {
				let res = fs::File::create(path)
					.context("Unable to create report file")
					.and_then(|file| Self::write_to(io::BufWriter::new(file), report));

				if let Err(err) = &res {
					tracing::error!(?path, ?err, "Unable to write report to file, writing it to stderr instead");
					Self::write_to(stderr, report).context("Unable to write report to stderr")?;
				}

				res.with_context(|| format!("Unable to write report to {path:?}"))
			},
		}
	}

	/// Writes `report` to `writer` and flushes it
	fn write_to<W: Write>(mut writer: W, report: &Report) -> Result<(), anyhow::Error> {
		write!(writer, "{report}").context("Unable to write report")?;
		writer.flush().context("Unable to flush report")?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn report() -> Report {
		Report {
			wss:          MetricSummary {
				peak:    640,
				average: 576.0,
				series:  vec![512, 640],
			},
			cwss:         MetricSummary {
				peak:    320,
				average: 320.0,
				series:  vec![320],
			},
			access_count: 20,
		}
	}

	#[test]
	fn format() {
		assert_eq!(
			report().to_string(),
			"peak wss: 640\nwss avg: 576\npeak cwss: 320\ncwss avg: 320\nmem trace count: 20\n512\n640\n"
		);
	}

	#[test]
	fn format_fractional_average() {
		let mut report = report();
		report.wss.average = 1.5;
		assert!(report.to_string().contains("wss avg: 1.5\n"));
	}

	#[test]
	fn format_empty() {
		let report = Report {
			wss:          MetricSummary::default(),
			cwss:         MetricSummary::default(),
			access_count: 0,
		};
		assert_eq!(
			report.to_string(),
			"peak wss: 0\nwss avg: 0\npeak cwss: 0\ncwss avg: 0\nmem trace count: 0\n"
		);
	}

	#[test]
	fn emit_to_file() {
		let path = std::env::temp_dir().join(format!("wsstrack-report-{}.out", std::process::id()));
		ReportSink::File(path.clone())
			.emit(&report())
			.expect("Unable to emit report");

		let contents = fs::read_to_string(&path).expect("Unable to read report");
		fs::remove_file(&path).expect("Unable to remove report");
		assert_eq!(contents, report().to_string());
	}

	#[test]
	fn emit_to_stderr() {
		let mut stderr = Vec::<u8>::new();
		ReportSink::Stderr
			.emit_with_fallback(&report(), &mut stderr)
			.expect("Unable to emit report");
		assert_eq!(String::from_utf8(stderr).expect("Report wasn't utf-8"), report().to_string());
	}

	#[test]
	fn emit_to_unwritable_file_falls_back() {
		let path = std::env::temp_dir()
			.join("wsstrack-missing-dir")
			.join("nested")
			.join("report.out");

		let mut stderr = Vec::<u8>::new();
		let err = ReportSink::File(path)
			.emit_with_fallback(&report(), &mut stderr)
			.expect_err("Emitting should fail");
		assert!(format!("{err:#}").contains("Unable to create report file"), "{err:#}");
		assert_eq!(String::from_utf8(stderr).expect("Report wasn't utf-8"), report().to_string());
	}

	#[test]
	fn emit_to_file_leaves_stderr_alone() {
		let path = std::env::temp_dir().join(format!("wsstrack-report-quiet-{}.out", std::process::id()));

		let mut stderr = Vec::<u8>::new();
		ReportSink::File(path.clone())
			.emit_with_fallback(&report(), &mut stderr)
			.expect("Unable to emit report");
		fs::remove_file(&path).expect("Unable to remove report");
		assert!(stderr.is_empty());
	}
}
