//! Logger
//!
//! Logging goes to stderr, filtered by `RUST_LOG` (default `info`), and
//! optionally to a file, filtered by `RUST_LOG_FILE` (default `debug`).
//!
//! Messages emitted before [`init`] is called are buffered through
//! [`pre_init`] and replayed once the subscriber is installed.

// Imports
use {
	std::{fs, path::Path, sync::Mutex},
	tracing::Level,
	tracing_subscriber::{prelude::*, EnvFilter},
};

/// Messages logged before the logger was initialized
static PRE_INIT_MESSAGES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

/// Pre-initialization logging
pub mod pre_init {
	use {super::PRE_INIT_MESSAGES, tracing::Level};

	/// Buffers a message at `level`
	pub fn log(level: Level, msg: impl Into<String>) {
		// Note: A poisoned lock only means another thread panicked while
		//       pushing, the buffer itself is still usable.
		let mut messages = PRE_INIT_MESSAGES.lock().unwrap_or_else(|err| err.into_inner());
		messages.push((level, msg.into()));
	}

	/// Buffers a debug message
	pub fn debug(msg: impl Into<String>) {
		self::log(Level::DEBUG, msg);
	}

	/// Buffers a warning message
	pub fn warn(msg: impl Into<String>) {
		self::log(Level::WARN, msg);
	}
}

/// Initializes the global logger.
///
/// # Panics
/// Panics if a global subscriber was already installed.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let term_layer = tracing_subscriber::fmt::layer()
		.with_writer(std::io::stderr)
		.with_filter(self::env_filter("RUST_LOG", "info"));

	let file_layer = log_file.and_then(|path| {
		let file = fs::OpenOptions::new()
			.create(true)
			.write(true)
			.append(log_file_append)
			.truncate(!log_file_append)
			.open(path);

		match file {
			Ok(file) => Some(
				tracing_subscriber::fmt::layer()
					.with_ansi(false)
					.with_writer(Mutex::new(file))
					.with_filter(self::env_filter("RUST_LOG_FILE", "debug")),
			),
			Err(err) => {
				pre_init::warn(format!("Unable to open log file {path:?}: {err}"));
				None
			},
		}
	});

	tracing_subscriber::registry().with(term_layer).with(file_layer).init();

	// Then replay everything logged before now
	let messages = std::mem::take(&mut *PRE_INIT_MESSAGES.lock().unwrap_or_else(|err| err.into_inner()));
	for (level, msg) in messages {
		if level == Level::ERROR {
			tracing::error!("{msg}");
		} else if level == Level::WARN {
			tracing::warn!("{msg}");
		} else if level == Level::INFO {
			tracing::info!("{msg}");
		} else if level == Level::DEBUG {
			tracing::debug!("{msg}");
		} else {
			tracing::trace!("{msg}");
		}
	}
}

/// Creates an env filter from variable `var`, falling back to `default`
fn env_filter(var: &str, default: &str) -> EnvFilter {
	EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
