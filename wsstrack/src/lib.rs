//! Working set size tracker (`wsstrack`)
//!
//! Estimates the working set size of a program from its memory access stream,
//! by counting the unique cache lines touched in each fixed-size window of
//! accesses, as well as how many of those were also touched in the previous window.

// Modules
pub mod config;
pub mod data;
pub mod event;
pub mod event_trace;
pub mod report;
pub mod sim;
pub mod tracker;

// Exports
pub use self::{
	event::AccessEvent,
	event_trace::{EventTraceReader, EventTraceWriter},
	report::{Report, ReportSink},
	sim::{Simulator, Tracker},
	tracker::{TrackerConfig, WssTracker},
};
