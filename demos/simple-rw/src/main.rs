//! Sequential read-write workload.
//!
//! Sweeps a fixed buffer one cache line at a time, so every window sees
//! the same lines and the concurrent working set equals the working set.

// Imports
use std::{hint, ptr};

const CACHE_LINE_SIZE: usize = 64;

const TOTAL_BYTES: usize = 16384 * CACHE_LINE_SIZE;
const PASSES: usize = 8;

fn main() {
	let mut v = vec![0u8; TOTAL_BYTES];

	// Note: We `step_by` the cache line size because touching one byte per line is enough.
	for _ in 0..PASSES {
		for x in v.iter_mut().step_by(CACHE_LINE_SIZE) {
			// SAFETY: Target is valid for writes.
			// Note: We simply want to avoid the write being elided
			unsafe {
				ptr::write_volatile(x, hint::black_box(0));
			}
		}

		for x in v.iter().step_by(CACHE_LINE_SIZE) {
			// SAFETY: Target is valid for reads.
			// Note: We simply want to avoid the read being elided
			unsafe {
				hint::black_box(ptr::read_volatile(x));
			}
		}
	}
}
