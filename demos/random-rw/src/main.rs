//! Phased random read-write workload.
//!
//! Each phase touches a random subset of cache lines, so consecutive windows
//! only partially overlap and the concurrent working set shrinks below the working set.

// Imports
use {
	rand::seq::SliceRandom,
	std::{hint, ptr},
};

const CACHE_LINE_SIZE: usize = 64;

const TOTAL_LINES: usize = 8192;
const PHASES: usize = 16;
const LINES_PER_PHASE: usize = 2048;
const ACCESSES_PER_LINE: usize = 4;

fn main() {
	let mut v = vec![0u8; TOTAL_LINES * CACHE_LINE_SIZE];
	let mut lines = (0..TOTAL_LINES).collect::<Vec<_>>();

	for _ in 0..PHASES {
		lines.shuffle(&mut rand::thread_rng());
		for &line in &lines[..LINES_PER_PHASE] {
			let x: *mut u8 = &mut v[line * CACHE_LINE_SIZE];
			for _ in 0..ACCESSES_PER_LINE {
				// SAFETY: Target is valid for reads and writes, and `v` outlives it.
				// Note: We simply want to avoid the accesses being elided
				unsafe {
					let value = ptr::read_volatile(x);
					ptr::write_volatile(x, hint::black_box(value.wrapping_add(1)));
				}
			}
		}
	}
}
