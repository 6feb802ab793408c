//! Window overlap

// Imports
use std::{collections::HashSet, hash::Hash};

/// Returns the number of elements common to both `lhs` and `rhs`.
///
/// Iterates the smaller set and probes the larger one.
#[must_use]
pub fn overlap_count<T: Eq + Hash>(lhs: &HashSet<T>, rhs: &HashSet<T>) -> usize {
	let (smaller, larger) = match lhs.len() <= rhs.len() {
		true => (lhs, rhs),
		false => (rhs, lhs),
	};

	smaller.iter().filter(|value| larger.contains(value)).count()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn set(values: &[u64]) -> HashSet<u64> {
		values.iter().copied().collect()
	}

	#[test]
	fn empty_sets() {
		assert_eq!(overlap_count(&set(&[]), &set(&[])), 0);
		assert_eq!(overlap_count(&set(&[1, 2]), &set(&[])), 0);
		assert_eq!(overlap_count(&set(&[]), &set(&[1, 2])), 0);
	}

	#[test]
	fn symmetric() {
		let lhs = set(&[10, 20, 30, 40]);
		let rhs = set(&[20, 40, 50]);
		assert_eq!(overlap_count(&lhs, &rhs), 2);
		assert_eq!(overlap_count(&rhs, &lhs), 2);
	}

	#[test]
	fn disjoint_and_identical() {
		let lhs = set(&[1, 2, 3]);
		assert_eq!(overlap_count(&lhs, &set(&[4, 5, 6])), 0);
		assert_eq!(overlap_count(&lhs, &lhs.clone()), 3);
	}
}
