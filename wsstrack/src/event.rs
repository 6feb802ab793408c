//! Memory access events

/// Memory access event.
///
/// Produced once per instruction that touches memory, with up
/// to two read addresses and one write address.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct AccessEvent {
	/// First read address
	pub read1: Option<u64>,

	/// Second read address
	pub read2: Option<u64>,

	/// Write address
	pub write: Option<u64>,
}

impl AccessEvent {
	/// Creates an event from all its slots
	#[must_use]
	pub const fn new(read1: Option<u64>, read2: Option<u64>, write: Option<u64>) -> Self {
		Self { read1, read2, write }
	}

	/// Creates an event with a single read
	#[must_use]
	pub const fn read(addr: u64) -> Self {
		Self::new(Some(addr), None, None)
	}

	/// Creates an event with two reads
	#[must_use]
	pub const fn read2(addr1: u64, addr2: u64) -> Self {
		Self::new(Some(addr1), Some(addr2), None)
	}

	/// Creates an event with a single write
	#[must_use]
	pub const fn write(addr: u64) -> Self {
		Self::new(None, None, Some(addr))
	}

	/// Creates an event with a read and a write
	#[must_use]
	pub const fn read_write(read_addr: u64, write_addr: u64) -> Self {
		Self::new(Some(read_addr), None, Some(write_addr))
	}

	/// Returns all present addresses, in slot order (`read1`, `read2`, `write`)
	pub fn addrs(&self) -> impl Iterator<Item = u64> {
		[self.read1, self.read2, self.write].into_iter().flatten()
	}

	/// Returns the number of present addresses
	#[must_use]
	pub fn len(&self) -> usize {
		self.addrs().count()
	}

	/// Returns if this event has no addresses
	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.read1.is_none() && self.read2.is_none() && self.write.is_none()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn addrs_in_slot_order() {
		let event = AccessEvent::new(Some(3), Some(1), Some(2));
		assert_eq!(event.addrs().collect::<Vec<_>>(), [3, 1, 2]);
		assert_eq!(event.len(), 3);
	}

	#[test]
	fn zero_is_a_valid_address() {
		let event = AccessEvent::read(0);
		assert!(!event.is_empty());
		assert_eq!(event.addrs().collect::<Vec<_>>(), [0]);
	}

	#[test]
	fn absent_slots_are_skipped() {
		assert_eq!(AccessEvent::write(8).addrs().collect::<Vec<_>>(), [8]);
		assert_eq!(AccessEvent::read_write(1, 2).len(), 2);
		assert!(AccessEvent::default().is_empty());
		assert_eq!(AccessEvent::default().len(), 0);
	}
}
