//! Cache-line normalization

// Imports
use std::fmt;

/// Cache-line granularity.
///
/// Always a power of two, stored as its shift.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Granularity {
	/// Shift, such that the granularity in bytes is `1 << shift`
	shift: u32,
}

impl Granularity {
	/// Default granularity, 64 bytes
	pub const DEFAULT: Self = Self { shift: 6 };

	/// Creates a granularity from a size in bytes.
	///
	/// # Errors
	/// Returns an error if `bytes` isn't a power of two.
	pub fn from_bytes(bytes: u64) -> Result<Self, GranularityError> {
		match bytes.is_power_of_two() {
			true => Ok(Self {
				shift: bytes.trailing_zeros(),
			}),
			false => Err(GranularityError::NotPowerOfTwo(bytes)),
		}
	}

	/// Creates a granularity from a shift
	///
	/// # Errors
	/// Returns an error if `1 << shift` doesn't fit into a `u64`.
	pub fn from_shift(shift: u32) -> Result<Self, GranularityError> {
		match shift < u64::BITS {
			true => Ok(Self { shift }),
			false => Err(GranularityError::ShiftTooLarge(shift)),
		}
	}

	/// Returns the granularity, in bytes
	#[must_use]
	pub const fn bytes(self) -> u64 {
		1 << self.shift
	}

	/// Returns the shift
	#[must_use]
	pub const fn shift(self) -> u32 {
		self.shift
	}

	/// Returns the mask that clears all bits below the granularity
	#[must_use]
	pub const fn mask(self) -> u64 {
		!(self.bytes() - 1)
	}
}

impl Default for Granularity {
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl fmt::Display for Granularity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}B", self.bytes())
	}
}

/// Error for creating a [`Granularity`]
#[derive(PartialEq, Eq, Clone, Copy, Debug, thiserror::Error)]
pub enum GranularityError {
	/// Granularity wasn't a power of two
	#[error("Granularity must be a power of two, found {0}")]
	NotPowerOfTwo(u64),

	/// Shift was too large
	#[error("Granularity shift must be less than 64, found {0}")]
	ShiftTooLarge(u32),
}

/// Cache line key.
///
/// Guaranteed to be aligned to the granularity it was normalized with.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct CacheLineKey(u64);

impl CacheLineKey {
	/// Returns the key as a `u64`
	#[must_use]
	pub const fn to_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Debug for CacheLineKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("CacheLineKey")
			.field(&format_args!("{:#010x}", self.0))
			.finish()
	}
}

/// Normalizes an address to the cache line containing it
#[must_use]
pub const fn normalize(addr: u64, granularity: Granularity) -> CacheLineKey {
	CacheLineKey(addr & granularity.mask())
}
