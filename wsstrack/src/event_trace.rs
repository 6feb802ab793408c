//! Event traces.
//!
//! An event trace is a magic, followed by a [`Header`] and then
//! a list of fixed-size records, each encoding an [`AccessEvent`].
//! All integers are little-endian.

// Imports
use {
	crate::event::AccessEvent,
	anyhow::Context,
	byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt},
	std::io,
	wsstrack_util::ReadByteArray,
};

/// Event trace reader
#[derive(Clone, Debug)]
pub struct EventTraceReader<R> {
	/// Header
	header: Header,

	/// Records remaining
	records_remaining: u64,

	/// Reader
	reader: R,
}

impl<R: io::Read + io::Seek> EventTraceReader<R> {
	/// Parses an event trace from a reader
	pub fn from_reader(mut reader: R) -> Result<Self, anyhow::Error> {
		// Read the magic
		let magic = reader.read_byte_array().context("Unable to read magic")?;
		anyhow::ensure!(magic == MAGIC, "Found wrong magic {magic:?}, expected {MAGIC:?}");

		// Read the header
		let header = Header::from_reader(&mut reader).context("Unable to read header")?;
		tracing::trace!(?header, "Parsed header");

		// Then check how many records there actually are
		let total_records = {
			let records_start = reader
				.stream_position()
				.context("Unable to get stream position")?;
			let stream_len = reader.seek(io::SeekFrom::End(0)).context("Unable to get stream length")?;
			reader
				.seek(io::SeekFrom::Start(records_start))
				.context("Unable to seek back to records")?;

			let record_size = Record::BYTE_SIZE as u64;
			let total_actual_size = stream_len - records_start;
			let total_expected_size = header.records * record_size;
			if total_actual_size != total_expected_size {
				tracing::warn!(
					"Event trace size differs from expected. Found {total_actual_size}, expected {total_expected_size}"
				);
			}

			total_actual_size / record_size
		};

		Ok(Self {
			header,
			records_remaining: total_records,
			reader,
		})
	}
}

impl<R: io::Read> EventTraceReader<R> {
	/// Reads the next event
	pub fn read_next(&mut self) -> Result<Option<AccessEvent>, anyhow::Error> {
		// If we're done, return `None`
		if self.records_remaining == 0 {
			return Ok(None);
		}

		// Else parse the next record and reduce the remaining records
		let record = Record::from_reader(&mut self.reader).context("Unable to read record")?;
		self.records_remaining -= 1;

		Ok(Some(record.event))
	}

	/// Returns the remaining records
	pub fn records_remaining(&self) -> u64 {
		self.records_remaining
	}

	/// Returns the header
	pub fn header(&self) -> &Header {
		&self.header
	}
}

/// Event trace writer
#[derive(Clone, Debug)]
pub struct EventTraceWriter<W> {
	/// Header, updated with every record
	header: Header,

	/// Writer
	writer: W,
}

impl<W: io::Write + io::Seek> EventTraceWriter<W> {
	/// Creates a new writer
	pub fn new(mut writer: W) -> Result<Self, anyhow::Error> {
		// Write the magic
		// Note: We rewind to ensure we write at the start, because we then
		//       later come back to write the header
		writer.rewind().context("Unable to rewind to start")?;
		writer.write_all(&MAGIC).context("Unable to write magic")?;

		// Write an empty header, to be filled in when finishing
		Header::default()
			.to_writer(&mut writer)
			.context("Unable to write placeholder header")?;

		Ok(Self {
			header: Header::default(),
			writer,
		})
	}

	/// Writes an event.
	///
	/// Empty events are skipped, since they're never produced by an event source.
	pub fn write(&mut self, event: &AccessEvent) -> Result<(), anyhow::Error> {
		if event.is_empty() {
			tracing::trace!("Skipping empty event");
			return Ok(());
		}

		Record { event: *event }
			.to_writer(&mut self.writer)
			.context("Unable to write record")?;

		self.header.records += 1;
		self.header.reads += u64::from(event.read1.is_some()) + u64::from(event.read2.is_some());
		self.header.writes += u64::from(event.write.is_some());
		Ok(())
	}

	/// Returns the number of records written
	pub fn records_written(&self) -> u64 {
		self.header.records
	}

	/// Finishes writing
	pub fn finish(mut self) -> Result<W, anyhow::Error> {
		// Rewind the writer and write the header
		self.writer
			.seek(io::SeekFrom::Start(MAGIC.len() as u64))
			.context("Unable to seek to header")?;
		self.header
			.to_writer(&mut self.writer)
			.context("Unable to write header")?;
		self.writer.flush().context("Unable to flush writer")?;

		Ok(self.writer)
	}
}

/// Magic
pub const MAGIC: [u8; 8] = *b"WSST v0\0";

/// Header
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct Header {
	/// Total records
	pub records: u64,

	/// Total read accesses
	pub reads: u64,

	/// Total write accesses
	pub writes: u64,
}

impl Header {
	/// Returns the size of this header (including any padding)
	pub const BYTE_SIZE: usize = 0x20;

	/// Parses a header from a reader
	pub fn from_reader<R: io::Read>(reader: &mut R) -> Result<Self, anyhow::Error> {
		let records = reader.read_u64::<LittleEndian>().context("Unable to read records")?;
		let reads = reader.read_u64::<LittleEndian>().context("Unable to read reads")?;
		let writes = reader.read_u64::<LittleEndian>().context("Unable to read writes")?;

		// Then skip the padding
		let _padding: [u8; 8] = reader.read_byte_array().context("Unable to read padding")?;

		Ok(Self { records, reads, writes })
	}

	/// Writes a header to a writer
	pub fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<(), anyhow::Error> {
		writer
			.write_u64::<LittleEndian>(self.records)
			.context("Unable to write records")?;
		writer
			.write_u64::<LittleEndian>(self.reads)
			.context("Unable to write reads")?;
		writer
			.write_u64::<LittleEndian>(self.writes)
			.context("Unable to write writes")?;
		writer.write_all(&[0; 8]).context("Unable to write padding")?;

		Ok(())
	}
}

/// Record
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Record {
	/// Event
	pub event: AccessEvent,
}

impl Record {
	/// Returns the size of this record
	pub const BYTE_SIZE: usize = 0x20;

	// Presence bits
	const READ1_PRESENT: u64 = 1 << 0;
	const READ2_PRESENT: u64 = 1 << 1;
	const WRITE_PRESENT: u64 = 1 << 2;

	/// Parses a record from a reader
	pub fn from_reader<R: io::Read>(reader: &mut R) -> Result<Self, anyhow::Error> {
		let present = reader.read_u64::<LittleEndian>().context("Unable to read presence")?;
		let read1 = reader.read_u64::<LittleEndian>().context("Unable to read read1")?;
		let read2 = reader.read_u64::<LittleEndian>().context("Unable to read read2")?;
		let write = reader.read_u64::<LittleEndian>().context("Unable to read write")?;

		let unknown = present & !(Self::READ1_PRESENT | Self::READ2_PRESENT | Self::WRITE_PRESENT);
		anyhow::ensure!(unknown == 0, "Unknown presence bits: {unknown:#x}");

		let event = AccessEvent {
			read1: (present & Self::READ1_PRESENT != 0).then_some(read1),
			read2: (present & Self::READ2_PRESENT != 0).then_some(read2),
			write: (present & Self::WRITE_PRESENT != 0).then_some(write),
		};

		Ok(Self { event })
	}

	/// Writes a record to a writer
	pub fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<(), anyhow::Error> {
		let mut present = 0;
		for (slot, bit) in [
			(self.event.read1, Self::READ1_PRESENT),
			(self.event.read2, Self::READ2_PRESENT),
			(self.event.write, Self::WRITE_PRESENT),
		] {
			if slot.is_some() {
				present |= bit;
			}
		}

		writer
			.write_u64::<LittleEndian>(present)
			.context("Unable to write presence")?;
		writer
			.write_u64::<LittleEndian>(self.event.read1.unwrap_or(0))
			.context("Unable to write read1")?;
		writer
			.write_u64::<LittleEndian>(self.event.read2.unwrap_or(0))
			.context("Unable to write read2")?;
		writer
			.write_u64::<LittleEndian>(self.event.write.unwrap_or(0))
			.context("Unable to write write")?;

		Ok(())
	}
}
