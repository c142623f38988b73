//! Table lifecycle: schema building, file creation, and single-record append.

use std::fs::File;
use std::io::SeekFrom;
use std::path::Path;

use log::{debug, trace};

use crate::file::DbfError;

use super::constants::{DELETE_FLAG_ACTIVE, FILE_TERMINATOR, RECORD_COUNT_OFFSET};
use super::encoding::CharacterEncoding;
use super::field::{FieldDescriptor, FieldSpec, FieldValue};
use super::header::{Header, LastUpdate};
use super::stream::TableStream;

/// One table row: field values in column declaration order.
pub type Record = Vec<FieldValue>;

/// Builder assembling the column schema and character encoding for a table.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// use dbase_types::file::dbf::TableBuilder;
///
/// # fn main() -> Result<(), dbase_types::file::DbfError> {
/// let table = TableBuilder::new()
/// 	.character_field("NAME", 10)
/// 	.numeric_field("AGE", 3, 0)
/// 	.create(Cursor::new(Vec::new()))?;
///
/// assert_eq!(table.header().record_count(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
	specs: Vec<FieldSpec>,
	encoding: CharacterEncoding,
}

impl TableBuilder {
	/// Creates an empty builder with the default windows-1252 strict encoding
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a column
	#[must_use]
	pub fn field(mut self, spec: FieldSpec) -> Self {
		self.specs.push(spec);
		self
	}

	/// Adds a `Character` column of the given width
	#[must_use]
	pub fn character_field(self, name: impl Into<String>, length: u8) -> Self {
		self.field(FieldSpec::character(name, length))
	}

	/// Adds a `Numeric` column of the given width and decimal places
	#[must_use]
	pub fn numeric_field(self, name: impl Into<String>, length: u8, decimal_places: u8) -> Self {
		self.field(FieldSpec::numeric(name, length, decimal_places))
	}

	/// Adds a `Date` column
	#[must_use]
	pub fn date_field(self, name: impl Into<String>) -> Self {
		self.field(FieldSpec::date(name))
	}

	/// Sets the character encoding used for `Character` values
	#[must_use]
	pub fn encoding(mut self, encoding: CharacterEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	/// Creates an empty table on the stream.
	///
	/// Writes the header and the file terminator at the stream's current
	/// position; for a fresh file the caller positions the stream at offset 0.
	pub fn create<S: TableStream>(self, stream: S) -> Result<Table<S>, DbfError> {
		self.create_streaming(stream, std::iter::empty::<Record>(), 0)
	}

	/// Creates a table pre-filled with `records`.
	///
	/// The record count is derived from the slice length.
	pub fn create_with_records<S: TableStream>(
		self,
		stream: S,
		records: &[Record],
	) -> Result<Table<S>, DbfError> {
		let record_count = records.len() as u32;
		self.create_streaming(stream, records, record_count)
	}

	/// Creates a table from a lazy record source of known size.
	///
	/// Sources without a knowable length must declare `record_count` up
	/// front because the count is written before the first record. The
	/// declared count is verified once the source is exhausted.
	///
	/// # Errors
	///
	/// [`DbfError::RecordCountMismatch`] when the source yields a different
	/// number of records than declared; the stream contents are unspecified
	/// in that case.
	pub fn create_streaming<S, I>(
		self,
		mut stream: S,
		records: I,
		record_count: u32,
	) -> Result<Table<S>, DbfError>
	where
		S: TableStream,
		I: IntoIterator,
		I::Item: AsRef<[FieldValue]>,
	{
		let fields = self.build_descriptors()?;
		let header = Header::new(LastUpdate::today(), record_count, fields);
		stream.write_all(&header.to_bytes())?;

		let mut table = Table {
			stream,
			header,
			encoding: self.encoding,
		};

		let mut written = 0u32;
		for record in records {
			table.write_record(record.as_ref())?;
			written += 1;
		}
		if written != record_count {
			return Err(DbfError::RecordCountMismatch {
				declared: record_count,
				written,
			});
		}

		table.write_terminator()?;
		debug!(
			"created table: {} fields, {} records, header {} bytes",
			table.header.fields().len(),
			record_count,
			table.header.header_size()
		);
		Ok(table)
	}

	/// Creates an empty table in a new file at `path`.
	///
	/// The file is opened read-write so it can be appended to afterwards; an
	/// existing file is truncated.
	pub fn create_path(self, path: impl AsRef<Path>) -> Result<Table<File>, DbfError> {
		let file = File::options()
			.read(true)
			.write(true)
			.create(true)
			.truncate(true)
			.open(path)?;
		self.create(file)
	}

	/// Creates a table pre-filled with `records` in a new file at `path`
	pub fn create_path_with_records(
		self,
		path: impl AsRef<Path>,
		records: &[Record],
	) -> Result<Table<File>, DbfError> {
		let file = File::options()
			.read(true)
			.write(true)
			.create(true)
			.truncate(true)
			.open(path)?;
		self.create_with_records(file, records)
	}

	/// Binds the builder's schema to an existing, terminator-closed stream
	/// without writing anything, so records can be appended to a table
	/// created earlier.
	///
	/// The schema and `record_count` are trusted to describe the stream;
	/// [`append`](Table::append) re-reads the on-disk count before updating
	/// it, so a stale `record_count` only affects
	/// [`Header::record_count`] until the first append.
	pub fn attach<S: TableStream>(self, stream: S, record_count: u32) -> Result<Table<S>, DbfError> {
		let fields = self.build_descriptors()?;
		let header = Header::new(LastUpdate::today(), record_count, fields);
		Ok(Table {
			stream,
			header,
			encoding: self.encoding,
		})
	}

	fn build_descriptors(&self) -> Result<Vec<FieldDescriptor>, DbfError> {
		let mut descriptors = Vec::with_capacity(self.specs.len());
		// record offset 0 holds the delete flag
		let mut data_address = 1u32;
		for spec in &self.specs {
			let descriptor = FieldDescriptor::from_spec(spec, data_address)?;
			data_address += u32::from(descriptor.length());
			descriptors.push(descriptor);
		}
		Ok(descriptors)
	}
}

/// A DBF table bound to its underlying byte stream.
///
/// The table owns the stream for its lifetime and assumes no other writer
/// touches it. All operations are synchronous; callers needing concurrent
/// appends must serialize them externally.
#[derive(Debug)]
pub struct Table<S> {
	stream: S,
	header: Header,
	encoding: CharacterEncoding,
}

impl<S: TableStream> Table<S> {
	/// The table's header
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// The character encoding used for `Character` values
	pub fn encoding(&self) -> CharacterEncoding {
		self.encoding
	}

	/// Appends one record to the table.
	///
	/// The file terminator is removed from the tail (when present), the
	/// record is written, the on-disk record count is incremented, and the
	/// terminator is written back as the new last byte.
	///
	/// A failure part-way through leaves the file without a terminator or
	/// with a stale record count; no rollback is attempted. Callers that
	/// need crash safety must journal or copy the file themselves.
	pub fn append(&mut self, record: &[FieldValue]) -> Result<(), DbfError> {
		self.strip_terminator()?;
		self.write_record(record)?;
		self.bump_record_count()?;
		self.write_terminator()?;
		trace!("appended record #{}", self.header.record_count());
		Ok(())
	}

	/// Consumes the table and returns the underlying stream
	pub fn into_inner(self) -> S {
		self.stream
	}

	/// Removes the file terminator from the tail when it is present.
	///
	/// A missing terminator (an improperly closed file) is tolerated: the
	/// stream is left positioned at end of data either way.
	fn strip_terminator(&mut self) -> Result<(), DbfError> {
		self.stream.seek(SeekFrom::End(-1))?;
		let mut last = [0u8; 1];
		self.stream.read_exact(&mut last)?;
		if last[0] == FILE_TERMINATOR {
			self.stream.seek(SeekFrom::End(-1))?;
			self.stream.truncate()?;
		}
		Ok(())
	}

	fn write_record(&mut self, values: &[FieldValue]) -> Result<(), DbfError> {
		if values.len() != self.header.fields().len() {
			return Err(DbfError::ArityMismatch {
				expected: self.header.fields().len(),
				actual: values.len(),
			});
		}

		let mut buffer = Vec::with_capacity(self.header.record_size() as usize);
		buffer.push(DELETE_FLAG_ACTIVE);
		for (descriptor, value) in self.header.fields().iter().zip(values) {
			buffer.extend_from_slice(&descriptor.encode(value, &self.encoding)?);
		}
		self.stream.write_all(&buffer)?;
		Ok(())
	}

	/// Increments the record count stored at header offset 4.
	///
	/// The count occupies all four little-endian bytes; the on-disk value is
	/// re-read rather than taken from memory, and the stream position is
	/// restored afterwards.
	fn bump_record_count(&mut self) -> Result<(), DbfError> {
		let position = self.stream.stream_position()?;

		self.stream.seek(SeekFrom::Start(RECORD_COUNT_OFFSET))?;
		let mut bytes = [0u8; 4];
		self.stream.read_exact(&mut bytes)?;
		let count = u32::from_le_bytes(bytes) + 1;
		self.stream.seek(SeekFrom::Start(RECORD_COUNT_OFFSET))?;
		self.stream.write_all(&count.to_le_bytes())?;

		self.stream.seek(SeekFrom::Start(position))?;
		self.header.set_record_count(count);
		Ok(())
	}

	fn write_terminator(&mut self) -> Result<(), DbfError> {
		self.stream.write_all(&[FILE_TERMINATOR])?;
		Ok(())
	}
}
