//! DBF header layout: the 32-byte preamble, the last-update stamp, and the
//! version byte table.

use std::fmt::{self, Formatter};

use chrono::{Datelike, NaiveDate};

use super::constants::{DESCRIPTOR_SIZE, HEADER_TERMINATOR, PREAMBLE_SIZE};
use super::field::FieldDescriptor;

/// Known DBF version bytes.
///
/// Informational metadata: this writer only ever emits [`Version::DBase3`]
/// and only understands the dBase III header layout. The remaining variants
/// document a closed extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
	/// FoxBASE (0x02)
	FoxBase,
	/// FoxBASE+ / dBase III plus, no memo (0x03)
	DBase3,
	/// Visual FoxPro (0x30)
	VisualFoxPro,
	/// Visual FoxPro, autoincrement enabled (0x31)
	VisualFoxProAutoInc,
	/// Visual FoxPro with field type Varchar or Varbinary (0x32)
	VisualFoxProVarchar,
	/// dBASE IV SQL table files, no memo (0x43)
	DBase4SqlTable,
	/// dBASE IV SQL system files, no memo (0x63)
	DBase4SqlSystem,
	/// FoxBASE+ / dBASE III PLUS, with memo (0x83)
	DBase3Memo,
	/// dBASE IV with memo (0x8B)
	DBase4Memo,
	/// dBASE IV SQL table files, with memo (0xCB)
	DBase4SqlTableMemo,
	/// HiPer-Six format with SMT memo file (0xE5)
	HiPerSix,
	/// FoxPro 2.x (or earlier) with memo (0xF5)
	FoxPro2Memo,
	/// FoxBASE (0xFB)
	FoxBaseLate,
}

impl Version {
	/// The version byte stored at header offset 0
	pub const fn code(self) -> u8 {
		match self {
			Self::FoxBase => 0x02,
			Self::DBase3 => 0x03,
			Self::VisualFoxPro => 0x30,
			Self::VisualFoxProAutoInc => 0x31,
			Self::VisualFoxProVarchar => 0x32,
			Self::DBase4SqlTable => 0x43,
			Self::DBase4SqlSystem => 0x63,
			Self::DBase3Memo => 0x83,
			Self::DBase4Memo => 0x8B,
			Self::DBase4SqlTableMemo => 0xCB,
			Self::HiPerSix => 0xE5,
			Self::FoxPro2Memo => 0xF5,
			Self::FoxBaseLate => 0xFB,
		}
	}

	/// Looks up a known version for a header byte
	pub const fn from_code(code: u8) -> Option<Self> {
		match code {
			0x02 => Some(Self::FoxBase),
			0x03 => Some(Self::DBase3),
			0x30 => Some(Self::VisualFoxPro),
			0x31 => Some(Self::VisualFoxProAutoInc),
			0x32 => Some(Self::VisualFoxProVarchar),
			0x43 => Some(Self::DBase4SqlTable),
			0x63 => Some(Self::DBase4SqlSystem),
			0x83 => Some(Self::DBase3Memo),
			0x8B => Some(Self::DBase4Memo),
			0xCB => Some(Self::DBase4SqlTableMemo),
			0xE5 => Some(Self::HiPerSix),
			0xF5 => Some(Self::FoxPro2Memo),
			0xFB => Some(Self::FoxBaseLate),
			_ => None,
		}
	}

	/// Product name associated with the version byte
	pub const fn description(self) -> &'static str {
		match self {
			Self::FoxBase | Self::FoxBaseLate => "FoxBASE",
			Self::DBase3 => "FoxBASE+/dBase III plus, no memo",
			Self::VisualFoxPro => "Visual FoxPro",
			Self::VisualFoxProAutoInc => "Visual FoxPro, autoincrement enabled",
			Self::VisualFoxProVarchar => "Visual FoxPro with field type Varchar or Varbinary",
			Self::DBase4SqlTable => "dBASE IV SQL table files, no memo",
			Self::DBase4SqlSystem => "dBASE IV SQL system files, no memo",
			Self::DBase3Memo => "FoxBASE+/dBASE III PLUS, with memo",
			Self::DBase4Memo => "dBASE IV with memo",
			Self::DBase4SqlTableMemo => "dBASE IV SQL table files, with memo",
			Self::HiPerSix => "HiPer-Six format with SMT memo file",
			Self::FoxPro2Memo => "FoxPro 2.x (or earlier) with memo",
		}
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{} (0x{:02X})", self.description(), self.code())
	}
}

/// Last-modification stamp stored in header bytes 1-3.
///
/// The year is stored as an offset from 2000, so representable dates run
/// from 2000 through 2255; years outside that range wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastUpdate {
	year: u8,
	month: u8,
	day: u8,
}

impl LastUpdate {
	/// Builds the stamp from a calendar date
	pub fn from_date(date: NaiveDate) -> Self {
		Self {
			year: (date.year() - 2000) as u8,
			month: date.month() as u8,
			day: date.day() as u8,
		}
	}

	/// Builds the stamp from the current local date
	pub fn today() -> Self {
		Self::from_date(chrono::Local::now().date_naive())
	}

	/// Calendar year
	pub const fn year(self) -> i32 {
		2000 + self.year as i32
	}

	/// Calendar month (1-12)
	pub const fn month(self) -> u8 {
		self.month
	}

	/// Day of month (1-31)
	pub const fn day(self) -> u8 {
		self.day
	}

	/// Serializes to the three header bytes (year-2000, month, day)
	pub const fn to_bytes(self) -> [u8; 3] {
		[self.year, self.month, self.day]
	}
}

/// In-memory form of a DBF header: preamble fields plus the ordered field
/// descriptors.
///
/// `header_size` and `record_size` are derived from the descriptor list:
///
/// ```text
/// header_size = 32 + 32 × field count + 1      (preamble + descriptors + 0x0D)
/// record_size = 1 + Σ field lengths            (delete flag + values)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
	version: u8,
	last_update: LastUpdate,
	record_count: u32,
	fields: Vec<FieldDescriptor>,
}

impl Header {
	/// Creates a dBase III header over the given descriptors
	pub fn new(last_update: LastUpdate, record_count: u32, fields: Vec<FieldDescriptor>) -> Self {
		Self {
			version: Version::DBase3.code(),
			last_update,
			record_count,
			fields,
		}
	}

	/// The version byte at header offset 0
	pub fn version(&self) -> u8 {
		self.version
	}

	/// Last-modification stamp
	pub fn last_update(&self) -> LastUpdate {
		self.last_update
	}

	/// Number of data records the file holds
	pub fn record_count(&self) -> u32 {
		self.record_count
	}

	pub(crate) fn set_record_count(&mut self, record_count: u32) {
		self.record_count = record_count;
	}

	/// Field descriptors in column order
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Total size of the serialized header in bytes
	pub fn header_size(&self) -> u16 {
		(PREAMBLE_SIZE + DESCRIPTOR_SIZE * self.fields.len() + 1) as u16
	}

	/// Size of one data record in bytes, including the delete flag
	pub fn record_size(&self) -> u16 {
		1 + self
			.fields
			.iter()
			.map(|field| u16::from(field.length()))
			.sum::<u16>()
	}

	/// Serializes the preamble, descriptor block, and terminator
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut buffer = Vec::with_capacity(self.header_size() as usize);
		buffer.push(self.version);
		buffer.extend_from_slice(&self.last_update.to_bytes());
		buffer.extend_from_slice(&self.record_count.to_le_bytes());
		buffer.extend_from_slice(&self.header_size().to_le_bytes());
		buffer.extend_from_slice(&self.record_size().to_le_bytes());
		// bytes 12-31 reserved
		buffer.extend_from_slice(&[0u8; 20]);
		for field in &self.fields {
			buffer.extend_from_slice(&field.to_bytes());
		}
		buffer.push(HEADER_TERMINATOR);
		buffer
	}
}

impl fmt::Display for Header {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		writeln!(
			f,
			"DBF v0x{:02X}, {} records, updated {:04}-{:02}-{:02}",
			self.version,
			self.record_count,
			self.last_update.year(),
			self.last_update.month(),
			self.last_update.day()
		)?;
		for field in &self.fields {
			writeln!(f, "  {}", field)?;
		}
		Ok(())
	}
}
