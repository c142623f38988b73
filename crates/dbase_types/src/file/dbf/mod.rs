//! dBase III (`.DBF`) table file support for the `dbase-rs` project.
//!
//! This module writes and incrementally appends to DBF table files: a
//! fixed-size header describing the column schema, followed by fixed-width
//! data records and a terminator byte.
//!
//! # File Structure
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │ Preamble (32 bytes)                 │  version | last update | record
//! │                                     │  count | header size | record size
//! ├─────────────────────────────────────┤
//! │ Field descriptors (32 bytes each)   │  name | type code | data address |
//! │                                     │  length | decimal places
//! ├─────────────────────────────────────┤
//! │ 0x0D                                │  descriptor block terminator
//! ├─────────────────────────────────────┤
//! │ Data records (record size × count)  │  delete flag + fixed-width values
//! ├─────────────────────────────────────┤
//! │ 0x1A                                │  file terminator, always last byte
//! └─────────────────────────────────────┘
//! ```
//!
//! All multi-byte integers are little-endian. Each data record starts with a
//! one-byte delete flag (space = active) followed by the field values encoded
//! to their declared widths, in descriptor order.
//!
//! Only the dBase III layout (version byte 0x03) is emitted. The [`Version`]
//! table enumerates the other known version bytes as documentation of a
//! closed extension point.
//!
//! # Examples
//!
//! ## Creating a table and appending records
//!
//! ```no_run
//! use dbase_types::file::dbf::{FieldValue, TableBuilder};
//!
//! # fn main() -> Result<(), dbase_types::file::DbfError> {
//! let mut table = TableBuilder::new()
//! 	.character_field("NAME", 10)
//! 	.numeric_field("AGE", 3, 0)
//! 	.create_path("people.dbf")?;
//!
//! table.append(&[
//! 	FieldValue::Character(Some("ALICE".to_string())),
//! 	FieldValue::Numeric(Some(30.0)),
//! ])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing an in-memory table with bulk records
//!
//! ```
//! use std::io::Cursor;
//!
//! use dbase_types::file::dbf::{FieldValue, TableBuilder};
//!
//! # fn main() -> Result<(), dbase_types::file::DbfError> {
//! let records = vec![vec![FieldValue::Character(Some("X".to_string()))]];
//! let table = TableBuilder::new()
//! 	.character_field("TAG", 4)
//! 	.create_with_records(Cursor::new(Vec::new()), &records)?;
//!
//! assert_eq!(table.header().record_count(), 1);
//! # Ok(())
//! # }
//! ```

/// DBF file format constants.
pub mod constants {
	/// Size of the fixed header preamble in bytes
	pub const PREAMBLE_SIZE: usize = 32;

	/// Size of each field descriptor record in bytes
	pub const DESCRIPTOR_SIZE: usize = 32;

	/// Terminator byte closing the field descriptor block (0x0D)
	pub const HEADER_TERMINATOR: u8 = 0x0D;

	/// Terminator byte marking end of data, the last byte of a well-formed file (0x1A)
	pub const FILE_TERMINATOR: u8 = 0x1A;

	/// Delete flag value marking a record as active (not deleted)
	pub const DELETE_FLAG_ACTIVE: u8 = b' ';

	/// Maximum byte length of a field name (the 11-byte descriptor slot keeps
	/// at least one trailing NUL)
	pub const MAX_FIELD_NAME: usize = 10;

	/// Byte offset of the record count within the header preamble
	pub const RECORD_COUNT_OFFSET: u64 = 4;
}

mod encoding;
mod field;
mod header;
mod stream;
mod table;


pub use encoding::{CharacterEncoding, EncodingPolicy};
pub use field::{FieldDescriptor, FieldSpec, FieldType, FieldValue};
pub use header::{Header, LastUpdate, Version};
pub use stream::TableStream;
pub use table::{Record, Table, TableBuilder};
