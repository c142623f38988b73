//! Field schema types and per-field value encoding.
//!
//! A table's schema is supplied as an ordered list of [`FieldSpec`]s, which
//! are validated into [`FieldDescriptor`]s when the table is created. Each
//! descriptor serializes to the fixed 32-byte on-disk record and knows how to
//! encode one [`FieldValue`] into its declared width.

use std::fmt::{self, Formatter};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::file::DbfError;

use super::constants::{DESCRIPTOR_SIZE, MAX_FIELD_NAME};
use super::encoding::CharacterEncoding;

/// Closed set of dBase III field types.
///
/// Each type maps to the single ASCII byte stored in the field descriptor.
/// `Logical` and `Memo` may be declared in a schema, but encoding a present
/// value of either type is not implemented in this writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
	/// Text in the table's codepage, space padded (`'C'`)
	Character,

	/// Calendar date stored as eight ASCII digits `YYYYMMDD` (`'D'`)
	Date,

	/// Boolean flag (`'L'`)
	Logical,

	/// Reference into a memo (`.dbt`) file (`'M'`)
	Memo,

	/// Fixed-point decimal, right-justified (`'N'`)
	Numeric,
}

impl FieldType {
	/// The single-byte type code stored in the field descriptor
	pub const fn code(self) -> u8 {
		match self {
			Self::Character => b'C',
			Self::Date => b'D',
			Self::Logical => b'L',
			Self::Memo => b'M',
			Self::Numeric => b'N',
		}
	}

	/// Looks up the field type for a descriptor type code
	pub const fn from_code(code: u8) -> Option<Self> {
		match code {
			b'C' => Some(Self::Character),
			b'D' => Some(Self::Date),
			b'L' => Some(Self::Logical),
			b'M' => Some(Self::Memo),
			b'N' => Some(Self::Numeric),
			_ => None,
		}
	}

	/// Human-readable type name
	pub const fn name(self) -> &'static str {
		match self {
			Self::Character => "Character",
			Self::Date => "Date",
			Self::Logical => "Logical",
			Self::Memo => "Memo",
			Self::Numeric => "Numeric",
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A single record value, paired with the declared type of its column.
///
/// `None` inside any variant writes the field as blanks (spaces), regardless
/// of the column type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	/// Text for a `Character` column
	Character(Option<String>),

	/// Date for a `Date` column
	Date(Option<NaiveDate>),

	/// Flag for a `Logical` column (declarable, not encodable)
	Logical(Option<bool>),

	/// Text for a `Memo` column (declarable, not encodable)
	Memo(Option<String>),

	/// Number for a `Numeric` column
	Numeric(Option<f64>),
}

impl FieldValue {
	/// The field type this value belongs to
	pub const fn field_type(&self) -> FieldType {
		match self {
			Self::Character(_) => FieldType::Character,
			Self::Date(_) => FieldType::Date,
			Self::Logical(_) => FieldType::Logical,
			Self::Memo(_) => FieldType::Memo,
			Self::Numeric(_) => FieldType::Numeric,
		}
	}

	/// Whether the value is absent
	pub const fn is_none(&self) -> bool {
		matches!(
			self,
			Self::Character(None)
				| Self::Date(None)
				| Self::Logical(None)
				| Self::Memo(None)
				| Self::Numeric(None)
		)
	}
}

/// Caller-supplied definition of one column, used to create a table.
///
/// Specs are plain data and serde-serializable so schemas can live in
/// configuration files.
///
/// # Examples
///
/// ```
/// use dbase_types::file::dbf::{FieldSpec, FieldType};
///
/// let spec = FieldSpec::numeric("BALANCE", 12, 2);
/// assert_eq!(spec.field_type, FieldType::Numeric);
/// assert_eq!(spec.decimal_places, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
	/// Column name, at most 10 ASCII bytes
	pub name: String,

	/// Column type
	pub field_type: FieldType,

	/// Width of the column in bytes
	pub length: u8,

	/// Digits after the decimal point, only meaningful for `Numeric`
	pub decimal_places: u8,
}

impl FieldSpec {
	/// Creates a spec from raw parts
	pub fn new(
		name: impl Into<String>,
		field_type: FieldType,
		length: u8,
		decimal_places: u8,
	) -> Self {
		Self {
			name: name.into(),
			field_type,
			length,
			decimal_places,
		}
	}

	/// A `Character` column of the given width
	pub fn character(name: impl Into<String>, length: u8) -> Self {
		Self::new(name, FieldType::Character, length, 0)
	}

	/// A `Numeric` column of the given width and decimal places
	pub fn numeric(name: impl Into<String>, length: u8, decimal_places: u8) -> Self {
		Self::new(name, FieldType::Numeric, length, decimal_places)
	}

	/// A `Date` column (always 8 bytes wide)
	pub fn date(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Date, 8, 0)
	}

	/// A `Logical` column (1 byte wide)
	pub fn logical(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Logical, 1, 0)
	}

	/// A `Memo` column (10-byte block reference)
	pub fn memo(name: impl Into<String>) -> Self {
		Self::new(name, FieldType::Memo, 10, 0)
	}
}

/// One column of a table, as laid out in the 32-byte on-disk descriptor.
///
/// `data_address` is the cumulative byte offset of the field within a data
/// record. Offset 0 is the record's delete flag, so the first field sits at
/// address 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
	name: String,
	field_type: FieldType,
	data_address: u32,
	length: u8,
	decimal_places: u8,
}

impl FieldDescriptor {
	/// Validates a spec into a descriptor at the given record offset.
	///
	/// # Errors
	///
	/// - [`DbfError::FieldNameTooLong`] for names over 10 bytes (the source
	///   format would silently truncate; this writer rejects instead)
	/// - [`DbfError::InvalidFieldSpec`] for non-ASCII names or decimal places
	///   declared on a non-`Numeric` column
	pub fn from_spec(spec: &FieldSpec, data_address: u32) -> Result<Self, DbfError> {
		if spec.name.len() > MAX_FIELD_NAME {
			return Err(DbfError::FieldNameTooLong {
				name: spec.name.clone(),
				length: spec.name.len(),
				max: MAX_FIELD_NAME,
			});
		}
		if !spec.name.is_ascii() {
			return Err(DbfError::InvalidFieldSpec {
				name: spec.name.clone(),
				message: "field names must be ASCII".to_string(),
			});
		}
		if spec.decimal_places != 0 && spec.field_type != FieldType::Numeric {
			return Err(DbfError::InvalidFieldSpec {
				name: spec.name.clone(),
				message: format!(
					"decimal places are only meaningful for Numeric fields, not {}",
					spec.field_type
				),
			});
		}

		Ok(Self {
			name: spec.name.clone(),
			field_type: spec.field_type,
			data_address,
			length: spec.length,
			decimal_places: spec.decimal_places,
		})
	}

	/// Column name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Column type
	pub fn field_type(&self) -> FieldType {
		self.field_type
	}

	/// Byte offset of this field within a data record
	pub fn data_address(&self) -> u32 {
		self.data_address
	}

	/// Width of the column in bytes
	pub fn length(&self) -> u8 {
		self.length
	}

	/// Digits after the decimal point
	pub fn decimal_places(&self) -> u8 {
		self.decimal_places
	}

	/// Serializes the descriptor to its fixed 32-byte on-disk form
	pub fn to_bytes(&self) -> [u8; DESCRIPTOR_SIZE] {
		let mut buffer = [0u8; DESCRIPTOR_SIZE];
		// bytes 0-10: name, zero padded
		buffer[..self.name.len()].copy_from_slice(self.name.as_bytes());
		buffer[11] = self.field_type.code();
		buffer[12..16].copy_from_slice(&self.data_address.to_le_bytes());
		buffer[16] = self.length;
		buffer[17] = self.decimal_places;
		// bytes 18-31 reserved
		buffer
	}

	/// Returns the size of a descriptor in bytes
	pub const fn size() -> usize {
		DESCRIPTOR_SIZE
	}

	/// Encodes one value to exactly [`length`](Self::length) bytes.
	pub(crate) fn encode(
		&self,
		value: &FieldValue,
		encoding: &CharacterEncoding,
	) -> Result<Vec<u8>, DbfError> {
		self.field_type.encode(self, value, encoding)
	}
}

impl fmt::Display for FieldDescriptor {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} {}({}, {}) @ {}",
			self.name, self.field_type, self.length, self.decimal_places, self.data_address
		)
	}
}

impl FieldType {
	/// Encodes `value` into exactly `descriptor.length` bytes.
	///
	/// An absent value encodes as blanks for every field type, including
	/// `Logical` and `Memo`.
	pub(crate) fn encode(
		self,
		descriptor: &FieldDescriptor,
		value: &FieldValue,
		encoding: &CharacterEncoding,
	) -> Result<Vec<u8>, DbfError> {
		if value.is_none() {
			return Ok(vec![b' '; descriptor.length as usize]);
		}
		if value.field_type() != self {
			return Err(DbfError::TypeMismatch {
				field: descriptor.name.clone(),
				expected: self,
				got: value.field_type(),
			});
		}

		match value {
			FieldValue::Character(Some(text)) => encode_character(descriptor, text, encoding),
			FieldValue::Numeric(Some(number)) => encode_numeric(descriptor, *number),
			FieldValue::Date(Some(date)) => Ok(encode_date(*date)),
			_ => Err(DbfError::UnsupportedFieldType {
				field: descriptor.name.clone(),
				field_type: self,
			}),
		}
	}
}

fn encode_character(
	descriptor: &FieldDescriptor,
	text: &str,
	encoding: &CharacterEncoding,
) -> Result<Vec<u8>, DbfError> {
	let mut bytes = encoding.encode(&descriptor.name, text)?;
	let max = descriptor.length as usize;
	if bytes.len() > max {
		return Err(DbfError::ValueTooLong {
			field: descriptor.name.clone(),
			length: bytes.len(),
			max,
		});
	}
	bytes.resize(max, b' ');
	Ok(bytes)
}

fn encode_numeric(descriptor: &FieldDescriptor, number: f64) -> Result<Vec<u8>, DbfError> {
	let width = descriptor.length as usize;
	let precision = descriptor.decimal_places as usize;
	let formatted = format!("{number:>width$.precision$}");
	// No truncation on overflow, the caller must size the field correctly
	if formatted.len() > width {
		return Err(DbfError::NumericOverflow {
			field: descriptor.name.clone(),
			formatted,
			max: width,
		});
	}
	Ok(formatted.into_bytes())
}

/// Dates always serialize to eight digits, even when the declared field
/// length differs.
fn encode_date(date: NaiveDate) -> Vec<u8> {
	format!("{:04}{:02}{:02}", date.year(), date.month(), date.day()).into_bytes()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn desc(spec: FieldSpec) -> FieldDescriptor {
		FieldDescriptor::from_spec(&spec, 1).unwrap()
	}

	#[test]
	fn test_type_code_roundtrip() {
		for field_type in [
			FieldType::Character,
			FieldType::Date,
			FieldType::Logical,
			FieldType::Memo,
			FieldType::Numeric,
		] {
			assert_eq!(FieldType::from_code(field_type.code()), Some(field_type));
		}
		assert_eq!(FieldType::from_code(b'X'), None);
	}

	#[test]
	fn test_descriptor_layout() {
		let descriptor =
			FieldDescriptor::from_spec(&FieldSpec::numeric("AGE", 3, 0), 11).unwrap();
		let bytes = descriptor.to_bytes();

		assert_eq!(&bytes[..3], b"AGE");
		// name slot is zero padded through byte 10
		assert_eq!(&bytes[3..11], &[0u8; 8]);
		assert_eq!(bytes[11], b'N');
		assert_eq!(&bytes[12..16], &11u32.to_le_bytes());
		assert_eq!(bytes[16], 3);
		assert_eq!(bytes[17], 0);
		assert_eq!(&bytes[18..], &[0u8; 14]);
	}

	#[test]
	fn test_name_longer_than_ten_bytes_rejected() {
		let result = FieldDescriptor::from_spec(&FieldSpec::character("DESCRIPTION", 20), 1);
		assert!(matches!(
			result,
			Err(DbfError::FieldNameTooLong { length: 11, .. })
		));
	}

	#[test]
	fn test_non_ascii_name_rejected() {
		let result = FieldDescriptor::from_spec(&FieldSpec::character("NOMBRÉ", 5), 1);
		assert!(matches!(result, Err(DbfError::InvalidFieldSpec { .. })));
	}

	#[test]
	fn test_decimals_on_character_rejected() {
		let spec = FieldSpec::new("NAME", FieldType::Character, 10, 2);
		let result = FieldDescriptor::from_spec(&spec, 1);
		assert!(matches!(result, Err(DbfError::InvalidFieldSpec { .. })));
	}

	#[test]
	fn test_none_encodes_as_blanks() {
		let encoding = CharacterEncoding::default();
		let descriptor = desc(FieldSpec::character("NAME", 6));
		let bytes = descriptor
			.encode(&FieldValue::Character(None), &encoding)
			.unwrap();
		assert_eq!(bytes, b"      ");

		// absent values encode as blanks even for unsupported types
		let logical = desc(FieldSpec::logical("FLAG"));
		let bytes = logical
			.encode(&FieldValue::Logical(None), &encoding)
			.unwrap();
		assert_eq!(bytes, b" ");
	}

	#[test]
	fn test_character_padded_to_length() {
		let encoding = CharacterEncoding::default();
		let descriptor = desc(FieldSpec::character("NAME", 8));
		let bytes = descriptor
			.encode(&FieldValue::Character(Some("BOB".to_string())), &encoding)
			.unwrap();
		assert_eq!(bytes, b"BOB     ");
	}

	#[test]
	fn test_character_overflow_rejected() {
		let encoding = CharacterEncoding::default();
		let descriptor = desc(FieldSpec::character("NAME", 10));
		let result = descriptor.encode(
			&FieldValue::Character(Some("ABCDEFGHIJK".to_string())),
			&encoding,
		);
		assert!(matches!(
			result,
			Err(DbfError::ValueTooLong {
				length: 11,
				max: 10,
				..
			})
		));
	}

	#[test]
	fn test_numeric_right_justified() {
		let encoding = CharacterEncoding::default();
		let descriptor = desc(FieldSpec::numeric("AGE", 5, 0));
		let bytes = descriptor
			.encode(&FieldValue::Numeric(Some(30.0)), &encoding)
			.unwrap();
		assert_eq!(bytes, b"   30");
	}

	#[test]
	fn test_numeric_decimal_places() {
		let encoding = CharacterEncoding::default();
		let descriptor = desc(FieldSpec::numeric("PRICE", 8, 2));
		let bytes = descriptor
			.encode(&FieldValue::Numeric(Some(12.5)), &encoding)
			.unwrap();
		assert_eq!(bytes, b"   12.50");
	}

	#[test]
	fn test_numeric_sign_consumes_a_column() {
		let encoding = CharacterEncoding::default();
		let descriptor = desc(FieldSpec::numeric("DELTA", 4, 0));
		let bytes = descriptor
			.encode(&FieldValue::Numeric(Some(-5.0)), &encoding)
			.unwrap();
		assert_eq!(bytes, b"  -5");

		let result = descriptor.encode(&FieldValue::Numeric(Some(-1234.0)), &encoding);
		assert!(matches!(result, Err(DbfError::NumericOverflow { .. })));
	}

	#[test]
	fn test_numeric_overflow_rejected() {
		let encoding = CharacterEncoding::default();
		let descriptor = desc(FieldSpec::numeric("AGE", 4, 0));
		let result = descriptor.encode(&FieldValue::Numeric(Some(12345.0)), &encoding);
		assert!(matches!(
			result,
			Err(DbfError::NumericOverflow { max: 4, .. })
		));
	}

	#[test]
	fn test_date_always_eight_digits() {
		let encoding = CharacterEncoding::default();
		let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

		let descriptor = desc(FieldSpec::date("WHEN"));
		let bytes = descriptor
			.encode(&FieldValue::Date(Some(date)), &encoding)
			.unwrap();
		assert_eq!(bytes, b"20240307");

		// a mis-declared length does not change the eight-digit output
		let wide = desc(FieldSpec::new("WHEN", FieldType::Date, 10, 0));
		let bytes = wide.encode(&FieldValue::Date(Some(date)), &encoding).unwrap();
		assert_eq!(bytes, b"20240307");
	}

	#[test]
	fn test_type_mismatch_rejected() {
		let encoding = CharacterEncoding::default();
		let descriptor = desc(FieldSpec::numeric("AGE", 3, 0));
		let result = descriptor.encode(
			&FieldValue::Character(Some("30".to_string())),
			&encoding,
		);
		assert!(matches!(
			result,
			Err(DbfError::TypeMismatch {
				expected: FieldType::Numeric,
				got: FieldType::Character,
				..
			})
		));
	}

	#[test]
	fn test_logical_and_memo_unsupported() {
		let encoding = CharacterEncoding::default();

		let logical = desc(FieldSpec::logical("FLAG"));
		let result = logical.encode(&FieldValue::Logical(Some(true)), &encoding);
		assert!(matches!(
			result,
			Err(DbfError::UnsupportedFieldType {
				field_type: FieldType::Logical,
				..
			})
		));

		let memo = desc(FieldSpec::memo("NOTES"));
		let result = memo.encode(&FieldValue::Memo(Some("hi".to_string())), &encoding);
		assert!(matches!(
			result,
			Err(DbfError::UnsupportedFieldType {
				field_type: FieldType::Memo,
				..
			})
		));
	}

	#[test]
	fn test_spec_serde_roundtrip() {
		let spec = FieldSpec::numeric("BALANCE", 12, 2);
		let json = serde_json::to_string(&spec).unwrap();
		let parsed: FieldSpec = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, spec);
	}
}
