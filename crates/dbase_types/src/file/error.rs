//! Error types for DBF table writing.

use thiserror::Error;

use super::dbf::FieldType;

/// Errors that can occur when building schemas or writing DBF tables
#[derive(Debug, Error)]
pub enum DbfError {
	/// Field name does not fit the descriptor's 11-byte name slot
	#[error("Field name '{name}' is {length} bytes, at most {max} are allowed")]
	FieldNameTooLong {
		/// The offending field name
		name: String,
		/// Byte length of the name
		length: usize,
		/// Maximum allowed byte length
		max: usize,
	},

	/// Field specification is inconsistent
	#[error("Invalid specification for field '{name}': {message}")]
	InvalidFieldSpec {
		/// Name of the field
		name: String,
		/// What is wrong with the specification
		message: String,
	},

	/// Encoded character value does not fit the declared field length
	#[error("Value for field '{field}' encodes to {length} bytes, field holds {max}")]
	ValueTooLong {
		/// Name of the field
		field: String,
		/// Encoded byte length of the value
		length: usize,
		/// Declared field length
		max: usize,
	},

	/// Formatted numeric value is wider than the declared field length
	#[error("Numeric value '{formatted}' for field '{field}' exceeds width {max}")]
	NumericOverflow {
		/// Name of the field
		field: String,
		/// The formatted decimal text that did not fit
		formatted: String,
		/// Declared field width
		max: usize,
	},

	/// Value variant does not match the field's declared type
	#[error("Field '{field}' is declared {expected} but a {got} value was supplied")]
	TypeMismatch {
		/// Name of the field
		field: String,
		/// Declared field type
		expected: FieldType,
		/// Type of the supplied value
		got: FieldType,
	},

	/// Encoding values of this field type is not implemented
	#[error("Encoding {field_type} values is not supported (field '{field}')")]
	UnsupportedFieldType {
		/// Name of the field
		field: String,
		/// The unsupported field type
		field_type: FieldType,
	},

	/// A character has no representation in the target encoding
	#[error("Character '{character}' in field '{field}' cannot be encoded as {encoding}")]
	Unencodable {
		/// Name of the field
		field: String,
		/// The character that could not be encoded
		character: char,
		/// Name of the target encoding
		encoding: &'static str,
	},

	/// No encoding is registered under the given label
	#[error("Unknown encoding label '{label}'")]
	UnknownEncoding {
		/// The label that failed to resolve
		label: String,
	},

	/// Record does not have one value per declared field
	#[error("Record has {actual} values, table declares {expected} fields")]
	ArityMismatch {
		/// Number of fields in the schema
		expected: usize,
		/// Number of values in the record
		actual: usize,
	},

	/// Declared record count does not match the number of records written
	#[error("Declared record count {declared} but {written} records were written")]
	RecordCountMismatch {
		/// Count the caller declared up front
		declared: u32,
		/// Count of records actually written
		written: u32,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}
