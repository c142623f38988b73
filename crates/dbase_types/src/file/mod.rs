//! File type support for the `dbase-rs` project.

mod error;

pub mod dbf;

// Re-export error type
pub use error::DbfError;

// Re-export main file types
pub use dbf::{
	CharacterEncoding, EncodingPolicy, FieldDescriptor, FieldSpec, FieldType, FieldValue, Header,
	LastUpdate, Record, Table, TableBuilder, TableStream, Version,
};
