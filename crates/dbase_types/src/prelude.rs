//! Prelude module for `dbase_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use dbase_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let spec = FieldSpec::character("NAME", 10);
//! let encoding = CharacterEncoding::windows_1252(EncodingPolicy::Strict);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Encoding policy
	CharacterEncoding,

	// Errors
	DbfError,

	EncodingPolicy,

	// Schema types
	FieldDescriptor,
	FieldSpec,
	FieldType,
	FieldValue,

	// Header types
	Header,
	LastUpdate,

	// Table types
	Record,
	Table,
	TableBuilder,
	TableStream,

	Version,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
