//! This crate provides core data types and file writing support for the `dbase-rs` project.
//!
//! # File Formats
//!
//! - **DBF**: dBase III table files, a fixed-size header describing the column
//!   schema followed by fixed-width data records and a terminator byte
//!
//! Only the write and append paths are implemented. Parsing existing DBF files
//! into records, memo (`.dbt`) files, and the header layouts of later dBase and
//! FoxPro versions are out of scope.
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use dbase_types::prelude::*;
//!
//! # fn main() -> Result<(), DbfError> {
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
//! Or use explicit paths:
//!
//! ```no_run
//! use dbase_types::file::dbf::{FieldSpec, TableBuilder};
//!
//! let builder = TableBuilder::new().field(FieldSpec::date("UPDATED"));
//! ```

pub mod file;

/// `use dbase_types::prelude::*;` to import commonly used items.
pub mod prelude;
