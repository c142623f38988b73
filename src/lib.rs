//! `dbase-rs` writes dBase III (DBF) table files: a fixed-size header
//! describing the column schema, followed by fixed-width data records that
//! can be appended to in place.
//!
//! The engine lives in [`dbase_types`]; this crate re-exports it.
pub use dbase_types::*;
