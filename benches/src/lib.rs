//! Benchmark helper utilities for dbase-rs
//!
//! This module provides utilities for generating synthetic schemas and record
//! batches for the table-writing benchmarks.

use chrono::NaiveDate;
use dbase_types::prelude::*;

/// Schema used by the table-writing benchmarks: a text column, a fixed-point
/// balance, and a date.
pub fn sample_specs() -> Vec<FieldSpec> {
	vec![
		FieldSpec::character("NAME", 20),
		FieldSpec::numeric("BALANCE", 12, 2),
		FieldSpec::date("SINCE"),
	]
}

/// Generates `count` deterministic records matching [`sample_specs`]
pub fn sample_records(count: usize) -> Vec<Record> {
	let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
	(0..count)
		.map(|i| {
			vec![
				FieldValue::Character(Some(format!("CUSTOMER {i:05}"))),
				FieldValue::Numeric(Some(i as f64 * 1.25)),
				FieldValue::Date(Some(
					epoch + chrono::Days::new((i % 1461) as u64),
				)),
			]
		})
		.collect()
}

/// Common batch sizes for the synthetic record benchmarks
pub mod sizes {
	/// Single record, the append hot path
	pub const SINGLE: usize = 1;
	/// Small batch: 100 records
	pub const SMALL: usize = 100;
	/// Medium batch: 1,000 records
	pub const MEDIUM: usize = 1_000;
	/// Large batch: 10,000 records
	pub const LARGE: usize = 10_000;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sample_records_match_schema() {
		let specs = sample_specs();
		let records = sample_records(10);

		assert_eq!(records.len(), 10);
		for record in &records {
			assert_eq!(record.len(), specs.len());
		}
	}
}
