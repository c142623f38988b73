//! Benchmark suite for DBF table writing
//!
//! This benchmark measures header serialization, bulk table creation, and the
//! single-record append path against in-memory streams.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;
use std::io::Cursor;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dbase_benches::{sample_records, sample_specs, sizes};
use dbase_types::prelude::*;

fn builder() -> TableBuilder {
	let mut builder = TableBuilder::new();
	for spec in sample_specs() {
		builder = builder.field(spec);
	}
	builder
}

/// Benchmark bulk creation across batch sizes
fn bench_create_with_records(c: &mut Criterion) {
	let mut group = c.benchmark_group("dbf_create");

	for count in [sizes::SMALL, sizes::MEDIUM, sizes::LARGE] {
		let records = sample_records(count);
		group.throughput(Throughput::Elements(count as u64));
		group.bench_with_input(BenchmarkId::new("bulk", count), &records, |b, records| {
			b.iter(|| {
				let table = builder()
					.create_with_records(Cursor::new(Vec::new()), black_box(records))
					.expect("create table");
				black_box(table.into_inner().into_inner().len())
			});
		});
	}

	group.finish();
}

/// Benchmark the append protocol (terminator strip, record write, count bump)
fn bench_append(c: &mut Criterion) {
	let mut group = c.benchmark_group("dbf_append");

	let records = sample_records(sizes::SINGLE);
	let record = &records[0];
	group.bench_function("single_record", |b| {
		b.iter_batched(
			|| builder().create(Cursor::new(Vec::new())).expect("create table"),
			|mut table| {
				table.append(black_box(record)).expect("append record");
				black_box(table.header().record_count())
			},
			BatchSize::SmallInput,
		);
	});

	group.finish();
}

criterion_group!(benches, bench_create_with_records, bench_append);

criterion_main!(benches);
