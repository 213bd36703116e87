//! Materialized vs streamed table access.
//!
//! Run with: `cargo bench --package reclab-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use reclab_bench::{BenchDataset, TABLE};
use reclab_lib::LoaderOptions;
use std::hint::black_box;

const SIZES: [usize; 2] = [10_000, 100_000];

fn table_access_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_access");
    group.sample_size(20);

    for rows in SIZES {
        let dataset = BenchDataset::with_rows(rows).expect("failed to build fixture");
        dataset
            .accessor()
            .store()
            .ensure_extracted_and_validated()
            .expect("failed to extract fixture");
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_with_input(BenchmarkId::new("materialize", rows), &rows, |b, _| {
            b.iter(|| {
                let accessor = dataset.accessor();
                black_box(accessor.get_table_data(TABLE).unwrap().len())
            });
        });

        for chunk_size in [None, Some(1024)] {
            let label = chunk_size.map_or_else(|| "stream".to_string(), |n| format!("stream_chunk{n}"));
            let accessor = dataset.accessor();
            let stream = accessor
                .iter_loader(
                    TABLE,
                    LoaderOptions {
                        chunk_size,
                        ..LoaderOptions::new()
                    },
                )
                .unwrap();
            group.bench_with_input(BenchmarkId::new(label, rows), &rows, |b, _| {
                b.iter(|| black_box(stream.iter().unwrap().count()));
            });
        }

        let accessor = dataset.accessor();
        let tail = accessor
            .iter_loader(TABLE, LoaderOptions::new().with_range(rows - 100, rows))
            .unwrap();
        group.bench_with_input(BenchmarkId::new("stream_tail_100", rows), &rows, |b, _| {
            b.iter(|| black_box(tail.iter().unwrap().count()));
        });
    }

    group.finish();
}

criterion_group!(benches, table_access_benchmark);
criterion_main!(benches);
