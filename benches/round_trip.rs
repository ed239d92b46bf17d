use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lzs::{compress, compress_scrambled, decompress, decompress_scrambled, Alphabet};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u16> {
    let repeat = |base: &str| -> Vec<u16> {
        base.encode_utf16().cycle().take(size).collect()
    };
    match pattern {
        "text" => repeat("Lorem ipsum dolor sit amet, consectetur adipiscing elit. "),
        "repetitive" => repeat("ABCDEFGHIJ"),
        "json" => repeat(r#"{"id":123,"name":"Example","values":[1,2,3,4,5],"active":true},"#),
        _ => panic!("Unknown pattern: {pattern}"),
    }
}

fn round_trip_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip_throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for size in [1024, 10240, 102400].iter() {
        let size_label = match *size {
            1024 => "1K",
            10240 => "10K",
            102400 => "100K",
            _ => "unknown",
        };

        for pattern in ["text", "repetitive", "json"].iter() {
            let data = generate_test_data(*size, pattern);

            for alphabet in Alphabet::ALL {
                let benchmark_id =
                    BenchmarkId::from_parameter(format!("{size_label}/{pattern}/{alphabet}"));

                group.throughput(Throughput::Bytes((*size * 2) as u64));
                group.bench_with_input(benchmark_id, &data, |b, data| {
                    b.iter(|| {
                        let compressed = compress(black_box(data), black_box(alphabet));
                        let decompressed = decompress(black_box(&compressed), alphabet)
                            .expect("Decompression failed");

                        // Verify round-trip integrity
                        assert_eq!(data.len(), decompressed.len());
                        decompressed
                    });
                });
            }
        }
    }

    group.finish();
}

fn round_trip_data_integrity(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip_integrity");
    group.measurement_time(Duration::from_secs(5));

    let edge_cases: Vec<(&str, Vec<u16>)> = vec![
        ("empty", vec![]),
        ("single_unit", vec![b'X' as u16]),
        ("wide_unit", vec![0x263A]),
        ("run", vec![b'Z' as u16; 4096]),
        (
            "alternating",
            (0..1000)
                .map(|i| if i % 2 == 0 { b'A' as u16 } else { b'B' as u16 })
                .collect(),
        ),
        ("all_units", (0..=u16::MAX).collect()),
    ];

    for (name, data) in edge_cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &data, |b, data| {
            b.iter(|| {
                let compressed = compress(black_box(data), Alphabet::Raw);
                let decompressed =
                    decompress(black_box(&compressed), Alphabet::Raw).expect("Decompression failed");

                // Verify exact match
                assert_eq!(data, &decompressed);
                decompressed
            });
        });
    }

    group.finish();
}

fn round_trip_scrambled(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip_scrambled");

    let data = generate_test_data(32 * 1024, "text");
    let keys = [42i64, -7, 1 << 33];
    group.throughput(Throughput::Bytes((data.len() * 2) as u64));
    group.bench_function("three_keys", |b| {
        b.iter(|| {
            let packed = compress_scrambled(black_box(&data), black_box(&keys));
            decompress_scrambled(black_box(&packed), &keys).expect("Decompression failed")
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    round_trip_throughput,
    round_trip_data_integrity,
    round_trip_scrambled
);
criterion_main!(benches);
