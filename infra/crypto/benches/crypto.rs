use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use getrandom::fill;
use pinvault_crypto::prelude::*;

fn bench_seal_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("seal_open");
    group.sample_size(10);

    let pin = Pin::parse("1234").unwrap();
    let sizes = [("256B", 256usize), ("4KB", 4 * 1024), ("64KB", 64 * 1024)];

    for (label, size) in sizes {
        let mut data = vec![0u8; size];
        fill(&mut data).expect("System RNG unavailable for benchmark data");

        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("seal", label), &data, |b, d| {
            b.iter(|| VaultCipher::seal(d, &pin).unwrap());
        });

        let sealed = VaultCipher::seal(&data, &pin).expect("seal failed");

        group.bench_with_input(BenchmarkId::new("open", label), &sealed, |b, s| {
            b.iter(|| VaultCipher::open(s, &pin).unwrap());
        });
    }

    group.finish();
}

fn bench_pin_digest(c: &mut Criterion) {
    let pin = Pin::parse("1234").unwrap();
    let stored = PinVerifier::digest(&pin);

    c.bench_function("pin_verify", |b| b.iter(|| PinVerifier::verify(&pin, &stored)));
}

criterion_group!(benches, bench_seal_open, bench_pin_digest);
criterion_main!(benches);
