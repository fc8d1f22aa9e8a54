use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use securehealth_core::{decrypt, encrypt, generate_key_pair, sign, verify};

fn bench_chunked(c: &mut Criterion) {
    let (private, public) = generate_key_pair().expect("generate key pair");

    let mut group = c.benchmark_group("chunked");
    for size in [190usize, 4 * 1024, 64 * 1024] {
        let data = vec![0xA5u8; size];
        let blob = encrypt(&data, &public).expect("encrypt");
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encrypt", size), &data, |b, data| {
            b.iter(|| encrypt(black_box(data), &public))
        });
        group.bench_with_input(BenchmarkId::new("decrypt", size), &blob, |b, blob| {
            b.iter(|| decrypt(black_box(blob), &private))
        });
    }
    group.finish();
}

fn bench_signatures(c: &mut Criterion) {
    let (private, public) = generate_key_pair().expect("generate key pair");
    let message = "Blood pressure 120/80, continue current dose";
    let signature = sign(message, &private).expect("sign");

    c.bench_function("sign", |b| b.iter(|| sign(black_box(message), &private)));
    c.bench_function("verify", |b| {
        b.iter(|| verify(black_box(message), &signature, &public))
    });
}

criterion_group!(benches, bench_chunked, bench_signatures);
criterion_main!(benches);
