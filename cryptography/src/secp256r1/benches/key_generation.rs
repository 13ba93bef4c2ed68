use criterion::{criterion_group, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;
use tack_cryptography::secp256r1::KeyPairFactory;

fn benchmark_key_generation(c: &mut Criterion) {
    let mut factory = KeyPairFactory::new(StdRng::seed_from_u64(0));
    c.bench_function(module_path!(), |b| {
        b.iter(|| black_box(factory.generate().unwrap()));
    });
}

criterion_group!(benches, benchmark_key_generation);
