use criterion::criterion_main;

mod key_generation;
mod signature_verification;

criterion_main!(
    key_generation::benches,
    signature_generation::benches,
    signature_verification::benches,
);
