#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sha2::{Digest as RefSha2Digest, Sha256 as RefSha256};
use tack_cryptography::{hash, sha256::Digest, Hasher, Sha256 as OurSha256};

#[derive(Debug, Arbitrary)]
pub struct FuzzInput {
    pub chunks: Vec<Vec<u8>>,
    pub data: Vec<u8>,
    pub case_selector: u8,
}

// Chunked hashing against the reference
fn fuzz_basic_hashing(chunks: &[Vec<u8>]) {
    let mut our_hasher = OurSha256::new();
    let mut ref_hasher = RefSha256::new();
    for chunk in chunks {
        our_hasher.update(chunk);
        ref_hasher.update(chunk);
    }
    let our_result = our_hasher.finalize();
    let ref_result = ref_hasher.finalize();
    assert_eq!(our_result.as_ref(), ref_result.as_slice());
}

// Reset discards recorded data
fn fuzz_reset_functionality(chunks: &[Vec<u8>]) {
    let mut our_hasher = OurSha256::new();
    for chunk in chunks {
        our_hasher.update(chunk);
    }
    our_hasher.reset();
    assert_eq!(our_hasher.finalize(), OurSha256::empty());
}

// Oneshot hashing against the reference
fn fuzz_diff_hash(data: &[u8]) {
    let digest = hash(data);
    assert_eq!(digest.as_ref(), RefSha256::digest(data).as_slice());
    assert_eq!(Digest::try_from(digest.as_ref()).unwrap(), digest);
    assert_eq!(format!("{digest:?}"), format!("{digest}"));
}

fn fuzz(input: FuzzInput) {
    match input.case_selector % 3 {
        0 => fuzz_basic_hashing(&input.chunks),
        1 => fuzz_reset_functionality(&input.chunks),
        2 => fuzz_diff_hash(&input.data),
        _ => unreachable!(),
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
