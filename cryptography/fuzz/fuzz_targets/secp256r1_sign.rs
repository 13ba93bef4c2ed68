#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use p256::ecdsa::{signature::hazmat::PrehashVerifier, VerifyingKey};
use sha2::{Digest as _, Sha256};
use tack_cryptography::{
    secp256r1::{PrivateKey, Signature, SIGNATURE_LENGTH},
    Error, PrivateKeyExt, Signer, Verifier,
};

#[derive(Debug, Arbitrary)]
pub struct FuzzInput {
    pub seed: u64,
    pub other_seed: u64,
    pub message: Vec<u8>,
    pub flip: u16,
}

fn fuzz(input: FuzzInput) {
    let private_key = PrivateKey::from_seed(input.seed).unwrap();
    let public_key = private_key.public_key();
    let signature = private_key.sign(&input.message).unwrap();

    // Differential check against the reference verifier
    let mut encoded = vec![0x04];
    encoded.extend_from_slice(public_key.raw_key());
    let reference = VerifyingKey::from_sec1_bytes(&encoded).unwrap();
    let reference_signature = p256::ecdsa::Signature::from_slice(&signature).unwrap();
    let digest = Sha256::digest(&input.message);
    assert!(reference
        .verify_prehash(&digest, &reference_signature)
        .is_ok());

    // Deterministic
    assert_eq!(private_key.sign(&input.message).unwrap(), signature);

    // Any single bit flip invalidates the signature
    let bit = input.flip as usize % (SIGNATURE_LENGTH * 8);
    let mut tampered = [0u8; SIGNATURE_LENGTH];
    tampered.copy_from_slice(&signature);
    tampered[bit / 8] ^= 1 << (bit % 8);
    assert!(!public_key.verify(&input.message, &Signature::from(tampered)));

    // A mismatched public key never yields a signature
    let other = PrivateKey::from_seed(input.other_seed).unwrap();
    if other.public_key() != public_key {
        let mismatched =
            PrivateKey::from_raw(private_key.raw_key(), other.public_key().raw_key()).unwrap();
        assert_eq!(mismatched.sign(&input.message), Err(Error::SelfCheckFailed));
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
