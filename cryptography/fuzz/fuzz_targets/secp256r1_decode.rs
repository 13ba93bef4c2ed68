#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tack_cryptography::{
    secp256r1::{PrivateKey, PublicKey, Signature, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH},
    Error, Signer, Verifier,
};

#[derive(Debug, Arbitrary)]
pub struct FuzzInput {
    pub private_key: Vec<u8>,
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
    pub message: Vec<u8>,
}

fn fuzz(input: FuzzInput) {
    // Decoding only accepts exact widths.
    let public_key = match PublicKey::try_from(input.public_key.as_slice()) {
        Ok(public_key) => {
            assert_eq!(public_key.raw_key().as_slice(), input.public_key.as_slice());
            Some(public_key)
        }
        Err(Error::InvalidPublicKeyLength) => {
            assert_ne!(input.public_key.len(), PUBLIC_KEY_LENGTH);
            None
        }
        Err(err) => {
            assert_eq!(err, Error::InvalidPublicKey);
            None
        }
    };
    let signature = match Signature::try_from(input.signature.as_slice()) {
        Ok(signature) => Some(signature),
        Err(_) => {
            assert_ne!(input.signature.len(), SIGNATURE_LENGTH);
            None
        }
    };

    // Verifying arbitrary input never panics.
    if let (Some(public_key), Some(signature)) = (&public_key, &signature) {
        let _ = public_key.verify(&input.message, signature);
    }

    // A decoded private key always produces signatures that verify.
    if let Ok(private_key) = PrivateKey::try_from(input.private_key.as_slice()) {
        let signature = private_key.sign(&input.message).unwrap();
        assert!(private_key.public_key().verify(&input.message, &signature));
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
