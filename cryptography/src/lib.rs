//! Generate P-256 key pairs, encode them at fixed width, and produce self-checked signatures.
//!
//! # Status
//!
//! `tack-cryptography` is **ALPHA** software and is not yet recommended for production use. Developers should
//! expect breaking changes and occasional instability.

use rand::{rngs::StdRng, CryptoRng, RngCore, SeedableRng};
use std::fmt::{Debug, Display};
use thiserror::Error;

pub mod sha256;
pub use sha256::{hash, Sha256};
pub mod secp256r1;
pub use secp256r1::KeyPairFactory;
pub mod utils;

/// Errors that can occur when interacting with cryptographic primitives.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid private key length")]
    InvalidPrivateKeyLength,
    #[error("invalid public key length")]
    InvalidPublicKeyLength,
    #[error("invalid signature length")]
    InvalidSignatureLength,
    #[error("invalid digest length")]
    InvalidDigestLength,
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("signature failed self-check")]
    SelfCheckFailed,
}

/// Produces [Signature]s over messages that can be verified with a corresponding [PublicKey].
pub trait Signer: Send + Sync + Clone + 'static {
    /// The type of [Signature] produced by this [Signer].
    type Signature: Signature;

    /// The corresponding [PublicKey] type.
    type PublicKey: PublicKey<Signature = Self::Signature>;

    /// Returns the [PublicKey] corresponding to this [Signer].
    fn public_key(&self) -> Self::PublicKey;

    /// Sign a message.
    ///
    /// The message should not be hashed prior to calling this function. If a particular scheme
    /// requires a payload to be hashed before it is signed, it will be done internally.
    ///
    /// A returned signature has already been verified against the signer's public key.
    fn sign(&self, msg: &[u8]) -> Result<Self::Signature, Error>;
}

/// A [Signer] that can be serialized to and deserialized from its raw form.
pub trait PrivateKey:
    Signer + Sized + Eq + Debug + AsRef<[u8]> + for<'a> TryFrom<&'a [u8], Error = Error>
{
}

/// A [PrivateKey] that can be generated from a seed or RNG.
pub trait PrivateKeyExt: PrivateKey {
    /// Create a [PrivateKey] from a seed.
    ///
    /// # Warning
    ///
    /// This function is insecure and should only be used for examples
    /// and testing.
    fn from_seed(seed: u64) -> Result<Self, Error> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_rng(&mut rng)
    }

    /// Create a fresh [PrivateKey] using the supplied RNG.
    fn from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, Error>;
}

/// Verifies [Signature]s over messages.
pub trait Verifier {
    /// The type of [Signature] that this verifier can verify.
    type Signature: Signature;

    /// Verify that a [Signature] is a valid over a given message.
    ///
    /// The message should not be hashed prior to calling this function. If a particular
    /// scheme requires a payload to be hashed before it is signed, it will be done internally.
    fn verify(&self, msg: &[u8], sig: &Self::Signature) -> bool;
}

/// A [PublicKey], able to verify [Signature]s.
pub trait PublicKey:
    Verifier
    + Sized
    + Clone
    + Eq
    + Debug
    + Display
    + AsRef<[u8]>
    + for<'a> TryFrom<&'a [u8], Error = Error>
{
}

/// A [Signature] over a message.
pub trait Signature:
    Sized + Clone + Eq + Debug + Display + AsRef<[u8]> + for<'a> TryFrom<&'a [u8], Error = Error>
{
}

/// A fixed-size cryptographic digest (which should be cheap to clone).
pub trait Digest:
    Copy + Eq + Ord + Debug + Display + AsRef<[u8]> + for<'a> TryFrom<&'a [u8], Error = Error>
{
}

/// Interface for the hash function signatures are computed over.
///
/// This trait is required to implement the `Clone` trait because it is often
/// part of a struct that is cloned. In practice, implementations do not actually
/// clone the hasher state but users should not rely on this behavior and call `reset`
/// after cloning.
pub trait Hasher: Clone + Send + Sync + 'static {
    /// Digest generated by the hasher.
    type Digest: Digest;

    /// Create a new hasher.
    fn new() -> Self;

    /// Append message to previously recorded data.
    fn update(&mut self, message: &[u8]);

    /// Hash all recorded data and reset the hasher
    /// to the initial state.
    fn finalize(&mut self) -> Self::Digest;

    /// Reset the hasher without generating a hash.
    ///
    /// This function does not need to be called after `finalize`.
    fn reset(&mut self);

    /// Return result of hashing nothing.
    fn empty() -> Self::Digest;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn test_validate<C: PrivateKeyExt>() {
        let private_key = C::from_rng(&mut OsRng).unwrap();
        let public_key = private_key.public_key();
        assert!(C::PublicKey::try_from(public_key.as_ref()).is_ok());
    }

    fn test_validate_invalid_public_key<C: Signer>() {
        let result = C::PublicKey::try_from(&vec![0u8; 1024][..]);
        assert!(result.is_err());
    }

    fn test_private_key_round_trip<C: PrivateKeyExt>() {
        let private_key = C::from_seed(0).unwrap();
        let restored = C::try_from(private_key.as_ref()).unwrap();
        assert_eq!(private_key, restored);
        assert_eq!(private_key.public_key(), restored.public_key());
    }

    fn test_sign_and_verify<C: PrivateKeyExt>() {
        let private_key = C::from_seed(0).unwrap();
        let message = b"test_message";
        let signature = private_key.sign(message).unwrap();
        let public_key = private_key.public_key();
        assert!(public_key.verify(message, &signature));
    }

    fn test_sign_and_verify_empty_message<C: PrivateKeyExt>() {
        let private_key = C::from_seed(0).unwrap();
        let signature = private_key.sign(&[]).unwrap();
        let public_key = private_key.public_key();
        assert!(public_key.verify(&[], &signature));
        assert!(!public_key.verify(&[0], &signature));
    }

    fn test_sign_and_verify_wrong_message<C: PrivateKeyExt>() {
        let private_key = C::from_seed(0).unwrap();
        let message = b"test_message";
        let wrong_message = b"wrong_message";
        let signature = private_key.sign(message).unwrap();
        let public_key = private_key.public_key();
        assert!(!public_key.verify(wrong_message, &signature));
    }

    fn test_signature_determinism<C: PrivateKeyExt>() {
        let private_key_1 = C::from_seed(0).unwrap();
        let private_key_2 = C::from_seed(0).unwrap();
        let message = b"test_message";
        let signature_1 = private_key_1.sign(message).unwrap();
        let signature_2 = private_key_2.sign(message).unwrap();
        assert_eq!(private_key_1.public_key(), private_key_2.public_key());
        assert_eq!(signature_1, signature_2);
    }

    fn test_invalid_signature_publickey_pair<C: PrivateKeyExt>() {
        let private_key = C::from_seed(0).unwrap();
        let private_key_2 = C::from_seed(1).unwrap();
        let message = b"test_message";
        let signature = private_key.sign(message).unwrap();
        let public_key = private_key_2.public_key();
        assert!(!public_key.verify(message, &signature));
    }

    #[test]
    fn test_secp256r1_validate() {
        test_validate::<secp256r1::PrivateKey>();
    }

    #[test]
    fn test_secp256r1_validate_invalid_public_key() {
        test_validate_invalid_public_key::<secp256r1::PrivateKey>();
    }

    #[test]
    fn test_secp256r1_private_key_round_trip() {
        test_private_key_round_trip::<secp256r1::PrivateKey>();
    }

    #[test]
    fn test_secp256r1_sign_and_verify() {
        test_sign_and_verify::<secp256r1::PrivateKey>();
    }

    #[test]
    fn test_secp256r1_sign_and_verify_empty_message() {
        test_sign_and_verify_empty_message::<secp256r1::PrivateKey>();
    }

    #[test]
    fn test_secp256r1_sign_and_verify_wrong_message() {
        test_sign_and_verify_wrong_message::<secp256r1::PrivateKey>();
    }

    #[test]
    fn test_secp256r1_signature_determinism() {
        test_signature_determinism::<secp256r1::PrivateKey>();
    }

    #[test]
    fn test_secp256r1_invalid_signature_publickey_pair() {
        test_invalid_signature_publickey_pair::<secp256r1::PrivateKey>();
    }

    #[test]
    fn test_secp256r1_len() {
        assert_eq!(secp256r1::PRIVATE_KEY_LENGTH, 32);
        assert_eq!(secp256r1::PUBLIC_KEY_LENGTH, 64);
        assert_eq!(secp256r1::SIGNATURE_LENGTH, 64);
    }

    fn test_hasher_multiple_runs<H: Hasher>() {
        // Generate initial hash
        let mut hasher = H::new();
        hasher.update(b"hello world");
        let digest = hasher.finalize();
        assert!(H::Digest::try_from(digest.as_ref()).is_ok());

        // Reuse hasher without reset
        hasher.update(b"hello world");
        let digest_again = hasher.finalize();
        assert_eq!(digest, digest_again);

        // Reuse hasher with reset
        hasher.update(b"hello mars");
        hasher.reset();
        hasher.update(b"hello world");
        let digest_reset = hasher.finalize();
        assert_eq!(digest, digest_reset);

        // Hash different data
        hasher.update(b"hello mars");
        let digest_mars = hasher.finalize();
        assert_ne!(digest, digest_mars);
    }

    fn test_hasher_multiple_updates<H: Hasher>() {
        // Generate initial hash
        let mut hasher = H::new();
        hasher.update(b"hello");
        hasher.update(b" world");
        let digest = hasher.finalize();

        // Generate hash in oneshot
        let mut hasher = H::new();
        hasher.update(b"hello world");
        let digest_oneshot = hasher.finalize();
        assert_eq!(digest, digest_oneshot);
    }

    fn test_hasher_large_input<H: Hasher>() {
        let mut hasher = H::new();
        let data = vec![1; 1024];
        hasher.update(&data);
        let digest = hasher.finalize();
        assert_ne!(digest, H::empty());
    }

    #[test]
    fn test_sha256_hasher_multiple_runs() {
        test_hasher_multiple_runs::<Sha256>();
    }

    #[test]
    fn test_sha256_hasher_multiple_updates() {
        test_hasher_multiple_updates::<Sha256>();
    }

    #[test]
    fn test_sha256_hasher_large_input() {
        test_hasher_large_input::<Sha256>();
    }
}
