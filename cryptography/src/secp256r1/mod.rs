//! Secp256r1 (NIST P-256) key pairs and self-checked ECDSA signatures.
//!
//! Keys and signatures are exchanged in a raw, fixed-width form:
//! - private keys are the 32-byte big-endian scalar,
//! - public keys are the 64-byte big-endian `X || Y` of the uncompressed point (the SEC 1 `0x04`
//!   tag is not part of the encoding),
//! - signatures are the 64-byte `R || S`, each half a 32-byte big-endian field.
//!
//! Messages are hashed with SHA-256 before signing. Nonces are derived deterministically as
//! specified in [RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979). Every signature is
//! verified against the signer's stored public key before it is returned, so a caller never
//! receives a signature that does not verify.
//!
//! # Example
//! ```rust
//! use tack_cryptography::{secp256r1::KeyPairFactory, Signer, Verifier};
//! use rand::rngs::OsRng;
//!
//! // Generate a new key pair
//! let (public_key, private_key) = KeyPairFactory::new(OsRng).generate().unwrap();
//!
//! // Sign the message
//! let signature = private_key.sign(b"hello").unwrap();
//! assert_eq!(signature.as_ref().len(), 64);
//!
//! // Verify the signature
//! assert!(public_key.verify(b"hello", &signature));
//! assert!(!public_key.verify(b"hellx", &signature));
//! ```

mod factory;
mod scheme;

pub use factory::KeyPairFactory;
pub use scheme::{PrivateKey, PublicKey, Signature};

/// Length of a raw private key (the big-endian scalar).
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of a single affine coordinate.
pub const COORDINATE_LENGTH: usize = 32;

/// Length of a raw public key (`X || Y`).
pub const PUBLIC_KEY_LENGTH: usize = 2 * COORDINATE_LENGTH;

/// Length of a raw signature (`R || S`).
pub const SIGNATURE_LENGTH: usize = 64;
