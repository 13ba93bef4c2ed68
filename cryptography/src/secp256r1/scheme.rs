use super::{COORDINATE_LENGTH, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::{sha256::hash, utils::fixed_width, Error};
use p256::ecdsa::{
    signature::hazmat::{PrehashSigner, PrehashVerifier},
    SigningKey, VerifyingKey,
};
use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    ops::Deref,
};
use tack_utils::hex;
use tracing::{error, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// SEC 1 tag prefixed to an uncompressed point.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Secp256r1 Private Key.
///
/// Holds the raw scalar, a copy of the raw public key it was created with, and the signing
/// key rebuilt from the scalar. The raw public key is what [PrivateKey::sign] checks every
/// signature against.
///
/// The raw scalar is only cleared when the key is dropped, so it always matches the signing key.
#[derive(Clone)]
pub struct PrivateKey {
    raw: [u8; PRIVATE_KEY_LENGTH],
    public: [u8; PUBLIC_KEY_LENGTH],
    key: SigningKey,
}

/// Parses an exactly 32-byte scalar in `[1, n-1]`.
fn parse_scalar(value: &[u8]) -> Result<([u8; PRIVATE_KEY_LENGTH], SigningKey), Error> {
    let raw: [u8; PRIVATE_KEY_LENGTH] = value
        .try_into()
        .map_err(|_| Error::InvalidPrivateKeyLength)?;
    let key = SigningKey::from_slice(&raw).map_err(|_| Error::InvalidPrivateKey)?;
    Ok((raw, key))
}

impl PrivateKey {
    /// Rebuild a private key from its raw scalar and the raw public key stored alongside it.
    ///
    /// Both inputs must have their exact fixed width; nothing is truncated or padded. The
    /// scalar must lie in `[1, n-1]`. The public key is kept as given: if it does not belong
    /// to the scalar, every [PrivateKey::sign] fails with [Error::SelfCheckFailed].
    pub fn from_raw(raw_private_key: &[u8], raw_public_key: &[u8]) -> Result<Self, Error> {
        if raw_private_key.len() != PRIVATE_KEY_LENGTH {
            return Err(Error::InvalidPrivateKeyLength);
        }
        let public: [u8; PUBLIC_KEY_LENGTH] = raw_public_key
            .try_into()
            .map_err(|_| Error::InvalidPublicKeyLength)?;
        let (raw, key) = parse_scalar(raw_private_key)?;
        Ok(Self { raw, public, key })
    }

    /// Returns the raw 32-byte scalar.
    pub fn raw_key(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        &self.raw
    }

    /// Returns the raw public key this private key checks its signatures against.
    pub fn raw_public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.public
    }

    fn sign_inner(&self, msg: &[u8]) -> Result<Signature, Error> {
        let digest = hash(msg);
        let signature: p256::ecdsa::Signature = self
            .key
            .sign_prehash(digest.as_ref())
            .map_err(|err| Error::Signing(err.to_string()))?;
        let (r, s) = signature.split_bytes();
        let signature = Signature::from_components(&r, &s)
            .ok_or_else(|| Error::Signing("signature component exceeds field width".into()))?;

        // Check against a public key decoded from the stored raw bytes, not the signing key.
        let public_key = match PublicKey::try_from(&self.public[..]) {
            Ok(public_key) => public_key,
            Err(err) => {
                error!(?err, public_key = %hex(&self.public), "stored public key is invalid");
                return Err(Error::SelfCheckFailed);
            }
        };
        if !crate::Verifier::verify(&public_key, msg, &signature) {
            error!(%public_key, %signature, "signature failed self-check");
            return Err(Error::SelfCheckFailed);
        }
        trace!(%public_key, msg_len = msg.len(), "signed message");
        Ok(signature)
    }
}

impl crate::PrivateKey for PrivateKey {}

impl crate::Signer for PrivateKey {
    type Signature = Signature;
    type PublicKey = PublicKey;

    fn public_key(&self) -> Self::PublicKey {
        PublicKey::from(*self.key.verifying_key())
    }

    fn sign(&self, msg: &[u8]) -> Result<Self::Signature, Error> {
        self.sign_inner(msg)
    }
}

impl TryFrom<SigningKey> for PrivateKey {
    type Error = Error;
    fn try_from(key: SigningKey) -> Result<Self, Self::Error> {
        let raw = fixed_width(&key.to_bytes()).ok_or(Error::InvalidPrivateKey)?;
        let public = encode_point(key.verifying_key());
        Ok(Self { raw, public, key })
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let (raw, key) = parse_scalar(value)?;
        let public = encode_point(key.verifying_key());
        Ok(Self { raw, public, key })
    }
}

impl TryFrom<&Vec<u8>> for PrivateKey {
    type Error = Error;
    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.raw.zeroize();
    }
}

// The signing key clears its own scalar on drop.
impl ZeroizeOnDrop for PrivateKey {}

impl Eq for PrivateKey {}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.public == other.public
    }
}

impl AsRef<[u8]> for PrivateKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Encodes a verifying key as raw `X || Y`.
fn encode_point(key: &VerifyingKey) -> [u8; PUBLIC_KEY_LENGTH] {
    let point = key.to_encoded_point(false);
    let mut raw = [0u8; PUBLIC_KEY_LENGTH];
    // A verifying key is never the identity, so both coordinates are always present.
    debug_assert!(point.x().is_some() && point.y().is_some());
    if let (Some(x), Some(y)) = (point.x(), point.y()) {
        raw[..COORDINATE_LENGTH].copy_from_slice(x);
        raw[COORDINATE_LENGTH..].copy_from_slice(y);
    }
    raw
}

/// Secp256r1 Public Key.
#[derive(Clone)]
pub struct PublicKey {
    raw: [u8; PUBLIC_KEY_LENGTH],
    key: VerifyingKey,
}

impl PublicKey {
    /// Returns the raw 64-byte `X || Y`.
    pub fn raw_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.raw
    }
}

impl crate::PublicKey for PublicKey {}

impl crate::Verifier for PublicKey {
    type Signature = Signature;

    fn verify(&self, msg: &[u8], sig: &Self::Signature) -> bool {
        // Rejects `r` or `s` outside of `[1, n-1]`.
        let signature = match p256::ecdsa::Signature::from_slice(&sig.raw) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        let digest = hash(msg);
        self.key
            .verify_prehash(digest.as_ref(), &signature)
            .is_ok()
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        let raw = encode_point(&key);
        Self { raw, key }
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; PUBLIC_KEY_LENGTH] = value
            .try_into()
            .map_err(|_| Error::InvalidPublicKeyLength)?;

        // Point-based APIs expect the SEC 1 tag to be present.
        let mut encoded = [0u8; PUBLIC_KEY_LENGTH + 1];
        encoded[0] = UNCOMPRESSED_TAG;
        encoded[1..].copy_from_slice(&raw);
        let key = VerifyingKey::from_sec1_bytes(&encoded).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self { raw, key })
    }
}

impl TryFrom<&Vec<u8>> for PublicKey {
    type Error = Error;
    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl Eq for PublicKey {}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Deref for PublicKey {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

/// Secp256r1 Signature (`R || S`).
///
/// Only the width is checked on construction. Whether `r` and `s` are valid scalars is decided
/// by [crate::Verifier::verify], so a tampered signature can still be represented (and rejected).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Signature {
    raw: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    /// Assemble a signature from big-endian `r` and `s`, left-padding each to its field width.
    fn from_components(r: &[u8], s: &[u8]) -> Option<Self> {
        let r: [u8; COORDINATE_LENGTH] = fixed_width(r)?;
        let s: [u8; COORDINATE_LENGTH] = fixed_width(s)?;
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[..COORDINATE_LENGTH].copy_from_slice(&r);
        raw[COORDINATE_LENGTH..].copy_from_slice(&s);
        Some(Self { raw })
    }

    /// Returns the big-endian `r` component.
    pub fn r(&self) -> &[u8] {
        &self.raw[..COORDINATE_LENGTH]
    }

    /// Returns the big-endian `s` component.
    pub fn s(&self) -> &[u8] {
        &self.raw[COORDINATE_LENGTH..]
    }
}

impl crate::Signature for Signature {}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(raw: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { raw }
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; SIGNATURE_LENGTH] = value
            .try_into()
            .map_err(|_| Error::InvalidSignatureLength)?;
        Ok(Self { raw })
    }
}

impl TryFrom<&Vec<u8>> for Signature {
    type Error = Error;
    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Deref for Signature {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.raw
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}
