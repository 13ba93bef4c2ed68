use super::{PrivateKey, PublicKey, PRIVATE_KEY_LENGTH};
use crate::{Error, PrivateKeyExt};
use p256::ecdsa::SigningKey;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

/// Number of candidate scalars drawn before giving up on a random source.
///
/// A uniformly random 32-byte string falls outside `[1, n-1]` with probability below 2^-32,
/// so only a broken source exhausts this.
const MAX_SCALAR_DRAWS: usize = 64;

/// Draws a uniformly random scalar in `[1, n-1]` from `rng` by rejection sampling.
pub(crate) fn random_signing_key<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<SigningKey, Error> {
    let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
    for _ in 0..MAX_SCALAR_DRAWS {
        rng.try_fill_bytes(&mut candidate[..])
            .map_err(|err| Error::KeyGeneration(err.to_string()))?;
        if let Ok(key) = SigningKey::from_slice(&candidate[..]) {
            return Ok(key);
        }
    }
    Err(Error::KeyGeneration(format!(
        "no valid scalar after {MAX_SCALAR_DRAWS} draws"
    )))
}

/// Generates fresh secp256r1 key pairs from an injected random source.
///
/// Production code uses the operating system source ([KeyPairFactory::default]). Tests can
/// supply a seeded generator to make key generation reproducible.
pub struct KeyPairFactory<R: RngCore + CryptoRng = OsRng> {
    rng: R,
}

impl Default for KeyPairFactory<OsRng> {
    fn default() -> Self {
        Self::new(OsRng)
    }
}

impl<R: RngCore + CryptoRng> KeyPairFactory<R> {
    /// Create a factory drawing its entropy from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a new key pair.
    ///
    /// Both halves carry their own copy of the key material and can be dropped independently.
    /// A failing random source is reported as [Error::KeyGeneration] and is not retried.
    pub fn generate(&mut self) -> Result<(PublicKey, PrivateKey), Error> {
        let key = random_signing_key(&mut self.rng)?;
        let public_key = PublicKey::from(*key.verifying_key());
        let private_key = PrivateKey::try_from(key)?;
        debug!(public_key = %public_key, "generated key pair");
        Ok((public_key, private_key))
    }
}

impl PrivateKeyExt for PrivateKey {
    fn from_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, Error> {
        Self::try_from(random_signing_key(rng)?)
    }
}
