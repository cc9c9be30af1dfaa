//! RSA key-pair generation.

use rand_core::{CryptoRng, RngCore};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::CryptoError;
use crate::fingerprint::{FINGERPRINT_SIZE, sha256, sha256_fingerprint};

/// A freshly generated RSA key pair with the public key's fingerprint.
///
/// Immutable once generated; the accessors borrow, nothing mutates.
pub struct KeyPair {
    public_key: Vec<u8>,
    private_key: Vec<u8>,
    fingerprint: String,
    fingerprint_raw: [u8; FINGERPRINT_SIZE],
}

impl KeyPair {
    /// Generate an RSA key pair at the requested modulus size.
    ///
    /// The private key is encoded as PKCS#8 DER, the public key as
    /// SubjectPublicKeyInfo DER, and the fingerprint is the SHA-256 of the
    /// public DER bytes.
    ///
    /// No validation is performed on `bits`; choosing a secure size
    /// (2048 or larger for production) is the caller's responsibility.
    /// Passing a [`SecureRandom::seeded_for_testing`] generator yields
    /// deterministic pairs for tests.
    ///
    /// [`SecureRandom::seeded_for_testing`]: crate::random::SecureRandom::seeded_for_testing
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyGenerationFailed`] if RSA generation or DER
    /// encoding fails.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R, bits: usize) -> Result<Self, CryptoError> {
        let private = RsaPrivateKey::new(rng, bits).map_err(|_| CryptoError::KeyGenerationFailed)?;
        let public = RsaPublicKey::from(&private);

        let private_key = private
            .to_pkcs8_der()
            .map_err(|_| CryptoError::KeyGenerationFailed)?
            .as_bytes()
            .to_vec();
        let public_key = public
            .to_public_key_der()
            .map_err(|_| CryptoError::KeyGenerationFailed)?
            .as_bytes()
            .to_vec();

        let fingerprint_raw = sha256(&public_key);
        let fingerprint = sha256_fingerprint(&public_key);

        Ok(Self {
            public_key,
            private_key,
            fingerprint,
            fingerprint_raw,
        })
    }

    /// The public key as SubjectPublicKeyInfo DER.
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// The private key as PKCS#8 DER.
    #[must_use]
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    /// The formatted fingerprint of the public key.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The raw 32-byte fingerprint of the public key.
    #[must_use]
    pub fn fingerprint_raw(&self) -> &[u8; FINGERPRINT_SIZE] {
        &self.fingerprint_raw
    }
}
