//! AES-256-GCM authenticated encryption.
//!
//! Symmetric layer of the envelope protocol:
//! - 256-bit keys, supplied directly or derived from a passphrase
//! - 12-byte random nonce per message, drawn from the OS CSPRNG
//! - 128-bit authentication tag appended by GCM
//!
//! The symmetric wire format is `nonce(12) || ciphertext || tag(16)`. The tag
//! check is the sole integrity check on this layer.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand_core::{CryptoRng, RngCore};
use zeroize::ZeroizeOnDrop;

use crate::CryptoError;
use crate::fingerprint::sha256;
use crate::random::fill_random;
use crate::traits::{Decrypter, Encrypter};

/// AES key size (32 bytes / 256 bits).
pub const KEY_SIZE: usize = 32;

/// GCM nonce size (12 bytes / 96 bits).
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size (16 bytes / 128 bits).
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM key (32 bytes).
///
/// Key material is zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct AesKey([u8; KEY_SIZE]);

impl AesKey {
    /// Create a key from raw bytes.
    #[must_use]
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a key from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidInput`] if the slice is not exactly
    /// 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; KEY_SIZE] = slice.try_into().map_err(|_| {
            CryptoError::InvalidInput(format!(
                "AES key must be {KEY_SIZE} bytes, got {}",
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Derive a key from a passphrase as the SHA-256 of its UTF-8 bytes.
    ///
    /// # Security
    ///
    /// This is a single unsalted hash, not a password-hardening KDF. It is
    /// preserved exactly for compatibility with existing ciphertexts; the
    /// wire format carries no version field that could signal a stronger
    /// derivation. Prefer [`AesKey::generate`] wherever the key does not
    /// have to be reconstructed from a human secret.
    #[must_use]
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self(sha256(passphrase.as_bytes()))
    }

    /// Generate a random key.
    #[must_use]
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get the raw key bytes.
    ///
    /// # Security
    ///
    /// Exposes the raw key material; handle with care.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Encrypt `plaintext`, returning `nonce || ciphertext || tag`.
    ///
    /// The nonce is always drawn from the OS CSPRNG, one fresh nonce per
    /// message.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomFailed`] if nonce generation fails, or
    /// [`CryptoError::EncryptionFailed`] if AEAD encryption fails.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut nonce = [0u8; NONCE_SIZE];
        fill_random(&mut nonce)?;

        let cipher = Aes256Gcm::new((&self.0).into());
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| CryptoError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Decrypt a `nonce || ciphertext || tag` message.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidInput`] if the message is shorter than a
    /// nonce and tag, or [`CryptoError::AuthenticationFailure`] if the tag
    /// does not verify (wrong key, tampering, truncation).
    pub fn decrypt(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if message.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::InvalidInput(format!(
                "AES message too short: {} bytes",
                message.len()
            )));
        }
        let (nonce, sealed) = message.split_at(NONCE_SIZE);

        let cipher = Aes256Gcm::new((&self.0).into());
        cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| CryptoError::AuthenticationFailure)
    }
}

impl Encrypter for AesKey {
    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        AesKey::encrypt(self, plaintext)
    }
}

impl Decrypter for AesKey {
    fn decrypt(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        AesKey::decrypt(self, message)
    }
}
