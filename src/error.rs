//! Cryptographic error types.

use thiserror::Error;

/// Errors surfaced by envelope, primitive and key operations.
///
/// All failures are terminal for the operation that detected them; nothing is
/// retried internally and no failure is downgraded to a default value.
/// Callers should treat any of these as "reject the message".
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Malformed caller input: wrong fingerprint length, truncated envelope,
    /// a negative length prefix, or bad Base64/UTF-8 in a conversion helper.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// DER key material that does not parse as an RSA key.
    #[error("invalid key material")]
    InvalidKey,

    /// RSA encryption failed (plaintext exceeds modulus capacity).
    #[error("encryption failed")]
    EncryptionFailed,

    /// RSA decryption failed (wrong private key or corrupt ciphertext).
    #[error("decryption failed")]
    DecryptionFailed,

    /// AES-GCM authentication tag check failed. Wrong key, tampered data and
    /// truncated ciphertext all surface here; GCM cannot tell them apart.
    #[error("authentication failure: ciphertext rejected")]
    AuthenticationFailure,

    /// RSA signature verification failed.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// RSA key-pair generation or DER encoding failed.
    #[error("key generation failed")]
    KeyGenerationFailed,

    /// The OS random number generator failed.
    #[error("random number generation failed")]
    RandomFailed,
}
