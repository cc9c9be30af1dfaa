//! Capability traits and text/Base64 conversion helpers.
//!
//! Every encryption-capable type exposes the same two-method surface:
//! [`Encrypter::encrypt`] and [`Decrypter::decrypt`] over raw bytes. The
//! string and Base64 conveniences are implemented once here as free functions
//! over those traits instead of being duplicated per algorithm.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::CryptoError;

/// A capability to encrypt a byte message.
///
/// Takes `&mut self` because encryption consumes randomness (a fresh nonce,
/// and for envelopes a fresh symmetric key) from a generator owned by the
/// implementor.
pub trait Encrypter {
    /// Encrypt `plaintext`, returning the raw encrypted message.
    ///
    /// # Errors
    ///
    /// Returns a [`CryptoError`] if the underlying primitive fails.
    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// A capability to decrypt a byte message produced by the matching
/// [`Encrypter`].
pub trait Decrypter {
    /// Decrypt `message`, returning the recovered plaintext.
    ///
    /// # Errors
    ///
    /// Returns a [`CryptoError`] if the message is malformed or fails
    /// authentication.
    fn decrypt(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Encrypt a UTF-8 text message.
///
/// # Errors
///
/// Propagates the encrypter's errors.
pub fn encrypt_text<E: Encrypter>(encrypter: &mut E, message: &str) -> Result<Vec<u8>, CryptoError> {
    encrypter.encrypt(message.as_bytes())
}

/// Encrypt a byte message and render the result as standard Base64.
///
/// # Errors
///
/// Propagates the encrypter's errors.
pub fn encrypt_to_base64<E: Encrypter>(
    encrypter: &mut E,
    message: &[u8],
) -> Result<String, CryptoError> {
    Ok(BASE64_STANDARD.encode(encrypter.encrypt(message)?))
}

/// Decrypt a Base64-encoded encrypted message.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if `message` is not valid Base64,
/// otherwise propagates the decrypter's errors.
pub fn decrypt_base64<D: Decrypter>(decrypter: &D, message: &str) -> Result<Vec<u8>, CryptoError> {
    let raw = BASE64_STANDARD
        .decode(message)
        .map_err(|_| CryptoError::InvalidInput("malformed base64 message".into()))?;
    decrypter.decrypt(&raw)
}

/// Decrypt a message whose plaintext is expected to be UTF-8 text.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if the decrypted bytes are not valid
/// UTF-8, otherwise propagates the decrypter's errors.
pub fn decrypt_to_text<D: Decrypter>(decrypter: &D, message: &[u8]) -> Result<String, CryptoError> {
    String::from_utf8(decrypter.decrypt(message)?)
        .map_err(|_| CryptoError::InvalidInput("decrypted message is not valid UTF-8".into()))
}
