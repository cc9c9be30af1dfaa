//! RSA primitives over DER-encoded keys.
//!
//! Thin wrappers around the `rsa` crate:
//! - PKCS#1 v1.5 encryption padding for key wrapping
//! - RSASSA-PKCS1-v1_5 with SHA-256 for signatures
//! - PKCS#8 DER private keys, SubjectPublicKeyInfo DER public keys
//!
//! Keys cross the API boundary as DER byte sequences so material generated by
//! any DER-capable library interoperates.

use rand_core::OsRng;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::CryptoError;
use crate::traits::{Decrypter, Encrypter};

/// An RSA public key, parsed from SubjectPublicKeyInfo DER.
///
/// Supports encryption of short plaintexts (bounded by the modulus size minus
/// the 11-byte PKCS#1 v1.5 overhead) and signature verification.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: RsaPublicKey,
}

impl PublicKey {
    /// Parse a public key from DER bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the bytes are not a valid
    /// DER-encoded RSA public key.
    pub fn from_der(der: &[u8]) -> Result<Self, CryptoError> {
        let inner = RsaPublicKey::from_public_key_der(der).map_err(|_| CryptoError::InvalidKey)?;
        Ok(Self { inner })
    }

    /// Serialize the key as SubjectPublicKeyInfo DER.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if DER encoding fails.
    pub fn to_der(&self) -> Result<Vec<u8>, CryptoError> {
        let doc = self
            .inner
            .to_public_key_der()
            .map_err(|_| CryptoError::InvalidKey)?;
        Ok(doc.as_bytes().to_vec())
    }

    /// Encrypt `plaintext` with PKCS#1 v1.5 padding.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EncryptionFailed`] if the plaintext exceeds the
    /// capacity of the key modulus.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut rng = OsRng;
        self.inner
            .encrypt(&mut rng, Pkcs1v15Encrypt, plaintext)
            .map_err(|_| CryptoError::EncryptionFailed)
    }

    /// Verify an RSASSA-PKCS1-v1_5 / SHA-256 signature over `message`.
    ///
    /// Success is the absence of failure; there is no other result.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SignatureMismatch`] if the signature is
    /// malformed or does not authenticate the message.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let signature =
            Signature::try_from(signature).map_err(|_| CryptoError::SignatureMismatch)?;
        VerifyingKey::<Sha256>::new(self.inner.clone())
            .verify(message, &signature)
            .map_err(|_| CryptoError::SignatureMismatch)
    }
}

impl Encrypter for PublicKey {
    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        PublicKey::encrypt(self, plaintext)
    }
}

/// An RSA private key, parsed from PKCS#8 DER.
///
/// Supports decryption of PKCS#1 v1.5 ciphertexts and deterministic
/// RSASSA-PKCS1-v1_5 / SHA-256 signing.
#[derive(Clone)]
pub struct PrivateKey {
    inner: RsaPrivateKey,
}

impl PrivateKey {
    /// Parse a private key from PKCS#8 DER bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the bytes are not a valid
    /// DER-encoded RSA private key.
    pub fn from_der(der: &[u8]) -> Result<Self, CryptoError> {
        let inner = RsaPrivateKey::from_pkcs8_der(der).map_err(|_| CryptoError::InvalidKey)?;
        Ok(Self { inner })
    }

    /// Serialize the key as PKCS#8 DER.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if DER encoding fails.
    pub fn to_der(&self) -> Result<Vec<u8>, CryptoError> {
        let doc = self
            .inner
            .to_pkcs8_der()
            .map_err(|_| CryptoError::InvalidKey)?;
        Ok(doc.as_bytes().to_vec())
    }

    /// Decrypt a PKCS#1 v1.5 ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::DecryptionFailed`] if the ciphertext was not
    /// produced under the matching public key, or is corrupt.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.inner
            .decrypt(Pkcs1v15Encrypt, ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed)
    }

    /// Sign `message` with RSASSA-PKCS1-v1_5 / SHA-256.
    ///
    /// Signing is deterministic: the same key and message always produce the
    /// same signature.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        SigningKey::<Sha256>::new(self.inner.clone())
            .sign(message)
            .to_vec()
    }

    /// The public counterpart of this key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: RsaPublicKey::from(&self.inner),
        }
    }
}

impl Decrypter for PrivateKey {
    fn decrypt(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        PrivateKey::decrypt(self, message)
    }
}
