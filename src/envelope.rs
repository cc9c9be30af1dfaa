//! Hybrid encryption and signing envelopes.
//!
//! The two wire formats framed here are the protocol contract and must stay
//! bit-exact across implementations. All length prefixes are 4-byte signed
//! integers in little-endian order.
//!
//! Encryption envelope:
//!
//! ```text
//! +------------------+--------------+------------------------+-------------------------+
//! | fingerprint (32) | int32 length | RSA-wrapped key (len)  | nonce(12) ‖ ct ‖ tag(16)|
//! +------------------+--------------+------------------------+-------------------------+
//! ```
//!
//! Signing envelope:
//!
//! ```text
//! +------------------+--------------+------------------+------------------+
//! | fingerprint (32) | int32 length | signature (len)  | content (rest)   |
//! +------------------+--------------+------------------+------------------+
//! ```
//!
//! The leading fingerprint is carried, never enforced: neither decrypt nor
//! verify compares it against the key actually in use. Matching it against an
//! expected identity is deliberately left to the caller.

use zeroize::Zeroize;

use crate::CryptoError;
use crate::aead::AesKey;
use crate::fingerprint::{self, FINGERPRINT_SIZE};
use crate::random::SecureRandom;
use crate::rsa;
use crate::traits::{Decrypter, Encrypter};

/// Encrypts messages for a recipient identified by an RSA public key.
///
/// Each message gets a fresh random 32-byte AES key, wrapped under the
/// recipient's key with PKCS#1 v1.5; the payload itself is sealed with
/// AES-256-GCM.
pub struct EnvelopeEncrypter {
    public: rsa::PublicKey,
    fingerprint_raw: [u8; FINGERPRINT_SIZE],
    rng: SecureRandom,
}

impl EnvelopeEncrypter {
    /// Create an encrypter for the recipient's DER-encoded public key,
    /// drawing symmetric keys from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the key does not parse.
    pub fn new(recipient_public_der: &[u8]) -> Result<Self, CryptoError> {
        Self::with_rng(recipient_public_der, SecureRandom::new())
    }

    /// Create an encrypter whose symmetric keys come from a deterministic,
    /// test-only generator seeded with `seed`.
    ///
    /// Only the AES key derivation is deterministic; the GCM nonce and the
    /// RSA padding still use OS randomness, so ciphertexts are not
    /// byte-stable even under a fixed seed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the key does not parse.
    pub fn seeded_for_testing(recipient_public_der: &[u8], seed: &[u8]) -> Result<Self, CryptoError> {
        Self::with_rng(recipient_public_der, SecureRandom::seeded_for_testing(seed))
    }

    fn with_rng(recipient_public_der: &[u8], rng: SecureRandom) -> Result<Self, CryptoError> {
        Ok(Self {
            public: rsa::PublicKey::from_der(recipient_public_der)?,
            fingerprint_raw: fingerprint::sha256(recipient_public_der),
            rng,
        })
    }

    /// Encrypt `message` into an encryption envelope.
    ///
    /// # Errors
    ///
    /// Propagates RSA and AES failures from the underlying primitives.
    pub fn encrypt(&mut self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let aes_key = AesKey::generate(&mut self.rng);
        let wrapped_key = self.public.encrypt(aes_key.as_bytes())?;
        let sealed = aes_key.encrypt(message)?;

        let mut out =
            Vec::with_capacity(FINGERPRINT_SIZE + 4 + wrapped_key.len() + sealed.len());
        out.extend_from_slice(&self.fingerprint_raw);
        out.extend_from_slice(&(wrapped_key.len() as i32).to_le_bytes());
        out.extend_from_slice(&wrapped_key);
        out.extend_from_slice(&sealed);
        Ok(out)
    }
}

impl Encrypter for EnvelopeEncrypter {
    fn encrypt(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        EnvelopeEncrypter::encrypt(self, plaintext)
    }
}

/// Decrypts encryption envelopes with an RSA private key.
pub struct EnvelopeDecrypter {
    private: rsa::PrivateKey,
}

impl EnvelopeDecrypter {
    /// Create a decrypter from a PKCS#8 DER private key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the key does not parse.
    pub fn new(private_der: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            private: rsa::PrivateKey::from_der(private_der)?,
        })
    }

    /// Decrypt an encryption envelope back to its plaintext.
    ///
    /// The embedded fingerprint is skipped without being checked; use
    /// [`peek_fingerprint`] first if the caller needs to match it against an
    /// expected recipient identity.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidInput`] if the envelope is truncated or a
    ///   length prefix is negative.
    /// - [`CryptoError::DecryptionFailed`] if RSA unwrapping fails or does
    ///   not yield a 32-byte key (wrong private key).
    /// - [`CryptoError::AuthenticationFailure`] if the GCM tag check fails.
    pub fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut input = envelope;

        // Recipient key fingerprint, carried but not enforced here.
        take(&mut input, FINGERPRINT_SIZE)?;

        let wrapped_len = take_length(&mut input)?;
        let wrapped_key = take(&mut input, wrapped_len)?;

        let mut key_bytes = self.private.decrypt(wrapped_key)?;
        let aes_key = AesKey::from_slice(&key_bytes);
        key_bytes.zeroize();
        let aes_key = aes_key.map_err(|_| CryptoError::DecryptionFailed)?;

        aes_key.decrypt(input)
    }
}

impl Decrypter for EnvelopeDecrypter {
    fn decrypt(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        EnvelopeDecrypter::decrypt(self, message)
    }
}

/// Signs messages into signing envelopes, tagging them with the fingerprint
/// of the signing key's public counterpart.
pub struct EnvelopeSigner {
    private: rsa::PrivateKey,
    fingerprint_raw: [u8; FINGERPRINT_SIZE],
}

impl EnvelopeSigner {
    /// Create a signer from a PKCS#8 DER private key and the raw fingerprint
    /// of its **public** counterpart.
    ///
    /// The fingerprint is trusted as supplied: it is carried in every
    /// envelope this signer produces but never derived from or cross-checked
    /// against `private_der`. Supplying the fingerprint of an unrelated key
    /// produces envelopes that verify cryptographically while naming the
    /// wrong identity.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidInput`] if the fingerprint is not
    /// exactly 32 bytes, or [`CryptoError::InvalidKey`] if the key does not
    /// parse.
    pub fn new(
        private_der: &[u8],
        public_key_fingerprint: &[u8],
    ) -> Result<Self, CryptoError> {
        let fingerprint_raw: [u8; FINGERPRINT_SIZE] =
            public_key_fingerprint.try_into().map_err(|_| {
                CryptoError::InvalidInput(format!(
                    "signing key fingerprint must be {FINGERPRINT_SIZE} bytes, got {}",
                    public_key_fingerprint.len()
                ))
            })?;
        Ok(Self {
            private: rsa::PrivateKey::from_der(private_der)?,
            fingerprint_raw,
        })
    }

    /// Sign `message` into a signing envelope.
    ///
    /// The message itself rides along as a plaintext trailer after the
    /// signature; a signing envelope provides authenticity, not
    /// confidentiality.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let signature = self.private.sign(message);

        let mut out =
            Vec::with_capacity(FINGERPRINT_SIZE + 4 + signature.len() + message.len());
        out.extend_from_slice(&self.fingerprint_raw);
        out.extend_from_slice(&(signature.len() as i32).to_le_bytes());
        out.extend_from_slice(&signature);
        out.extend_from_slice(message);
        out
    }
}

/// A verified signing envelope: content, signature and the embedded
/// fingerprint of the signer's public key.
pub struct SignedMessage {
    content: Vec<u8>,
    signature: Vec<u8>,
    fingerprint: String,
}

impl SignedMessage {
    /// The signed message content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The RSA signature over the content.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The formatted fingerprint embedded in the envelope.
    ///
    /// Reported as carried; it has not been compared against the verifying
    /// key. Callers needing key-identity binding must match it against the
    /// expected key's fingerprint themselves.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Consume the message and return its content.
    #[must_use]
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

/// Verifies signing envelopes against an RSA public key.
pub struct EnvelopeVerifier {
    public: rsa::PublicKey,
}

impl EnvelopeVerifier {
    /// Create a verifier from a DER-encoded public key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the key does not parse.
    pub fn new(public_der: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            public: rsa::PublicKey::from_der(public_der)?,
        })
    }

    /// Verify a signing envelope, returning content, signature and the
    /// embedded fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidInput`] for a malformed frame, or
    /// [`CryptoError::SignatureMismatch`] if the signature does not verify
    /// over the content under this verifier's key.
    pub fn verify(&self, envelope: &[u8]) -> Result<SignedMessage, CryptoError> {
        let mut input = envelope;

        let fingerprint_raw = take(&mut input, FINGERPRINT_SIZE)?;
        let fingerprint = fingerprint::fingerprint(fingerprint_raw)?;

        let signature_len = take_length(&mut input)?;
        let signature = take(&mut input, signature_len)?;

        // Everything after the signature is content; it is never
        // length-prefixed.
        let content = input;

        self.public.verify(content, signature)?;

        Ok(SignedMessage {
            content: content.to_vec(),
            signature: signature.to_vec(),
            fingerprint,
        })
    }

    /// Verify a signing envelope and return only its content.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`EnvelopeVerifier::verify`].
    pub fn verify_content(&self, envelope: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.verify(envelope)?.into_content())
    }
}

/// Read the leading 32-byte fingerprint of any envelope without decrypting
/// or verifying it, so a message can be routed to the right key first.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if the envelope is shorter than a
/// fingerprint.
pub fn peek_fingerprint(envelope: &[u8]) -> Result<[u8; FINGERPRINT_SIZE], CryptoError> {
    let mut input = envelope;
    let raw = take(&mut input, FINGERPRINT_SIZE)?;
    let mut out = [0u8; FINGERPRINT_SIZE];
    out.copy_from_slice(raw);
    Ok(out)
}

fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], CryptoError> {
    if input.len() < n {
        return Err(CryptoError::InvalidInput(format!(
            "truncated envelope: needed {n} bytes, {} remain",
            input.len()
        )));
    }
    let (head, rest) = input.split_at(n);
    *input = rest;
    Ok(head)
}

fn take_length(input: &mut &[u8]) -> Result<usize, CryptoError> {
    let raw = take(input, 4)?;
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(raw);
    let len = i32::from_le_bytes(bytes);
    if len < 0 {
        return Err(CryptoError::InvalidInput(format!(
            "negative length prefix: {len}"
        )));
    }
    Ok(len as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aead::{NONCE_SIZE, TAG_SIZE};
    use crate::keypair::KeyPair;
    use crate::random::SecureRandom;

    fn test_pair() -> KeyPair {
        let mut rng = SecureRandom::seeded_for_testing(b"envelope module tests");
        KeyPair::generate(&mut rng, 1024).unwrap()
    }

    #[test]
    fn test_encryption_envelope_layout() {
        let pair = test_pair();
        let mut encrypter = EnvelopeEncrypter::new(pair.public_key()).unwrap();
        let message = b"Hello World";
        let envelope = encrypter.encrypt(message).unwrap();

        // Leading fingerprint is the SHA-256 of the recipient's public DER.
        assert_eq!(&envelope[..FINGERPRINT_SIZE], pair.fingerprint_raw());

        // 1024-bit RSA ciphertext is always 128 bytes.
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&envelope[FINGERPRINT_SIZE..FINGERPRINT_SIZE + 4]);
        let wrapped_len = i32::from_le_bytes(len_bytes);
        assert_eq!(wrapped_len, 128);

        let aes_section = FINGERPRINT_SIZE + 4 + wrapped_len as usize;
        assert_eq!(
            envelope.len(),
            aes_section + NONCE_SIZE + message.len() + TAG_SIZE
        );
    }

    #[test]
    fn test_signing_envelope_layout() {
        let pair = test_pair();
        let signer = EnvelopeSigner::new(pair.private_key(), pair.fingerprint_raw()).unwrap();
        let message = b"Hello World";
        let envelope = signer.sign(message);

        assert_eq!(&envelope[..FINGERPRINT_SIZE], pair.fingerprint_raw());

        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&envelope[FINGERPRINT_SIZE..FINGERPRINT_SIZE + 4]);
        let signature_len = i32::from_le_bytes(len_bytes) as usize;
        assert_eq!(signature_len, 128);

        // Content is a plaintext trailer occupying the remaining bytes.
        assert_eq!(&envelope[FINGERPRINT_SIZE + 4 + signature_len..], message);
    }

    #[test]
    fn test_signer_rejects_bad_fingerprint_length() {
        let pair = test_pair();
        assert!(matches!(
            EnvelopeSigner::new(pair.private_key(), &[0u8; 16]),
            Err(CryptoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fingerprint_is_carried_not_enforced() {
        // A signer handed the wrong fingerprint still produces envelopes
        // that verify; the mismatch is visible only to a caller that
        // compares fingerprints itself.
        let pair = test_pair();
        let bogus = [0xEE; FINGERPRINT_SIZE];
        let signer = EnvelopeSigner::new(pair.private_key(), &bogus).unwrap();
        let envelope = signer.sign(b"message");

        let verifier = EnvelopeVerifier::new(pair.public_key()).unwrap();
        let verified = verifier.verify(&envelope).unwrap();
        assert_eq!(
            verified.fingerprint(),
            fingerprint::fingerprint(&bogus).unwrap()
        );
        assert_ne!(verified.fingerprint(), pair.fingerprint());
    }

    #[test]
    fn test_decrypt_rejects_truncated_envelope() {
        let pair = test_pair();
        let decrypter = EnvelopeDecrypter::new(pair.private_key()).unwrap();

        assert!(matches!(
            decrypter.decrypt(&[0u8; 10]),
            Err(CryptoError::InvalidInput(_))
        ));

        // Fingerprint plus a length prefix promising more than remains.
        let mut envelope = vec![0u8; FINGERPRINT_SIZE];
        envelope.extend_from_slice(&1000i32.to_le_bytes());
        envelope.extend_from_slice(&[0u8; 8]);
        assert!(matches!(
            decrypter.decrypt(&envelope),
            Err(CryptoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decrypt_rejects_negative_length() {
        let pair = test_pair();
        let decrypter = EnvelopeDecrypter::new(pair.private_key()).unwrap();

        let mut envelope = vec![0u8; FINGERPRINT_SIZE];
        envelope.extend_from_slice(&(-5i32).to_le_bytes());
        envelope.extend_from_slice(&[0u8; 64]);
        assert!(matches!(
            decrypter.decrypt(&envelope),
            Err(CryptoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_peek_fingerprint() {
        let pair = test_pair();
        let mut encrypter = EnvelopeEncrypter::new(pair.public_key()).unwrap();
        let envelope = encrypter.encrypt(b"route me").unwrap();

        assert_eq!(&peek_fingerprint(&envelope).unwrap(), pair.fingerprint_raw());
        assert!(matches!(
            peek_fingerprint(&[0u8; FINGERPRINT_SIZE - 1]),
            Err(CryptoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_verify_rejects_truncated_envelope() {
        let pair = test_pair();
        let verifier = EnvelopeVerifier::new(pair.public_key()).unwrap();

        assert!(matches!(
            verifier.verify(&[0u8; FINGERPRINT_SIZE + 2]),
            Err(CryptoError::InvalidInput(_))
        ));
    }
}
