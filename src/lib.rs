//! # envelope-crypto
//!
//! Hybrid public-key/symmetric-key encryption and message signing built
//! around a reusable "envelope" wire format.
//!
//! This crate provides:
//! - Encryption envelopes: a fresh AES-256-GCM key per message, wrapped with
//!   the recipient's RSA public key and framed with the key's fingerprint
//! - Signing envelopes: an RSA signature framed with the signer's public-key
//!   fingerprint, with the message as a plaintext trailer
//! - RSA and AES-GCM primitive wrappers over DER-encoded keys
//! - SHA-256 key fingerprints in a dash-grouped display format
//! - Key-pair generation with an optionally seeded, test-only CSPRNG path
//!
//! ## Cryptographic Suite
//!
//! | Function | Algorithm |
//! |----------|-----------|
//! | Key Wrapping | RSA PKCS#1 v1.5 |
//! | Signatures | RSASSA-PKCS1-v1_5 / SHA-256 |
//! | Payload AEAD | AES-256-GCM, 96-bit nonce, 128-bit tag |
//! | Fingerprints | SHA-256 over public-key DER |
//!
//! ## Usage
//!
//! ```ignore
//! use envelope_crypto::{EnvelopeDecrypter, EnvelopeEncrypter, KeyPair, SecureRandom};
//!
//! let pair = KeyPair::generate(&mut SecureRandom::new(), 2048)?;
//!
//! let mut encrypter = EnvelopeEncrypter::new(pair.public_key())?;
//! let envelope = encrypter.encrypt(b"Hello World")?;
//!
//! let decrypter = EnvelopeDecrypter::new(pair.private_key())?;
//! assert_eq!(decrypter.decrypt(&envelope)?, b"Hello World");
//! ```
//!
//! All operations are synchronous, CPU-only and free of shared mutable
//! state; independent calls may run on independent threads. Seeded
//! [`SecureRandom`] instances are stateful and must not be shared.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aead;
pub mod envelope;
pub mod error;
pub mod fingerprint;
pub mod keypair;
pub mod random;
pub mod rsa;
pub mod traits;

pub use aead::AesKey;
pub use envelope::{
    EnvelopeDecrypter, EnvelopeEncrypter, EnvelopeSigner, EnvelopeVerifier, SignedMessage,
    peek_fingerprint,
};
pub use error::CryptoError;
pub use keypair::KeyPair;
pub use random::SecureRandom;
pub use traits::{Decrypter, Encrypter};

/// Raw fingerprint size: a SHA-256 digest (32 bytes).
pub const FINGERPRINT_SIZE: usize = fingerprint::FINGERPRINT_SIZE;

/// AES key size (32 bytes / 256 bits).
pub const AES_KEY_SIZE: usize = aead::KEY_SIZE;

/// GCM nonce size (12 bytes / 96 bits).
pub const NONCE_SIZE: usize = aead::NONCE_SIZE;

/// GCM authentication tag size (16 bytes / 128 bits).
pub const TAG_SIZE: usize = aead::TAG_SIZE;
