//! SHA-256 digests and the dash-grouped key fingerprint format.
//!
//! A fingerprint is the lowercase hex rendering of a 32-byte SHA-256 digest,
//! grouped into 4-hex-char blocks separated by `-`, for example
//! `e3b0-c442-98fc-...`. The format is part of the wire-adjacent output
//! contract: 32 bytes always render as exactly 79 characters.

use sha2::{Digest, Sha256};

use crate::CryptoError;

/// Raw fingerprint size: a SHA-256 digest (32 bytes).
pub const FINGERPRINT_SIZE: usize = 32;

/// Compute the SHA-256 digest of `data`.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; FINGERPRINT_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Format a raw 32-byte digest as a dash-grouped fingerprint string.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidInput`] if `digest` is not exactly 32 bytes.
pub fn fingerprint(digest: &[u8]) -> Result<String, CryptoError> {
    let digest: &[u8; FINGERPRINT_SIZE] = digest.try_into().map_err(|_| {
        CryptoError::InvalidInput(format!(
            "fingerprint digest must be {FINGERPRINT_SIZE} bytes, got {}",
            digest.len()
        ))
    })?;
    Ok(format_fingerprint(digest))
}

/// Compute the SHA-256 digest of `data` and render it as a fingerprint.
#[must_use]
pub fn sha256_fingerprint(data: &[u8]) -> String {
    format_fingerprint(&sha256(data))
}

fn format_fingerprint(digest: &[u8; FINGERPRINT_SIZE]) -> String {
    // 64 hex chars plus 15 separators.
    let mut out = String::with_capacity(FINGERPRINT_SIZE * 2 + FINGERPRINT_SIZE / 2 - 1);
    for (i, pair) in digest.chunks(2).enumerate() {
        if i > 0 {
            out.push('-');
        }
        out.push_str(&hex::encode(pair));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_length() {
        let digest = sha256(b"some public key material");
        let formatted = fingerprint(&digest).unwrap();
        assert_eq!(formatted.len(), 79);
    }

    #[test]
    fn test_fingerprint_known_vector() {
        // SHA-256 of the empty string.
        let formatted = sha256_fingerprint(b"");
        assert_eq!(
            formatted,
            "e3b0-c442-98fc-1c14-9afb-f4c8-996f-b924-27ae-41e4-649b-934c-a495-991b-7852-b855"
        );
    }

    #[test]
    fn test_fingerprint_grouping() {
        let formatted = fingerprint(&[0u8; 32]).unwrap();
        for (i, c) in formatted.chars().enumerate() {
            if i % 5 == 4 {
                assert_eq!(c, '-');
            } else {
                assert_eq!(c, '0');
            }
        }
        assert!(!formatted.ends_with('-'));
    }

    #[test]
    fn test_fingerprint_is_lowercase() {
        let formatted = fingerprint(&[0xAB; 32]).unwrap();
        assert_eq!(formatted.to_lowercase(), formatted);
    }

    #[test]
    fn test_fingerprint_rejects_wrong_length() {
        assert!(matches!(
            fingerprint(&[0u8; 31]),
            Err(CryptoError::InvalidInput(_))
        ));
        assert!(matches!(
            fingerprint(&[0u8; 33]),
            Err(CryptoError::InvalidInput(_))
        ));
        assert!(matches!(fingerprint(&[]), Err(CryptoError::InvalidInput(_))));
    }

    #[test]
    fn test_sha256_matches_fingerprint_of_digest() {
        let data = b"fingerprint input";
        assert_eq!(
            sha256_fingerprint(data),
            fingerprint(&sha256(data)).unwrap()
        );
    }
}
