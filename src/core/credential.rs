//! PIN credential hashing
//!
//! PINs are never stored. An account keeps only the SHA-256 digest of its
//! PIN, computed once at creation, and verification re-hashes the claimed PIN
//! and compares digests in constant time.

use sha2::{Digest, Sha256};
use std::fmt;

const DIGEST_LEN: usize = 32;

/// One-way digest of an account PIN
///
/// No `PartialEq` and no revealing `Debug`; compare through
/// [`CredentialHash::matches`].
#[derive(Clone)]
pub struct CredentialHash([u8; DIGEST_LEN]);

impl CredentialHash {
    /// Hash a plaintext PIN
    pub fn from_pin(pin: &str) -> Self {
        let digest = Sha256::digest(pin.as_bytes());
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Check a claimed plaintext PIN against this digest
    ///
    /// Constant-time over the fixed 32-byte digests: every byte pair is folded,
    /// with no early exit.
    pub fn matches(&self, claimed_pin: &str) -> bool {
        let claimed = Self::from_pin(claimed_pin);
        self.0
            .iter()
            .zip(claimed.0.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}
