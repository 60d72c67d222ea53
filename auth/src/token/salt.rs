use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

use super::errors::TokenError;

/// Exclusive upper bound on the generated salt length, in bytes.
pub const MAX_SALT_LEN: usize = 64;

/// Process-wide salt mixed into every per-token signing secret.
///
/// Generated once at startup and never mutated afterwards, so concurrent
/// readers need no synchronization.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(Vec<u8>);

impl Salt {
    /// Draw a fresh salt from the operating system CSPRNG.
    ///
    /// The length is chosen uniformly in `[0, MAX_SALT_LEN)`.
    ///
    /// # Errors
    /// * `SaltUnavailable` - The OS random source failed
    pub fn generate() -> Result<Self, TokenError> {
        let mut length = [0u8; 1];
        OsRng
            .try_fill_bytes(&mut length)
            .map_err(|e| TokenError::SaltUnavailable(e.to_string()))?;

        // 256 is a multiple of MAX_SALT_LEN, so the reduction stays uniform.
        let mut bytes = vec![0u8; length[0] as usize % MAX_SALT_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenError::SaltUnavailable(e.to_string()))?;

        Ok(Self(bytes))
    }

    /// Build a salt from known bytes (fixed salts for tests and tooling).
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salt").field("len", &self.0.len()).finish()
    }
}

/// Derive the per-token signing secret: `hex(sha256(salt ++ payload))`.
///
/// `payload` must be the exact bytes carried in the token, both when issuing
/// and when verifying.
pub fn derive_secret(salt: &Salt, payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(payload);
    hex::encode(hasher.finalize())
}
