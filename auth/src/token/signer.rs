use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

use super::errors::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Build the signed message from the two encoded leading segments.
pub fn signing_input(encoded_header: &str, encoded_payload: &str) -> String {
    format!("{}.{}", encoded_header, encoded_payload)
}

fn keyed_mac(secret: &str) -> Result<HmacSha256, TokenError> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| TokenError::SerializationError(e.to_string()))
}

/// Compute HMAC-SHA256 of `message` keyed with `secret`.
///
/// # Returns
/// Raw 32-byte digest
pub fn sign(message: &str, secret: &str) -> Result<Vec<u8>, TokenError> {
    let mut mac = keyed_mac(secret)?;
    mac.update(message.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Check `signature` against the MAC of `message` in constant time.
///
/// # Errors
/// * `InvalidSignature` - Digest mismatch (including wrong length)
pub fn verify(message: &str, secret: &str, signature: &[u8]) -> Result<(), TokenError> {
    let mut mac = keyed_mac(secret).map_err(|_| TokenError::InvalidSignature)?;
    mac.update(message.as_bytes());
    mac.verify_slice(signature)
        .map_err(|_| TokenError::InvalidSignature)
}
