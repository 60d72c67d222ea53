use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::errors::TokenError;

/// Separator between token segments.
pub const SEPARATOR: char = '.';

/// A token split into its three segments.
///
/// Keeps the encoded header and payload as received (they form the signed
/// message) alongside the decoded bytes of every segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken<'a> {
    pub encoded_header: &'a str,
    pub encoded_payload: &'a str,
    pub header: Vec<u8>,
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Encode the three byte sequences into `H.P.S`.
pub fn encode(header: &[u8], payload: &[u8], signature: &[u8]) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        encode_segment(header),
        encode_segment(payload),
        encode_segment(signature),
        sep = SEPARATOR
    )
}

pub fn encode_segment(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Split and base64-decode a token. No semantic validation.
///
/// # Errors
/// * `MalformedToken` - Not exactly three segments
/// * `InvalidEncoding` - A segment is not valid standard base64
pub fn decode(token: &str) -> Result<DecodedToken<'_>, TokenError> {
    let parts: Vec<&str> = token.split(SEPARATOR).collect();
    let &[header, payload, signature] = parts.as_slice() else {
        return Err(TokenError::MalformedToken(parts.len()));
    };

    Ok(DecodedToken {
        encoded_header: header,
        encoded_payload: payload,
        header: decode_segment(header)?,
        payload: decode_segment(payload)?,
        signature: decode_segment(signature)?,
    })
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    STANDARD
        .decode(segment)
        .map_err(|e| TokenError::InvalidEncoding(e.to_string()))
}
