use thiserror::Error;

/// Error type for session token operations.
///
/// Verification failures keep their kind so callers can log them, even when
/// the HTTP boundary collapses them into a single unauthenticated outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token must have exactly 3 segments, got {0}")]
    MalformedToken(usize),

    #[error("Token segment is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("Token header could not be parsed: {0}")]
    MalformedHeader(String),

    #[error("Token payload could not be parsed: {0}")]
    MalformedPayload(String),

    #[error("Token expiration is not a valid timestamp: {0}")]
    MalformedExpiration(String),

    #[error("Token is expired")]
    ExpiredToken,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("No session cookie set")]
    MissingCookie,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Failed to serialize token: {0}")]
    SerializationError(String),

    #[error("Token lifetime out of range: {0} seconds")]
    InvalidTtl(i64),

    #[error("Secure random source unavailable: {0}")]
    SaltUnavailable(String),
}
