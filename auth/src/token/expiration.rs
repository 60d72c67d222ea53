use chrono::DateTime;
use chrono::Duration;
use chrono::NaiveDateTime;
use chrono::Utc;

use super::errors::TokenError;

/// Layout of the `exp` header field. Always UTC, second precision.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format the absolute expiration `now + ttl_seconds`.
///
/// # Errors
/// * `InvalidTtl` - The expiration falls outside the representable range
pub fn embed(now: DateTime<Utc>, ttl_seconds: i64) -> Result<String, TokenError> {
    Duration::try_seconds(ttl_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .map(|expiration| expiration.format(EXPIRATION_FORMAT).to_string())
        .ok_or(TokenError::InvalidTtl(ttl_seconds))
}

/// Parse an `exp` value written by [`embed`].
pub fn parse(expiration: &str) -> Result<DateTime<Utc>, TokenError> {
    NaiveDateTime::parse_from_str(expiration, EXPIRATION_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| TokenError::MalformedExpiration(format!("{:?}: {}", expiration, e)))
}

/// Whether `now` is strictly after the instant in `expiration`.
///
/// # Errors
/// * `MalformedExpiration` - Timestamp does not match [`EXPIRATION_FORMAT`]
pub fn is_expired(expiration: &str, now: DateTime<Utc>) -> Result<bool, TokenError> {
    Ok(now > parse(expiration)?)
}
