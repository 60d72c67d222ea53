use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::claims::Claims;
use super::clock::Clock;
use super::clock::SystemClock;
use super::codec;
use super::errors::TokenError;
use super::expiration;
use super::salt::derive_secret;
use super::salt::Salt;
use super::signer;

/// Default session lifetime in seconds (20 minutes).
pub const DEFAULT_TTL_SECONDS: i64 = 1200;

pub const ALGORITHM: &str = "HS256";
pub const TOKEN_TYPE: &str = "JWT";

/// Token header record: `{"alg":"HS256","typ":"JWT","exp":"YYYY-MM-DD HH:MM:SS"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub alg: String,
    pub typ: String,
    pub exp: String,
}

impl Header {
    pub fn new(exp: String) -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
            exp,
        }
    }
}

/// Issues and verifies signed session tokens.
///
/// Owns the process-wide salt. Build it once before serving requests and
/// share it (e.g. behind `Arc`); every operation only reads the salt and the
/// clock, so concurrent use needs no locking.
pub struct TokenService {
    salt: Salt,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service using the system clock.
    ///
    /// # Arguments
    /// * `salt` - Process-wide salt
    pub fn new(salt: Salt) -> Self {
        Self::with_clock(salt, Arc::new(SystemClock))
    }

    /// Create a token service with a freshly generated salt.
    ///
    /// # Errors
    /// * `SaltUnavailable` - The OS random source failed
    pub fn generate() -> Result<Self, TokenError> {
        Ok(Self::new(Salt::generate()?))
    }

    /// Create a token service reading time from `clock`.
    pub fn with_clock(salt: Salt, clock: Arc<dyn Clock>) -> Self {
        Self { salt, clock }
    }

    /// Issue a signed token for `claims`, valid for `ttl_seconds` from now.
    ///
    /// # Arguments
    /// * `claims` - Claim set to embed
    /// * `ttl_seconds` - Lifetime of the token
    ///
    /// # Returns
    /// Token string `H.P.S`
    ///
    /// # Errors
    /// * `InvalidTtl` - Expiration outside the representable range
    /// * `SerializationError` - Header or claims could not be serialized
    pub fn issue(&self, claims: &Claims, ttl_seconds: i64) -> Result<String, TokenError> {
        let exp = expiration::embed(self.clock.now(), ttl_seconds)?;

        let header = serde_json::to_vec(&Header::new(exp))
            .map_err(|e| TokenError::SerializationError(e.to_string()))?;
        let payload = serde_json::to_vec(claims)
            .map_err(|e| TokenError::SerializationError(e.to_string()))?;

        self.sign_segments(&header, &payload)
    }

    /// Verify a token and return its claims.
    ///
    /// The signature is checked before any header or payload content is
    /// trusted; expiration is checked afterwards. Both must pass.
    ///
    /// # Errors
    /// * `MalformedToken` / `InvalidEncoding` - Structural decoding failed
    /// * `InvalidSignature` - Signature does not match
    /// * `MalformedHeader` / `MalformedExpiration` - Header unusable
    /// * `ExpiredToken` - Current time is past `exp`
    /// * `MalformedPayload` - Payload is not a flat string map
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded = codec::decode(token)?;

        // Secret comes from the payload bytes as received, never re-serialized claims.
        let secret = derive_secret(&self.salt, &decoded.payload);
        let message = signer::signing_input(decoded.encoded_header, decoded.encoded_payload);
        signer::verify(&message, &secret, &decoded.signature)?;

        let header = parse_header(&decoded.header)?;
        if expiration::is_expired(&header.exp, self.clock.now())? {
            return Err(TokenError::ExpiredToken);
        }

        parse_claims(&decoded.payload)
    }

    /// Verify a token and re-issue it with the same claims and a full TTL.
    ///
    /// # Returns
    /// Verified claims and the refreshed token
    pub fn refresh(&self, token: &str, ttl_seconds: i64) -> Result<(Claims, String), TokenError> {
        let claims = self.verify(token)?;
        let refreshed = self.issue(&claims, ttl_seconds)?;
        Ok((claims, refreshed))
    }

    /// Decode header and claims without checking signature or expiration.
    ///
    /// # Security Warning
    /// Nothing returned here is authenticated. Test suites only.
    #[cfg(any(test, feature = "test-util"))]
    pub fn inspect_unverified(&self, token: &str) -> Result<(Header, Claims), TokenError> {
        let decoded = codec::decode(token)?;
        Ok((parse_header(&decoded.header)?, parse_claims(&decoded.payload)?))
    }

    fn sign_segments(&self, header: &[u8], payload: &[u8]) -> Result<String, TokenError> {
        let secret = derive_secret(&self.salt, payload);
        let message = signer::signing_input(
            &codec::encode_segment(header),
            &codec::encode_segment(payload),
        );
        let signature = signer::sign(&message, &secret)?;
        Ok(codec::encode(header, payload, &signature))
    }
}

fn parse_header(bytes: &[u8]) -> Result<Header, TokenError> {
    let header: Header =
        serde_json::from_slice(bytes).map_err(|e| TokenError::MalformedHeader(e.to_string()))?;

    if header.alg != ALGORITHM || header.typ != TOKEN_TYPE {
        return Err(TokenError::MalformedHeader(format!(
            "unsupported alg/typ {}/{}",
            header.alg, header.typ
        )));
    }

    Ok(header)
}

fn parse_claims(bytes: &[u8]) -> Result<Claims, TokenError> {
    serde_json::from_slice(bytes).map_err(|e| TokenError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::thread;

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::token::clock::ManualClock;

    fn test_service() -> (TokenService, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        ));
        let service =
            TokenService::with_clock(Salt::from_bytes(b"test-salt".to_vec()), clock.clone());
        (service, clock)
    }

    /// Sign arbitrary header/payload bytes with the service's salt.
    fn forge_signed(
        service: &TokenService,
        header: &[u8],
        payload: &[u8],
    ) -> String {
        service
            .sign_segments(header, payload)
            .expect("Failed to sign segments")
    }

    #[test]
    fn test_issue_and_verify() {
        let (service, _) = test_service();
        let claims = Claims::for_email("a@b.com").with_claim("name", "alice");

        let token = service.issue(&claims, 60).expect("Failed to issue token");
        let decoded = service.verify(&token).expect("Failed to verify token");

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_issue_wire_format() {
        let (service, _) = test_service();
        let token = service.issue(&Claims::for_email("a@b.com"), 1200).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let header = STANDARD.decode(parts[0]).unwrap();
        assert_eq!(
            String::from_utf8(header).unwrap(),
            r#"{"alg":"HS256","typ":"JWT","exp":"2024-03-09 12:20:00"}"#
        );
        let payload = STANDARD.decode(parts[1]).unwrap();
        assert_eq!(String::from_utf8(payload).unwrap(), r#"{"email":"a@b.com"}"#);
        assert_eq!(STANDARD.decode(parts[2]).unwrap().len(), 32);
    }

    #[test]
    fn test_expiration_example() {
        let (service, clock) = test_service();
        let claims = Claims::for_email("a@b.com");
        let token = service.issue(&claims, 5).unwrap();

        clock.advance(1);
        assert_eq!(service.verify(&token), Ok(claims));

        clock.advance(5);
        assert_eq!(service.verify(&token), Err(TokenError::ExpiredToken));

        assert_eq!(service.verify("abc.def"), Err(TokenError::MalformedToken(2)));
    }

    #[test]
    fn test_round_trip_empty_claims() {
        let (service, _) = test_service();
        let token = service.issue(&Claims::new(), 1).unwrap();
        assert_eq!(service.verify(&token), Ok(Claims::new()));
    }

    #[test]
    fn test_tampering_any_character_is_rejected() {
        let (service, _) = test_service();
        let token = service
            .issue(&Claims::for_email("a@b.com"), 60)
            .unwrap();
        let signed_len = token.rfind('.').unwrap();

        for position in (0..signed_len).filter(|&i| token.as_bytes()[i] != b'.') {
            let mut bytes = token.clone().into_bytes();
            bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert!(
                service.verify(&tampered).is_err(),
                "tampered token accepted at position {}",
                position
            );
        }
    }

    #[test]
    fn test_tampered_payload_fails_signature() {
        let (service, _) = test_service();
        let token = service.issue(&Claims::for_email("a@b.com"), 60).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_payload = STANDARD.encode(br#"{"email":"admin@b.com"}"#);
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(service.verify(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expired_forgery_fails_signature_gate() {
        let (service, clock) = test_service();
        let token = service.issue(&Claims::for_email("a@b.com"), 5).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], parts[1], STANDARD.encode([0u8; 32]));

        clock.advance(60);
        assert_eq!(service.verify(&forged), Err(TokenError::InvalidSignature));
        assert_eq!(service.verify(&token), Err(TokenError::ExpiredToken));
    }

    #[test]
    fn test_other_salt_rejects_token() {
        let (service, _) = test_service();
        let other = TokenService::new(Salt::from_bytes(b"other-salt".to_vec()));
        let token = service.issue(&Claims::for_email("a@b.com"), 60).unwrap();

        assert_eq!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_secret_uses_payload_bytes_as_received() {
        let (service, _) = test_service();
        let header = br#"{"alg":"HS256","typ":"JWT","exp":"2024-03-09 13:00:00"}"#;
        // Not what serde_json would produce for these claims.
        let payload = br#"{ "name" : "alice",  "email" : "a@b.com" }"#;

        let token = forge_signed(&service, header, payload);
        let claims = service.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.email(), Some("a@b.com"));
        assert_eq!(claims.get("name"), Some("alice"));
    }

    #[test]
    fn test_invalid_encoding() {
        let (service, _) = test_service();
        assert!(matches!(
            service.verify("e30=.%%%.e30="),
            Err(TokenError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_signed_but_malformed_segments() {
        let (service, _) = test_service();
        let good_header = br#"{"alg":"HS256","typ":"JWT","exp":"2024-03-09 13:00:00"}"#;

        let token = forge_signed(&service, b"not json", br#"{"email":"a@b.com"}"#);
        assert!(matches!(service.verify(&token), Err(TokenError::MalformedHeader(_))));

        let token = forge_signed(
            &service,
            br#"{"alg":"none","typ":"JWT","exp":"2024-03-09 13:00:00"}"#,
            br#"{"email":"a@b.com"}"#,
        );
        assert!(matches!(service.verify(&token), Err(TokenError::MalformedHeader(_))));

        let token = forge_signed(
            &service,
            br#"{"alg":"HS256","typ":"JWT","exp":"tomorrow"}"#,
            br#"{"email":"a@b.com"}"#,
        );
        assert!(matches!(
            service.verify(&token),
            Err(TokenError::MalformedExpiration(_))
        ));

        let token = forge_signed(&service, good_header, br#"["a@b.com"]"#);
        assert!(matches!(service.verify(&token), Err(TokenError::MalformedPayload(_))));
    }

    #[test]
    fn test_issue_out_of_range_ttl() {
        let (service, _) = test_service();
        assert_eq!(
            service.issue(&Claims::new(), i64::MAX),
            Err(TokenError::InvalidTtl(i64::MAX))
        );
    }

    #[test]
    fn test_refresh_extends_expiration() {
        let (service, clock) = test_service();
        let claims = Claims::for_email("a@b.com");
        let token = service.issue(&claims, DEFAULT_TTL_SECONDS).unwrap();

        clock.advance(600);
        let (verified, refreshed) = service.refresh(&token, DEFAULT_TTL_SECONDS).unwrap();

        let (old_header, _) = service.inspect_unverified(&token).unwrap();
        let (new_header, new_claims) = service.inspect_unverified(&refreshed).unwrap();
        assert_eq!(verified, claims);
        assert_eq!(new_claims, claims);
        assert!(
            expiration::parse(&new_header.exp).unwrap()
                > expiration::parse(&old_header.exp).unwrap()
        );
    }

    #[test]
    fn test_concurrent_use_matches_sequential() {
        let (service, _) = test_service();
        let service = Arc::new(service);

        let sequential: Vec<(String, Claims)> = (0..16)
            .map(|i| {
                let claims = Claims::for_email(format!("user{}@b.com", i));
                let token = service.issue(&claims, 60).unwrap();
                (token.clone(), service.verify(&token).unwrap())
            })
            .collect();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    let claims = Claims::for_email(format!("user{}@b.com", i));
                    let token = service.issue(&claims, 60).unwrap();
                    let verified = service.verify(&token).unwrap();
                    (token, verified)
                })
            })
            .collect();

        let concurrent: Vec<(String, Claims)> = handles
            .into_iter()
            .map(|handle| handle.join().expect("Worker panicked"))
            .collect();

        assert_eq!(concurrent, sequential);
    }
}
