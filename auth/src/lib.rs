//! Session token library
//!
//! Provides the signed-token core used for cookie sessions:
//! - Process-wide salt and per-token secret derivation (SHA-256)
//! - HMAC-SHA256 signing with constant-time verification
//! - Three-segment `header.payload.signature` codec (standard base64)
//! - Absolute expiration embedded in the header
//! - Argon2id hashing for account passwords
//!
//! Tokens are stateless: nothing is stored server-side beyond the salt held
//! by [`TokenService`].
//!
//! # Examples
//!
//! ## Issue and verify
//! ```
//! use auth::{Claims, Salt, TokenService};
//!
//! let service = TokenService::new(Salt::from_bytes(b"fixed salt".to_vec()));
//! let claims = Claims::for_email("a@b.com");
//!
//! let token = service.issue(&claims, 1200).unwrap();
//! let decoded = service.verify(&token).unwrap();
//! assert_eq!(decoded.email(), Some("a@b.com"));
//! ```
//!
//! ## Error kinds
//! ```
//! use auth::{TokenError, TokenService};
//!
//! let service = TokenService::generate().unwrap();
//! assert_eq!(service.verify("abc.def"), Err(TokenError::MalformedToken(2)));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::Clock;
pub use token::Header;
#[cfg(any(test, feature = "test-util"))]
pub use token::ManualClock;
pub use token::Salt;
pub use token::SystemClock;
pub use token::TokenError;
pub use token::TokenService;
pub use token::DEFAULT_TTL_SECONDS;
