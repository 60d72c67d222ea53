pub mod claims;
pub mod clock;
pub mod codec;
pub mod errors;
pub mod expiration;
pub mod salt;
pub mod service;
pub mod signer;

pub use claims::Claims;
pub use clock::Clock;
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use errors::TokenError;
pub use salt::Salt;
pub use service::Header;
pub use service::TokenService;
pub use service::DEFAULT_TTL_SECONDS;
