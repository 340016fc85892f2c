// Signed, time-bounded bearer tokens for the backend.
//
// Flow of a token:
// 1. Configuration (secret + expiry policy) is loaded once at startup
// 2. Issue: claims + exp are signed with HS256 (exp counts from the caller's iat, or now)
// 3. Verify: signature, HMAC algorithm, exp and nbf are checked, claims come back
//
// Every failure is logged with its cause and surfaced as one of two opaque
// errors.

pub mod config;
pub mod time;
pub mod token;


pub use config::{ConfigError, TokenConfig};
pub use token::{
    Claims, TokenCodec, TokenIssuanceError, TokenVerificationError, VerifiedToken,
};
