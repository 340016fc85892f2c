//! Bearer token issuance and verification.
//!
//! # Pre-conditions
//! - A secret and expiry policy are supplied when the codec is built.
//!
//! # Post-conditions
//! - A token issued by a codec verifies with any codec holding the same
//!   secret, until its expiry passes.
//!
//! # Invariants
//! - Callers see exactly two failure kinds, `TokenIssuanceError` and
//!   `TokenVerificationError`, neither of which reveals its cause.

pub mod claims;
pub mod codec;
pub mod error;
pub mod expiry;
pub mod secret;

pub use claims::{Claims, VerifiedToken};
pub use codec::TokenCodec;
pub use error::{TokenIssuanceError, TokenVerificationError};
pub use expiry::{ExpiresIn, ExpiryParseError};
pub use secret::{DEFAULT_SECRET_BYTES, SecretError, generate_secret};
