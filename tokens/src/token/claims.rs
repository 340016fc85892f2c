//! Claims payloads.
//!
//! A payload is any JSON object. The codec owns the registered `exp` claim: it
//! adds it on issue and strips it again on verify, so callers get back exactly
//! the object they handed in. `iat` belongs to the caller; when present it is
//! the base the expiry is measured from.

use serde::Serialize;
use serde_json::{Map, Value};

/// Caller-supplied claims: an arbitrary JSON object.
pub type Claims = Map<String, Value>;

/// Issued-at claim name (seconds since Unix epoch). Caller-owned.
pub const ISSUED_AT: &str = "iat";
/// Expiry claim name (seconds since Unix epoch).
pub const EXPIRES_AT: &str = "exp";
/// Not-before claim name. Caller-owned, but enforced on verify when present.
pub const NOT_BEFORE: &str = "nbf";

/// Claims the codec writes itself and refuses to accept from callers.
pub const RESERVED: [&str; 1] = [EXPIRES_AT];

/// Returns the first reserved claim present in `claims`, if any.
#[must_use]
pub fn find_reserved(claims: &Claims) -> Option<&'static str> {
    RESERVED.into_iter().find(|name| claims.contains_key(*name))
}

/// A successfully verified token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedToken {
    /// The caller's claims, without `exp`.
    pub claims: Claims,
    /// The token's `iat`, if it carries an integer one.
    pub issued_at: Option<u64>,
    /// When the token stops being valid (seconds since Unix epoch).
    pub expires_at: u64,
}
