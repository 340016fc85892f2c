//! Token errors.
//!
//! Callers only ever see [`TokenIssuanceError`] or [`TokenVerificationError`].
//! Neither carries a cause: an expired token, a forged one and a malformed one
//! all look the same from outside. The detailed causes below exist only to be
//! written to the diagnostic log before being dropped.

use super::expiry::ExpiryParseError;

/// Signing a token failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TokenIssuanceError;

impl std::fmt::Display for TokenIssuanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to issue the token")
    }
}

impl std::error::Error for TokenIssuanceError {}

/// Verifying a token failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TokenVerificationError;

impl std::fmt::Display for TokenVerificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to verify the token")
    }
}

impl std::error::Error for TokenVerificationError {}

/// Why issuing failed. Logged, never returned.
#[derive(Debug)]
pub(crate) enum IssueFailure {
    /// The configured secret is empty.
    EmptySecret,
    /// The configured expiry policy does not parse.
    InvalidExpiry(ExpiryParseError),
    /// The payload already carries a claim the codec writes itself.
    ReservedClaim(&'static str),
    /// The payload's `iat` is not a non-negative integer.
    InvalidIssuedAt,
    /// `iat + expiry` does not fit in an unsigned timestamp.
    ExpiryOutOfRange,
    /// The signing library rejected the payload.
    Signing(jsonwebtoken::errors::Error),
}

impl std::fmt::Display for IssueFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "signing secret must be non-empty"),
            Self::InvalidExpiry(e) => write!(f, "invalid expiry policy: {e}"),
            Self::ReservedClaim(name) => {
                write!(f, "payload already has a '{name}' claim")
            }
            Self::InvalidIssuedAt => write!(f, "'iat' must be a whole number of seconds"),
            Self::ExpiryOutOfRange => write!(f, "expiry timestamp out of range"),
            Self::Signing(e) => write!(f, "signing failed: {e}"),
        }
    }
}

/// Why verifying failed. Logged, never returned.
#[derive(Debug, PartialEq)]
pub(crate) enum VerifyFailure {
    /// The configured secret is empty.
    EmptySecret,
    /// The signature does not match the secret.
    InvalidSignature,
    /// The token cannot be parsed, or is not HMAC-signed.
    MalformedToken(String),
    /// The `exp` claim is missing or not an unsigned integer.
    MissingExpiry,
    /// The `exp` claim has passed.
    Expired { expired_at: u64 },
    /// The `nbf` claim is in the future.
    NotYetValid { not_before: f64 },
    /// The `nbf` claim is present but not a number.
    InvalidNotBefore,
}

impl std::fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySecret => write!(f, "verification secret must be non-empty"),
            Self::InvalidSignature => write!(f, "invalid token signature"),
            Self::MalformedToken(reason) => write!(f, "malformed token: {reason}"),
            Self::MissingExpiry => write!(f, "missing or invalid 'exp' claim"),
            Self::Expired { expired_at } => write!(f, "token expired at {expired_at}"),
            Self::NotYetValid { not_before } => {
                write!(f, "token not valid before {not_before}")
            }
            Self::InvalidNotBefore => write!(f, "invalid 'nbf' claim"),
        }
    }
}

/// Maps jsonwebtoken errors to a verification cause.
pub(crate) fn map_jwt_error(error: &jsonwebtoken::errors::Error) -> VerifyFailure {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => VerifyFailure::InvalidSignature,
        ErrorKind::MissingRequiredClaim(_) => VerifyFailure::MissingExpiry,
        // InvalidToken, InvalidAlgorithm, Base64, Json, Utf8 and friends.
        _ => VerifyFailure::MalformedToken(error.to_string()),
    }
}
