//! Token codec: issue HS256 bearer tokens and verify HMAC-signed ones.
//!
//! # Pre-conditions
//! - The secret and expiry policy are fixed at construction. Neither is
//!   validated there; an empty secret or an unparseable expiry surfaces as an
//!   issuance (or verification) failure.
//!
//! # Post-conditions
//! - `issue` returns a compact JWS whose payload is the caller's claims plus
//!   `exp`. A caller `iat` is kept and used as the base for `exp`; otherwise
//!   the current time is.
//! - `verify` returns the caller's claims, minus `exp`, only if the signature
//!   matches, the algorithm is HS256/HS384/HS512, `exp` has not passed and any
//!   `nbf` has been reached.
//!
//! # Invariants
//! - Every failure is logged once with its cause and returned as an opaque
//!   error. Success is never logged.
//! - The codec holds no mutable state; `&TokenCodec` can be shared between
//!   threads whenever its time source can.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;

use super::claims::{self, Claims, EXPIRES_AT, ISSUED_AT, NOT_BEFORE, VerifiedToken};
use super::error::{
    IssueFailure, TokenIssuanceError, TokenVerificationError, VerifyFailure, map_jwt_error,
};
use super::expiry::ExpiresIn;
use crate::config::TokenConfig;
use crate::time::{SystemTimeSource, TimeSource};

/// Issues and verifies tokens with a single shared secret.
pub struct TokenCodec<T = SystemTimeSource> {
    secret_is_empty: bool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: String,
    time: T,
}

impl<T> std::fmt::Debug for TokenCodec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[hidden]")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl TokenCodec<SystemTimeSource> {
    /// Create a codec that reads the system clock.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>, expires_in: impl Into<String>) -> Self {
        Self::with_time_source(secret, expires_in, SystemTimeSource)
    }

    /// Create a codec from loaded configuration.
    #[must_use]
    pub fn from_config(config: &TokenConfig) -> Self {
        Self::new(config.secret(), config.expires_in())
    }
}

impl<T: TimeSource> TokenCodec<T> {
    /// Create a codec with an explicit time source.
    #[must_use]
    pub fn with_time_source(
        secret: impl AsRef<[u8]>,
        expires_in: impl Into<String>,
        time: T,
    ) -> Self {
        let secret = secret.as_ref();
        Self {
            secret_is_empty: secret.is_empty(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: hmac_validation(),
            expires_in: expires_in.into(),
            time,
        }
    }

    /// The configured expiry policy, as given.
    #[must_use]
    pub fn expires_in(&self) -> &str {
        &self.expires_in
    }

    /// Sign `claims` into a token that expires after the configured policy.
    ///
    /// # Errors
    /// Returns `TokenIssuanceError` if the secret is empty, the expiry policy
    /// does not parse, `claims` contains `exp` or a non-integer `iat`, or
    /// signing fails.
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenIssuanceError> {
        self.try_issue(claims).map_err(|cause| {
            tracing::error!(error = %cause, "Failed to issue the token");
            TokenIssuanceError
        })
    }

    /// Verify `token` and return the claims it was issued with.
    ///
    /// # Errors
    /// Returns `TokenVerificationError` for any bad, forged, expired or
    /// not-yet-valid token.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenVerificationError> {
        self.verify_detailed(token).map(|verified| verified.claims)
    }

    /// Like [`verify`](Self::verify), but also return the token's timestamps.
    ///
    /// # Errors
    /// Same as [`verify`](Self::verify).
    pub fn verify_detailed(&self, token: &str) -> Result<VerifiedToken, TokenVerificationError> {
        self.try_verify(token).map_err(|cause| {
            tracing::error!(error = %cause, "Failed to verify the token");
            TokenVerificationError
        })
    }

    fn try_issue(&self, claims: &Claims) -> Result<String, IssueFailure> {
        if self.secret_is_empty {
            return Err(IssueFailure::EmptySecret);
        }
        if let Some(name) = claims::find_reserved(claims) {
            return Err(IssueFailure::ReservedClaim(name));
        }

        let issued_at = match claims.get(ISSUED_AT) {
            Some(iat) => iat.as_u64().ok_or(IssueFailure::InvalidIssuedAt)?,
            None => self.time.now_secs(),
        };

        let expires_in =
            ExpiresIn::parse(&self.expires_in).map_err(IssueFailure::InvalidExpiry)?;
        let expires_at = expires_in
            .expires_at(issued_at)
            .ok_or(IssueFailure::ExpiryOutOfRange)?;

        let mut payload = claims.clone();
        payload.insert(EXPIRES_AT.to_string(), Value::from(expires_at));

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(IssueFailure::Signing)
    }

    fn try_verify(&self, token: &str) -> Result<VerifiedToken, VerifyFailure> {
        if self.secret_is_empty {
            return Err(VerifyFailure::EmptySecret);
        }

        let mut claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| map_jwt_error(&e))?
            .claims;

        let expires_at = claims
            .remove(EXPIRES_AT)
            .as_ref()
            .and_then(Value::as_u64)
            .ok_or(VerifyFailure::MissingExpiry)?;
        let issued_at = claims.get(ISSUED_AT).and_then(Value::as_u64);

        let now = self.time.now_secs();
        if now >= expires_at {
            return Err(VerifyFailure::Expired {
                expired_at: expires_at,
            });
        }
        check_not_before(&claims, now)?;

        Ok(VerifiedToken {
            claims,
            issued_at,
            expires_at,
        })
    }
}

/// The HMAC family, `exp` required. Expiry itself is checked against the
/// codec's time source rather than by jsonwebtoken's internal clock.
fn hmac_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.leeway = 0;
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&[EXPIRES_AT]);
    validation
}

#[allow(clippy::cast_precision_loss)] // Second timestamps are far below 2^53
fn check_not_before(claims: &Claims, now_secs: u64) -> Result<(), VerifyFailure> {
    let Some(nbf) = claims.get(NOT_BEFORE) else {
        return Ok(());
    };
    let not_before = nbf.as_f64().ok_or(VerifyFailure::InvalidNotBefore)?;
    if not_before > now_secs as f64 {
        return Err(VerifyFailure::NotYetValid { not_before });
    }
    Ok(())
}
