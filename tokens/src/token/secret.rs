//! Shared-secret generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Default number of random bytes in a generated secret (matches HS256's
/// 256-bit output).
pub const DEFAULT_SECRET_BYTES: usize = 32;

/// Error returned when a secret cannot be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretError {
    /// Zero bytes were requested.
    ZeroLength,
}

impl std::fmt::Display for SecretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroLength => write!(f, "secret length must be at least one byte"),
        }
    }
}

impl std::error::Error for SecretError {}

/// Generate `len` random bytes from the thread-local CSPRNG, encoded as
/// unpadded base64url so the result can be pasted into `JWT_SECRET`.
pub fn generate_secret(len: usize) -> Result<String, SecretError> {
    if len == 0 {
        return Err(SecretError::ZeroLength);
    }

    let mut bytes = vec![0u8; len];
    rand::rng().fill(bytes.as_mut_slice());
    Ok(URL_SAFE_NO_PAD.encode(&bytes))
}
