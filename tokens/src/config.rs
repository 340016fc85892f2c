//! Token configuration module.
//!
//! Loads the signing secret and expiry policy once at process start.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: Shared secret used to sign and verify tokens (required)
//! - `JWT_EXPIRES_IN`: Expiry policy applied to every issued token, e.g. `15m` (required)
//!
//! # Invariants
//!
//! - Values are taken as given. An empty secret or an unparseable expiry is not
//!   rejected here; it makes issuance and verification fail instead.
//! - The secret never appears in `Debug` output.

use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

/// Environment variable holding the shared secret.
pub const SECRET_VAR: &str = "JWT_SECRET";
/// Environment variable holding the expiry policy.
pub const EXPIRES_IN_VAR: &str = "JWT_EXPIRES_IN";

/// Token configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenConfig {
    secret: Vec<u8>,
    expires_in: String,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[hidden]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
    /// The dotenv file could not be read or parsed.
    EnvFile(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "{name} is not set")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "{name} {message}")
            }
            Self::EnvFile(reason) => write!(f, "failed to read env file: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl TokenConfig {
    /// Build a configuration from explicit values.
    #[must_use]
    pub const fn new(secret: Vec<u8>, expires_in: String) -> Self {
        Self { secret, expires_in }
    }

    /// The shared secret.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// The expiry policy string.
    #[must_use]
    pub fn expires_in(&self) -> &str {
        &self.expires_in
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `JWT_SECRET` or `JWT_EXPIRES_IN` is not set
    /// - either is set but not valid unicode
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|name| match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
                name: name.to_string(),
                message: "is not valid unicode".to_string(),
            }),
        })
    }

    /// Load configuration through an arbitrary name-to-value lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if the lookup has no value for a
    /// required name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::try_from_lookup(|name| Ok(lookup(name)))
    }

    /// Load configuration from a dotenv file only, leaving the process
    /// environment untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or lacks a
    /// required variable.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let entries =
            dotenvy::from_path_iter(path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;

        let mut vars = HashMap::new();
        for entry in entries {
            let (key, value) = entry.map_err(|e| ConfigError::EnvFile(e.to_string()))?;
            vars.insert(key, value);
        }

        Self::from_lookup(|name| vars.get(name).cloned())
    }

    fn try_from_lookup(
        lookup: impl Fn(&str) -> Result<Option<String>, ConfigError>,
    ) -> Result<Self, ConfigError> {
        let require = |name: &str| -> Result<String, ConfigError> {
            lookup(name)?.ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let secret = require(SECRET_VAR)?.into_bytes();
        let expires_in = require(EXPIRES_IN_VAR)?;

        Ok(Self { secret, expires_in })
    }
}
