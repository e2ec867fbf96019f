//! API credentials for Kraken's private endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`
//!
//! The secret is kept in its base64 form and decoded on each signature, so a
//! malformed secret is reported when the first private call is signed.

use secrecy::{ExposeSecret, SecretBox};

use crate::error::{AuthError, AuthResult};
use crate::signer;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "KRAKEN_API_KEY";
/// Environment variable holding the base64 API secret
pub const API_SECRET_ENV: &str = "KRAKEN_PRIVATE_KEY";

/// API credentials for authenticated requests
pub struct Credentials {
    /// API key, sent verbatim in the `API-Key` header
    api_key: String,
    /// API secret (base64, zeroized on drop)
    api_secret: SecretBox<String>,
}

impl Credentials {
    /// Create new credentials from an API key and a base64 API secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretBox::new(Box::new(api_secret.into())),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `KRAKEN_API_KEY` and `KRAKEN_PRIVATE_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a private request with these credentials
    ///
    /// See [`sign`](crate::sign) for the algorithm.
    pub fn sign(&self, path: &str, post_data: &str, nonce: u64) -> AuthResult<String> {
        signer::sign(self.api_secret.expose_secret(), path, post_data, nonce)
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(self.api_key.clone(), self.api_secret.expose_secret().clone())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
