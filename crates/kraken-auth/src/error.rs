//! Error types for signing and credential handling

/// Errors that can occur while preparing authenticated requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// API secret is not valid base64
    #[error("Invalid API secret: {0}")]
    InvalidSecret(String),

    /// MAC rejected the decoded key
    #[error("HMAC error: {0}")]
    Hmac(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
