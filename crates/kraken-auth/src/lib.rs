//! Request signing for Kraken's private REST API
//!
//! This crate holds everything needed to authenticate a private call that
//! does not touch the network: credentials, nonce generation and the
//! HMAC-SHA512 signature. It has no HTTP client and no async runtime.
//!
//! # Example
//!
//! ```
//! use kraken_auth::{Credentials, IncreasingNonce, NonceSource};
//!
//! # fn main() -> Result<(), kraken_auth::AuthError> {
//! let creds = Credentials::new("API_KEY", "dGVzdF9wcml2YXRlX2tleQ==");
//! let nonce = IncreasingNonce::new().next_nonce();
//! let body = format!("nonce={}", nonce);
//!
//! let signature = creds.sign("/0/private/Balance", &body, nonce)?;
//! assert!(!signature.is_empty());
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult};
pub use nonce::{unix_millis, IncreasingNonce, NonceSource, SystemClockNonce};
pub use signer::sign;
