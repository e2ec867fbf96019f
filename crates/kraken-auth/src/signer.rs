//! Request signature for Kraken's private REST endpoints
//!
//! Kraken signature algorithm:
//! 1. SHA256(nonce + POST_data)
//! 2. HMAC-SHA512(base64_decode(secret), uri_path + SHA256_result)
//! 3. Base64 encode result
//!
//! The POST data must be the exact form-encoded body that goes on the wire,
//! with the `nonce` field already in it.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::{Digest, Sha256, Sha512};

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Compute the `API-Sign` header value for a private request
///
/// # Arguments
/// * `secret` - API secret, base64 encoded
/// * `path` - URI path of the endpoint (e.g., "/0/private/AddOrder")
/// * `post_data` - URL-encoded POST body, including the nonce field
/// * `nonce` - Nonce carried in `post_data`
///
/// # Errors
/// Fails only when `secret` is not valid base64 or the MAC refuses the key.
/// No partial signature is ever returned.
pub fn sign(secret: &str, path: &str, post_data: &str, nonce: u64) -> AuthResult<String> {
    let key = BASE64
        .decode(secret)
        .map_err(|e| AuthError::InvalidSecret(e.to_string()))?;
    let key = SecretBox::new(Box::new(key));

    let mut sha256 = Sha256::new();
    sha256.update(nonce.to_string().as_bytes());
    sha256.update(post_data.as_bytes());
    let digest = sha256.finalize();

    let mut mac = HmacSha512::new_from_slice(key.expose_secret())
        .map_err(|e| AuthError::Hmac(e.to_string()))?;
    mac.update(path.as_bytes());
    mac.update(&digest);

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
