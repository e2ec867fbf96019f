//! Response envelope decoding
//!
//! Every Kraken response, public or private, is wrapped as
//! `{"error": [...], "result": ...}`. A non-empty `error` list means the call
//! failed, whatever the HTTP status or the shape of `result`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::transport::HttpResponse;

/// Standard Kraken API response wrapper
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Error messages (empty if successful, `null` reads as empty)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub error: Vec<String>,
    /// Result data (present if successful)
    pub result: Option<T>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> ApiResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// Decode a raw HTTP response into the result type `T`
///
/// Checks, in order: status must be 200 (the body is not looked at
/// otherwise), a body must be present, then the envelope rules of
/// [`decode_envelope`].
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> RestResult<T> {
    if response.status != 200 {
        warn!(status = response.status, "Request returned non-200 status");
        return Err(RestError::HttpStatus {
            status: response.status,
        });
    }

    let body = response.body.ok_or(RestError::MissingBody)?;
    decode_envelope(&body)
}

/// Decode an envelope body into the result type `T`
///
/// The `error` list is checked before `result` is shaped into `T`, so server
/// errors are reported even when `result` would not fit `T`. An absent or
/// `null` result is shaped from JSON `null`: `()`, `Option<_>` and
/// [`serde::de::IgnoredAny`] accept it, struct types do not.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> RestResult<T> {
    let envelope: ApiResponse<Value> = serde_json::from_slice(body)?;

    if !envelope.is_success() {
        warn!(errors = ?envelope.error, "API returned errors");
        return Err(RestError::from_api_errors(envelope.error));
    }

    debug!(body_len = body.len(), "Decoding result");
    let result = envelope.result.unwrap_or(Value::Null);
    Ok(serde_json::from_value(result)?)
}
