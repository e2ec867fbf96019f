//! Request construction for public and private endpoints
//!
//! Public methods live under `/{version}/public/{method}` and are sent as-is.
//! Private methods live under `/{version}/private/{method}`; the builder
//! injects a fresh nonce into the form, signs the final encoded body and
//! attaches the `API-Key` and `API-Sign` headers.

use kraken_auth::{Credentials, NonceSource};
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::fmt;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::form::FormData;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.kraken.com";
/// Default API version path segment
pub const DEFAULT_API_VERSION: &str = "0";

/// Header carrying the raw API key
pub const API_KEY_HEADER: &str = "API-Key";
/// Header carrying the base64 request signature
pub const API_SIGN_HEADER: &str = "API-Sign";
/// Content type of every request body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form field the builder owns on private requests
pub const NONCE_FIELD: &str = "nonce";

/// Whether a method requires authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Unauthenticated market data
    Public,
    /// Account-scoped, signed
    Private,
}

impl Visibility {
    /// Path segment for this visibility
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    /// Check if requests need signing
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base URL and API version requests are addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base_url: String,
    version: String,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_API_VERSION)
    }
}

impl ApiEndpoint {
    /// Create an endpoint; a trailing `/` on the base URL is ignored
    pub fn new(base_url: impl Into<String>, version: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            version: version.into(),
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API version segment
    pub fn version(&self) -> &str {
        &self.version
    }

    /// URI path of a method, e.g. `/0/private/AddOrder`
    ///
    /// This is the path that gets signed, independent of the base URL.
    pub fn path(&self, visibility: Visibility, method: &str) -> String {
        format!("/{}/{}/{}", self.version, visibility, method)
    }

    /// Full URL of a method
    ///
    /// A base URL carrying a query or fragment is rejected, since the method
    /// path would end up inside it.
    pub fn url(&self, visibility: Visibility, method: &str) -> RestResult<Url> {
        let url = format!("{}{}", self.base_url, self.path(visibility, method));
        let parsed =
            Url::parse(&url).map_err(|e| RestError::Construction(format!("{}: {}", url, e)))?;

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(RestError::Construction(format!(
                "base URL must not have a query or fragment: {}",
                self.base_url
            )));
        }
        Ok(parsed)
    }
}

/// A fully built POST request, ready for a transport
#[derive(Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Full request URL
    pub url: Url,
    /// URI path the signature covers
    pub path: String,
    /// Form-encoded body, exactly as signed
    pub body: String,
    /// Authentication headers (empty for public requests)
    pub headers: Vec<(&'static str, String)>,
    /// Nonce injected into the body (private requests only)
    pub nonce: Option<u64>,
}

impl PreparedRequest {
    /// Look up a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check if the request carries authentication headers
    pub fn is_signed(&self) -> bool {
        self.header(API_SIGN_HEADER).is_some()
    }
}

impl fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<&str> = self.headers.iter().map(|(name, _)| *name).collect();
        f.debug_struct("PreparedRequest")
            .field("url", &self.url.as_str())
            .field("path", &self.path)
            .field("body_len", &self.body.len())
            .field("headers", &headers)
            .field("nonce", &self.nonce)
            .finish()
    }
}

/// Builds [`PreparedRequest`]s for one client
pub struct RequestBuilder<'a> {
    endpoint: &'a ApiEndpoint,
    credentials: Option<&'a Credentials>,
    nonces: &'a dyn NonceSource,
}

impl<'a> RequestBuilder<'a> {
    /// Create a builder
    pub fn new(
        endpoint: &'a ApiEndpoint,
        credentials: Option<&'a Credentials>,
        nonces: &'a dyn NonceSource,
    ) -> Self {
        Self {
            endpoint,
            credentials,
            nonces,
        }
    }

    /// Build the request for `method`
    ///
    /// For private requests any caller-supplied `nonce` field is replaced.
    /// Nothing is sent if this fails.
    pub fn build(
        &self,
        method: &str,
        visibility: Visibility,
        mut form: FormData,
    ) -> RestResult<PreparedRequest> {
        validate_method(method)?;

        let url = self.endpoint.url(visibility, method)?;
        let path = self.endpoint.path(visibility, method);

        if !visibility.is_private() {
            return Ok(PreparedRequest {
                url,
                path,
                body: form.encode()?,
                headers: Vec::new(),
                nonce: None,
            });
        }

        let credentials = self.credentials.ok_or(RestError::AuthRequired)?;
        HeaderValue::from_str(credentials.api_key()).map_err(|_| {
            RestError::Construction("API key is not a valid header value".to_string())
        })?;

        let nonce = self.nonces.next_nonce();
        if let Some(previous) = form.set(NONCE_FIELD, nonce.to_string()) {
            debug!(previous = %previous, "Replaced caller-supplied nonce");
        }

        let body = form.encode()?;
        let signature = credentials.sign(&path, &body, nonce)?;

        Ok(PreparedRequest {
            url,
            path,
            body,
            headers: vec![
                (API_KEY_HEADER, credentials.api_key().to_string()),
                (API_SIGN_HEADER, signature),
            ],
            nonce: Some(nonce),
        })
    }
}

fn validate_method(method: &str) -> RestResult<()> {
    if method.is_empty() {
        return Err(RestError::Construction("empty method name".to_string()));
    }
    if !method.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RestError::Construction(format!(
            "invalid method name: {:?}",
            method
        )));
    }
    Ok(())
}
