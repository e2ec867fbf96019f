//! HTTP transport abstraction
//!
//! This module provides a trait-based abstraction over the blocking HTTP
//! client, enabling unit testing of request and decoding logic without real
//! network calls.
//!
//! A transport performs exactly one attempt per request. There is no retry.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::request::{PreparedRequest, FORM_CONTENT_TYPE};

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, DNS or protocol failure
    #[error("failed to make http request: {0}")]
    RequestFailed(String),

    /// Request did not complete within the client timeout
    #[error("request timed out")]
    Timeout,

    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    BodyRead(String),

    /// HTTP client could not be created
    #[error("failed to create http client: {0}")]
    Setup(String),
}

/// Raw HTTP response handed to the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Body bytes, `None` when the response had no body
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    /// Response with a body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    /// Response without a body
    pub fn without_body(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Trait for HTTP transport abstraction
///
/// Implementations must be shareable between threads; the client holds a
/// single transport for its whole lifetime.
pub trait HttpTransport: Send + Sync {
    /// POST the request and return the raw response
    fn execute(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport using a blocking `reqwest` client
///
/// The inner client pools connections and is built once.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(path = %request.path))]
    fn execute(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .post(request.url.clone())
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(request.body.clone());

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        debug!(status, "Received response");

        // Non-200 bodies are never inspected
        if status != 200 {
            return Ok(HttpResponse::without_body(status));
        }

        let body = response
            .bytes()
            .map_err(|e| TransportError::BodyRead(e.to_string()))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

/// Mock transport for testing
///
/// Returns scripted responses in order and records every request it sees.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<HttpResponse, TransportError>>>,
    requests: parking_lot::Mutex<Vec<PreparedRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a mock with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with a JSON body
    pub fn push_json(&self, body: impl Into<String>) {
        self.push_response(HttpResponse::new(200, body.into()));
    }

    /// Queue an arbitrary response
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests executed so far
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests executed so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl HttpTransport for MockTransport {
    fn execute(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::RequestFailed("no scripted response".into())))
    }
}
