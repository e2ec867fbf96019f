//! Error types for REST API operations

use kraken_auth::AuthError;

use crate::transport::TransportError;

/// Errors that can occur during REST API operations
///
/// Every variant before [`RestError::Transport`] is raised before any
/// network I/O takes place.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Request could not be constructed from the given inputs
    #[error("Invalid request: {0}")]
    Construction(String),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Private request could not be signed
    #[error("Failed to sign private request: {0}")]
    Signing(#[from] AuthError),

    /// HTTP request failed (connection, DNS, timeout)
    #[error("Request failed: {0}")]
    Transport(TransportError),

    /// Server answered with a status other than 200
    #[error("Unexpected HTTP status {status}")]
    HttpStatus {
        /// Status code returned by the server
        status: u16,
    },

    /// Response carried no body
    #[error("Response has no body")]
    MissingBody,

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    /// Body is not a valid envelope or result for the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// API returned a non-empty error list
    #[error("API error: {message}")]
    Api {
        /// Parsed errors, in the order the server sent them
        errors: Vec<ApiError>,
        /// Original error messages joined with ", "
        message: String,
    },
}

impl RestError {
    /// Create an API error from error strings returned by Kraken
    pub fn from_api_errors(errors: Vec<String>) -> Self {
        let message = errors.join(", ");
        let errors = errors.iter().map(|e| ApiError::parse(e)).collect();
        Self::Api { errors, message }
    }

    /// Check if the server reported errors in the response envelope
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Errors reported by the server, empty for any other failure
    pub fn api_errors(&self) -> &[ApiError] {
        match self {
            Self::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    /// HTTP status for [`RestError::HttpStatus`]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Check if the server rejected the nonce
    pub fn is_invalid_nonce(&self) -> bool {
        self.api_errors().iter().any(ApiError::is_invalid_nonce)
    }

    /// Check if the failure happened before the request left the process
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            Self::Construction(_) | Self::AuthRequired | Self::Signing(_)
        )
    }
}

impl From<TransportError> for RestError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::BodyRead(msg) => Self::BodyRead(msg),
            other => Self::Transport(other),
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Kraken API error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// EAPI:* errors - API-level issues
    Api,
    /// EGeneral:* errors - General errors
    General,
    /// EService:* errors - Service availability
    Service,
    /// EOrder:* errors - Trading/order errors
    Order,
    /// EFunding:* errors - Deposit/withdrawal errors
    Funding,
    /// EQuery:* errors - Query/search errors
    Query,
    /// ETrade:* errors - Trade execution errors
    Trade,
    /// Unknown error category
    Unknown,
}

impl ErrorCategory {
    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "EAPI" => Self::Api,
            "EGeneral" => Self::General,
            "EService" => Self::Service,
            "EOrder" => Self::Order,
            "EFunding" => Self::Funding,
            "EQuery" => Self::Query,
            "ETrade" => Self::Trade,
            _ => Self::Unknown,
        }
    }
}

/// One entry of the envelope's `error` list
///
/// Kraken formats errors as `ECategory:Message`, e.g. `EOrder:Invalid price`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The original error string from Kraken
    pub raw: String,
    /// Error category
    pub category: ErrorCategory,
    /// Message after the category prefix
    pub message: String,
}

impl ApiError {
    /// Parse a Kraken error string
    pub fn parse(error: &str) -> Self {
        let (category, message) = match error.split_once(':') {
            Some((prefix, message)) => (ErrorCategory::from_prefix(prefix), message.trim()),
            None => (ErrorCategory::Unknown, error),
        };

        Self {
            raw: error.to_string(),
            category,
            message: message.to_string(),
        }
    }

    /// Nonce was not greater than the last one seen for this key
    pub fn is_invalid_nonce(&self) -> bool {
        self.raw == "EAPI:Invalid nonce"
    }

    /// Signature did not verify
    pub fn is_invalid_signature(&self) -> bool {
        self.raw == "EAPI:Invalid signature"
    }

    /// API key unknown or disabled
    pub fn is_invalid_key(&self) -> bool {
        self.raw == "EAPI:Invalid key"
    }

    /// Server-side rate limit hit
    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self.raw.as_str(),
            "EAPI:Rate limit exceeded" | "EGeneral:Too many requests" | "EOrder:Rate limit exceeded"
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
