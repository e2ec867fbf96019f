//! Blocking REST API client for Kraken cryptocurrency exchange
//!
//! This crate turns a method name plus form arguments into one HTTP round
//! trip against Kraken's REST API and decodes the `{"error": [...],
//! "result": ...}` envelope into a typed result.
//!
//! # Features
//!
//! - **Generic calls**: any public or private method via [`KrakenRestClient::call`]
//! - **Market Data**: Server time
//! - **Account**: Balances, WebSocket tokens
//! - **Trading**: Place and cancel orders
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Each private request gets a
//! fresh nonce and an `API-Sign` header computed with HMAC-SHA512 as
//! specified by Kraken's API documentation (see [`kraken_auth`]).
//!
//! # Example
//!
//! ```no_run
//! use kraken_rest::{ArgValue, Credentials, KrakenRestClient, OrderSide, OrderType};
//! use rust_decimal::Decimal;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = KrakenRestClient::new()?;
//!     let time = client.get_server_time()?;
//!     println!("Server time: {}", time.rfc1123);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = KrakenRestClient::with_credentials(creds)?;
//!     let order = auth_client.add_order(
//!         "XBTUSD",
//!         OrderSide::Buy,
//!         OrderType::Limit,
//!         Decimal::new(125, 2),
//!         &[("price", ArgValue::from("37500")), ("validate", ArgValue::from(true))],
//!     )?;
//!     println!("Order: {}", order.descr.order);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every failure is a [`RestError`]. Problems with the inputs (bad method
//! name, missing credentials, undecodable secret) are reported before any
//! network I/O. Server-side rejections carry the parsed error list, see
//! [`RestError::api_errors`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod form;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, KrakenRestClient};
pub use error::{ApiError, ErrorCategory, RestError, RestResult};
pub use form::{ArgValue, FormData};
pub use request::{ApiEndpoint, PreparedRequest, Visibility};
pub use response::ApiResponse;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

// Re-export auth types
pub use kraken_auth::{Credentials, IncreasingNonce, NonceSource, SystemClockNonce};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    ServerTime,
    // Account
    BalanceInfo, WsToken,
    // Trading
    AddOrderResponse, CancelOrderResult, OrderDescription, OrderSide, OrderType,
};
