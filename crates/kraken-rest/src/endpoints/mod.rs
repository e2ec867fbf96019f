//! API endpoint wrappers
//!
//! Each wrapper maps typed arguments to form fields and delegates to
//! [`KrakenRestClient::call`](crate::KrakenRestClient::call).

pub mod account;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;
