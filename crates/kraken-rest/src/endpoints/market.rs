//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use tracing::{debug, instrument};

use crate::client::KrakenRestClient;
use crate::error::RestResult;
use crate::form::FormData;
use crate::transport::HttpTransport;
use crate::types::ServerTime;

/// Public market data endpoints
pub struct MarketEndpoints<'a, T> {
    client: &'a KrakenRestClient<T>,
}

impl<'a, T: HttpTransport> MarketEndpoints<'a, T> {
    pub fn new(client: &'a KrakenRestClient<T>) -> Self {
        Self { client }
    }

    /// Get server time
    #[instrument(skip(self))]
    pub fn get_server_time(&self) -> RestResult<ServerTime> {
        debug!("Fetching server time");
        self.client.public("Time", FormData::new())
    }
}
