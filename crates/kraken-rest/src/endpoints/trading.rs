//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::client::KrakenRestClient;
use crate::error::RestResult;
use crate::form::{ArgValue, FormData};
use crate::transport::HttpTransport;
use crate::types::{AddOrderResponse, CancelOrderResult, OrderSide, OrderType};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a, T> {
    client: &'a KrakenRestClient<T>,
}

impl<'a, T: HttpTransport> TradingEndpoints<'a, T> {
    pub fn new(client: &'a KrakenRestClient<T>) -> Self {
        Self { client }
    }

    /// Add a new order
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "XBTUSD")
    /// * `side` - Buy or sell
    /// * `order_type` - Order type
    /// * `volume` - Order volume in base currency
    /// * `args` - Extra parameters (e.g., `price`, `oflags`, `validate`);
    ///   these overwrite the fields above when keys collide
    #[instrument(skip(self, args))]
    pub fn add_order(
        &self,
        pair: &str,
        side: OrderSide,
        order_type: OrderType,
        volume: Decimal,
        args: &[(&str, ArgValue)],
    ) -> RestResult<AddOrderResponse> {
        let mut form = FormData::new()
            .with("pair", pair)
            .with("type", side.as_str())
            .with("ordertype", order_type.as_str())
            .with("volume", volume.to_string());
        form.extend_args(args.iter().map(|(key, value)| (*key, value.clone())))?;

        debug!("Placing {} {} order for {} {}", side, order_type, volume, pair);
        self.client.private("AddOrder", form)
    }

    /// Cancel an order
    ///
    /// # Arguments
    /// * `txid` - Transaction ID or user reference of the order
    #[instrument(skip(self))]
    pub fn cancel_order(&self, txid: &str) -> RestResult<CancelOrderResult> {
        debug!("Cancelling order {}", txid);
        self.client.private("CancelOrder", FormData::new().with("txid", txid))
    }
}
