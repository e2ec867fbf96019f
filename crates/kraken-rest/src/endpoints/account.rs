//! Private account endpoints
//!
//! These endpoints require authentication.

use tracing::{debug, instrument};

use crate::client::KrakenRestClient;
use crate::error::RestResult;
use crate::form::FormData;
use crate::transport::HttpTransport;
use crate::types::{BalanceInfo, WsToken};

/// Private account endpoints
pub struct AccountEndpoints<'a, T> {
    client: &'a KrakenRestClient<T>,
}

impl<'a, T: HttpTransport> AccountEndpoints<'a, T> {
    pub fn new(client: &'a KrakenRestClient<T>) -> Self {
        Self { client }
    }

    /// Get account balance
    #[instrument(skip(self))]
    pub fn get_balance(&self) -> RestResult<BalanceInfo> {
        self.client.private("Balance", FormData::new())
    }

    /// Get a token for Kraken's private WebSocket channels
    ///
    /// The token must be used within 15 minutes of creation.
    #[instrument(skip(self))]
    pub fn get_websockets_token(&self) -> RestResult<WsToken> {
        let token: WsToken = self.client.private("GetWebSocketsToken", FormData::new())?;
        debug!("Got WebSocket token, expires in {} seconds", token.expires);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::{ClientConfig, KrakenRestClient};
    use crate::transport::MockTransport;
    use kraken_auth::Credentials;
    use rust_decimal_macros::dec;

    fn client() -> KrakenRestClient<MockTransport> {
        let config = ClientConfig::new()
            .with_credentials(Credentials::new("API_KEY", "dGVzdF9wcml2YXRlX2tleQ=="));
        KrakenRestClient::with_transport(config, MockTransport::new())
    }

    #[test]
    fn test_get_balance() {
        let client = client();
        client
            .transport()
            .push_json(r#"{"error":[],"result":{"ZUSD":"2970172.7962","XXBT":"0.0000000000"}}"#);

        let balance = client.account().get_balance().unwrap();
        assert_eq!(balance.get("ZUSD"), Some(dec!(2970172.7962)));

        let requests = client.transport().requests();
        let request = &requests[0];
        assert_eq!(request.path, "/0/private/Balance");
        assert_eq!(request.body, format!("nonce={}", request.nonce.unwrap()));
    }

    #[test]
    fn test_get_websockets_token() {
        let client = client();
        client.transport().push_json(
            r#"{"error":[],"result":{"token":"1Dwc4lzSwNWOAwkMdqhssNNFhs1ed606d1WcF3XfEMw","expires":900}}"#,
        );

        let token = client.account().get_websockets_token().unwrap();
        assert_eq!(token.expires, 900);
        assert!(token.token.starts_with("1Dwc"));
    }
}
