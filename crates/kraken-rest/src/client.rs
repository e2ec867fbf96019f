//! Main REST client implementation

use kraken_auth::{Credentials, NonceSource, SystemClockNonce};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::form::{ArgValue, FormData};
use crate::request::{ApiEndpoint, PreparedRequest, RequestBuilder, Visibility};
use crate::response::decode_response;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{
    AddOrderResponse, BalanceInfo, CancelOrderResult, OrderSide, OrderType, ServerTime,
};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("kraken-rest/", env!("CARGO_PKG_VERSION"));

/// Kraken REST API client
///
/// Owns the credentials and one HTTP transport for its whole lifetime.
/// Calls block the calling thread for the full round trip. The client holds
/// no per-call state, so it can be shared between threads.
///
/// # Example
///
/// ```no_run
/// use kraken_rest::{Credentials, KrakenRestClient};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = KrakenRestClient::new()?;
///     let time = client.get_server_time()?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = KrakenRestClient::with_credentials(creds)?;
///     let balance = auth_client.get_balance()?;
///
///     Ok(())
/// }
/// ```
pub struct KrakenRestClient<T = ReqwestTransport> {
    transport: T,
    credentials: Option<Credentials>,
    endpoint: ApiEndpoint,
    nonce_source: Arc<dyn NonceSource>,
}

impl KrakenRestClient<ReqwestTransport> {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport =
            ReqwestTransport::new(Duration::from_secs(config.timeout_secs), user_agent)
                .map_err(|e| RestError::Construction(e.to_string()))?;

        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> KrakenRestClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        info!(
            base_url = config.endpoint.base_url(),
            authenticated = config.credentials.is_some(),
            "Created Kraken REST client"
        );

        Self {
            transport,
            credentials: config.credentials,
            endpoint: config.endpoint,
            nonce_source: config.nonce_source,
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Endpoint requests are addressed to
    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `method` without sending it
    pub fn prepare(
        &self,
        method: &str,
        visibility: Visibility,
        form: FormData,
    ) -> RestResult<PreparedRequest> {
        RequestBuilder::new(
            &self.endpoint,
            self.credentials.as_ref(),
            self.nonce_source.as_ref(),
        )
        .build(method, visibility, form)
    }

    /// Perform one API call and decode its result as `R`
    ///
    /// Builds (and for private methods signs) the request, sends it once and
    /// decodes the response envelope. Use `()` or [`serde::de::IgnoredAny`]
    /// for `R` when the result is not needed.
    #[instrument(skip(self, form))]
    pub fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        visibility: Visibility,
        form: FormData,
    ) -> RestResult<R> {
        let request = self.prepare(method, visibility, form)?;

        debug!("Making {} request to {}", visibility, request.path);
        let response = self.transport.execute(&request)?;

        decode_response(response)
    }

    /// [`call`](Self::call) a public method
    pub fn public<R: DeserializeOwned>(&self, method: &str, form: FormData) -> RestResult<R> {
        self.call(method, Visibility::Public, form)
    }

    /// [`call`](Self::call) a private method
    pub fn private<R: DeserializeOwned>(&self, method: &str, form: FormData) -> RestResult<R> {
        self.call(method, Visibility::Private, form)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_, T> {
        MarketEndpoints::new(self)
    }

    /// Get server time
    pub fn get_server_time(&self) -> RestResult<ServerTime> {
        self.market().get_server_time()
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_, T> {
        AccountEndpoints::new(self)
    }

    /// Get account balance
    pub fn get_balance(&self) -> RestResult<BalanceInfo> {
        self.account().get_balance()
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_, T> {
        TradingEndpoints::new(self)
    }

    /// Place a new order
    pub fn add_order(
        &self,
        pair: &str,
        side: OrderSide,
        order_type: OrderType,
        volume: rust_decimal::Decimal,
        args: &[(&str, ArgValue)],
    ) -> RestResult<AddOrderResponse> {
        self.trading().add_order(pair, side, order_type, volume, args)
    }

    /// Cancel an order by transaction ID
    pub fn cancel_order(&self, txid: &str) -> RestResult<CancelOrderResult> {
        self.trading().cancel_order(txid)
    }
}

impl<T> std::fmt::Debug for KrakenRestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClient")
            .field("endpoint", &self.endpoint)
            .field("has_credentials", &self.credentials.is_some())
            .field("nonce_source", &self.nonce_source)
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Base URL and API version
    pub endpoint: ApiEndpoint,
    /// Nonce generator for private requests
    pub nonce_source: Arc<dyn NonceSource>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            endpoint: ApiEndpoint::default(),
            nonce_source: Arc::new(SystemClockNonce),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set base URL and API version
    pub fn with_endpoint(mut self, endpoint: ApiEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set the nonce generator
    pub fn with_nonce_source(mut self, nonce_source: impl NonceSource + 'static) -> Self {
        self.nonce_source = Arc::new(nonce_source);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, MockTransport, TransportError};
    use kraken_auth::IncreasingNonce;
    use serde::de::IgnoredAny;
    use serde::Deserialize;

    const SECRET: &str =
        "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

    #[derive(Debug, Deserialize)]
    struct CountResult {
        count: u32,
    }

    fn authed(transport: MockTransport) -> KrakenRestClient<MockTransport> {
        let config = ClientConfig::new().with_credentials(Credentials::new("API_KEY", SECRET));
        KrakenRestClient::with_transport(config, transport)
    }

    #[test]
    fn test_client_without_credentials() {
        let client = KrakenRestClient::new().unwrap();
        assert!(!client.has_credentials());
        assert_eq!(client.endpoint().base_url(), "https://api.kraken.com");
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_endpoint(ApiEndpoint::new("https://sandbox.example", "1"));

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.endpoint.version(), "1");
    }

    #[test]
    fn test_call_decodes_result() {
        let client = authed(MockTransport::new());
        client
            .transport()
            .push_json(r#"{"error": [], "result": {"count": 3}}"#);

        let result: CountResult = client
            .call("CancelAll", Visibility::Private, FormData::new())
            .unwrap();
        assert_eq!(result.count, 3);
    }

    #[test]
    fn test_call_surfaces_server_error() {
        let client = authed(MockTransport::new());
        client
            .transport()
            .push_json(r#"{"error": ["EOrder:Invalid price"], "result": null}"#);

        let err = client
            .call::<CountResult>("AddOrder", Visibility::Private, FormData::new())
            .unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.to_string(), "API error: EOrder:Invalid price");
    }

    #[test]
    fn test_non_200_is_error_even_with_success_body() {
        let client = authed(MockTransport::new());
        client.transport().push_response(HttpResponse::new(
            520,
            r#"{"error": [], "result": {"count": 3}}"#,
        ));

        let err = client
            .call::<CountResult>("CancelAll", Visibility::Private, FormData::new())
            .unwrap_err();
        assert!(matches!(err, RestError::HttpStatus { status: 520 }));
    }

    #[test]
    fn test_transport_failure_is_not_retried() {
        let client = authed(MockTransport::new());
        client.transport().push_error(TransportError::Timeout);
        client
            .transport()
            .push_json(r#"{"error": [], "result": {"count": 3}}"#);

        let err = client
            .call::<CountResult>("CancelAll", Visibility::Private, FormData::new())
            .unwrap_err();
        assert!(matches!(err, RestError::Transport(TransportError::Timeout)));
        assert_eq!(client.transport().request_count(), 1);
    }

    #[test]
    fn test_body_read_failure() {
        let client = authed(MockTransport::new());
        client
            .transport()
            .push_error(TransportError::BodyRead("connection reset".to_string()));

        let err = client
            .call::<IgnoredAny>("Balance", Visibility::Private, FormData::new())
            .unwrap_err();
        assert!(matches!(err, RestError::BodyRead(_)));
    }

    #[test]
    fn test_pre_flight_failures_send_nothing() {
        let public_only =
            KrakenRestClient::with_transport(ClientConfig::new(), MockTransport::new());
        let err = public_only
            .call::<IgnoredAny>("Balance", Visibility::Private, FormData::new())
            .unwrap_err();
        assert!(matches!(err, RestError::AuthRequired));

        let bad_secret = KrakenRestClient::with_transport(
            ClientConfig::new().with_credentials(Credentials::new("API_KEY", "not base64!")),
            MockTransport::new(),
        );
        let err = bad_secret
            .call::<IgnoredAny>("Balance", Visibility::Private, FormData::new())
            .unwrap_err();
        assert!(matches!(err, RestError::Signing(_)));

        let err = public_only
            .call::<IgnoredAny>("Bad Method", Visibility::Public, FormData::new())
            .unwrap_err();
        assert!(matches!(err, RestError::Construction(_)));

        assert_eq!(public_only.transport().request_count(), 0);
        assert_eq!(bad_secret.transport().request_count(), 0);
    }

    #[test]
    fn test_increasing_nonce_source() {
        let config = ClientConfig::new()
            .with_credentials(Credentials::new("API_KEY", SECRET))
            .with_nonce_source(IncreasingNonce::new());
        let client = KrakenRestClient::with_transport(config, MockTransport::new());

        let first = client
            .prepare("Balance", Visibility::Private, FormData::new())
            .unwrap();
        let second = client
            .prepare("Balance", Visibility::Private, FormData::new())
            .unwrap();

        assert!(second.nonce.unwrap() > first.nonce.unwrap());
        assert_ne!(first.header("API-Sign"), second.header("API-Sign"));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let client = authed(MockTransport::new());
        let debug = format!("{:?}", client);
        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains(SECRET));
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<KrakenRestClient>();
        assert_send_sync::<KrakenRestClient<MockTransport>>();
    }
}
