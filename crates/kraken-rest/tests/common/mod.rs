//! Common test utilities and fixtures for integration tests
//!
//! Contains sample responses in the shape Kraken's REST API returns them and
//! a scripted transport that records every request it is handed.

#![allow(dead_code)]

use kraken_rest::{
    ClientConfig, Credentials, HttpResponse, HttpTransport, KrakenRestClient, NonceSource,
    PreparedRequest, TransportError,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Secret from Kraken's published signing example
pub const API_SECRET: &str =
    "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

/// API key sent in the `API-Key` header
pub const API_KEY: &str = "HAVKLO_TEST_KEY";

/// Nonce from Kraken's published signing example
pub const EXAMPLE_NONCE: u64 = 1616492376594;

/// Expected `API-Sign` for the example AddOrder request
pub const EXAMPLE_SIGNATURE: &str =
    "4/dpxb3iT4tp/ZCVEwSnEsLxx0bqyhLpdfOpc6fn7OR8+UClSV5n9E6aSS8MPtnRfp32bAb0nmbRn6H8ndwLUQ==";

/// Sample Time response
pub const TIME_RESPONSE: &str = r#"{
    "error": [],
    "result": {
        "unixtime": 1688669448,
        "rfc1123": "Thu, 06 Jul 23 18:50:48 +0000"
    }
}"#;

/// Sample Balance response
pub const BALANCE_RESPONSE: &str = r#"{
    "error": [],
    "result": {
        "ZUSD": "171288.6158",
        "ZEUR": "504861.8946",
        "XXBT": "1011.1908877900",
        "XETH": "0.0000000000"
    }
}"#;

/// Sample AddOrder response
pub const ADD_ORDER_RESPONSE: &str = r#"{
    "error": [],
    "result": {
        "descr": {
            "order": "buy 1.25000000 XBTUSD @ limit 37500.0"
        },
        "txid": ["OUF4EM-FRGI2-MQMWZD"]
    }
}"#;

/// Sample CancelOrder response
pub const CANCEL_ORDER_RESPONSE: &str = r#"{"error": [], "result": {"count": 1}}"#;

/// Sample rejection for a reused nonce
pub const INVALID_NONCE_RESPONSE: &str = r#"{"error": ["EAPI:Invalid nonce"]}"#;

/// Transport that replays scripted responses in order
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a 200 response
    pub fn ok(self, body: &str) -> Self {
        self.then(Ok(HttpResponse::new(200, body)))
    }

    /// Script any outcome
    pub fn then(self, outcome: Result<HttpResponse, TransportError>) -> Self {
        self.responses.lock().push_back(outcome);
        self
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: &PreparedRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::RequestFailed("no scripted response".into())))
    }
}

/// Nonce source that always returns the same value, like a clock that
/// does not advance between two calls
#[derive(Debug)]
pub struct FrozenClock(pub u64);

impl NonceSource for FrozenClock {
    fn next_nonce(&self) -> u64 {
        self.0
    }
}

/// Nonce source that counts up from a start value
#[derive(Debug)]
pub struct SteppingClock(AtomicU64);

impl SteppingClock {
    pub fn starting_at(start: u64) -> Self {
        Self(AtomicU64::new(start))
    }
}

impl NonceSource for SteppingClock {
    fn next_nonce(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Authenticated client over `transport` with a custom nonce source
pub fn authed_client<N>(
    transport: ScriptedTransport,
    nonces: N,
) -> KrakenRestClient<ScriptedTransport>
where
    N: NonceSource + 'static,
{
    let config = ClientConfig::new()
        .with_credentials(Credentials::new(API_KEY, API_SECRET))
        .with_nonce_source(nonces);
    KrakenRestClient::with_transport(config, transport)
}

/// Unauthenticated client over `transport`
pub fn public_client(transport: ScriptedTransport) -> KrakenRestClient<ScriptedTransport> {
    KrakenRestClient::with_transport(ClientConfig::new(), transport)
}
