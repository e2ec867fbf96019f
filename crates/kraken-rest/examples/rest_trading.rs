//! Example: REST API trading operations
//!
//! This example demonstrates how to use the blocking REST client for:
//! - Fetching the server time
//! - Checking account balances
//! - Validating an order without placing it
//!
//! Run with: cargo run -p kraken-rest --example rest_trading
//!
//! NOTE: For private endpoints, set KRAKEN_API_KEY and KRAKEN_PRIVATE_KEY environment variables.

use kraken_rest::{
    ArgValue, ClientConfig, Credentials, IncreasingNonce, KrakenRestClient, OrderSide, OrderType,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("=== Kraken REST API Example ===\n");

    // Create client (no credentials for public endpoints)
    let client = KrakenRestClient::new()?;

    // ========================================================================
    // PUBLIC ENDPOINTS - No authentication required
    // ========================================================================

    println!("--- Public Market Data ---\n");

    match client.get_server_time() {
        Ok(time) => println!("  Server time: {} ({})", time.rfc1123, time.unixtime),
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    // ========================================================================
    // PRIVATE ENDPOINTS - Authentication required
    // ========================================================================

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            println!("Skipping private endpoints: {}", e);
            return Ok(());
        }
    };

    let config = ClientConfig::new()
        .with_credentials(credentials)
        .with_nonce_source(IncreasingNonce::new());
    let auth_client = KrakenRestClient::with_config(config)?;

    println!("--- Account ---\n");

    match auth_client.get_balance() {
        Ok(balance) => {
            for (asset, amount) in balance.non_zero() {
                println!("  {}: {}", asset, amount);
            }
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    println!("--- Trading (validate only) ---\n");

    let result = auth_client.add_order(
        "XBTUSD",
        OrderSide::Buy,
        OrderType::Limit,
        dec!(0.0001),
        &[
            ("price", ArgValue::from("10000")),
            ("oflags", ArgValue::from("post")),
            ("validate", ArgValue::from(true)),
        ],
    );

    match result {
        Ok(order) => println!("  Validated: {}", order.descr.order),
        Err(e) if e.is_server_error() => {
            for error in e.api_errors() {
                println!("  Rejected ({:?}): {}", error.category, error.message);
            }
        }
        Err(e) => println!("  Error: {}", e),
    }

    Ok(())
}
