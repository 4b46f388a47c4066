//! Live tests against Kraken's public REST API.
//!
//! These tests require network access.
//! Run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

use std::time::Duration;

use pricechart::source::{KrakenSource, SampleSource};

const KRAKEN_REST_URL: &str = "https://api.kraken.com/0/public";

#[tokio::test]
async fn test_fetch_one_day_of_btc() {
    let source = KrakenSource::new(KRAKEN_REST_URL, "BTC/USD", Duration::from_secs(10))
        .expect("Failed to build client");

    let samples = source
        .fetch_samples(24)
        .await
        .expect("Failed to fetch OHLC data");

    assert!(!samples.is_empty(), "Expected at least one candle");
    assert!(samples.len() <= 720);
    assert!(samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[tokio::test]
async fn test_unknown_pair_reports_api_error() {
    let source = KrakenSource::new(KRAKEN_REST_URL, "NOPE/NOPE", Duration::from_secs(10))
        .expect("Failed to build client");

    let err = source
        .fetch_samples(24)
        .await
        .expect_err("Unknown pair should fail");
    assert!(err.to_string().contains("API error"), "got: {err}");
}
