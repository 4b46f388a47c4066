//! Kraken public REST OHLC source.
//!
//! Queries [`OHLC`](https://docs.kraken.com/api/docs/rest-api/get-ohlc-data)
//! for the configured pair and maps each candle to a [`Sample`] using its
//! close price and truncated volume. Kraken returns at most 720 candles per
//! call, so the interval is widened until the whole window fits.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info};

use super::SampleSource;
use crate::error::SourceError;
use crate::models::Sample;

/// Candle intervals supported by the endpoint, in minutes.
const INTERVALS_MINUTES: [u32; 5] = [60, 240, 1440, 10080, 21600];

/// Maximum number of candles returned by one OHLC call.
const MAX_ROWS: u32 = 720;

/// Sample source backed by Kraken's public OHLC endpoint.
#[derive(Debug, Clone)]
pub struct KrakenSource {
    client: reqwest::Client,
    url: String,
    pair: String,
}

impl KrakenSource {
    /// Creates a source for `symbol` (e.g. `BTC/USD`) against `rest_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(rest_url: &str, symbol: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}/OHLC", rest_url.trim_end_matches('/')),
            pair: symbol.replace('/', ""),
        })
    }
}

#[async_trait]
impl SampleSource for KrakenSource {
    async fn fetch_samples(&self, duration_hours: u32) -> Result<Vec<Sample>, SourceError> {
        let interval = interval_for(duration_hours);
        let since = (Utc::now() - TimeDelta::hours(i64::from(duration_hours))).timestamp();

        info!(pair = %self.pair, interval, since, "Requesting OHLC data");
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("pair", self.pair.clone()),
                ("interval", interval.to_string()),
                ("since", since.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        let samples = parse_ohlc(&body)?;
        debug!(count = samples.len(), "parsed OHLC candles");
        Ok(samples)
    }
}

/// Picks the smallest interval (minutes) covering the window within [`MAX_ROWS`].
pub fn interval_for(duration_hours: u32) -> u32 {
    let minutes = u64::from(duration_hours) * 60;
    INTERVALS_MINUTES
        .iter()
        .copied()
        .find(|interval| minutes / u64::from(*interval) <= u64::from(MAX_ROWS))
        .unwrap_or(INTERVALS_MINUTES[INTERVALS_MINUTES.len() - 1])
}

/// Converts an OHLC response body into samples.
///
/// Each candle row is `[time, open, high, low, close, vwap, volume, count]`
/// with prices and volume encoded as decimal strings.
///
/// # Errors
///
/// Returns [`SourceError::Api`] if the body lists API errors, or
/// [`SourceError::Malformed`] if the candle data is missing or unparsable.
pub fn parse_ohlc(body: &serde_json::Value) -> Result<Vec<Sample>, SourceError> {
    if let Some(errors) = body["error"].as_array()
        && !errors.is_empty()
    {
        let messages: Vec<String> = errors
            .iter()
            .filter_map(|e| e.as_str().map(String::from))
            .collect();
        return Err(SourceError::Api(messages.join(", ")));
    }

    let result = body["result"]
        .as_object()
        .ok_or_else(|| SourceError::Malformed("missing result in OHLC response".into()))?;

    // The pair key varies (XXBTZUSD, XBTUSDT, ...); "last" is the paging cursor.
    let rows = result
        .iter()
        .find(|(key, _)| key.as_str() != "last")
        .and_then(|(_, value)| value.as_array())
        .ok_or_else(|| SourceError::Malformed("missing candle data in OHLC response".into()))?;

    rows.iter().map(parse_row).collect()
}

fn parse_row(row: &serde_json::Value) -> Result<Sample, SourceError> {
    let fields = row
        .as_array()
        .filter(|f| f.len() >= 7)
        .ok_or_else(|| SourceError::Malformed(format!("bad candle row: {row}")))?;

    let time = fields[0]
        .as_i64()
        .ok_or_else(|| SourceError::Malformed(format!("bad candle time: {}", fields[0])))?;
    let timestamp = DateTime::<Utc>::from_timestamp(time, 0)
        .ok_or_else(|| SourceError::Malformed(format!("candle time out of range: {time}")))?;

    let price = decimal_field(&fields[4], "close")?;
    let volume = decimal_field(&fields[6], "volume")?
        .trunc()
        .to_u64()
        .ok_or_else(|| SourceError::Malformed(format!("bad candle volume: {}", fields[6])))?;

    Ok(Sample::new(timestamp, price, volume))
}

fn decimal_field(value: &serde_json::Value, name: &str) -> Result<Decimal, SourceError> {
    value
        .as_str()
        .and_then(|s| Decimal::from_str(s).ok())
        .ok_or_else(|| SourceError::Malformed(format!("bad candle {name}: {value}")))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn interval_grows_with_window() {
        assert_eq!(interval_for(24), 60);
        assert_eq!(interval_for(720), 60);
        assert_eq!(interval_for(721), 240);
        assert_eq!(interval_for(4320), 1440);
        assert_eq!(interval_for(8760), 1440);
        assert_eq!(interval_for(17520), 10080);
        assert_eq!(interval_for(u32::MAX), 21600);
    }

    #[test]
    fn parses_candles() {
        let body = json!({
            "error": [],
            "result": {
                "XXBTZUSD": [
                    [1688671200, "30306.1", "30306.2", "30305.7", "30305.7", "30306.1", "3.39243896", 23],
                    [1688674800, "30305.7", "30400.0", "30300.0", "30390.5", "30350.0", "12.5", 40]
                ],
                "last": 1688674800
            }
        });

        let samples = parse_ohlc(&body).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp.timestamp(), 1688671200);
        assert_eq!(samples[0].price, dec!(30305.7));
        assert_eq!(samples[0].volume, 3);
        assert_eq!(samples[1].price, dec!(30390.5));
        assert_eq!(samples[1].volume, 12);
    }

    #[test]
    fn api_errors_are_reported() {
        let body = json!({ "error": ["EQuery:Unknown asset pair"] });
        let err = parse_ohlc(&body).unwrap_err();
        assert!(matches!(err, SourceError::Api(ref m) if m == "EQuery:Unknown asset pair"));
    }

    #[test]
    fn missing_result_is_malformed() {
        let err = parse_ohlc(&json!({ "error": [] })).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[test]
    fn short_row_is_malformed() {
        let body = json!({ "error": [], "result": { "XXBTZUSD": [[1688671200, "1.0"]], "last": 0 } });
        assert!(matches!(
            parse_ohlc(&body).unwrap_err(),
            SourceError::Malformed(_)
        ));
    }

    #[test]
    fn non_numeric_price_is_malformed() {
        let body = json!({
            "error": [],
            "result": { "XXBTZUSD": [[1688671200, "1", "1", "1", "abc", "1", "1", 1]], "last": 0 }
        });
        let err = parse_ohlc(&body).unwrap_err();
        assert!(err.to_string().contains("close"));
    }

    #[test]
    fn pair_drops_separator() {
        let source =
            KrakenSource::new("https://api.kraken.com/0/public/", "BTC/USD", Duration::from_secs(1))
                .unwrap();
        assert_eq!(source.pair, "BTCUSD");
        assert_eq!(source.url, "https://api.kraken.com/0/public/OHLC");
    }
}
