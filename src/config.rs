//! Application configuration loaded from environment variables.
//!
//! Every value is optional:
//! - `PRICECHART_SOURCE`: `synthetic` (default) or `kraken`
//! - `PRICECHART_SYMBOL`: instrument shown and queried, default `BTC/USD`
//! - `PRICECHART_DEFAULT_RANGE`: range selected on startup, default `1w`
//! - `PRICECHART_LATENCY_MS`: simulated synthetic latency, default `1000`
//! - `PRICECHART_START_PRICE`: synthetic random-walk origin, default `60000`,
//!   at most 10^12
//! - `PRICECHART_KRAKEN_REST_URL`: Kraken public REST base URL
//! - `PRICECHART_TIMEOUT_SECS`: Kraken HTTP timeout, default `10`
//! - `PRICECHART_LOG_FILE`: where the TUI writes its log
//!
//! Empty values are treated as absent.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::ChartError;
use crate::models::range::{self, Range};

/// Default Kraken public REST endpoint.
const DEFAULT_KRAKEN_REST_URL: &str = "https://api.kraken.com/0/public";

const DEFAULT_SYMBOL: &str = "BTC/USD";
const DEFAULT_LATENCY_MS: u64 = 1000;
const DEFAULT_START_PRICE: Decimal = Decimal::from_parts(60000, 0, 0, false, 0);
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Largest accepted synthetic start price, 10^12.
pub const MAX_START_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Which sample source feeds the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceKind {
    #[default]
    Synthetic,
    Kraken,
}

impl FromStr for SourceKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "synthetic" => Ok(SourceKind::Synthetic),
            "kraken" => Ok(SourceKind::Kraken),
            other => Err(ChartError::Config(format!(
                "PRICECHART_SOURCE must be `synthetic` or `kraken`, got `{other}`"
            ))),
        }
    }
}

impl SourceKind {
    /// Name as written in `PRICECHART_SOURCE`.
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Synthetic => "synthetic",
            SourceKind::Kraken => "kraken",
        }
    }
}

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub source: SourceKind,
    pub symbol: String,
    pub default_range: Range,
    pub synthetic: SyntheticConfig,
    pub kraken: KrakenConfig,
    pub log_file: Option<PathBuf>,
}

/// Settings for the random-walk source.
#[derive(Debug)]
pub struct SyntheticConfig {
    pub start_price: Decimal,
    pub latency: Duration,
}

/// Settings for the Kraken REST source.
#[derive(Debug)]
pub struct KrakenConfig {
    pub rest_url: String,
    pub timeout: Duration,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`ChartError::Config`] if a value cannot be parsed, and
/// [`ChartError::UnknownRange`] if the default range is not in the catalog.
pub fn fetch_config() -> crate::Result<AppConfig> {
    from_lookup(non_empty_var)
}

/// Builds the configuration from an arbitrary key lookup.
///
/// The lookup must return `None` for absent or empty values.
///
/// # Errors
///
/// Same as [`fetch_config`].
pub fn from_lookup<F>(lookup: F) -> crate::Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let source: SourceKind = lookup("PRICECHART_SOURCE")
        .map(|s| s.parse::<SourceKind>())
        .transpose()?
        .unwrap_or_default();

    let symbol = lookup("PRICECHART_SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.to_string());

    let default_range = match lookup("PRICECHART_DEFAULT_RANGE") {
        Some(label) => range::resolve(&label)?,
        None => range::default_range(),
    };

    let latency_ms = parse_var(&lookup, "PRICECHART_LATENCY_MS")?.unwrap_or(DEFAULT_LATENCY_MS);
    let start_price: Decimal =
        parse_var(&lookup, "PRICECHART_START_PRICE")?.unwrap_or(DEFAULT_START_PRICE);
    if start_price.is_sign_negative() {
        return Err(ChartError::Config(
            "PRICECHART_START_PRICE must not be negative".to_string(),
        ));
    }
    if start_price > MAX_START_PRICE {
        return Err(ChartError::Config(format!(
            "PRICECHART_START_PRICE must not exceed {MAX_START_PRICE}"
        )));
    }

    let timeout_secs =
        parse_var(&lookup, "PRICECHART_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ChartError::Config(
            "PRICECHART_TIMEOUT_SECS must be positive".to_string(),
        ));
    }

    Ok(AppConfig {
        source,
        symbol,
        default_range,
        synthetic: SyntheticConfig {
            start_price,
            latency: Duration::from_millis(latency_ms),
        },
        kraken: KrakenConfig {
            rest_url: lookup("PRICECHART_KRAKEN_REST_URL")
                .unwrap_or_else(|| DEFAULT_KRAKEN_REST_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        },
        log_file: lookup("PRICECHART_LOG_FILE").map(PathBuf::from),
    })
}

/// Parses an optional variable, naming it in the error.
fn parse_var<F, T>(lookup: &F, name: &str) -> crate::Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| ChartError::Config(format!("invalid {name} `{raw}`: {e}")))
        })
        .transpose()
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
