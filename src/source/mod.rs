//! Sample sources feeding the windowing pipeline.
//!
//! A [`SampleSource`] returns raw samples for a look-back duration. The
//! pipeline makes no assumption about ordering or uniqueness of what comes
//! back, and imposes no timeout: every source bounds its own latency and
//! must fail rather than hang.

pub mod kraken;
pub mod synthetic;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AppConfig, SourceKind};
use crate::error::SourceError;
use crate::models::Sample;

pub use kraken::KrakenSource;
pub use synthetic::SyntheticSource;

/// Produces raw samples for a requested duration.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetches roughly `duration_hours` worth of samples ending now.
    ///
    /// `duration_hours` is always positive.
    async fn fetch_samples(&self, duration_hours: u32) -> Result<Vec<Sample>, SourceError>;
}

/// Builds the source selected in the configuration.
///
/// # Errors
///
/// Returns [`SourceError::Transport`] if the HTTP client for the Kraken
/// source cannot be built.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn SampleSource>, SourceError> {
    match config.source {
        SourceKind::Synthetic => Ok(Arc::new(SyntheticSource::new(
            config.synthetic.start_price,
            config.synthetic.latency,
        ))),
        SourceKind::Kraken => Ok(Arc::new(KrakenSource::new(
            &config.kraken.rest_url,
            &config.symbol,
            config.kraken.timeout,
        )?)),
    }
}
