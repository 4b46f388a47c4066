//! Crate-level error types.
//!
//! [`ChartError`] covers the local contract violations (unknown or invalid
//! ranges) that fail fast, plus configuration and terminal failures. Sample
//! source failures have their own [`SourceError`] because the pipeline turns
//! them into a `Failed` window instead of propagating them.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// A range label is not part of the catalog.
    #[error("unknown range: {0}")]
    UnknownRange(String),

    /// A range has a zero duration and cannot be loaded.
    #[error("invalid range {0}: duration must be positive")]
    InvalidRange(String),

    /// A sample source failed outside of a window load.
    #[error("sample source error: {0}")]
    Source(#[from] SourceError),

    /// A configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

/// Failure reported by a [`SampleSource`](crate::source::SampleSource).
///
/// The display text is what a `Failed` window shows to the user.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached or gave up.
    #[error("failed to fetch data: {0}")]
    Transport(String),

    /// The HTTP request failed.
    #[error("failed to fetch data: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with data that does not fit the sample contract.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// The upstream API reported an error.
    #[error("market data API error: {0}")]
    Api(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_converts_into_chart_error() {
        let err: ChartError = SourceError::Transport("connection reset".into()).into();
        assert!(matches!(err, ChartError::Source(_)));
        assert_eq!(
            err.to_string(),
            "sample source error: failed to fetch data: connection reset"
        );
    }

    #[test]
    fn unknown_range_names_the_label() {
        let err = ChartError::UnknownRange("2w".into());
        assert_eq!(err.to_string(), "unknown range: 2w");
    }
}
