//! Price history windowing, metrics and terminal chart.
//!
//! A [`pipeline::WindowPipeline`] resolves a look-back range, asks a
//! [`source::SampleSource`] for samples, normalizes them and publishes the
//! resulting window together with its summary [`metrics::Metrics`]. The
//! [`tui`] module renders whatever was last published.

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod presentation;
pub mod source;
pub mod tui;

pub use error::{ChartError, Result, SourceError};
