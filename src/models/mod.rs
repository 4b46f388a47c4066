//! Data model for the price chart.
//!
//! Contains the sample record produced by sources, the range catalog, and
//! the series window published by the pipeline.

pub mod range;
pub mod sample;
pub mod window;

pub use range::{Range, default_range, list_ranges, resolve};
pub use sample::Sample;
pub use window::{SeriesWindow, WindowStatus};
