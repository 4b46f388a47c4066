//! Per-view rendering.

pub mod chart;
pub mod settings;
pub mod statistics;
pub mod summary;
