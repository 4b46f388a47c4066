//! Widgets shared by every view.

pub mod header;
pub mod range_bar;
pub mod status_bar;
pub mod tab_bar;
