//! Terminal user interface for the price chart.
//!
//! Renders the published [`ChartState`](crate::pipeline::ChartState) with
//! Ratatui and turns key presses into range selections.

pub mod app;
pub mod components;
pub mod event;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, is_interactive, restore_terminal, setup_terminal};
pub use ui::render;
