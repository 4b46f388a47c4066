//! Application state for the TUI.

use std::time::Instant;

use crate::models::{Range, list_ranges, range};
use crate::pipeline::ChartState;

/// How long an error stays in the status bar.
const ERROR_DISPLAY_SECS: u64 = 5;

/// Central application state container.
pub struct App {
    // -- Instrument --
    /// Symbol shown in the header.
    pub symbol: String,
    /// Name of the sample source feeding the chart.
    pub source_label: String,
    /// Key/value pairs shown in the settings view.
    pub settings: Vec<(&'static str, String)>,

    // -- View State --
    /// Available views (shown as tabs).
    pub views: Vec<View>,
    /// Index of the active view.
    pub active_view: usize,

    // -- Range State --
    /// Selectable ranges in display order.
    pub ranges: &'static [Range],
    /// Index of the range the user last selected.
    pub selected_range: usize,

    // -- Published State --
    /// Latest snapshot from the windowing pipeline.
    pub state: ChartState,
    /// Sample under the tooltip cursor.
    pub cursor: Option<usize>,

    // -- UI State --
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the app with `initial` as the published state.
    pub fn new(
        symbol: impl Into<String>,
        source_label: impl Into<String>,
        initial: ChartState,
    ) -> Self {
        let selected_range = range::position(initial.window.range().label()).unwrap_or(0);
        Self {
            symbol: symbol.into(),
            source_label: source_label.into(),
            settings: Vec::new(),
            views: vec![View::Summary, View::Chart, View::Statistics, View::Settings],
            active_view: 1,
            ranges: list_ranges(),
            selected_range,
            state: initial,
            cursor: None,
            error_message: None,
            should_quit: false,
        }
    }

    /// Returns the active view.
    pub fn current_view(&self) -> View {
        self.views[self.active_view]
    }

    /// Switches to the next view.
    pub fn next_view(&mut self) {
        self.active_view = (self.active_view + 1) % self.views.len();
    }

    /// Switches to the previous view.
    pub fn previous_view(&mut self) {
        self.active_view = self
            .active_view
            .checked_sub(1)
            .unwrap_or(self.views.len() - 1);
    }

    /// Returns the label of the selected range.
    pub fn selected_label(&self) -> &str {
        self.ranges[self.selected_range].label()
    }

    /// Selects the range at `index`, returning its label to load.
    ///
    /// Selecting the current range again returns its label too, which
    /// reloads it.
    pub fn select_range_index(&mut self, index: usize) -> Option<String> {
        if index >= self.ranges.len() {
            return None;
        }
        self.selected_range = index;
        Some(self.selected_label().to_string())
    }

    /// Stores a newly published state and keeps the cursor in bounds.
    pub fn apply_state(&mut self, state: ChartState) {
        if state.generation() != self.state.generation() {
            self.cursor = None;
        }
        let len = state.window.samples().len();
        if self.cursor.is_some_and(|i| i >= len) {
            self.cursor = None;
        }
        self.state = state;
    }

    /// Moves the tooltip cursor by `delta` samples, starting at the latest.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.state.window.samples().len();
        if len == 0 {
            self.cursor = None;
            return;
        }
        let current = self.cursor.unwrap_or(len - 1);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.cursor = Some(next);
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than a few seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > std::time::Duration::from_secs(ERROR_DISPLAY_SECS)
        {
            self.error_message = None;
        }
    }
}

/// Views reachable from the tab bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Summary,
    Chart,
    Statistics,
    Settings,
}

impl View {
    /// Returns the display title for the view.
    pub fn title(&self) -> &'static str {
        match self {
            View::Summary => "Summary",
            View::Chart => "Chart",
            View::Statistics => "Statistics",
            View::Settings => "Settings",
        }
    }
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}
