//! The current range's sample sequence and its load status.

use super::range::Range;
use super::sample::Sample;

/// Load status of a [`SeriesWindow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowStatus {
    Loading,
    Ready,
    Failed,
}

impl WindowStatus {
    /// Returns a display string for the status.
    pub fn label(&self) -> &'static str {
        match self {
            WindowStatus::Loading => "Loading...",
            WindowStatus::Ready => "Ready",
            WindowStatus::Failed => "Failed",
        }
    }
}

/// Normalized samples for one range plus load status.
///
/// Windows are never edited after construction: a new selection or a retry
/// produces a fresh window. Only `Ready` windows carry samples, and only
/// `Failed` windows carry an error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesWindow {
    range: Range,
    samples: Vec<Sample>,
    status: WindowStatus,
    error: Option<String>,
}

impl SeriesWindow {
    /// A window whose samples are still being fetched.
    pub fn loading(range: Range) -> Self {
        Self {
            range,
            samples: Vec::new(),
            status: WindowStatus::Loading,
            error: None,
        }
    }

    /// A successfully loaded window. `samples` must already be normalized.
    pub fn ready(range: Range, samples: Vec<Sample>) -> Self {
        Self {
            range,
            samples,
            status: WindowStatus::Ready,
            error: None,
        }
    }

    /// A window whose load failed.
    pub fn failed(range: Range, error: impl Into<String>) -> Self {
        Self {
            range,
            samples: Vec::new(),
            status: WindowStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn status(&self) -> WindowStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == WindowStatus::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.status == WindowStatus::Ready
    }

    pub fn is_failed(&self) -> bool {
        self.status == WindowStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    fn range() -> Range {
        Range::new("1d", 24)
    }

    #[test]
    fn loading_window_is_empty() {
        let window = SeriesWindow::loading(range());
        assert!(window.is_loading());
        assert!(window.samples().is_empty());
        assert!(window.error().is_none());
    }

    #[test]
    fn empty_ready_window_is_not_failed() {
        let window = SeriesWindow::ready(range(), Vec::new());
        assert!(window.is_ready());
        assert!(!window.is_failed());
        assert!(window.error().is_none());
    }

    #[test]
    fn failed_window_has_message_and_no_samples() {
        let window = SeriesWindow::failed(range(), "timeout");
        assert_eq!(window.status(), WindowStatus::Failed);
        assert_eq!(window.error(), Some("timeout"));
        assert!(window.samples().is_empty());
    }

    #[test]
    fn ready_window_keeps_samples() {
        let t = Utc.timestamp_opt(3_600, 0).unwrap();
        let window = SeriesWindow::ready(range(), vec![Sample::new(t, dec!(1.5), 10)]);
        assert_eq!(window.samples().len(), 1);
        assert_eq!(window.range().label(), "1d");
    }
}
