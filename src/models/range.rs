//! Catalog of selectable look-back windows.

use std::borrow::Cow;
use std::fmt;

use crate::{ChartError, Result};

/// A named look-back window (e.g. `"1w"`) and its length in hours.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    label: Cow<'static, str>,
    duration_hours: u32,
}

impl Range {
    /// Creates a range outside of the catalog.
    ///
    /// No validation happens here; a zero duration is rejected when the
    /// range is loaded.
    pub fn new(label: impl Into<Cow<'static, str>>, duration_hours: u32) -> Self {
        Self {
            label: label.into(),
            duration_hours,
        }
    }

    const fn catalog(label: &'static str, duration_hours: u32) -> Self {
        Self {
            label: Cow::Borrowed(label),
            duration_hours,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the window length in hours.
    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}h)", self.label, self.duration_hours)
    }
}

/// Catalog entries in display order.
static CATALOG: [Range; 7] = [
    Range::catalog("1d", 24),
    Range::catalog("3d", 3 * 24),
    Range::catalog("1w", 7 * 24),
    Range::catalog("1m", 30 * 24),
    Range::catalog("6m", 180 * 24),
    Range::catalog("1y", 365 * 24),
    Range::catalog("max", 2 * 365 * 24),
];

/// Label selected when nothing else is configured.
pub const DEFAULT_RANGE: &str = "1w";

/// Returns every selectable range in display order.
pub fn list_ranges() -> &'static [Range] {
    &CATALOG
}

/// Looks up a range by label.
///
/// # Errors
///
/// Returns [`ChartError::UnknownRange`] if the label is not in the catalog.
pub fn resolve(label: &str) -> Result<Range> {
    CATALOG
        .iter()
        .find(|r| r.label() == label)
        .cloned()
        .ok_or_else(|| ChartError::UnknownRange(label.to_string()))
}

/// Returns the catalog index of a label, if present.
pub fn position(label: &str) -> Option<usize> {
    CATALOG.iter().position(|r| r.label() == label)
}

/// Returns the range shown on startup.
pub fn default_range() -> Range {
    Range::catalog(DEFAULT_RANGE, 7 * 24)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_is_in_display_order() {
        let labels: Vec<String> = list_ranges()
            .iter()
            .map(|r| r.label().to_string())
            .collect();
        assert_eq!(labels, ["1d", "3d", "1w", "1m", "6m", "1y", "max"]);
    }

    #[test]
    fn labels_are_unique_and_durations_positive() {
        let ranges = list_ranges();
        let labels: HashSet<&str> = ranges.iter().map(Range::label).collect();
        assert_eq!(labels.len(), ranges.len());
        assert!(ranges.iter().all(|r| r.duration_hours() > 0));
    }

    #[test]
    fn durations_grow_monotonically() {
        let ranges = list_ranges();
        assert!(
            ranges
                .windows(2)
                .all(|w| w[0].duration_hours() < w[1].duration_hours())
        );
    }

    #[test]
    fn resolve_known_label() {
        let range = resolve("1m").unwrap();
        assert_eq!(range.label(), "1m");
        assert_eq!(range.duration_hours(), 720);
    }

    #[test]
    fn resolve_unknown_label_fails() {
        let err = resolve("2w").unwrap_err();
        assert!(matches!(err, ChartError::UnknownRange(ref l) if l == "2w"));
    }

    #[test]
    fn default_range_is_in_catalog() {
        assert_eq!(resolve(DEFAULT_RANGE).unwrap(), default_range());
        assert_eq!(position(DEFAULT_RANGE), Some(2));
    }

    #[test]
    fn list_ranges_is_shared() {
        assert!(std::ptr::eq(list_ranges(), list_ranges()));
        assert_eq!(Range::new(String::from("1w"), 168), default_range());
    }

    #[test]
    fn display_includes_hours() {
        assert_eq!(resolve("3d").unwrap().to_string(), "3d (72h)");
    }
}
