//! Display-ready fields derived from the published chart state.
//!
//! Formatting rules: prices with two decimals and thousands separators,
//! change lines signed (`+15.00 (16.67%)`), tooltip prices with three
//! decimals and volumes with thousands separators.

use chrono::Local;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::metrics::Metrics;
use crate::models::{Sample, SeriesWindow, WindowStatus};

/// Currency label shown next to the headline price.
pub const CURRENCY: &str = "USD";

/// Sign of the change over the window, used to pick a colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeDirection {
    /// Zero or positive change.
    Up,
    Down,
}

/// Headline shown above the chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Headline {
    pub price: String,
    pub change: String,
    pub direction: ChangeDirection,
}

/// Builds the headline from the published metrics.
pub fn headline(metrics: &Metrics) -> Headline {
    Headline {
        price: format_price(metrics.current_price),
        change: format_change(metrics),
        direction: change_direction(metrics),
    }
}

/// Returns the text shown in place of the chart, or `None` when there is
/// something to plot.
pub fn chart_message(window: &SeriesWindow) -> Option<String> {
    match window.status() {
        WindowStatus::Loading => Some("Loading...".to_string()),
        WindowStatus::Failed => Some(
            window
                .error()
                .unwrap_or("Failed to fetch data. Please try again.")
                .to_string(),
        ),
        WindowStatus::Ready if window.samples().is_empty() => Some("No data".to_string()),
        WindowStatus::Ready => None,
    }
}

pub fn change_direction(metrics: &Metrics) -> ChangeDirection {
    if metrics.change_abs >= Decimal::ZERO {
        ChangeDirection::Up
    } else {
        ChangeDirection::Down
    }
}

/// Formats a price with two decimals and thousands separators.
pub fn format_price(price: Decimal) -> String {
    format_grouped(price, 2)
}

/// Formats the change line, e.g. `+15.00 (16.67%)`.
pub fn format_change(metrics: &Metrics) -> String {
    let sign = if metrics.change_abs >= Decimal::ZERO {
        "+"
    } else {
        ""
    };
    let pct = round(metrics.change_pct, 2);
    format!("{sign}{} ({pct:.2}%)", format_price(metrics.change_abs))
}

/// Formats a volume with thousands separators.
pub fn format_volume(volume: u64) -> String {
    group_thousands(&volume.to_string())
}

/// Tooltip text for a single sample: local time, price, volume.
pub fn tooltip_lines(sample: &Sample) -> [String; 3] {
    let local = sample.timestamp.with_timezone(&Local);
    [
        local.format("%Y-%m-%d %H:%M:%S").to_string(),
        format!("Price: {:.3}", round(sample.price, 3)),
        format!("Volume: {}", format_volume(sample.volume)),
    ]
}

/// Converts samples into `(unix seconds, price)` points for plotting.
pub fn price_points(samples: &[Sample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|s| {
            (
                s.timestamp.timestamp() as f64,
                s.price.to_f64().unwrap_or(0.0),
            )
        })
        .collect()
}

/// Reduces volumes to at most `buckets` bars, keeping each bucket's peak.
pub fn volume_buckets(samples: &[Sample], buckets: usize) -> Vec<u64> {
    if buckets == 0 || samples.is_empty() {
        return Vec::new();
    }
    let per_bucket = samples.len().div_ceil(buckets);
    samples
        .chunks(per_bucket)
        .map(|chunk| chunk.iter().map(|s| s.volume).max().unwrap_or(0))
        .collect()
}

/// Returns `(min, max)` of the prices, or `None` for an empty slice.
pub fn price_bounds(samples: &[Sample]) -> Option<(Decimal, Decimal)> {
    let first = samples.first()?.price;
    Some(samples.iter().fold((first, first), |(lo, hi), s| {
        (lo.min(s.price), hi.max(s.price))
    }))
}

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn format_grouped(value: Decimal, dp: u32) -> String {
    let rounded = round(value, dp);
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if frac.is_empty() {
        format!("{sign}{}", group_thousands(int))
    } else {
        format!("{sign}{}.{frac}", group_thousands(int))
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn price_has_two_decimals() {
        assert_eq!(format_price(dec!(60000)), "60,000.00");
        assert_eq!(format_price(dec!(1234.567)), "1,234.57");
        assert_eq!(format_price(dec!(0.005)), "0.01");
        assert_eq!(format_price(dec!(-1500.5)), "-1,500.50");
        assert_eq!(format_price(dec!(-0.001)), "0.00");
    }

    #[test]
    fn volume_is_grouped() {
        assert_eq!(format_volume(0), "0");
        assert_eq!(format_volume(99_999), "99,999");
    }

    #[test]
    fn change_line_is_signed() {
        let up = Metrics {
            current_price: dec!(105),
            change_abs: dec!(15),
            change_pct: dec!(15) / dec!(90) * dec!(100),
        };
        assert_eq!(format_change(&up), "+15.00 (16.67%)");
        assert_eq!(change_direction(&up), ChangeDirection::Up);

        let down = Metrics {
            current_price: dec!(150),
            change_abs: dec!(-50),
            change_pct: dec!(-25),
        };
        assert_eq!(format_change(&down), "-50.00 (-25.00%)");
        assert_eq!(change_direction(&down), ChangeDirection::Down);
    }

    #[test]
    fn zero_change_counts_as_up() {
        let flat = Metrics::default();
        assert_eq!(format_change(&flat), "+0.00 (0.00%)");
        assert_eq!(headline(&flat).direction, ChangeDirection::Up);
        assert_eq!(headline(&flat).price, "0.00");
    }

    #[test]
    fn bounds_of_prices() {
        use chrono::{TimeZone, Utc};
        let t = |h: i64| Utc.timestamp_opt(h * 3_600, 0).unwrap();
        let samples = [
            Sample::new(t(1), dec!(5), 0),
            Sample::new(t(2), dec!(2), 0),
            Sample::new(t(3), dec!(9), 0),
        ];
        assert_eq!(price_bounds(&samples), Some((dec!(2), dec!(9))));
        assert_eq!(price_bounds(&[]), None);
        assert_eq!(price_points(&samples)[2], (10_800.0, 9.0));
    }

    #[test]
    fn volume_buckets_keep_peaks() {
        use chrono::{TimeZone, Utc};
        let samples: Vec<Sample> = (0..10)
            .map(|h| Sample::new(Utc.timestamp_opt(h * 3_600, 0).unwrap(), dec!(1), h as u64))
            .collect();
        assert_eq!(volume_buckets(&samples, 20).len(), 10);
        assert_eq!(volume_buckets(&samples, 4), vec![2, 5, 8, 9]);
        assert_eq!(volume_buckets(&samples, 1), vec![9]);
        assert!(volume_buckets(&samples, 0).is_empty());
    }
}
