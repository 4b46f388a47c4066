//! Summary values derived from a normalized sample sequence.

use rust_decimal::Decimal;

use crate::models::Sample;

/// Current price and change over the window.
///
/// All fields are zero for an empty sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    pub current_price: Decimal,
    pub change_abs: Decimal,
    /// Percentage change relative to the first price, unrounded.
    pub change_pct: Decimal,
}

/// Derives [`Metrics`] from an ordered sequence.
///
/// Never panics. `change_pct` is zero when the first price is zero. A value
/// outside the `Decimal` range saturates to `Decimal::MAX` or `Decimal::MIN`
/// with the sign of the change.
pub fn compute_metrics(samples: &[Sample]) -> Metrics {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Metrics::default();
    };

    let change_abs = last.price.saturating_sub(first.price);
    let change_pct = if first.price.is_zero() {
        Decimal::ZERO
    } else {
        change_abs
            .checked_div(first.price)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or_else(|| {
                saturate(change_abs.is_sign_negative() != first.price.is_sign_negative())
            })
    };

    Metrics {
        current_price: last.price,
        change_abs,
        change_pct,
    }
}

fn saturate(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    fn at(hour: i64, price: Decimal) -> Sample {
        Sample::new(Utc.timestamp_opt(hour * 3_600, 0).unwrap(), price, 0)
    }

    #[test]
    fn empty_sequence_is_all_zero() {
        assert_eq!(compute_metrics(&[]), Metrics::default());
    }

    #[test]
    fn single_sample_has_no_change() {
        let m = compute_metrics(&[at(1, dec!(42.5))]);
        assert_eq!(m.current_price, dec!(42.5));
        assert_eq!(m.change_abs, Decimal::ZERO);
        assert_eq!(m.change_pct, Decimal::ZERO);
    }

    #[test]
    fn change_uses_first_and_last() {
        let m = compute_metrics(&[at(1, dec!(90)), at(2, dec!(200)), at(3, dec!(105))]);
        assert_eq!(m.current_price, dec!(105));
        assert_eq!(m.change_abs, dec!(15));
        assert_eq!(m.change_pct.round_dp(2), dec!(16.67));
    }

    #[test]
    fn change_abs_is_exact() {
        let m = compute_metrics(&[at(1, dec!(0.1)), at(2, dec!(0.3))]);
        assert_eq!(m.change_abs, dec!(0.2));
    }

    #[test]
    fn falling_price_gives_negative_change() {
        let m = compute_metrics(&[at(1, dec!(200)), at(2, dec!(150))]);
        assert_eq!(m.change_abs, dec!(-50));
        assert_eq!(m.change_pct, dec!(-25));
    }

    #[test]
    fn zero_first_price_gives_zero_pct() {
        let m = compute_metrics(&[at(1, Decimal::ZERO), at(2, dec!(10))]);
        assert_eq!(m.change_abs, dec!(10));
        assert_eq!(m.change_pct, Decimal::ZERO);
    }

    #[test]
    fn huge_rise_saturates_pct() {
        let m = compute_metrics(&[at(1, Decimal::ONE), at(2, Decimal::MAX)]);
        assert_eq!(m.current_price, Decimal::MAX);
        assert_eq!(m.change_abs, Decimal::MAX - Decimal::ONE);
        assert_eq!(m.change_pct, Decimal::MAX);
    }

    #[test]
    fn tiny_first_price_saturates_pct() {
        let m = compute_metrics(&[
            at(1, dec!(0.00000000000000000001)),
            at(2, dec!(1000000000)),
        ]);
        assert_eq!(m.current_price, dec!(1000000000));
        assert_eq!(m.change_pct, Decimal::MAX);
    }

    #[test]
    fn change_abs_saturates_on_unclamped_input() {
        let m = compute_metrics(&[at(1, Decimal::MIN), at(2, Decimal::MAX)]);
        assert_eq!(m.change_abs, Decimal::MAX);
        assert_eq!(m.change_pct, dec!(-100));
    }
}
