//! Random-walk sample generator.
//!
//! Produces one sample per hour over the requested window, ending one hour
//! before the call. Prices walk from a configured origin in steps uniform in
//! `[-500, 500)` and never go below zero; volumes are uniform in
//! `[0, 100000)`. An artificial delay simulates a remote call.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use super::SampleSource;
use crate::error::SourceError;
use crate::models::Sample;

/// Largest price step in cents (exclusive on the upper side).
const MAX_STEP_CENTS: i64 = 50_000;

/// Exclusive upper bound for generated volumes.
const MAX_VOLUME: u64 = 100_000;

/// Synthetic source used until a real market-data feed is configured.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    start_price: Decimal,
    latency: Duration,
}

impl SyntheticSource {
    /// Creates a generator walking from `start_price`, answering after `latency`.
    #[must_use]
    pub fn new(start_price: Decimal, latency: Duration) -> Self {
        Self {
            start_price,
            latency,
        }
    }
}

#[async_trait]
impl SampleSource for SyntheticSource {
    async fn fetch_samples(&self, duration_hours: u32) -> Result<Vec<Sample>, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let samples = generate(
            self.start_price,
            duration_hours,
            Utc::now(),
            &mut rand::rng(),
        );
        debug!(count = samples.len(), "generated synthetic samples");
        Ok(samples)
    }
}

/// Generates `hours` hourly samples ending one hour before `now`.
pub fn generate<R: Rng>(
    start_price: Decimal,
    hours: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Sample> {
    let mut price = start_price;
    (0..hours)
        .map(|i| {
            let step = Decimal::new(rng.random_range(-MAX_STEP_CENTS..MAX_STEP_CENTS), 2);
            price = price.saturating_add(step);
            let timestamp = now - TimeDelta::hours(i64::from(hours - i));
            Sample::new(
                timestamp,
                price.max(Decimal::ZERO),
                rng.random_range(0..MAX_VOLUME),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn one_sample_per_hour_ending_before_now() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = generate(dec!(60000), 24, now(), &mut rng);

        assert_eq!(samples.len(), 24);
        assert_eq!(samples[0].timestamp, now() - TimeDelta::hours(24));
        assert_eq!(samples[23].timestamp, now() - TimeDelta::hours(1));
        assert!(
            samples
                .windows(2)
                .all(|w| w[1].timestamp - w[0].timestamp == TimeDelta::hours(1))
        );
    }

    #[test]
    fn steps_and_volumes_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples = generate(dec!(60000), 200, now(), &mut rng);

        assert!(samples.iter().all(|s| s.volume < MAX_VOLUME));
        let first_step = (samples[0].price - dec!(60000)).abs();
        assert!(first_step <= dec!(500));
        assert!(
            samples
                .windows(2)
                .all(|w| (w[1].price - w[0].price).abs() <= dec!(500))
        );
    }

    #[test]
    fn prices_are_floored_at_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let samples = generate(Decimal::ZERO, 500, now(), &mut rng);
        assert!(samples.iter().all(|s| s.price >= Decimal::ZERO));
    }

    #[test]
    fn walk_saturates_near_decimal_max() {
        let mut rng = StdRng::seed_from_u64(9);
        let samples = generate(Decimal::MAX, 50, now(), &mut rng);
        assert_eq!(samples.len(), 50);
        assert!(samples[0].price >= Decimal::MAX - dec!(500));
    }

    #[test]
    fn zero_hours_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate(dec!(1), 0, now(), &mut rng).is_empty());
    }

    #[tokio::test]
    async fn fetch_without_latency_returns_requested_count() {
        let source = SyntheticSource::new(dec!(100), Duration::ZERO);
        let samples = source.fetch_samples(72).await.unwrap();
        assert_eq!(samples.len(), 72);
    }
}
