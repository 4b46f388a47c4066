//! Shared test sources and sample builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tokio::sync::oneshot;

use pricechart::SourceError;
use pricechart::models::Sample;
use pricechart::source::SampleSource;

pub type Reply = Result<Vec<Sample>, SourceError>;

/// Timestamp `hour` hours after the epoch.
pub fn at(hour: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(hour * 3_600, 0).unwrap()
}

pub fn sample(hour: i64, price: Decimal, volume: u64) -> Sample {
    Sample::new(at(hour), price, volume)
}

/// Source whose answers are released by the test, one gate per duration.
///
/// A call for a duration without a gate answers with no samples.
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<HashMap<u32, oneshot::Receiver<Reply>>>,
    calls: AtomicUsize,
}

impl GatedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Installs a gate for `duration_hours` and returns its release handle.
    pub fn gate(&self, duration_hours: u32) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(duration_hours, rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SampleSource for GatedSource {
    async fn fetch_samples(&self, duration_hours: u32) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().remove(&duration_hours);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(SourceError::Transport("gate dropped".to_string()))),
            None => Ok(Vec::new()),
        }
    }
}

/// Source that answers every call the same way.
pub struct StaticSource {
    reply: Result<Vec<Sample>, String>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn ok(samples: Vec<Sample>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(samples),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SampleSource for StaticSource {
    async fn fetch_samples(&self, _duration_hours: u32) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(SourceError::Transport)
    }
}
