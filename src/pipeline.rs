//! Windowing pipeline: range selection to published, normalized samples.
//!
//! The pipeline owns the single "current window" cell, a
//! [`tokio::sync::watch`] channel holding a [`ChartState`]. Every load bumps
//! a request generation stored in that cell and publishes a `Loading`
//! window; its completion is written back only if the generation is still
//! current. Both writes happen under the channel's lock, so a late result
//! for a superseded range is dropped and readers never see a half-updated
//! state.
//!
//! Metrics follow a keep-stale policy: they are recomputed whenever a
//! `Ready` window is published and left untouched by `Loading` and `Failed`
//! windows.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::metrics::{Metrics, compute_metrics};
use crate::models::{Range, Sample, SeriesWindow, range};
use crate::source::SampleSource;
use crate::{ChartError, Result};

/// Snapshot published to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartState {
    pub window: SeriesWindow,
    /// Metrics of the most recent `Ready` window, zero if none has loaded.
    pub metrics: Metrics,
    generation: u64,
}

impl ChartState {
    fn new(range: Range) -> Self {
        Self {
            window: SeriesWindow::loading(range),
            metrics: Metrics::default(),
            generation: 0,
        }
    }

    /// Request generation that produced this state. Zero before any load.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Loads windows from a [`SampleSource`] and publishes the current one.
///
/// Cloning is cheap; clones share the same source and state cell.
#[derive(Clone)]
pub struct WindowPipeline {
    source: Arc<dyn SampleSource>,
    state: Arc<watch::Sender<ChartState>>,
}

impl WindowPipeline {
    /// Creates a pipeline whose initial state is an unloaded `initial` window.
    pub fn new(source: Arc<dyn SampleSource>, initial: Range) -> Self {
        let (tx, _rx) = watch::channel(ChartState::new(initial));
        Self {
            source,
            state: Arc::new(tx),
        }
    }

    /// Returns a receiver notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<ChartState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> ChartState {
        self.state.borrow().clone()
    }

    /// Resolves `label` and starts loading it in a background task.
    ///
    /// The `Loading` window is published before this returns, so a later
    /// selection always supersedes this one regardless of task scheduling.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::UnknownRange`] if the label is not in the
    /// catalog. No source call is made in that case.
    pub fn select_range(&self, label: &str) -> Result<JoinHandle<SeriesWindow>> {
        let range = range::resolve(label)?;
        self.spawn_load(range)
    }

    /// Reloads the current range in a background task.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidRange`] if the current range has a zero
    /// duration.
    pub fn retry(&self) -> Result<JoinHandle<SeriesWindow>> {
        let range = self.state.borrow().window.range().clone();
        info!(range = %range, "Retrying window load");
        self.spawn_load(range)
    }

    /// Loads `range` and returns the resulting window.
    ///
    /// Source failures are not errors here: they produce a `Failed` window.
    /// The returned window is published only if no newer load started in
    /// the meantime.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidRange`] if `range` has a zero duration;
    /// nothing is published and no source call is made.
    pub async fn load_window(&self, range: Range) -> Result<SeriesWindow> {
        let generation = self.begin(&range)?;
        Ok(self.fetch_and_publish(generation, range).await)
    }

    fn spawn_load(&self, range: Range) -> Result<JoinHandle<SeriesWindow>> {
        let generation = self.begin(&range)?;
        let pipeline = self.clone();
        Ok(tokio::spawn(async move {
            pipeline.fetch_and_publish(generation, range).await
        }))
    }

    /// Validates the range, bumps the generation and publishes `Loading`.
    fn begin(&self, range: &Range) -> Result<u64> {
        if range.duration_hours() == 0 {
            return Err(ChartError::InvalidRange(range.label().to_string()));
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.window = SeriesWindow::loading(range.clone());
        });
        info!(range = %range, generation, "Loading window");
        Ok(generation)
    }

    async fn fetch_and_publish(&self, generation: u64, range: Range) -> SeriesWindow {
        let window = match self.source.fetch_samples(range.duration_hours()).await {
            Ok(raw) => {
                let received = raw.len();
                let samples = normalize(raw);
                debug!(received, kept = samples.len(), "normalized samples");
                SeriesWindow::ready(range, samples)
            }
            Err(e) => {
                warn!(range = %range, "Sample source failed: {e}");
                SeriesWindow::failed(range, e.to_string())
            }
        };

        self.publish(generation, window.clone());
        window
    }

    /// Writes a completed window if `generation` is still current.
    fn publish(&self, generation: u64, window: SeriesWindow) -> bool {
        let label = window.range().label().to_string();
        let status = window.status();

        let published = self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            if window.is_ready() {
                state.metrics = compute_metrics(window.samples());
            }
            state.window = window;
            true
        });

        if published {
            info!(range = %label, status = status.label(), generation, "Published window");
        } else {
            debug!(range = %label, generation, "Dropped stale window");
        }
        published
    }
}

/// Puts raw samples into canonical order.
///
/// Samples are sorted by ascending timestamp. When several share a
/// timestamp the one supplied last wins. Negative prices are clamped to
/// zero. The result is strictly increasing in timestamp, and normalizing it
/// again returns it unchanged.
pub fn normalize(mut raw: Vec<Sample>) -> Vec<Sample> {
    // Stable sort keeps arrival order among equal timestamps.
    raw.sort_by_key(|s| s.timestamp);

    let mut samples: Vec<Sample> = Vec::with_capacity(raw.len());
    for mut sample in raw {
        sample.price = sample.price.max(Decimal::ZERO);
        match samples.last_mut() {
            Some(last) if last.timestamp == sample.timestamp => *last = sample,
            _ => samples.push(sample),
        }
    }
    samples
}
