use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::config::PollerConfig;
use crate::error::{Error, Result};
use crate::render::{RecordFormat, RenderTarget};
use crate::services::source::ProductSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerOptions {
    pub interval: Duration,
    /// Skip a tick while the previous cycle is still in flight.
    pub skip_overlapping: bool,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            skip_overlapping: false,
        }
    }
}

impl From<&PollerConfig> for PollerOptions {
    fn from(config: &PollerConfig) -> Self {
        Self {
            interval: config.interval(),
            skip_overlapping: config.skip_overlapping,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered(usize),
    Failed,
}

/// Fetches the product list, formats each record and replaces the target's items.
pub struct Poller<S, F, T> {
    source: S,
    format: F,
    target: T,
    options: PollerOptions,
}

impl<S, F, T> Poller<S, F, T>
where
    S: ProductSource,
    F: RecordFormat,
    T: RenderTarget,
{
    pub fn new(source: S, format: F, target: T, options: PollerOptions) -> Self {
        Self {
            source,
            format,
            target,
            options,
        }
    }

    pub fn options(&self) -> PollerOptions {
        self.options
    }

    /// One fetch-and-render pass. Failures are logged and leave the target untouched.
    pub async fn run_cycle(&self) -> CycleOutcome {
        match self.try_cycle().await {
            Ok(count) => {
                info!(items = count, "Rendered product list");
                CycleOutcome::Rendered(count)
            }
            Err(e) => {
                error!(error = %e, "Error fetching products");
                CycleOutcome::Failed
            }
        }
    }

    async fn try_cycle(&self) -> Result<usize> {
        let body = self.source.fetch().await?;

        let records: Vec<F::Record> = serde_json::from_slice(&body).map_err(|e| {
            let body_str = String::from_utf8_lossy(&body);
            debug!(error = %e, body = %body_str, "Failed to parse product list response");
            Error::from(e)
        })?;

        let items: Vec<String> = records.iter().map(|r| self.format.format(r)).collect();
        let count = items.len();
        self.target.replace_items(items);

        Ok(count)
    }

    /// Runs a cycle now and then once per interval until the handle is stopped.
    ///
    /// Must be called inside a tokio runtime. A zero interval is rejected.
    pub fn start(self) -> Result<PollerHandle> {
        if self.options.interval.is_zero() {
            return Err(Error::ZeroInterval);
        }

        let counters = Arc::new(Counters::default());
        let task = tokio::spawn(schedule(Arc::new(self), Arc::clone(&counters)));

        Ok(PollerHandle { task, counters })
    }
}

#[derive(Debug, Default)]
struct Counters {
    started: AtomicU64,
    skipped: AtomicU64,
}

async fn schedule<S, F, T>(poller: Arc<Poller<S, F, T>>, counters: Arc<Counters>)
where
    S: ProductSource,
    F: RecordFormat,
    T: RenderTarget,
{
    let guarded = poller.options.skip_overlapping;
    let in_flight = Arc::new(AtomicBool::new(false));
    // dropping the set aborts any cycle still running
    let mut cycles = JoinSet::new();

    let mut ticker = tokio::time::interval(poller.options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        while cycles.try_join_next().is_some() {}

        if guarded && in_flight.swap(true, Ordering::SeqCst) {
            counters.skipped.fetch_add(1, Ordering::SeqCst);
            debug!("Previous cycle still in flight, skipping tick");
            continue;
        }

        let cycle = counters.started.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle = cycle, "Starting cycle");

        let poller = Arc::clone(&poller);
        let in_flight = Arc::clone(&in_flight);
        cycles.spawn(async move {
            poller.run_cycle().await;
            if guarded {
                in_flight.store(false, Ordering::SeqCst);
            }
        });
    }
}

/// Owns the repeating schedule. Stopping or dropping it cancels the timer and any
/// cycle still in flight.
pub struct PollerHandle {
    task: JoinHandle<()>,
    counters: Arc<Counters>,
}

impl PollerHandle {
    pub fn cycles_started(&self) -> u64 {
        self.counters.started.load(Ordering::SeqCst)
    }

    pub fn cycles_skipped(&self) -> u64 {
        self.counters.skipped.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub async fn stop(mut self) {
        self.task.abort();
        if let Err(e) = (&mut self.task).await {
            if !e.is_cancelled() {
                error!(error = %e, "Poller task failed");
            }
        }
        info!(cycles = self.cycles_started(), "Poller stopped");
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
