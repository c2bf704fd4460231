use crate::config::ServiceFeed;
use crate::feed::{FeedFetcher, FetchError};
use crate::metrics::CycleMetrics;
use crate::status::StatusReducer;
use crate::store::SnapshotStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Result of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A fresh snapshot replaced the previous one
    Published,
    /// The fetch failed or timed out; the previous snapshot stays in place
    FailedKeepStale,
}

/// One configured feed together with everything needed to poll it.
///
/// The scheduled feed is the only writer of its snapshot store.
pub struct ScheduledFeed {
    config: ServiceFeed,
    fetcher: Arc<dyn FeedFetcher>,
    reducer: StatusReducer,
    store: Arc<SnapshotStore>,
    metrics: Arc<CycleMetrics>,
}

impl ScheduledFeed {
    pub fn new(
        config: ServiceFeed,
        fetcher: Arc<dyn FeedFetcher>,
        reducer: StatusReducer,
        metrics: Arc<CycleMetrics>,
    ) -> Self {
        metrics.add_feed(&config.name, config.poll_interval());

        Self {
            config,
            fetcher,
            reducer,
            store: Arc::new(SnapshotStore::new()),
            metrics,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ServiceFeed {
        &self.config
    }

    /// The store this feed publishes into
    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    /// Runs a single cycle and reports whether a snapshot was published
    pub async fn run_once(&self) -> bool {
        self.run_cycle().await == CycleOutcome::Published
    }

    /// Fetches the feed, reduces it and publishes the snapshot, all within
    /// the configured cycle timeout.
    ///
    /// Failures never leave the cycle: they are logged, counted, and the
    /// previously published snapshot remains visible.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let name = self.name();
        let deadline = self.config.cycle_timeout();
        let started = Instant::now();

        let cycle = async {
            let items = self.fetcher.fetch_feed(&self.config.url).await?;
            debug!("Feed {} returned {} items", name, items.len());
            Ok::<_, FetchError>(self.reducer.reduce(&items))
        };

        match timeout(deadline, cycle).await {
            Ok(Ok(snapshot)) => {
                let elapsed = started.elapsed();
                debug!(
                    "Feed {} reduced to state {} in {:?}",
                    name,
                    snapshot.state(),
                    elapsed
                );
                self.store.publish(snapshot);
                self.metrics.record_success(name, elapsed, Utc::now());
                CycleOutcome::Published
            }
            Ok(Err(e)) => {
                warn!("Feed {}: poll failed, keeping last state: {}", name, e);
                self.metrics.record_failure(name, started.elapsed());
                CycleOutcome::FailedKeepStale
            }
            Err(_) => {
                warn!(
                    "Feed {}: poll timed out after {:?}, keeping last state",
                    name, deadline
                );
                self.metrics.record_timeout(name, started.elapsed());
                CycleOutcome::FailedKeepStale
            }
        }
    }

    /// Polls the feed on its own interval until the task is aborted.
    ///
    /// The first cycle starts immediately unless a snapshot was already
    /// published, in which case it waits one full interval. A cycle that
    /// overruns the interval delays the next tick rather than bunching ticks
    /// together.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let period = self.config.poll_interval();
            let first_tick = if self.store.read().is_some() {
                Instant::now() + period
            } else {
                Instant::now()
            };
            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                "Starting feed monitor for '{}' with {}s interval",
                self.name(),
                period.as_secs()
            );

            loop {
                ticker.tick().await;
                self.run_cycle().await;
            }
        })
    }
}
