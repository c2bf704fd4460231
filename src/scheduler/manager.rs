use super::scheduled_feed::ScheduledFeed;
use crate::config::ExporterConfig;
use crate::feed::FeedFetcher;
use crate::metrics::CycleMetrics;
use crate::scrapers::Provider;
use crate::status::{MarkerClassifier, StatusReducer};
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Owns one scheduled feed per enabled service and their polling tasks
pub struct FeedManager {
    feeds: Vec<Arc<ScheduledFeed>>,
    handles: Vec<JoinHandle<()>>,
}

impl FeedManager {
    /// Builds the scheduled feeds for every enabled service. Nothing is
    /// polled until [`FeedManager::start`] is called.
    pub fn new(
        config: &ExporterConfig,
        fetcher: Arc<dyn FeedFetcher>,
        metrics: Arc<CycleMetrics>,
    ) -> Self {
        let classifier = Arc::new(MarkerClassifier::from_config(&config.status_markers));
        let mut feeds = Vec::new();

        for service in &config.services {
            if !service.enabled {
                warn!("Service '{}' is disabled, skipping", service.name);
                continue;
            }

            let provider = Provider::resolve(&service.provider, &service.name);
            info!(
                "Configured service '{}' (provider: {}, interval: {}s, timeout: {}s)",
                service.name,
                provider,
                service.poll_interval().as_secs(),
                service.cycle_timeout().as_secs()
            );

            let reducer = StatusReducer::new(Arc::new(provider), classifier.clone());
            feeds.push(Arc::new(ScheduledFeed::new(
                service.clone(),
                Arc::clone(&fetcher),
                reducer,
                Arc::clone(&metrics),
            )));
        }

        Self {
            feeds,
            handles: Vec::new(),
        }
    }

    pub fn feeds(&self) -> &[Arc<ScheduledFeed>] {
        &self.feeds
    }

    /// Spawns the polling task of every feed; each runs independently
    pub fn start(&mut self) {
        info!("Starting feed manager with {} feeds", self.feeds.len());

        for feed in &self.feeds {
            self.handles.push(Arc::clone(feed).spawn());
        }
    }

    /// Runs one cycle of every feed concurrently and returns how many
    /// published a snapshot
    pub async fn run_all_once(&self) -> usize {
        let results = join_all(self.feeds.iter().map(|feed| feed.run_once())).await;
        results.into_iter().filter(|published| *published).count()
    }

    /// Waits for the polling tasks; they only end when aborted or on panic
    pub async fn wait(&mut self) {
        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!("Feed task ended unexpectedly: {}", e);
                }
            }
        }
    }

    /// Aborts every polling task
    pub fn shutdown(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("Feed manager stopped");
    }
}

impl Drop for FeedManager {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}
