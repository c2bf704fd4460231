//! Wires configuration, feeds and metrics into one running exporter

use crate::config::ExporterConfig;
use crate::error::ExporterError;
use crate::feed::{FeedFetcher, HttpFeedFetcher};
use crate::metrics::{self, CycleMetrics, Descriptions, MetricsPublisher};
use crate::scheduler::FeedManager;
use prometheus::core::Collector;
use prometheus::{GaugeVec, Registry};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

pub struct Exporter {
    registry: Registry,
    build_info: GaugeVec,
    cycle_metrics: Arc<CycleMetrics>,
    publisher: MetricsPublisher,
    manager: FeedManager,
}

impl Exporter {
    /// Builds an exporter that fetches feeds over HTTP
    pub fn new(config: &ExporterConfig) -> Result<Self, ExporterError> {
        let fetcher = HttpFeedFetcher::new(&config.fetch)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Builds an exporter around any feed source
    pub fn with_fetcher(
        config: &ExporterConfig,
        fetcher: Arc<dyn FeedFetcher>,
    ) -> Result<Self, ExporterError> {
        let registry = Registry::new();
        let build_info = metrics::build_info()?;
        registry.register(Box::new(build_info.clone()))?;

        let cycle_metrics = Arc::new(CycleMetrics::new()?);
        cycle_metrics.register(&registry)?;

        let manager = FeedManager::new(config, fetcher, Arc::clone(&cycle_metrics));

        let mut publisher = MetricsPublisher::new();
        for feed in manager.feeds() {
            publisher.add_feed(feed.name(), &feed.config().customer, feed.store())?;
        }
        if publisher.feed_count() > 0 {
            registry.register(Box::new(publisher.clone()))?;
        }

        info!(
            "Exporter ready with {} of {} configured services",
            publisher.feed_count(),
            config.services.len()
        );

        Ok(Self {
            registry,
            build_info,
            cycle_metrics,
            publisher,
            manager,
        })
    }

    /// Every metric family this exporter can emit
    pub fn describe(&self) -> Descriptions {
        let cycle = self.cycle_metrics.collectors();
        let mut collectors: Vec<&dyn Collector> = cycle.iter().map(|c| c.as_ref()).collect();
        collectors.push(&self.build_info);
        collectors.push(&self.publisher);
        Descriptions::from_collectors(&collectors)
    }

    /// Number of enabled feeds
    pub fn feed_count(&self) -> usize {
        self.publisher.feed_count()
    }

    /// Starts polling every enabled feed in the background
    pub fn start(&mut self) {
        self.manager.start();
    }

    /// Runs one cycle of every feed and returns how many published
    pub async fn run_all_once(&self) -> usize {
        self.manager.run_all_once().await
    }

    /// Resolves once every feed task has ended, which only happens when they
    /// are aborted or panic
    pub async fn wait(&mut self) {
        self.manager.wait().await;
    }

    /// The current exposition, as a scrape would see it
    pub fn render(&self) -> Result<String, ExporterError> {
        Ok(metrics::render(&self.registry)?)
    }

    /// Binds `addr` and serves the exposition from a background task until
    /// the listener fails
    pub async fn spawn_server(
        &self,
        addr: SocketAddr,
        telemetry_path: &str,
    ) -> Result<JoinHandle<std::io::Result<()>>, ExporterError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(tokio::spawn(metrics::serve(
            listener,
            self.registry.clone(),
            telemetry_path.to_string(),
        )))
    }

    pub fn shutdown(&mut self) {
        self.manager.shutdown();
    }
}
