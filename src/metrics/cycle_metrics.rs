use super::factory::MetricsFactory;
use crate::constants::metrics::{CYCLE_DURATION_BUCKETS, FEED_LABEL, NAMESPACE};
use chrono::{DateTime, Utc};
use prometheus::core::Collector;
use prometheus::{CounterVec, GaugeVec, HistogramVec, Registry};
use std::time::Duration;
use tracing::debug;

/// Bookkeeping metrics for the poll cycles of every feed
#[derive(Clone)]
pub struct CycleMetrics {
    frequency_seconds: GaugeVec,
    success: GaugeVec,
    last_success_seconds: GaugeVec,
    total: CounterVec,
    failed: CounterVec,
    timeouts: CounterVec,
    duration_seconds: HistogramVec,
}

impl CycleMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let labels = [FEED_LABEL];
        let name = |suffix: &str| format!("{}_{}", NAMESPACE, suffix);

        Ok(Self {
            frequency_seconds: MetricsFactory::create_gauge_vec(
                &name("scrape_frequency_seconds"),
                "Configured poll interval of the feed",
                &labels,
            )?,
            success: MetricsFactory::create_gauge_vec(
                &name("scrape_success"),
                "Was the last poll cycle successful",
                &labels,
            )?,
            last_success_seconds: MetricsFactory::create_gauge_vec(
                &name("scrape_last_success_seconds"),
                "Unix timestamp of the last successful poll cycle",
                &labels,
            )?,
            total: MetricsFactory::create_counter_vec(
                &name("scrape_total"),
                "Total number of poll cycles",
                &labels,
            )?,
            failed: MetricsFactory::create_counter_vec(
                &name("scrape_failed_total"),
                "Total number of failed poll cycles",
                &labels,
            )?,
            timeouts: MetricsFactory::create_counter_vec(
                &name("scrape_timeout_total"),
                "Total number of poll cycles that timed out",
                &labels,
            )?,
            duration_seconds: MetricsFactory::create_histogram_vec(
                &name("scrape_duration_seconds"),
                "Poll cycle duration in seconds",
                &labels,
                &CYCLE_DURATION_BUCKETS,
            )?,
        })
    }

    /// Every family, as collectors
    pub fn collectors(&self) -> Vec<Box<dyn Collector>> {
        vec![
            Box::new(self.frequency_seconds.clone()),
            Box::new(self.success.clone()),
            Box::new(self.last_success_seconds.clone()),
            Box::new(self.total.clone()),
            Box::new(self.failed.clone()),
            Box::new(self.timeouts.clone()),
            Box::new(self.duration_seconds.clone()),
        ]
    }

    /// Registers every family with `registry`
    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        for collector in self.collectors() {
            registry.register(collector)?;
        }
        Ok(())
    }

    /// Initialises the series of a feed so counters show up as zero before
    /// its first cycle
    pub fn add_feed(&self, feed: &str, interval: Duration) {
        self.frequency_seconds
            .with_label_values(&[feed])
            .set(interval.as_secs_f64());
        self.total.with_label_values(&[feed]);
        self.failed.with_label_values(&[feed]);
        self.timeouts.with_label_values(&[feed]);
    }

    pub fn record_success(&self, feed: &str, duration: Duration, at: DateTime<Utc>) {
        self.observe(feed, duration);
        self.success.with_label_values(&[feed]).set(1.0);
        self.last_success_seconds
            .with_label_values(&[feed])
            .set(at.timestamp() as f64);

        debug!("Recorded successful cycle for {} in {:?}", feed, duration);
    }

    pub fn record_failure(&self, feed: &str, duration: Duration) {
        self.observe(feed, duration);
        self.failed.with_label_values(&[feed]).inc();
        self.success.with_label_values(&[feed]).set(0.0);
    }

    /// A timeout is a failure that is additionally counted on its own
    pub fn record_timeout(&self, feed: &str, duration: Duration) {
        self.record_failure(feed, duration);
        self.timeouts.with_label_values(&[feed]).inc();
    }

    fn observe(&self, feed: &str, duration: Duration) {
        self.total.with_label_values(&[feed]).inc();
        self.duration_seconds
            .with_label_values(&[feed])
            .observe(duration.as_secs_f64());
    }

    pub fn total(&self, feed: &str) -> u64 {
        self.total.with_label_values(&[feed]).get() as u64
    }

    pub fn failed(&self, feed: &str) -> u64 {
        self.failed.with_label_values(&[feed]).get() as u64
    }

    pub fn timeouts(&self, feed: &str) -> u64 {
        self.timeouts.with_label_values(&[feed]).get() as u64
    }
}
