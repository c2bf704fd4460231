use super::factory::MetricsFactory;
use super::metric_prefix;
use crate::status::{ServiceState, Snapshot};
use crate::store::SnapshotStore;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use std::sync::Arc;
use tracing::error;

const STATUS_HELP: &str = "Current service status";
const STATUS_LABELS: [&str; 3] = ["service", "customer", "state"];

const INFO_HELP: &str = "Details for active service issues";
const INFO_LABELS: [&str; 7] = [
    "service",
    "customer",
    "service_name",
    "region",
    "title",
    "link",
    "guid",
];

/// One feed as seen by the publisher
#[derive(Clone)]
struct PublishedFeed {
    name: String,
    customer: String,
    status_name: String,
    info_name: String,
    status_desc: Desc,
    info_desc: Desc,
    store: Arc<SnapshotStore>,
}

impl PublishedFeed {
    /// Projects a snapshot onto metric families; never touches the store.
    fn render(&self, snapshot: &Snapshot) -> prometheus::Result<Vec<MetricFamily>> {
        let status =
            MetricsFactory::create_gauge_vec(&self.status_name, STATUS_HELP, &STATUS_LABELS)?;
        for state in ServiceState::ALL {
            let value = if snapshot.state() == state { 1.0 } else { 0.0 };
            status
                .with_label_values(&[&self.name, &self.customer, state.as_str()])
                .set(value);
        }

        let mut families = status.collect();

        if let Some(incident) = snapshot.incident() {
            let info = MetricsFactory::create_gauge_vec(&self.info_name, INFO_HELP, &INFO_LABELS)?;
            info.with_label_values(&[
                &self.name,
                &self.customer,
                &incident.service_name,
                &incident.region,
                &incident.title,
                &incident.link,
                &incident.guid,
            ])
            .set(1.0);
            families.extend(info.collect());
        }

        Ok(families)
    }
}

/// Renders every registered feed's latest snapshot on each scrape.
///
/// Collection only reads the snapshot stores, so any number of scrapes may
/// run concurrently with each other and with the feeds publishing new
/// snapshots. Feeds that have not completed a cycle yet are left out.
#[derive(Clone, Default)]
pub struct MetricsPublisher {
    feeds: Vec<PublishedFeed>,
}

impl MetricsPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feed; must happen before the publisher is registered.
    pub fn add_feed(
        &mut self,
        name: &str,
        customer: &str,
        store: Arc<SnapshotStore>,
    ) -> prometheus::Result<()> {
        let prefix = metric_prefix(name);
        let status_name = format!("{}_service_status", prefix);
        let info_name = format!("{}_service_issue_info", prefix);

        self.feeds.push(PublishedFeed {
            name: name.to_string(),
            customer: customer.to_string(),
            status_desc: MetricsFactory::create_desc(&status_name, STATUS_HELP, &STATUS_LABELS)?,
            info_desc: MetricsFactory::create_desc(&info_name, INFO_HELP, &INFO_LABELS)?,
            status_name,
            info_name,
            store,
        });
        Ok(())
    }

    pub fn feed_count(&self) -> usize {
        self.feeds.len()
    }
}

impl Collector for MetricsPublisher {
    fn desc(&self) -> Vec<&Desc> {
        self.feeds
            .iter()
            .flat_map(|feed| [&feed.status_desc, &feed.info_desc])
            .collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut families = Vec::new();

        for feed in &self.feeds {
            let Some(snapshot) = feed.store.read() else {
                continue;
            };

            match feed.render(&snapshot) {
                Ok(rendered) => families.extend(rendered),
                Err(e) => error!("Failed to render metrics for feed '{}': {}", feed.name, e),
            }
        }

        families
    }
}
