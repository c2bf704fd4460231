use super::classifier::Classifier;
use super::state::{ActiveIncident, ItemStatus, Snapshot};
use crate::feed::FeedItem;
use crate::scrapers::Scraper;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Reduces an ordered list of feed items into one current-state snapshot.
///
/// Items are scanned in feed order and the first classified item decides the
/// result: a resolution means `ok`, an outage or service issue means that
/// state with the item as the active incident. Items repeating an incident key
/// already seen in the same pass are skipped. A feed with no classified item
/// is `ok`.
#[derive(Clone)]
pub struct StatusReducer {
    scraper: Arc<dyn Scraper>,
    classifier: Arc<dyn Classifier>,
}

impl StatusReducer {
    pub fn new(scraper: Arc<dyn Scraper>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            scraper,
            classifier,
        }
    }

    /// Reduces `items` into a snapshot stamped with the current time
    pub fn reduce(&self, items: &[FeedItem]) -> Snapshot {
        self.reduce_at(items, Utc::now())
    }

    pub fn reduce_at(&self, items: &[FeedItem], reduced_at: DateTime<Utc>) -> Snapshot {
        let mut seen: HashSet<String> = HashSet::new();

        for (position, item) in items.iter().enumerate() {
            let key = self.scraper.incident_key(item);
            if !key.is_empty() && !seen.insert(key.clone()) {
                trace!("Skipping duplicate incident key '{}' at position {}", key, position);
                continue;
            }

            let Some(status) = self.classifier.classify(item) else {
                continue;
            };

            debug!(
                "Item {} ('{}') decided the feed state: {:?}",
                position,
                item.title.trim(),
                status
            );

            return match status {
                ItemStatus::Resolved => Snapshot::ok(reduced_at),
                ItemStatus::Outage | ItemStatus::ServiceIssue => Snapshot::with_incident(
                    status.service_state(),
                    self.incident_from(item),
                    reduced_at,
                ),
            };
        }

        debug!("No decisive item among {} feed items", items.len());
        Snapshot::ok(reduced_at)
    }

    fn incident_from(&self, item: &FeedItem) -> ActiveIncident {
        let (service_name, region) = self.scraper.service_info(item);
        ActiveIncident {
            service_name,
            region,
            title: item.title.trim().to_string(),
            link: item.link.clone(),
            guid: item.guid.clone(),
        }
    }
}
