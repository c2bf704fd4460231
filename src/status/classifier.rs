use super::state::ItemStatus;
use crate::config::models::StatusMarkersConfig;
use crate::feed::FeedItem;

/// Decides what a single feed item says about the service.
///
/// Implementations must be deterministic: the same item always yields the same
/// classification. `None` means the item carries no recognised status.
pub trait Classifier: Send + Sync {
    fn classify(&self, item: &FeedItem) -> Option<ItemStatus>;
}

/// One status and the markers that indicate it
#[derive(Debug, Clone)]
struct MarkerRule {
    status: ItemStatus,
    markers: Vec<String>,
}

/// Case-insensitive substring classifier over title, description and body.
///
/// Rules are checked in precedence order and the first rule with a matching
/// marker wins, so with the default precedence an item mentioning both
/// "outage" and "resolved" is resolved.
#[derive(Debug, Clone)]
pub struct MarkerClassifier {
    rules: Vec<MarkerRule>,
}

impl MarkerClassifier {
    pub fn from_config(config: &StatusMarkersConfig) -> Self {
        let rules = config
            .precedence
            .iter()
            .map(|status| MarkerRule {
                status: *status,
                markers: config
                    .markers_for(*status)
                    .iter()
                    .map(|m| m.trim().to_lowercase())
                    .filter(|m| !m.is_empty())
                    .collect(),
            })
            .collect();

        Self { rules }
    }
}

impl Default for MarkerClassifier {
    fn default() -> Self {
        Self::from_config(&StatusMarkersConfig::default())
    }
}

impl Classifier for MarkerClassifier {
    fn classify(&self, item: &FeedItem) -> Option<ItemStatus> {
        let text = item.combined_text().to_lowercase();
        if text.trim().is_empty() {
            return None;
        }

        self.rules
            .iter()
            .find(|rule| rule.markers.iter().any(|m| text.contains(m.as_str())))
            .map(|rule| rule.status)
    }
}
