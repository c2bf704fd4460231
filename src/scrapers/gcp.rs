use crate::feed::FeedItem;

const INCIDENT_URL_MARKER: &str = "status.cloud.google.com/incidents/";

/// GCP feeds carry no structured service or region.
pub fn service_info(_item: &FeedItem) -> (String, String) {
    (String::new(), String::new())
}

pub fn incident_key(item: &FeedItem) -> String {
    if item.link.contains(INCIDENT_URL_MARKER) {
        return item.link.clone();
    }
    if !item.guid.is_empty() {
        return item.guid.clone();
    }
    item.title.clone()
}
