use super::{after_fragment, guid_link_or_title};
use crate::feed::FeedItem;

/// Status suffixes AWS appends to the GUIDs of follow-up posts, trimmed in order
const KEY_SUFFIXES: [&str; 7] = [
    "_monitoring_update",
    "_resolved",
    "_issue",
    "_outage",
    "_investigating",
    "_monitoring",
    "_update",
];

pub fn service_info(item: &FeedItem) -> (String, String) {
    parse_guid(&item.guid)
}

pub fn incident_key(item: &FeedItem) -> String {
    let key = guid_link_or_title(item);
    let mut key = after_fragment(&key);
    for suffix in KEY_SUFFIXES {
        key = key.strip_suffix(suffix).unwrap_or(key);
    }
    key.to_string()
}

/// Extracts `(service, region)` from an AWS status GUID.
///
/// Understands `https://status.aws.amazon.com/#service-region_12345` and
/// `arn:aws:health:region::event/AWS_SERVICE_eventid`. Unknown formats
/// yield empty strings.
pub fn parse_guid(guid: &str) -> (String, String) {
    let guid = after_fragment(guid);

    if guid.starts_with("arn:aws:health:") {
        let region = guid.split(':').nth(3).unwrap_or_default().to_string();
        let service = guid
            .rsplit_once('/')
            .map(|(_, event)| {
                let event = event.strip_prefix("AWS_").unwrap_or(event);
                event.split('_').next().unwrap_or_default().to_lowercase()
            })
            .unwrap_or_default();
        return (service, region);
    }

    let head = guid.split('_').next().unwrap_or_default();
    let parts: Vec<&str> = head.split('-').collect();
    if parts.len() < 2 {
        return (String::new(), String::new());
    }

    // regions look like us-east-1, so take the last three dash-separated parts
    let split = if parts.len() >= 3 { parts.len() - 3 } else { parts.len() - 1 };
    (
        parts[..split].join("-").to_lowercase(),
        parts[split..].join("-"),
    )
}
