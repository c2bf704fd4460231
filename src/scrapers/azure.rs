use super::after_fragment;
use crate::feed::FeedItem;

pub fn service_info(item: &FeedItem) -> (String, String) {
    if !item.guid.is_empty() {
        let (service, region) = parse_guid(&item.guid);
        if !service.is_empty() {
            return (service, region);
        }
    }

    let title = item.title.to_lowercase();
    let title = title
        .split_once(':')
        .map(|(_, rest)| rest.trim())
        .unwrap_or(&title);

    let mut parts = title.split(" - ");
    match (parts.next(), parts.next()) {
        (Some(service), Some(region)) => (service.trim().to_string(), region.trim().to_string()),
        _ => (title.trim().to_string(), String::new()),
    }
}

pub fn incident_key(item: &FeedItem) -> String {
    let key = if item.guid.is_empty() { &item.link } else { &item.guid };
    let key = after_fragment(key);
    let key = key.strip_suffix("_resolved").unwrap_or(key);
    let key = key.strip_suffix("_issue").unwrap_or(key);
    key.to_string()
}

/// Extracts `(service, region)` from a GUID shaped like `service-region_xyz`.
pub fn parse_guid(guid: &str) -> (String, String) {
    let guid = after_fragment(guid);
    let head = guid.split('_').next().unwrap_or_default();

    match head.split_once('-') {
        Some((service, region)) => (service.to_lowercase(), region.to_string()),
        None => (String::new(), String::new()),
    }
}
