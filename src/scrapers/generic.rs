use super::guid_link_or_title;
use crate::feed::FeedItem;

pub fn service_info(_item: &FeedItem) -> (String, String) {
    (String::new(), String::new())
}

pub fn incident_key(item: &FeedItem) -> String {
    guid_link_or_title(item)
}
