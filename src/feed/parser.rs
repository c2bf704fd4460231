use super::fetcher::FetchError;
use super::item::FeedItem;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Parses a feed document into items, trying RSS 2.0 first and Atom second.
///
/// Item order is the document order.
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedItem>, FetchError> {
    let rss_error = match rss::Channel::read_from(body) {
        Ok(channel) => return Ok(from_rss(&channel)),
        Err(e) => e,
    };

    match atom_syndication::Feed::read_from(body) {
        Ok(feed) => Ok(from_atom(&feed)),
        Err(atom_error) => {
            debug!(
                "Document is neither RSS ({}) nor Atom ({})",
                rss_error, atom_error
            );
            Err(FetchError::Parse(format!(
                "not an RSS or Atom document: {}",
                atom_error
            )))
        }
    }
}

fn from_rss(channel: &rss::Channel) -> Vec<FeedItem> {
    channel
        .items()
        .iter()
        .map(|item| FeedItem {
            title: item.title().unwrap_or_default().to_string(),
            description: item.description().unwrap_or_default().to_string(),
            content: item.content().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
            guid: item
                .guid()
                .map(|g| g.value().to_string())
                .unwrap_or_default(),
            published: item
                .pub_date()
                .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        })
        .collect()
}

fn from_atom(feed: &atom_syndication::Feed) -> Vec<FeedItem> {
    feed.entries()
        .iter()
        .map(|entry| FeedItem {
            title: entry.title().value.clone(),
            description: entry
                .summary()
                .map(|s| s.value.clone())
                .unwrap_or_default(),
            content: entry
                .content()
                .and_then(|c| c.value())
                .unwrap_or_default()
                .to_string(),
            link: entry
                .links()
                .first()
                .map(|l| l.href().to_string())
                .unwrap_or_default(),
            guid: entry.id().to_string(),
            published: Some(
                entry
                    .published()
                    .unwrap_or_else(|| entry.updated())
                    .with_timezone(&Utc),
            ),
        })
        .collect()
}
