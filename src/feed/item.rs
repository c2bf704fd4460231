use chrono::{DateTime, Utc};

/// A single entry from a polled status feed, normalised from RSS or Atom.
///
/// Items are kept in the order the provider published them; nothing in the
/// crate re-sorts them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    /// Full body (`content:encoded` for RSS, `<content>` for Atom)
    pub content: String,
    pub link: String,
    pub guid: String,
    pub published: Option<DateTime<Utc>>,
}

impl FeedItem {
    /// Creates an item with only a title, mostly useful in tests
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = guid.into();
        self
    }

    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = Some(published);
        self
    }

    /// Title, description and body joined by a single space.
    pub fn combined_text(&self) -> String {
        [
            self.title.trim(),
            self.description.trim(),
            self.content.trim(),
        ]
        .join(" ")
    }
}
