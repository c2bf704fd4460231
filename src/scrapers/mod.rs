//! Provider-specific extraction strategies
//!
//! A [`Scraper`] pulls the affected service name and region out of a feed item
//! and supplies the key used to de-duplicate repeated publications of one
//! incident. The strategy for a feed is chosen once, from its configured
//! provider, via [`Provider::resolve`].

pub mod aws;
pub mod azure;
pub mod gcp;
pub mod generic;

use crate::feed::FeedItem;
use std::fmt;

/// Extracts provider-specific information from a feed item
pub trait Scraper: Send + Sync {
    /// Returns `(service_name, region)`; either may be empty when unknown.
    fn service_info(&self, item: &FeedItem) -> (String, String);

    /// Returns a stable identifier for the incident this item reports on.
    /// Items sharing a non-empty key are treated as one occurrence.
    fn incident_key(&self, item: &FeedItem) -> String;
}

/// The supported feed providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
    /// Unknown providers: no service/region extraction
    Generic,
}

impl Provider {
    /// Selects the provider for a configured feed.
    ///
    /// The provider name wins when set; otherwise the service name is searched
    /// for a known provider. Anything unrecognised is [`Provider::Generic`].
    pub fn resolve(provider: &str, service_name: &str) -> Self {
        let provider = provider.trim().to_lowercase();
        if !provider.is_empty() {
            return Self::from_name(&provider).unwrap_or(Self::Generic);
        }

        let service = service_name.to_lowercase();
        [Self::Aws, Self::Gcp, Self::Azure]
            .into_iter()
            .find(|p| service.contains(p.as_str()))
            .unwrap_or(Self::Generic)
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "aws" => Some(Self::Aws),
            "azure" => Some(Self::Azure),
            "gcp" => Some(Self::Gcp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Scraper for Provider {
    fn service_info(&self, item: &FeedItem) -> (String, String) {
        match self {
            Self::Aws => aws::service_info(item),
            Self::Azure => azure::service_info(item),
            Self::Gcp => gcp::service_info(item),
            Self::Generic => generic::service_info(item),
        }
    }

    fn incident_key(&self, item: &FeedItem) -> String {
        match self {
            Self::Aws => aws::incident_key(item),
            Self::Azure => azure::incident_key(item),
            Self::Gcp => gcp::incident_key(item),
            Self::Generic => generic::incident_key(item),
        }
    }
}

/// First non-empty of GUID, link, trimmed title.
pub(crate) fn guid_link_or_title(item: &FeedItem) -> String {
    [item.guid.as_str(), item.link.as_str(), item.title.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Text after the first `#`, or the whole string when there is none.
pub(crate) fn after_fragment(key: &str) -> &str {
    key.split_once('#').map(|(_, rest)| rest).unwrap_or(key)
}
