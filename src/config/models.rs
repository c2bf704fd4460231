use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::constants::{fetch, schedule};
use crate::status::ItemStatus;

/// The main configuration structure for the exporter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExporterConfig {
    /// Status feeds to poll
    #[serde(default)]
    #[validate]
    pub services: Vec<ServiceFeed>,

    /// Marker table used to classify feed items
    #[serde(default)]
    pub status_markers: StatusMarkersConfig,

    /// Feed transport settings shared by all services
    #[serde(default)]
    #[validate]
    pub fetch: FetchConfig,
}

/// Configuration for a single RSS/Atom status feed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceFeed {
    /// Feed name, used as the metric prefix and the `service` label
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub name: String,

    /// Provider selecting the extraction strategy (aws, azure, gcp, ...)
    #[serde(default)]
    pub provider: String,

    /// Value of the `customer` label
    #[serde(default)]
    pub customer: String,

    /// Feed URL
    #[validate(custom = "validate_feed_url")]
    pub url: String,

    /// Poll interval in seconds; unset or non-positive means the default
    #[serde(default)]
    pub interval: i64,

    /// Deadline for one poll cycle in seconds; unset or non-positive means
    /// the default
    #[serde(default)]
    pub timeout: i64,

    /// Disabled services are loaded but never polled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ServiceFeed {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(positive_or(self.interval, schedule::DEFAULT_INTERVAL_SECS))
    }

    pub fn cycle_timeout(&self) -> Duration {
        Duration::from_secs(positive_or(self.timeout, schedule::DEFAULT_TIMEOUT_SECS))
    }
}

fn positive_or(value: i64, default: u64) -> u64 {
    if value > 0 {
        value as u64
    } else {
        default
    }
}

/// Classifier policy: which markers indicate which item status, and which
/// status wins when an item carries several
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMarkersConfig {
    #[serde(default = "default_precedence")]
    pub precedence: Vec<ItemStatus>,

    #[serde(default = "default_resolved_markers")]
    pub resolved: Vec<String>,

    #[serde(default = "default_outage_markers")]
    pub outage: Vec<String>,

    #[serde(default = "default_service_issue_markers")]
    pub service_issue: Vec<String>,
}

impl StatusMarkersConfig {
    pub fn markers_for(&self, status: ItemStatus) -> &[String] {
        match status {
            ItemStatus::Resolved => &self.resolved,
            ItemStatus::Outage => &self.outage,
            ItemStatus::ServiceIssue => &self.service_issue,
        }
    }
}

impl Default for StatusMarkersConfig {
    fn default() -> Self {
        Self {
            precedence: default_precedence(),
            resolved: default_resolved_markers(),
            outage: default_outage_markers(),
            service_issue: default_service_issue_markers(),
        }
    }
}

fn default_precedence() -> Vec<ItemStatus> {
    vec![
        ItemStatus::Resolved,
        ItemStatus::Outage,
        ItemStatus::ServiceIssue,
    ]
}

fn default_resolved_markers() -> Vec<String> {
    vec!["resolved".to_string()]
}

fn default_outage_markers() -> Vec<String> {
    vec!["outage".to_string()]
}

fn default_service_issue_markers() -> Vec<String> {
    [
        "service issue",
        "service impact",
        "service_issue",
        "service_impact",
        "investigating",
        "monitoring",
        "elevated error",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

/// Feed transport configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FetchConfig {
    /// Attempts per fetch (default: 3)
    #[serde(default = "default_max_attempts")]
    #[validate(range(min = 1, max = 10))]
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds (default: 1000)
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Timeout for a single HTTP request in seconds (default: 10)
    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_max_attempts() -> u32 {
    fetch::DEFAULT_MAX_ATTEMPTS
}

fn default_initial_backoff_ms() -> u64 {
    fetch::DEFAULT_INITIAL_BACKOFF_MS
}

fn default_request_timeout_secs() -> u64 {
    fetch::DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn validate_feed_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("invalid_feed_url")),
    }
}
